// SPDX-License-Identifier: MPL-2.0
//! Remote image view with a generated placeholder.
//!
//! [`AsyncImage`] shows, in order of preference:
//!
//! 1. the loaded image (crossfading in over the placeholder)
//! 2. the bitmap decoded from the request's BlurHash
//! 3. the static fallback drawable
//! 4. nothing
//!
//! The placeholder doubles as the loading, error and missing-locator visual.
//! No failure is surfaced to the caller; the worst case is an empty area.
//!
//! # Usage
//!
//! ```ignore
//! let request = DisplayRequest::new()
//!     .locator(url)
//!     .blur_hash(hash)
//!     .fallback(drawable::MOVIE)
//!     .aspect_ratio(0.66);
//!
//! // In `update`, whenever the request may have changed:
//! let task = poster.sync(&request, &context).map(Message::Poster);
//!
//! // In `view`:
//! poster.view(&request).map(Message::Poster)
//! ```

use super::aspect;
use super::crossfade::{self, Crossfade};
use crate::domain::ui::{AspectRatio, CrossfadeDuration, PlaceholderResolution};
use crate::error::Error;
use crate::loader::{ImageLoader, ImageRequest};
use crate::media::ImageData;
use crate::placeholder::{PlaceholderCache, PlaceholderDecoder, PlaceholderInputs, PlaceholderSource};
use crate::resources::FallbackResolver;
use iced::task;
use iced::widget::image::{Handle, Image};
use iced::widget::{container, responsive, Space, Stack};
use iced::{ContentFit, Element, Length, Padding, Subscription, Task};
use std::time::Instant;

/// How the image is scaled into its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentScale {
    /// Fill the area, cropping the overflow.
    #[default]
    Crop,
    /// Fit inside the area, preserving the image ratio.
    Fit,
    /// Stretch to the area, ignoring the image ratio.
    FillBounds,
    /// Like `Fit`, but never upscale.
    Inside,
    /// Draw at intrinsic size.
    None,
}

impl From<ContentScale> for ContentFit {
    fn from(scale: ContentScale) -> Self {
        match scale {
            ContentScale::Crop => ContentFit::Cover,
            ContentScale::Fit => ContentFit::Contain,
            ContentScale::FillBounds => ContentFit::Fill,
            ContentScale::Inside => ContentFit::ScaleDown,
            ContentScale::None => ContentFit::None,
        }
    }
}

/// Everything the caller says about one image view.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRequest {
    pub locator: Option<String>,
    pub blur_hash: Option<String>,
    /// Resource id of the static drawable, see [`crate::resources::drawable`].
    pub fallback: Option<String>,
    /// Accessibility label for hosts that expose one.
    pub content_description: Option<String>,
    pub aspect_ratio: AspectRatio,
    pub placeholder_resolution: PlaceholderResolution,
    pub content_scale: ContentScale,
    pub width: Length,
    pub height: Length,
    pub padding: Padding,
}

impl Default for DisplayRequest {
    fn default() -> Self {
        Self {
            locator: None,
            blur_hash: None,
            fallback: None,
            content_description: None,
            aspect_ratio: AspectRatio::SQUARE,
            placeholder_resolution: PlaceholderResolution::default(),
            content_scale: ContentScale::default(),
            width: Length::Fill,
            height: Length::Shrink,
            padding: Padding::ZERO,
        }
    }
}

impl DisplayRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locator(mut self, locator: impl Into<String>) -> Self {
        self.locator = Some(locator.into());
        self
    }

    #[must_use]
    pub fn blur_hash(mut self, blur_hash: impl Into<String>) -> Self {
        self.blur_hash = Some(blur_hash.into());
        self
    }

    #[must_use]
    pub fn fallback(mut self, resource_id: impl Into<String>) -> Self {
        self.fallback = Some(resource_id.into());
        self
    }

    #[must_use]
    pub fn content_description(mut self, description: impl Into<String>) -> Self {
        self.content_description = Some(description.into());
        self
    }

    /// Sets the width-to-height ratio. Invalid values fall back to square.
    #[must_use]
    pub fn aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = AspectRatio::new(ratio);
        self
    }

    #[must_use]
    pub fn placeholder_resolution(mut self, resolution: u32) -> Self {
        self.placeholder_resolution = PlaceholderResolution::new(resolution);
        self
    }

    #[must_use]
    pub fn content_scale(mut self, scale: ContentScale) -> Self {
        self.content_scale = scale;
        self
    }

    #[must_use]
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    #[must_use]
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    fn placeholder_inputs(&self) -> PlaceholderInputs<'_> {
        PlaceholderInputs {
            encoding: self.blur_hash.as_deref(),
            fallback: self.fallback.as_deref(),
            ratio: self.aspect_ratio,
            resolution: self.placeholder_resolution,
        }
    }
}

/// Collaborators shared by every image view of a screen.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub loader: &'a ImageLoader,
    pub decoder: &'a dyn PlaceholderDecoder,
    pub resolver: &'a dyn FallbackResolver,
    pub crossfade: CrossfadeDuration,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        locator: String,
        result: Result<ImageData, Error>,
    },
    Tick(Instant),
}

/// What an [`AsyncImage`] currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed {
    Empty,
    Placeholder(PlaceholderSource),
    Crossfading { progress: f32 },
    Image,
}

#[derive(Debug, Default)]
enum Stage {
    /// No usable locator.
    #[default]
    Idle,
    Loading {
        locator: String,
    },
    Loaded {
        locator: String,
        image: ImageData,
        fade: Option<Crossfade>,
    },
    Failed {
        locator: String,
    },
}

impl Stage {
    fn locator(&self) -> Option<&str> {
        match self {
            Stage::Idle => None,
            Stage::Loading { locator }
            | Stage::Loaded { locator, .. }
            | Stage::Failed { locator } => Some(locator),
        }
    }
}

/// Per-instance state of one image view.
///
/// Dropping the instance aborts its in-flight load.
pub struct AsyncImage {
    placeholder: PlaceholderCache,
    stage: Stage,
    load: Option<task::Handle>,
    crossfade: CrossfadeDuration,
    now: Instant,
}

impl std::fmt::Debug for AsyncImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncImage")
            .field("placeholder", &self.placeholder)
            .field("stage", &self.stage)
            .field("loading", &self.load.is_some())
            .finish()
    }
}

impl Default for AsyncImage {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncImage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            placeholder: PlaceholderCache::new(),
            stage: Stage::Idle,
            load: None,
            crossfade: CrossfadeDuration::default(),
            now: Instant::now(),
        }
    }

    /// Brings the instance in line with `request`.
    ///
    /// Re-decodes the placeholder only when its inputs changed and starts a
    /// load only when the locator changed. A load for a previous locator is
    /// aborted. Returns the load task, or [`Task::none`] when nothing new has
    /// to be fetched.
    pub fn sync(&mut self, request: &DisplayRequest, context: &Context<'_>) -> Task<Message> {
        self.placeholder.resolve(
            request.placeholder_inputs(),
            context.decoder,
            context.resolver,
        );

        let image_request =
            ImageRequest::new(request.locator.clone()).crossfade(!context.crossfade.is_instant());
        self.crossfade = if image_request.crossfade {
            context.crossfade
        } else {
            CrossfadeDuration::NONE
        };

        let Some(locator) = image_request.usable_locator().map(str::to_string) else {
            self.stage = Stage::Idle;
            self.load = None;
            return Task::none();
        };

        if self.stage.locator() == Some(locator.as_str()) {
            return Task::none();
        }

        if let Some(image) = context.loader.cached(&locator) {
            tracing::trace!(locator = %locator, "showing image from memory cache");
            self.stage = Stage::Loaded {
                locator,
                image,
                fade: None,
            };
            self.load = None;
            return Task::none();
        }

        self.stage = Stage::Loading {
            locator: locator.clone(),
        };

        let loader = context.loader.clone();
        let (task, handle) = Task::perform(
            async move { loader.load(image_request).await },
            move |result| Message::Loaded { locator, result },
        )
        .abortable();

        // Replacing the handle aborts the previous load.
        self.load = Some(handle.abort_on_drop());
        task
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Loaded { locator, result } => {
                if !matches!(&self.stage, Stage::Loading { locator: current } if *current == locator)
                {
                    tracing::trace!(locator = %locator, "ignoring stale load result");
                    return;
                }
                self.load = None;
                self.now = Instant::now();

                self.stage = match result {
                    Ok(image) => {
                        let fade = (!self.crossfade.is_instant())
                            .then(|| Crossfade::start(self.now, self.crossfade));
                        Stage::Loaded {
                            locator,
                            image,
                            fade,
                        }
                    }
                    Err(err) => {
                        tracing::debug!(locator = %locator, error = %err, "image unavailable, keeping placeholder");
                        Stage::Failed { locator }
                    }
                };
            }
            Message::Tick(now) => {
                self.now = now;
                if let Stage::Loaded { fade, .. } = &mut self.stage {
                    if fade.is_some_and(|fade| fade.is_finished(now)) {
                        *fade = None;
                    }
                }
            }
        }
    }

    /// Animation ticks while a crossfade is running.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.is_animating() {
            iced::time::every(crossfade::FRAME_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.stage, Stage::Loaded { fade: Some(_), .. })
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.stage, Stage::Loading { .. })
    }

    #[must_use]
    pub fn placeholder(&self) -> &PlaceholderCache {
        &self.placeholder
    }

    #[must_use]
    pub fn displayed(&self) -> Displayed {
        match &self.stage {
            Stage::Loaded {
                fade: Some(fade), ..
            } if !fade.is_finished(self.now) => Displayed::Crossfading {
                progress: fade.progress(self.now),
            },
            Stage::Loaded { .. } => Displayed::Image,
            Stage::Idle | Stage::Loading { .. } | Stage::Failed { .. } => self
                .placeholder
                .current()
                .map_or(Displayed::Empty, |visual| {
                    Displayed::Placeholder(visual.source.clone())
                }),
        }
    }

    /// Renders the image area for `request`.
    ///
    /// The area keeps `request.aspect_ratio`; a fixed width or height from the
    /// request determines its size, otherwise it takes the largest size that
    /// fits the available space.
    pub fn view<'a>(&'a self, request: &DisplayRequest) -> Element<'a, Message> {
        let fit = ContentFit::from(request.content_scale);
        let ratio = request.aspect_ratio;

        let area: Element<'a, Message> =
            match aspect::fixed_size(request.width, request.height, ratio) {
                Some(size) => container(self.layers(fit))
                    .width(size.width)
                    .height(size.height)
                    .clip(true)
                    .into(),
                None => responsive(move |available| -> Element<'a, Message> {
                    let size = aspect::constrain(available, ratio);
                    container(self.layers(fit))
                        .width(size.width)
                        .height(size.height)
                        .clip(true)
                        .into()
                })
                .into(),
            };

        container(area).padding(request.padding).into()
    }

    fn layers(&self, fit: ContentFit) -> Element<'_, Message> {
        let placeholder = self.placeholder.current().map(|visual| &visual.image);

        match (&self.stage, placeholder) {
            (
                Stage::Loaded {
                    image,
                    fade: Some(fade),
                    ..
                },
                placeholder,
            ) => {
                let progress = fade.progress(self.now);
                let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);
                if let Some(placeholder) = placeholder {
                    layers = layers.push(layer(placeholder, fit, 1.0 - progress));
                }
                layers.push(layer(image, fit, progress)).into()
            }
            (Stage::Loaded { image, .. }, _) => layer(image, fit, 1.0).into(),
            (_, Some(placeholder)) => layer(placeholder, fit, 1.0).into(),
            (_, None) => Space::new()
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
        }
    }
}

fn layer(image: &ImageData, fit: ContentFit, opacity: f32) -> Image<Handle> {
    Image::new(image.handle.clone())
        .content_fit(fit)
        .width(Length::Fill)
        .height(Length::Fill)
        .opacity(opacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoaderConfig;
    use crate::placeholder::tests::{TRUNCATED_HASH, VALID_HASH};
    use crate::placeholder::BlurHashDecoder;
    use crate::resources::drawable;
    use image_rs::{Rgba, RgbaImage};
    use std::time::Duration;

    const POSTER_URL: &str = "https://demo.jellyfin.org/stable/Items/b07f6514-a3e3-aa7d-8c27-3458c9cd4c82/Images/Primary?tag=29526c6e8f8d9286c8f6d03275da6ebd";

    fn loader() -> ImageLoader {
        ImageLoader::new(&LoaderConfig::default(), None).expect("client builds")
    }

    struct Icons;

    impl FallbackResolver for Icons {
        fn resolve(&self, _id: &str) -> Option<ImageData> {
            Some(ImageData::from_rgba(4, 4, vec![255; 64]))
        }
    }

    fn pixel() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    fn context<'a>(loader: &'a ImageLoader, decoder: &'a BlurHashDecoder) -> Context<'a> {
        Context {
            loader,
            decoder,
            resolver: &Icons,
            crossfade: CrossfadeDuration::from_millis(200),
        }
    }

    #[test]
    fn content_scale_maps_to_content_fit() {
        assert_eq!(ContentFit::from(ContentScale::default()), ContentFit::Cover);
        assert_eq!(ContentFit::from(ContentScale::Fit), ContentFit::Contain);
        assert_eq!(ContentFit::from(ContentScale::FillBounds), ContentFit::Fill);
        assert_eq!(ContentFit::from(ContentScale::Inside), ContentFit::ScaleDown);
        assert_eq!(ContentFit::from(ContentScale::None), ContentFit::None);
    }

    #[test]
    fn request_builder_sanitizes_values() {
        let request = DisplayRequest::new()
            .aspect_ratio(-3.0)
            .placeholder_resolution(0)
            .width(120.0);

        assert_eq!(request.aspect_ratio, AspectRatio::SQUARE);
        assert_eq!(request.placeholder_resolution.value(), 1);
        assert_eq!(request.width, Length::Fixed(120.0));
        assert_eq!(request.content_scale, ContentScale::Crop);
    }

    #[test]
    fn valid_hash_shows_blurhash_while_loading() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new()
            .locator(POSTER_URL)
            .blur_hash(VALID_HASH)
            .fallback(drawable::MOVIE)
            .aspect_ratio(0.66)
            .placeholder_resolution(16);

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &context(&loader, &decoder));

        assert!(poster.is_loading());
        assert_eq!(poster.displayed(), Displayed::Placeholder(PlaceholderSource::BlurHash));
        let visual = poster.placeholder().current().expect("placeholder");
        assert_eq!((visual.image.width, visual.image.height), (16, 24));
    }

    #[test]
    fn truncated_hash_with_empty_locator_shows_fallback() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new()
            .locator("")
            .blur_hash(TRUNCATED_HASH)
            .fallback(drawable::MOVIE);

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &context(&loader, &decoder));

        assert!(!poster.is_loading());
        assert_eq!(
            poster.displayed(),
            Displayed::Placeholder(PlaceholderSource::Fallback(drawable::MOVIE.into()))
        );
    }

    #[test]
    fn nothing_usable_shows_empty_area() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new().locator("").blur_hash("not a hash");

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &context(&loader, &decoder));

        assert_eq!(poster.displayed(), Displayed::Empty);
        let _ = poster.view(&request);
    }

    #[test]
    fn repeated_sync_is_idempotent() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new().locator(POSTER_URL).blur_hash(VALID_HASH);
        let ctx = context(&loader, &decoder);

        let mut poster = AsyncImage::new();
        let _first = poster.sync(&request, &ctx);
        let before = poster.displayed();
        let _second = poster.sync(&request, &ctx);

        assert_eq!(poster.displayed(), before);
        assert_eq!(poster.placeholder().decode_count(), 1);
        assert!(poster.is_loading());

        let _third = poster.sync(&request.clone().placeholder_resolution(8), &ctx);
        assert_eq!(poster.placeholder().decode_count(), 2);
    }

    #[test]
    fn sync_redecodes_changed_hash_for_same_locator() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let ctx = context(&loader, &decoder);
        let request = DisplayRequest::new().locator(POSTER_URL).blur_hash("not a hash");

        let mut poster = AsyncImage::new();
        let _first = poster.sync(&request, &ctx);
        assert_eq!(poster.displayed(), Displayed::Empty);

        let _second = poster.sync(&request.clone().blur_hash(VALID_HASH), &ctx);
        assert!(poster.is_loading());
        assert_eq!(poster.placeholder().decode_count(), 2);
        assert_eq!(poster.displayed(), Displayed::Placeholder(PlaceholderSource::BlurHash));
    }

    #[test]
    fn successful_load_crossfades_then_settles() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new().locator(POSTER_URL).blur_hash(VALID_HASH);

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &context(&loader, &decoder));
        poster.update(Message::Loaded {
            locator: POSTER_URL.into(),
            result: Ok(pixel()),
        });

        assert!(poster.is_animating());
        assert!(matches!(poster.displayed(), Displayed::Crossfading { progress } if progress < 0.5));

        poster.update(Message::Tick(Instant::now() + Duration::from_secs(1)));
        assert!(!poster.is_animating());
        assert_eq!(poster.displayed(), Displayed::Image);
    }

    #[test]
    fn instant_crossfade_shows_image_immediately() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let request = DisplayRequest::new().locator(POSTER_URL);
        let ctx = Context {
            crossfade: CrossfadeDuration::NONE,
            ..context(&loader, &decoder)
        };

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &ctx);
        poster.update(Message::Loaded {
            locator: POSTER_URL.into(),
            result: Ok(pixel()),
        });

        assert!(!poster.is_animating());
        assert_eq!(poster.displayed(), Displayed::Image);
    }

    #[test]
    fn failed_load_keeps_placeholder() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let corrupt = "82/Images/Primary?tag=29526c6e8f8d9286c8f6d03275da6ebd";
        let request = DisplayRequest::new().locator(corrupt).blur_hash(VALID_HASH);

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &context(&loader, &decoder));
        poster.update(Message::Loaded {
            locator: corrupt.into(),
            result: Err(Error::UnsupportedLocator(corrupt.into())),
        });

        assert!(!poster.is_loading());
        assert_eq!(poster.displayed(), Displayed::Placeholder(PlaceholderSource::BlurHash));

        // Same locator again does not retry.
        let _again = poster.sync(&request, &context(&loader, &decoder));
        assert!(!poster.is_loading());
    }

    #[test]
    fn stale_results_are_ignored() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let ctx = context(&loader, &decoder);

        let mut poster = AsyncImage::new();
        let _old = poster.sync(&DisplayRequest::new().locator("https://host/old.jpg"), &ctx);
        let _new = poster.sync(&DisplayRequest::new().locator("https://host/new.jpg"), &ctx);
        poster.update(Message::Loaded {
            locator: "https://host/old.jpg".into(),
            result: Ok(pixel()),
        });

        assert!(poster.is_loading());
        assert_eq!(poster.displayed(), Displayed::Empty);
    }

    #[test]
    fn clearing_the_locator_returns_to_placeholder() {
        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        let ctx = context(&loader, &decoder);
        let request = DisplayRequest::new().locator(POSTER_URL).fallback(drawable::TV);

        let mut poster = AsyncImage::new();
        let _task = poster.sync(&request, &ctx);
        poster.update(Message::Loaded {
            locator: POSTER_URL.into(),
            result: Ok(pixel()),
        });

        let mut cleared = request.clone();
        cleared.locator = None;
        let _task = poster.sync(&cleared, &ctx);

        assert_eq!(
            poster.displayed(),
            Displayed::Placeholder(PlaceholderSource::Fallback(drawable::TV.into()))
        );
    }

    #[tokio::test]
    async fn memory_cached_image_shows_on_first_sync() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("still.png");
        RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");
        let locator = reqwest::Url::from_file_path(&path)
            .expect("absolute path")
            .to_string();

        let (loader, decoder) = (loader(), BlurHashDecoder::default());
        loader
            .load(ImageRequest::new(Some(locator.clone())))
            .await
            .expect("file loads");

        let mut poster = AsyncImage::new();
        let _task = poster.sync(
            &DisplayRequest::new().locator(locator).blur_hash(VALID_HASH),
            &context(&loader, &decoder),
        );

        assert!(!poster.is_loading());
        assert_eq!(poster.displayed(), Displayed::Image);
    }
}
