// SPDX-License-Identifier: MPL-2.0
//! Preview application hosting a grid of [`AsyncImage`] tiles.
//!
//! The `App` owns the shared collaborators (loader, BlurHash decoder, bundled
//! drawables) and routes each tile's messages back to that tile's state.
//!
//! [`AsyncImage`]: crate::ui::AsyncImage

mod message;
pub mod preview;
mod view;

pub use message::{Flags, Message, TileId};

use crate::domain::ui::CrossfadeDuration;
use crate::loader::ImageLoader;
use crate::placeholder::BlurHashDecoder;
use crate::resources::BundledDrawables;
use crate::ui::{AsyncImage, Context};
use iced::{window, Element, Subscription, Task, Theme};
use preview::{Section, Tile};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

const WINDOW_TITLE: &str = "Iced Poster";

/// Root application state.
pub struct App {
    loader: ImageLoader,
    decoder: BlurHashDecoder,
    drawables: BundledDrawables,
    crossfade: CrossfadeDuration,
    sections: Vec<Section>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("loader", &self.loader)
            .field("crossfade", &self.crossfade)
            .field("sections", &self.sections.len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        if let Some(warning) = &flags.config_warning {
            tracing::warn!(%warning, "using default configuration");
        }

        let config = flags.config;
        let url = flags.url.as_deref().unwrap_or(preview::DEMO_URL);

        let mut app = App {
            loader: flags.loader,
            decoder: BlurHashDecoder::new(config.placeholder_punch()),
            drawables: BundledDrawables::default(),
            crossfade: config.crossfade_duration(),
            sections: preview::sections(url, config.placeholder_resolution()),
        };

        let task = app.sync_all();
        (app, task)
    }

    /// Syncs every tile with its request and collects the resulting loads.
    fn sync_all(&mut self) -> Task<Message> {
        let context = Context {
            loader: &self.loader,
            decoder: &self.decoder,
            resolver: &self.drawables,
            crossfade: self.crossfade,
        };

        let mut tasks = Vec::new();
        for (section_index, section) in self.sections.iter_mut().enumerate() {
            for (index, tile) in section.tiles.iter_mut().enumerate() {
                let id = TileId {
                    section: section_index,
                    index,
                };
                tasks.push(
                    tile.image
                        .sync(&tile.request, &context)
                        .map(move |message| Message::Tile(id, message)),
                );
            }
        }

        Task::batch(tasks)
    }

    fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.tiles.iter_mut())
    }

    fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.sections
            .get_mut(id.section)
            .and_then(|section| section.tiles.get_mut(id.index))
    }

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tile(id, message) => {
                if let Some(tile) = self.tile_mut(id) {
                    tile.image.update(message);
                }
                Task::none()
            }
            Message::Reload => {
                self.loader.clear_memory();
                for tile in self.tiles_mut() {
                    tile.image = AsyncImage::new();
                }
                tracing::info!("reloading preview tiles");
                self.sync_all()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            sections: &self.sections,
            stats: self.loader.stats(),
        })
    }

    /// Each tile's own subscription, tagged with its position in the grid.
    fn subscription(&self) -> Subscription<Message> {
        let tiles = self
            .sections
            .iter()
            .enumerate()
            .flat_map(|(section_index, section)| {
                section.tiles.iter().enumerate().map(move |(index, tile)| {
                    let id = TileId {
                        section: section_index,
                        index,
                    };
                    tile.image
                        .subscription()
                        .with(id)
                        .map(|(id, message)| Message::Tile(id, message))
                })
            });

        Subscription::batch(tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::resources::drawable;
    use crate::placeholder::PlaceholderSource;
    use crate::ui::{async_image, Displayed};

    fn app() -> App {
        let config = Config::default();
        let loader = ImageLoader::new(&config.loader, None).expect("client builds");
        let flags = Flags {
            config,
            config_warning: Some("test warning".into()),
            loader,
            url: None,
        };
        App::new(flags).0
    }

    fn displayed(app: &App, section: usize, index: usize) -> Displayed {
        app.sections[section].tiles[index].image.displayed()
    }

    #[test]
    fn boot_resolves_every_placeholder() {
        let app = app();

        assert_eq!(displayed(&app, 0, 0), Displayed::Placeholder(PlaceholderSource::BlurHash));
        assert_eq!(displayed(&app, 1, 0), Displayed::Placeholder(PlaceholderSource::BlurHash));
        assert_eq!(
            displayed(&app, 1, 1),
            Displayed::Placeholder(PlaceholderSource::Fallback(drawable::MOVIE.into()))
        );
        for index in 0..4 {
            assert_eq!(
                displayed(&app, 2, index),
                Displayed::Placeholder(PlaceholderSource::BlurHash)
            );
        }
    }

    #[test]
    fn resolution_row_decodes_at_requested_sizes() {
        let app = app();
        let sizes: Vec<(u32, u32)> = app.sections[2]
            .tiles
            .iter()
            .filter_map(|tile| tile.image.placeholder().current())
            .map(|visual| (visual.image.width, visual.image.height))
            .collect();

        assert_eq!(sizes, vec![(8, 12), (16, 24), (32, 48), (128, 194)]);
    }

    #[test]
    fn messages_for_unknown_tiles_are_ignored() {
        let mut app = app();
        let _ = app.update(Message::Tile(
            TileId {
                section: 9,
                index: 9,
            },
            async_image::Message::Tick(std::time::Instant::now()),
        ));
        assert_eq!(app.sections.len(), 3);
    }

    #[test]
    fn loaded_tile_settles_after_ticks() {
        let mut app = app();
        let id = TileId {
            section: 0,
            index: 0,
        };
        let _ = app.update(Message::Tile(
            id,
            async_image::Message::Loaded {
                locator: preview::DEMO_URL.into(),
                result: Ok(crate::media::ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])),
            },
        ));
        assert!(matches!(displayed(&app, 0, 0), Displayed::Crossfading { .. }));

        let later = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let _ = app.update(Message::Tile(id, async_image::Message::Tick(later)));
        assert_eq!(displayed(&app, 0, 0), Displayed::Image);
    }

    #[test]
    fn only_crossfading_tiles_drive_frames() {
        let mut app = app();
        assert!(!app.tiles_mut().any(|tile| tile.image.is_animating()));

        let id = TileId {
            section: 0,
            index: 0,
        };
        let _ = app.update(Message::Tile(
            id,
            async_image::Message::Loaded {
                locator: preview::DEMO_URL.into(),
                result: Ok(crate::media::ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])),
            },
        ));

        let animating: Vec<bool> = app
            .tiles_mut()
            .map(|tile| tile.image.is_animating())
            .collect();
        assert!(animating[0]);
        assert_eq!(animating.iter().filter(|&&on| on).count(), 1);
        let _ = app.subscription();
    }

    #[test]
    fn configured_resolution_reaches_tile_requests() {
        let mut config = Config::default();
        config.placeholder.resolution = Some(12);
        let loader = ImageLoader::new(&config.loader, None).expect("client builds");
        let app = App::new(Flags {
            config,
            config_warning: None,
            loader,
            url: None,
        })
        .0;

        let tile = &app.sections[0].tiles[1];
        assert_eq!(tile.request.placeholder_resolution.value(), 12);
        let visual = tile.image.placeholder().current().expect("placeholder");
        assert_eq!(visual.image.width.min(visual.image.height), 12);
    }

    #[test]
    fn title_is_static() {
        assert_eq!(app().title(), WINDOW_TITLE);
    }
}
