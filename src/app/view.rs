// SPDX-License-Identifier: MPL-2.0
//! View rendering for the preview application.

use super::message::{Message, TileId};
use super::preview::{Section, Tile, TILE_SIZE};
use crate::loader::CacheStats;
use iced::widget::{button, container, text, Column, Container, Row, Scrollable};
use iced::{Border, Color, Element, Length, Theme};

const SPACING: f32 = 10.0;
const PADDING: f32 = 16.0;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub sections: &'a [Section],
    pub stats: CacheStats,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let header = Row::new()
        .spacing(SPACING)
        .push(button(text("Reload")).on_press(Message::Reload))
        .push(text(format!(
            "Memory cache: {} images, {} KiB, {:.0}% hits",
            ctx.stats.image_count,
            ctx.stats.total_bytes / 1024,
            ctx.stats.hit_rate()
        )));

    let sections = ctx
        .sections
        .iter()
        .enumerate()
        .fold(Column::new().spacing(SPACING * 2.0), |column, (section_index, section)| {
            column.push(view_section(section_index, section))
        });

    let content = Column::new()
        .spacing(SPACING * 2.0)
        .padding(PADDING)
        .push(header)
        .push(sections);

    Container::new(Scrollable::new(content))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_section(section_index: usize, section: &Section) -> Element<'_, Message> {
    let tiles = section
        .tiles
        .iter()
        .enumerate()
        .fold(Row::new().spacing(SPACING), |row, (index, tile)| {
            let id = TileId {
                section: section_index,
                index,
            };
            row.push(view_tile(id, tile))
        });

    Column::new()
        .spacing(SPACING)
        .push(text(section.title).size(18.0))
        .push(tiles)
        .into()
}

fn view_tile(id: TileId, tile: &Tile) -> Element<'_, Message> {
    let image = tile
        .image
        .view(&tile.request)
        .map(move |message| Message::Tile(id, message));

    let radius = tile.frame.radius();
    let framed = container(image)
        .clip(true)
        .style(move |theme: &Theme| framed_style(theme, radius));

    Column::new()
        .spacing(4.0)
        .max_width(TILE_SIZE * 1.5)
        .push(framed)
        .push(text(tile.caption).size(12.0))
        .into()
}

fn framed_style(theme: &Theme, radius: f32) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        border: Border {
            radius: radius.into(),
            width: if radius > 0.0 { 1.0 } else { 0.0 },
            color: Color {
                a: 0.4,
                ..palette.background.strong.color
            },
        },
        ..container::Style::default()
    }
}
