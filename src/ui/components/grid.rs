//! Result grid renderer.
//!
//! Each tile takes two lines inside its [`Rect`](crate::ui::layout::Rect):
//!
//! ```text
//! ▸ The Dark Knight
//!   2008 · ★ 8.5/10
//! ```

use crate::ui::helpers::{display_width, position_cursor, render_highlighted_text};
use crate::ui::layout::ScreenLayout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TileItem;

pub fn render_grid(tiles: &[TileItem], layout: &ScreenLayout, theme: &Theme) {
    for tile in tiles {
        render_tile(tile, layout, theme);
    }
}

fn render_tile(tile: &TileItem, layout: &ScreenLayout, theme: &Theme) {
    let rect = layout.tile_rect(tile.slot);
    let marker = if tile.is_selected { "▸ " } else { "  " };
    let padding = rect
        .width
        .saturating_sub(display_width(marker) + display_width(&tile.title));

    position_cursor(rect.row, rect.col);
    if tile.is_selected {
        print!(
            "{}{}{}",
            Theme::bold(),
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        );
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{marker}");
    render_highlighted_text(&tile.title, &tile.highlight_ranges, theme, tile.is_selected);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::reset());

    let (year, rating) = tile
        .subtitle
        .split_once('★')
        .unwrap_or((tile.subtitle.as_str(), ""));
    position_cursor(rect.row + 1, rect.col);
    print!("  {}{year}", Theme::fg(&theme.colors.text_dim));
    if !rating.is_empty() {
        print!("{}★{rating}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{}", Theme::reset());
}
