//! Composable UI component renderers.
//!
//! Each component prints one region of the frame at the rows
//! [`ScreenLayout`](crate::ui::layout::ScreenLayout) assigns it.
//!
//! - [`header`]: title and result summary
//! - [`search`]: search box
//! - [`status`]: loading line and notification line
//! - [`grid`]: result tiles
//! - [`empty`]: welcome screen and error banner
//! - [`pagination`]: page strip
//! - [`detail`]: detail overlay
//! - [`footer`]: keybinding hints

mod detail;
mod empty;
mod footer;
mod grid;
mod header;
mod pagination;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::layout::{HEADER_ROW, NOTIFICATION_ROW, SEARCH_ROW, STATUS_ROW};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::{render_empty_state, render_error_banner};
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::{render_notification, render_status};

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Renders one full frame.
///
/// Order matters: the overlay comes last so it paints over the grid.
pub fn render_frame(vm: &UIViewModel, theme: &Theme) {
    let layout = &vm.layout;
    let cols = layout.cols;

    let row = render_header(HEADER_ROW, &vm.header, theme, cols);
    render_border(row, &theme.colors.border, cols);
    render_search_bar(SEARCH_ROW, &vm.search_bar, theme, cols);
    render_status(STATUS_ROW, vm.loading, theme, cols);
    render_notification(NOTIFICATION_ROW, vm.notification.as_ref(), theme, cols);

    match &vm.body {
        Body::Welcome(empty) => render_empty_state(empty, theme, cols),
        Body::Grid(tiles) => render_grid(tiles, layout, theme),
        Body::Error(error) => render_error_banner(error, theme, cols),
    }

    if let Some(pagination) = &vm.pagination {
        render_pagination(layout.pagination_row, pagination, theme, cols);
    }

    render_border(layout.footer_row.saturating_sub(1), &theme.colors.border, cols);
    render_footer(layout.footer_row, &vm.footer, theme, cols);

    if let Some(detail) = &vm.detail {
        render_detail(detail, layout, theme);
    }
}
