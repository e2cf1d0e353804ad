//! Welcome screen and error banner.

use crate::ui::helpers::render_centered;
use crate::ui::layout::GRID_TOP;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the start screen shown before the first search.
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    render_centered(GRID_TOP + 1, &empty.message, &Theme::fg(&theme.colors.empty_state_fg), cols);
    render_centered(
        GRID_TOP + 2,
        &empty.subtitle,
        &format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        cols,
    );
}

/// Renders the error banner that replaces the grid and page strip.
pub fn render_error_banner(error: &EmptyState, theme: &Theme, cols: usize) {
    render_centered(
        GRID_TOP + 1,
        &format!("✗ {}", error.message),
        &format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg)),
        cols,
    );
    render_centered(GRID_TOP + 2, &error.subtitle, &Theme::fg(&theme.colors.text_dim), cols);
}
