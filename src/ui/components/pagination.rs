//! Page strip renderer.

use crate::ui::helpers::{clear_row, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Draws each label at the column the layout assigned to it, so clicks
/// resolve against exactly what is on screen.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) {
    clear_row(row, cols);

    for label in &pagination.labels {
        position_cursor(row, label.col);
        let style = if label.is_current {
            format!(
                "{}{}{}",
                Theme::bold(),
                Theme::fg(&theme.colors.selection_fg),
                Theme::bg(&theme.colors.selection_bg)
            )
        } else if label.target.is_none() {
            Theme::fg(&theme.colors.text_dim)
        } else {
            Theme::fg(&theme.colors.text_normal)
        };
        print!("{style}{}{}", label.text, Theme::reset());
    }
}
