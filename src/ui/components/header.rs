//! Header component renderer.

use crate::ui::helpers::{clip, display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title on the left and the result summary on the right.
///
/// The summary is dropped when the pane is too narrow for both.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = clip(&header.title, cols);
    let title_len = display_width(&title);

    let summary = header
        .summary
        .as_deref()
        .map(|s| format!("{s} "))
        .filter(|s| title_len + display_width(s) < cols)
        .unwrap_or_default();
    let gap = cols.saturating_sub(title_len + display_width(&summary));

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}{title}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(gap));
    print!("{}{summary}", Theme::fg(&theme.colors.text_dim));
    print!("{}", Theme::reset());
    row + 1
}
