//! Loading line and notification line.

use crate::ui::helpers::{clear_row, clip, display_width, position_cursor, render_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{NotificationInfo, NotificationKind};

/// Shows the loader while a request for the current key is in flight.
///
/// The previous page stays on screen underneath.
pub fn render_status(row: usize, loading: bool, theme: &Theme, cols: usize) {
    if loading {
        render_centered(row, "⠿ Loading…", &Theme::fg(&theme.colors.loader_fg), cols);
    } else {
        clear_row(row, cols);
    }
}

pub fn render_notification(
    row: usize,
    notification: Option<&NotificationInfo>,
    theme: &Theme,
    cols: usize,
) {
    let Some(notification) = notification else {
        clear_row(row, cols);
        return;
    };

    let style = match notification.kind {
        NotificationKind::Info => format!(
            "{}{}",
            Theme::fg(&theme.colors.notification_fg),
            Theme::bg(&theme.colors.notification_bg)
        ),
        NotificationKind::Error => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg)),
    };

    clear_row(row, cols);
    let text = format!(" {} ", notification.message);
    let len = display_width(&text).min(cols);
    let col = cols.saturating_sub(len) / 2 + 1;
    position_cursor(row, col);
    print!("{style}{}{}", clip(&text, cols), Theme::reset());
}
