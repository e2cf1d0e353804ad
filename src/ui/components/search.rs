//! Search bar component renderer.
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │ Search: the dark kn▏         │
//!   └──────────────────────────────┘
//! ```

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the box.
const SEARCH_BOX_MARGIN: usize = 2;

const PROMPT: &str = " Search: ";

/// Renders the three-line search box starting at `row`.
///
/// While typing, the tail of the buffer is shown with a cursor mark so long
/// queries stay readable. An empty, inactive bar shows the last submitted
/// query dimmed.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let text_width = inner_width.saturating_sub(display_width(PROMPT) + 1);
    let border = if search.active {
        theme.colors.search_bar_border.as_str()
    } else {
        theme.colors.border.as_str()
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let (text, style) = if search.query.is_empty() && !search.active {
        (search.placeholder.clone(), Theme::fg(&theme.colors.text_dim))
    } else {
        let visible: String = {
            let chars: Vec<char> = search.query.chars().collect();
            chars[chars.len().saturating_sub(text_width)..].iter().collect()
        };
        let cursor = if search.active { "▏" } else { "" };
        (format!("{visible}{cursor}"), Theme::fg(&theme.colors.text_normal))
    };
    let text: String = text.chars().take(text_width + 1).collect();
    let padding = inner_width.saturating_sub(display_width(PROMPT) + display_width(&text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    print!("{}{PROMPT}", Theme::fg(&theme.colors.text_dim));
    print!("{style}{text}");
    print!("{}", " ".repeat(padding));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
