//! Shared rendering utilities.
//!
//! Low-level pieces used by several components: cursor positioning, centered
//! lines, word wrapping and match highlighting. Widths are counted in
//! characters, not bytes, since titles and overviews are arbitrary Unicode.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` is assumed to occupy.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` characters.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Prints `text` centered on `row`, padded to the full width with `style`.
pub fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = clip(text, cols);
    let len = display_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

/// Clears `row` across the full width.
pub fn clear_row(row: usize, cols: usize) {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));
}

/// Greedy word wrap to `width` characters.
///
/// Words longer than `width` are split hard. Blank input gives no lines.
///
/// ```rust
/// use zinema::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("a hero rises", 7), vec!["a hero", "rises"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if line.is_empty() { word.len() } else { display_width(&line) + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Prints `text` with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices, end exclusive. Highlighting
/// is skipped on the focused tile so it does not fight the selection colors.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }

        let before: String = chars[pos..start].iter().collect();
        let matched: String = chars[start..end].iter().collect();
        print!("{before}");
        print!(
            "{}{}{matched}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        );
        print!("{}", Theme::fg(&theme.colors.text_normal));
        pos = end;
    }

    let rest: String = chars[pos..].iter().collect();
    print!("{rest}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "A thief who steals corporate secrets through dream-sharing technology";
        let lines = wrap_text(text, 20);
        assert!(lines.iter().all(|l| display_width(l) <= 20));
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        assert_eq!(
            wrap_text("supercalifragilistic yes", 8),
            vec!["supercal", "ifragili", "stic yes"]
        );
    }

    #[test]
    fn wrap_of_blank_text_is_empty() {
        assert!(wrap_text("   ", 10).is_empty());
        assert!(wrap_text("word", 0).is_empty());
    }

    #[test]
    fn clip_counts_characters() {
        assert_eq!(clip("Léon: The Professional", 4), "Léon");
        assert_eq!(display_width("Léon"), 4);
    }
}
