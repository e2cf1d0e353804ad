//! Detail overlay renderer.
//!
//! Drawn after everything else so it covers the grid. The box is opaque: every
//! interior cell is overwritten, including padding.
//!
//! ```text
//! ╭──────────────────────────────[x]─╮
//! │ The Dark Knight                  │
//! │ Released 2008-07-16 · ★ 8.5/10   │
//! │                                  │
//! │ Batman raises the stakes in his  │
//! │ war on crime...                  │
//! │                                  │
//! │ Poster   https://image.tmdb...   │
//! ╰──────────────────────────────────╯
//! ```

use crate::ui::helpers::{clip, display_width, position_cursor, wrap_text};
use crate::ui::layout::ScreenLayout;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Title,
    Meta,
    Body,
    Link,
}

pub fn render_detail(detail: &DetailInfo, layout: &ScreenLayout, theme: &Theme) {
    let modal = layout.modal();
    let close = layout.close_button();
    let inner_width = modal.width.saturating_sub(4);
    let inner_height = modal.height.saturating_sub(2);
    let frame = Theme::fg(&theme.colors.modal_border);

    position_cursor(modal.row, modal.col);
    print!(
        "{frame}╭{}{}{}{frame}[x]{}{frame}─╮{}",
        "─".repeat(close.col.saturating_sub(modal.col + 1)),
        Theme::reset(),
        Theme::bold(),
        Theme::reset(),
        Theme::reset()
    );

    let mut lines = body_lines(detail, inner_width);
    lines.truncate(inner_height);

    for offset in 0..inner_height {
        position_cursor(modal.row + 1 + offset, modal.col);
        print!("{frame}│{} ", Theme::reset());

        let (style, text) = lines
            .get(offset)
            .map_or((LineStyle::Body, ""), |(style, text)| (*style, text.as_str()));
        let text = clip(text, inner_width);
        let style = match style {
            LineStyle::Title => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
            LineStyle::Meta => Theme::fg(&theme.colors.rating_fg),
            LineStyle::Body => Theme::fg(&theme.colors.text_normal),
            LineStyle::Link => Theme::fg(&theme.colors.text_dim),
        };
        print!("{style}{text}{}", Theme::reset());
        print!("{}", " ".repeat(inner_width.saturating_sub(display_width(&text))));
        print!(" {frame}│{}", Theme::reset());
    }

    position_cursor(modal.row + modal.height.saturating_sub(1), modal.col);
    print!(
        "{frame}╰{}╯{}",
        "─".repeat(modal.width.saturating_sub(2)),
        Theme::reset()
    );
}

/// Lays out the overlay content for an interior `width`.
///
/// The overview is wrapped; image links are appended when present and may be
/// cut off at the bottom of small panes.
fn body_lines(detail: &DetailInfo, width: usize) -> Vec<(LineStyle, String)> {
    let mut lines = vec![(LineStyle::Title, detail.title.clone())];
    lines.push((
        LineStyle::Meta,
        format!("Released {} · ★ {}", detail.release_date, detail.rating),
    ));
    lines.push((LineStyle::Body, String::new()));
    lines.extend(
        wrap_text(&detail.overview, width)
            .into_iter()
            .map(|line| (LineStyle::Body, line)),
    );

    let links = [("Poster  ", &detail.poster_url), ("Backdrop", &detail.backdrop_url)];
    if links.iter().any(|(_, url)| url.is_some()) {
        lines.push((LineStyle::Body, String::new()));
    }
    for (label, url) in links {
        if let Some(url) = url {
            lines.push((LineStyle::Link, format!("{label} {url}")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> DetailInfo {
        DetailInfo {
            title: "Heat".into(),
            overview: "Obsessive master thief Neil McCauley leads a top-notch crew".into(),
            release_date: "1995-12-15".into(),
            rating: "7.9/10".into(),
            poster_url: Some("https://image.tmdb.org/t/p/w342/heat.jpg".into()),
            backdrop_url: None,
        }
    }

    #[test]
    fn content_starts_with_title_and_meta() {
        let lines = body_lines(&detail(), 30);
        assert_eq!(lines[0], (LineStyle::Title, "Heat".to_string()));
        assert_eq!(lines[1].1, "Released 1995-12-15 · ★ 7.9/10");
    }

    #[test]
    fn overview_is_wrapped_and_missing_links_skipped() {
        let lines = body_lines(&detail(), 30);
        let body: Vec<_> = lines
            .iter()
            .filter(|(style, text)| *style == LineStyle::Body && !text.is_empty())
            .collect();
        assert!(body.iter().all(|(_, text)| display_width(text) <= 30));
        assert_eq!(body.len(), 3);

        let links: Vec<_> = lines.iter().filter(|(s, _)| *s == LineStyle::Link).collect();
        assert_eq!(links.len(), 1);
        assert!(links[0].1.starts_with("Poster"));
    }
}
