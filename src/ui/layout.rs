//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Everything here is a pure function of the pane size, so the handler can
//! resolve a click to the same tile, page label or overlay region the
//! renderer drew there. Rows and columns are 1-indexed, matching
//! [`position_cursor`](crate::ui::helpers::position_cursor).
//!
//! ```text
//! row 1            header
//! row 2            border
//! rows 3-5         search bar
//! row 6            loading / status line
//! row 7            notification line
//! row 9..          grid (tiles are TILE_HEIGHT lines, last one blank)
//! rows - 2         page strip
//! rows - 1         border
//! rows             footer
//! ```

/// Horizontal space per tile, including the gap to the next one.
pub const TILE_WIDTH: usize = 26;

/// Vertical space per tile, including the blank separator line.
pub const TILE_HEIGHT: usize = 3;

pub const HEADER_ROW: usize = 1;
pub const SEARCH_ROW: usize = 3;
pub const STATUS_ROW: usize = 6;
pub const NOTIFICATION_ROW: usize = 7;
pub const GRID_TOP: usize = 9;

const TILE_GAP: usize = 2;
const MODAL_MAX_WIDTH: usize = 72;
const MODAL_MAX_HEIGHT: usize = 18;

/// An axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, line: usize, col: usize) -> bool {
        line >= self.row
            && line < self.row + self.height
            && col >= self.col
            && col < self.col + self.width
    }
}

/// Geometry of the plugin pane for one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub rows: usize,
    pub cols: usize,
    /// Tiles per grid row.
    pub columns: usize,
    /// Grid rows that fit between the notification line and the page strip.
    pub visible_tile_rows: usize,
    pub pagination_row: usize,
    pub footer_row: usize,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::for_viewport(24, 80)
    }
}

impl ScreenLayout {
    #[must_use]
    pub fn for_viewport(rows: usize, cols: usize) -> Self {
        let pagination_row = rows.saturating_sub(2);
        let grid_lines = pagination_row.saturating_sub(GRID_TOP);

        Self {
            rows,
            cols,
            columns: (cols / TILE_WIDTH).max(1),
            visible_tile_rows: (grid_lines / TILE_HEIGHT).max(1),
            pagination_row,
            footer_row: rows,
        }
    }

    /// Number of tiles visible at once.
    #[must_use]
    pub const fn visible_tiles(&self) -> usize {
        self.columns * self.visible_tile_rows
    }

    /// Rectangle of the tile drawn in visible slot `slot`.
    #[must_use]
    pub const fn tile_rect(&self, slot: usize) -> Rect {
        Rect {
            row: GRID_TOP + (slot / self.columns) * TILE_HEIGHT,
            col: 1 + (slot % self.columns) * TILE_WIDTH,
            width: TILE_WIDTH - TILE_GAP,
            height: TILE_HEIGHT - 1,
        }
    }

    /// Resolves a click to an item index, given the first visible grid row.
    #[must_use]
    pub fn tile_at(&self, line: usize, col: usize, first_row: usize, item_count: usize) -> Option<usize> {
        if line < GRID_TOP || col == 0 {
            return None;
        }

        let relative_line = line - GRID_TOP;
        let tile_row = relative_line / TILE_HEIGHT;
        if tile_row >= self.visible_tile_rows || relative_line % TILE_HEIGHT == TILE_HEIGHT - 1 {
            return None;
        }

        let relative_col = col - 1;
        let tile_col = relative_col / TILE_WIDTH;
        if tile_col >= self.columns || relative_col % TILE_WIDTH >= TILE_WIDTH - TILE_GAP {
            return None;
        }

        let index = (first_row + tile_row) * self.columns + tile_col;
        (index < item_count).then_some(index)
    }

    /// Rectangle of the detail overlay box, centered in the pane.
    #[must_use]
    pub fn modal(&self) -> Rect {
        let width = self
            .cols
            .saturating_sub(8)
            .min(MODAL_MAX_WIDTH)
            .max(self.cols.min(20));
        let height = self
            .rows
            .saturating_sub(4)
            .min(MODAL_MAX_HEIGHT)
            .max(self.rows.min(8));

        Rect {
            row: (self.rows - height) / 2 + 1,
            col: (self.cols - width) / 2 + 1,
            width,
            height,
        }
    }

    /// The `[x]` control in the overlay's top border.
    #[must_use]
    pub fn close_button(&self) -> Rect {
        let modal = self.modal();
        Rect {
            row: modal.row,
            col: modal.col + modal.width.saturating_sub(5),
            width: 3,
            height: 1,
        }
    }
}

/// One clickable entry of the page strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLabel {
    pub text: String,
    /// Zero-based page the label leads to, `None` for gaps and disabled arrows.
    pub target: Option<usize>,
    /// First column the label is drawn at.
    pub col: usize,
    pub is_current: bool,
}

impl PageLabel {
    #[must_use]
    pub fn contains(&self, col: usize) -> bool {
        col >= self.col && col < self.col + self.text.chars().count()
    }
}

/// Lays out the page strip for `page_count` pages with zero-based `selected`.
///
/// Shows the first and last page, a window of five around the selection, and
/// `…` for skipped runs, centered in `cols`.
#[must_use]
pub fn pagination_labels(page_count: usize, selected: usize, cols: usize) -> Vec<PageLabel> {
    const WINDOW: usize = 5;

    if page_count == 0 {
        return vec![];
    }
    let selected = selected.min(page_count - 1);

    let mut entries: Vec<(String, Option<usize>, bool)> = Vec::new();
    entries.push(("‹".to_string(), selected.checked_sub(1), false));

    let push_page = |entries: &mut Vec<(String, Option<usize>, bool)>, index: usize| {
        entries.push(((index + 1).to_string(), Some(index), index == selected));
    };

    if page_count <= WINDOW + 2 {
        for index in 0..page_count {
            push_page(&mut entries, index);
        }
    } else {
        let last = page_count - 1;
        let mut start = selected.saturating_sub(WINDOW / 2).max(1);
        let end = (start + WINDOW - 1).min(last - 1);
        start = end.saturating_sub(WINDOW - 1).max(1);

        push_page(&mut entries, 0);
        if start > 1 {
            entries.push(("…".to_string(), None, false));
        }
        for index in start..=end {
            push_page(&mut entries, index);
        }
        if end < last - 1 {
            entries.push(("…".to_string(), None, false));
        }
        push_page(&mut entries, last);
    }

    let next = (selected + 1 < page_count).then_some(selected + 1);
    entries.push(("›".to_string(), next, false));

    let total_width: usize = entries
        .iter()
        .map(|(text, _, _)| text.chars().count())
        .sum::<usize>()
        + entries.len().saturating_sub(1);
    let mut col = cols.saturating_sub(total_width) / 2 + 1;

    entries
        .into_iter()
        .map(|(text, target, is_current)| {
            let label = PageLabel {
                col,
                target,
                is_current,
                text,
            };
            col += label.text.chars().count() + 1;
            label
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(labels: &[PageLabel]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn small_page_counts_show_every_page() {
        let labels = pagination_labels(5, 0, 80);
        assert_eq!(texts(&labels), ["‹", "1", "2", "3", "4", "5", "›"]);
        assert_eq!(labels[0].target, None);
        assert!(labels[1].is_current);
        assert_eq!(labels[6].target, Some(1));
    }

    #[test]
    fn large_page_counts_collapse_runs() {
        let labels = pagination_labels(40, 19, 80);
        assert_eq!(
            texts(&labels),
            ["‹", "1", "…", "18", "19", "20", "21", "22", "…", "40", "›"]
        );
        let current = labels.iter().find(|l| l.is_current).unwrap();
        assert_eq!(current.text, "20");
        assert_eq!(current.target, Some(19));
    }

    #[test]
    fn window_sticks_to_the_edges() {
        assert_eq!(
            texts(&pagination_labels(40, 0, 80)),
            ["‹", "1", "2", "3", "4", "5", "6", "…", "40", "›"]
        );
        assert_eq!(
            texts(&pagination_labels(40, 39, 80)),
            ["‹", "1", "…", "35", "36", "37", "38", "39", "40", "›"]
        );
    }

    #[test]
    fn labels_are_laid_out_left_to_right() {
        let labels = pagination_labels(3, 1, 20);
        for pair in labels.windows(2) {
            assert!(pair[0].col < pair[1].col);
            assert!(!pair[0].contains(pair[1].col));
        }
    }

    #[test]
    fn tile_hit_testing_skips_gaps() {
        let layout = ScreenLayout::for_viewport(24, 80);
        assert_eq!(layout.columns, 3);

        assert_eq!(layout.tile_at(GRID_TOP, 1, 0, 10), Some(0));
        assert_eq!(layout.tile_at(GRID_TOP + 1, TILE_WIDTH + 1, 0, 10), Some(1));
        assert_eq!(layout.tile_at(GRID_TOP + 2, 1, 0, 10), None);
        assert_eq!(layout.tile_at(GRID_TOP, TILE_WIDTH - 1, 0, 10), None);
        assert_eq!(layout.tile_at(GRID_TOP + TILE_HEIGHT, 1, 1, 10), Some(6));
        assert_eq!(layout.tile_at(GRID_TOP, 1, 0, 0), None);
    }

    #[test]
    fn modal_fits_inside_small_panes() {
        let layout = ScreenLayout::for_viewport(10, 16);
        let modal = layout.modal();
        assert!(modal.col >= 1 && modal.col + modal.width <= 17);
        assert!(modal.row >= 1 && modal.row + modal.height <= 11);
        assert!(modal.contains(layout.close_button().row, layout.close_button().col));
    }
}
