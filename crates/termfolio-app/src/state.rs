//! Observable session state types.
//!
//! These structures are the view model the renderer reads: which screen is
//! active, where the list highlight sits, and what the scrollable viewport
//! currently shows.

/// Rows taken by the header, status line and content border.
pub const CHROME_ROWS: u16 = 6;

/// Columns taken by the content border.
pub const CHROME_COLS: u16 = 2;

/// Screen currently shown to the visitor.
///
/// Exactly one screen is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Landing menu.
    Home,
    /// List of selectable items.
    List(ListKind),
    /// One item opened from a list.
    Detail {
        /// List the item was opened from.
        kind: ListKind,
        /// Index into the list's items (unfiltered).
        index: usize,
    },
    /// Read-only scrollable page.
    Static(StaticKind),
    /// Leave-a-message flow.
    Compose(ComposeStage),
}

/// List-backed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Projects loaded from project records.
    Projects,
}

/// Static sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticKind {
    /// Resume page.
    Resume,
    /// Contact details.
    Contact,
    /// Placeholder blog, regenerated on every visit.
    Blog,
}

/// Compose sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStage {
    /// Typing the message body.
    EditingBody,
    /// Typing the sender name.
    EditingName,
    /// Message submitted; editing is closed until the flow is restarted.
    Sent,
}

/// Highlight and filter state of the item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub(crate) highlighted: usize,
    pub(crate) filter: String,
    pub(crate) filtering: bool,
}

impl ListState {
    /// Position of the highlight among the visible items.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Current filter text. Empty if unfiltered.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether keystrokes currently edit the filter.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Scrollable text area backing detail and static screens.
///
/// # Invariants
///
/// - `offset <= max_offset()` after every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    content: String,
    offset: u16,
    width: u16,
    height: u16,
    content_height: u16,
}

impl Viewport {
    /// Empty viewport of the given inner size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Replace the content and scroll back to the top.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.offset = 0;
        self.measure();
    }

    /// Change the inner size, keeping the offset within bounds.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.measure();
    }

    /// Scroll towards the end by `lines`.
    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    /// Scroll towards the start by `lines`.
    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Jump so the last line is at the bottom edge.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Largest valid offset.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.height)
    }

    /// Text shown in the viewport.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// First visible wrapped line.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Inner height in rows.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Inner width in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows the content occupies once wrapped to `width`.
    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    fn measure(&mut self) {
        let rows = wrapped_height(&self.content, self.width);
        self.content_height = u16::try_from(rows).unwrap_or(u16::MAX);
        self.offset = self.offset.min(self.max_offset());
    }
}

/// Rows `text` takes when word-wrapped to `width` columns.
///
/// Approximates the renderer's word wrapping: words move to the next row when
/// they do not fit, words longer than a row are split.
pub(crate) fn wrapped_height(text: &str, width: u16) -> usize {
    let width = usize::from(width);
    if width == 0 {
        return text.lines().count();
    }
    text.lines().map(|line| wrapped_line_height(line, width)).sum()
}

fn wrapped_line_height(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;

    for word in line.split_whitespace() {
        let len = word.chars().count();
        if col > 0 && col + 1 + len <= width {
            col += 1 + len;
            continue;
        }
        if col > 0 {
            rows += 1;
        }
        let spill = (len - 1) / width;
        rows += spill;
        col = len - spill * width;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_counts_rows() {
        assert_eq!(wrapped_height("", 10), 0);
        assert_eq!(wrapped_height("short", 10), 1);
        assert_eq!(wrapped_height("one two three", 7), 2);
        assert_eq!(wrapped_height("a\n\nb", 10), 3);
        assert_eq!(wrapped_height("abcdefghijkl", 5), 3);
    }

    #[test]
    fn viewport_offset_stays_in_bounds() {
        let mut viewport = Viewport::new(20, 5);
        let content: Vec<String> = (0..12).map(|n| format!("line {n}")).collect();
        viewport.set_content(content.join("\n"));

        assert_eq!(viewport.max_offset(), 7);

        viewport.scroll_down(100);
        assert_eq!(viewport.offset(), 7);

        viewport.scroll_up(3);
        assert_eq!(viewport.offset(), 4);

        viewport.resize(20, 10);
        assert_eq!(viewport.offset(), 2);

        viewport.scroll_to_top();
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut viewport = Viewport::new(20, 5);
        viewport.set_content("hello".into());

        viewport.scroll_down(10);
        viewport.scroll_to_bottom();
        assert_eq!(viewport.offset(), 0);
    }
}
