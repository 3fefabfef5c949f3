//! Window position within one collection.
//!
//! A [`PageWindow`] is the whole pagination state of a collection. Both
//! button offsets are derived from its start, so they cannot drift apart.

use std::ops::Range;

/// The visible slice of a fixed-length collection.
///
/// Invariants: `start` is a multiple of `page_size`, and either `start == 0`
/// or `start < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    start: usize,
    len: usize,
    page_size: usize,
}

impl PageWindow {
    /// The first page of a collection of `len` items.
    ///
    /// # Panics
    /// Panics if `page_size` is zero. Validated configs never produce one.
    pub fn first(len: usize, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be non-zero");
        Self {
            start: 0,
            len,
            page_size,
        }
    }

    /// A window starting at `start`, or `None` if that would break the
    /// invariants.
    pub fn at(start: usize, len: usize, page_size: usize) -> Option<Self> {
        if page_size == 0 || start % page_size != 0 {
            return None;
        }
        if start != 0 && start >= len {
            return None;
        }
        Some(Self {
            start,
            len,
            page_size,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Indices of the items currently shown. Shorter than a page at the tail.
    pub fn visible(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.page_size).min(self.len)
    }

    /// Whether the item at `index` falls inside the window.
    ///
    /// The window is always a full page wide, so this is true for indices
    /// past the end of the collection too; callers only ask about real items.
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.start.saturating_add(self.page_size)
    }

    /// Offset carried by the forward button: start of the following page.
    pub fn next_start(&self) -> usize {
        self.start.saturating_add(self.page_size)
    }

    /// Offset carried by the backward button: start of the preceding page.
    ///
    /// Negative on the first page.
    pub fn prev_start(&self) -> isize {
        to_isize(self.start) - to_isize(self.page_size)
    }

    pub fn can_advance(&self) -> bool {
        self.next_start() < self.len
    }

    pub fn can_retreat(&self) -> bool {
        self.start > 0
    }

    /// The next page, if any.
    pub fn advance(&self) -> Option<Self> {
        self.can_advance().then(|| Self {
            start: self.next_start(),
            ..*self
        })
    }

    /// The previous page, if any.
    pub fn retreat(&self) -> Option<Self> {
        self.can_retreat().then(|| Self {
            start: self.start - self.page_size,
            ..*self
        })
    }
}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let window = PageWindow::first(25, 10);
        assert_eq!(window.visible(), 0..10);
        assert_eq!(window.next_start(), 10);
        assert_eq!(window.prev_start(), -10);
        assert!(window.can_advance());
        assert!(!window.can_retreat());
    }

    #[test]
    fn test_short_collection_cannot_advance() {
        for len in 0..=10 {
            let window = PageWindow::first(len, 10);
            assert!(!window.can_advance(), "len {len}");
            assert_eq!(window.visible(), 0..len);
        }
        assert!(PageWindow::first(11, 10).can_advance());
    }

    #[test]
    fn test_walk_to_partial_tail() {
        let window = PageWindow::first(25, 10);
        let second = window.advance().unwrap();
        assert_eq!(second.visible(), 10..20);
        assert!(second.can_advance());

        let third = second.advance().unwrap();
        assert_eq!(third.visible(), 20..25);
        assert_eq!(third.next_start(), 30);
        assert!(!third.can_advance());
        assert_eq!(third.advance(), None);

        assert_eq!(third.retreat(), Some(second));
        assert_eq!(second.retreat(), Some(window));
        assert_eq!(window.retreat(), None);
    }

    #[test]
    fn test_exact_multiple_stops_on_last_full_page() {
        let last = PageWindow::first(20, 10).advance().unwrap();
        assert_eq!(last.visible(), 10..20);
        assert!(!last.can_advance());
    }

    #[test]
    fn test_contains_is_page_wide() {
        let window = PageWindow::at(20, 25, 10).unwrap();
        assert!(window.contains(20));
        assert!(window.contains(29));
        assert!(!window.contains(19));
        assert!(!window.contains(30));
    }

    #[test]
    fn test_at_rejects_bad_positions() {
        assert_eq!(PageWindow::at(5, 25, 10), None);
        assert_eq!(PageWindow::at(30, 25, 10), None);
        assert_eq!(PageWindow::at(0, 25, 0), None);
        assert!(PageWindow::at(0, 0, 10).is_some());
        assert!(PageWindow::at(20, 25, 10).is_some());
    }
}
