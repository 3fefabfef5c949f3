//! Pagination of a single collection.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::PagerConfig;
use crate::platform::{ItemCollection, PagerButton, PlatformError};
use crate::window::PageWindow;

/// Which of the two paged lists on a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Papers,
    Authors,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Papers => f.write_str("papers"),
            CollectionKind::Authors => f.write_str("authors"),
        }
    }
}

/// Outcome of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The window moved; carries the new position.
    Moved(PageWindow),
    /// Nothing to move to in that direction. The document is unchanged.
    Ignored,
}

/// Point-in-time view of one collection, read back from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagerSnapshot {
    pub kind: CollectionKind,
    pub len: usize,
    pub visible: Range<usize>,
    pub next_enabled: bool,
    pub prev_enabled: bool,
    pub next_start: usize,
    pub prev_start: isize,
}

impl fmt::Display for PagerSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |enabled: bool| if enabled { "on" } else { "off" };
        write!(
            f,
            "{} {}..{} of {} (prev {}, next {})",
            self.kind,
            self.visible.start,
            self.visible.end,
            self.len,
            on_off(self.prev_enabled),
            on_off(self.next_enabled),
        )
    }
}

/// One collection with its forward and backward buttons.
///
/// Owns the document handles and the window state. Every transition moves
/// the window, rewrites both button offsets and disabled flags from it, then
/// hides the whole collection except the new window.
pub struct ListPager<C, B> {
    kind: CollectionKind,
    items: C,
    next: B,
    prev: B,
    window: PageWindow,
    hidden_class: String,
}

impl<C, B> ListPager<C, B>
where
    C: ItemCollection,
    B: PagerButton,
{
    /// Take ownership of the handles and infer the window from the forward
    /// button. Nothing is written to the document here.
    ///
    /// Callers validate `config` first; [`Paginator::attach`] does.
    ///
    /// [`Paginator::attach`]: crate::Paginator::attach
    pub(crate) fn new(
        kind: CollectionKind,
        items: C,
        next: B,
        prev: B,
        config: &PagerConfig,
    ) -> Self {
        let window = infer_window(kind, items.len(), &next, config.page_size);
        tracing::debug!(
            %kind,
            len = window.len(),
            start = window.start(),
            can_advance = window.can_advance(),
            "pager attached"
        );
        Self {
            kind,
            items,
            next,
            prev,
            window,
            hidden_class: config.hidden_class.clone(),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    /// Show the following page.
    pub fn advance(&mut self) -> Result<Transition, PlatformError> {
        match self.window.advance() {
            Some(target) => self.show(target),
            None => {
                tracing::trace!(kind = %self.kind, "advance past last page ignored");
                Ok(Transition::Ignored)
            }
        }
    }

    /// Show the preceding page.
    pub fn retreat(&mut self) -> Result<Transition, PlatformError> {
        match self.window.retreat() {
            Some(target) => self.show(target),
            None => {
                tracing::trace!(kind = %self.kind, "retreat before first page ignored");
                Ok(Transition::Ignored)
            }
        }
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        PagerSnapshot {
            kind: self.kind,
            len: self.window.len(),
            visible: self.window.visible(),
            next_enabled: !self.next.is_disabled(),
            prev_enabled: !self.prev.is_disabled(),
            next_start: self.window.next_start(),
            prev_start: self.window.prev_start(),
        }
    }

    /// Re-apply the current window to every item and both buttons.
    ///
    /// A transition that failed on a host error has still moved the window,
    /// so this brings the document back in line with it.
    pub fn refresh(&self) -> Result<(), PlatformError> {
        self.refresh_controls()?;
        for index in 0..self.items.len() {
            self.items
                .set_class(index, &self.hidden_class, !self.window.contains(index))?;
        }
        Ok(())
    }

    fn show(&mut self, target: PageWindow) -> Result<Transition, PlatformError> {
        self.window = target;
        self.refresh()?;
        tracing::trace!(
            kind = %self.kind,
            visible = ?target.visible(),
            "window moved"
        );
        Ok(Transition::Moved(target))
    }

    /// Write both button offsets and disabled flags from the window.
    pub(crate) fn refresh_controls(&self) -> Result<(), PlatformError> {
        let next_start = isize::try_from(self.window.next_start()).unwrap_or(isize::MAX);
        self.next.set_offset(next_start)?;
        self.prev.set_offset(self.window.prev_start())?;
        self.next.set_disabled(!self.window.can_advance())?;
        self.prev.set_disabled(!self.window.can_retreat())
    }
}

/// Recover the window from the forward button's offset, which always points
/// one page past the current start.
fn infer_window<B: PagerButton>(
    kind: CollectionKind,
    len: usize,
    next: &B,
    page_size: usize,
) -> PageWindow {
    let inferred = next
        .offset()
        .and_then(|offset| usize::try_from(offset).ok())
        .and_then(|offset| offset.checked_sub(page_size))
        .and_then(|start| PageWindow::at(start, len, page_size));

    match inferred {
        Some(window) => window,
        None => {
            tracing::warn!(
                %kind,
                offset = ?next.offset(),
                "forward button offset unusable, assuming first page"
            );
            PageWindow::first(len, page_size)
        }
    }
}
