//! Host abstraction traits for the pager.
//!
//! These traits define the interface between the pagination logic and a
//! concrete document: the browser DOM via `web-sys`, or the in-memory
//! document used by tests and the command-line harness. Handles follow DOM
//! semantics: they are cheap references into a shared document, so mutation
//! goes through `&self`.

/// Error type for host operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// An ordered, fixed-length list of item elements.
pub trait ItemCollection {
    /// Number of items. Must not change while a pager holds the collection.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the item at `index` carries `class`.
    ///
    /// Returns false for out-of-range indices.
    fn has_class(&self, index: usize, class: &str) -> bool;

    /// Add (`present == true`) or remove `class` on the item at `index`.
    fn set_class(&self, index: usize, class: &str, present: bool) -> Result<(), PlatformError>;
}

/// A paging button with a numeric start offset and a disabled flag.
///
/// Which attribute holds the offset is up to the host; the stock markup uses
/// `data-next-start`.
pub trait PagerButton {
    /// The offset attribute parsed as an integer, if present and numeric.
    fn offset(&self) -> Option<isize>;

    fn set_offset(&self, offset: isize) -> Result<(), PlatformError>;

    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool) -> Result<(), PlatformError>;
}

/// A document the pager can attach to.
///
/// Markers are class names. A collection lookup always succeeds (possibly
/// empty, like `getElementsByClassName`); a button lookup yields `None` when
/// no element carries the marker.
pub trait PagerHost {
    type Items: ItemCollection;
    type Button: PagerButton;

    fn collection(&self, marker: &str) -> Self::Items;

    fn button(&self, marker: &str) -> Option<Self::Button>;
}
