//! papersearch-pager: client-side pagination for search result pages.
//!
//! Result pages list every matching paper and author up front, in ranking
//! order, with only the first page of each list visible. This crate pages
//! through those lists in fixed-size windows without a server round trip.
//!
//! This crate provides:
//! - `PagerHost` and friends: the document interface, implemented for the
//!   browser by `papersearch-pager-browser`
//! - `Paginator<H>`: papers and authors, each paged independently
//! - `MemoryDocument`: an in-memory host for tests and offline tooling
//! - `audit`: checks a rendered page against the expected markup

pub mod audit;
pub mod config;
pub mod memory;
pub mod pager;
pub mod paginator;
pub mod platform;
pub mod window;


pub use audit::{Finding, Severity, audit, has_errors};
pub use config::{CollectionMarkers, ConfigError, DEFAULT_PAGE_SIZE, PagerConfig};
pub use memory::{ElementId, MemoryDocument, MemoryElement};
pub use pager::{CollectionKind, ListPager, PagerSnapshot, Transition};
pub use paginator::{AttachError, Control, HostPager, Paginator, UnknownControl};
pub use platform::{ItemCollection, PagerButton, PagerHost, PlatformError};
pub use window::PageWindow;
