//! Pager configuration.
//!
//! Defaults match the markup emitted by the search result template: ten items
//! per page, `Hidden` as the visibility class and `data-next-start` on every
//! paging button.

use serde::{Deserialize, Serialize};

/// Items shown per window unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Error returned by [`PagerConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("`{0}` must not be empty")]
    EmptyName(&'static str),

    #[error("`{field}` is not a usable name: `{name}`")]
    InvalidName { field: &'static str, name: String },
}

/// A class name usable unescaped in a `.class` selector and in `classList`.
fn is_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = match chars.next() {
        Some('-') => name.len() > 1 && !name[1..].starts_with(|c: char| c.is_ascii_digit()),
        Some(c) => c == '_' || c.is_ascii_alphabetic() || !c.is_ascii(),
        None => false,
    };
    first_ok
        && chars.all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii())
}

/// An attribute name `setAttribute` accepts.
fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| matches!(c, '-' | '_' | '.' | ':') || c.is_ascii_alphanumeric())
}

fn check(field: &'static str, name: &str, valid: fn(&str) -> bool) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyName(field));
    }
    if !valid(name) {
        return Err(ConfigError::InvalidName {
            field,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Class markers locating one collection and its two buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMarkers {
    /// Class carried by every item of the collection.
    pub items: String,
    /// Class of the forward button.
    pub next: String,
    /// Class of the backward button.
    pub prev: String,
}

impl CollectionMarkers {
    pub fn papers() -> Self {
        Self {
            items: "js-paperTitle".into(),
            next: "js-nextPaperButton".into(),
            prev: "js-prevPaperButton".into(),
        }
    }

    pub fn authors() -> Self {
        Self {
            items: "js-authorTitle".into(),
            next: "js-nextAuthorButton".into(),
            prev: "js-prevAuthorButton".into(),
        }
    }

    fn validate(
        &self,
        items: &'static str,
        next: &'static str,
        prev: &'static str,
    ) -> Result<(), ConfigError> {
        check(items, &self.items, is_class_name)?;
        check(next, &self.next, is_class_name)?;
        check(prev, &self.prev, is_class_name)
    }
}

/// Full pager configuration.
///
/// Every field has a default, so a partial TOML file or JS object only needs
/// to name what differs from the stock template. A marker table, when present,
/// must name all three classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub page_size: usize,
    pub hidden_class: String,
    /// Attribute holding a button's start offset.
    pub offset_attribute: String,
    pub papers: CollectionMarkers,
    pub authors: CollectionMarkers,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            hidden_class: "Hidden".into(),
            offset_attribute: "data-next-start".into(),
            papers: CollectionMarkers::papers(),
            authors: CollectionMarkers::authors(),
        }
    }
}

impl PagerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        check("hidden_class", &self.hidden_class, is_class_name)?;
        check("offset_attribute", &self.offset_attribute, is_attribute_name)?;
        self.papers
            .validate("papers.items", "papers.next", "papers.prev")?;
        self.authors
            .validate("authors.items", "authors.next", "authors.prev")
    }
}
