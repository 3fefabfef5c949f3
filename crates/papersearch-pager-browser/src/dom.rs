//! `PagerHost` over the live browser document.
//!
//! Collections come from `getElementsByClassName`, buttons from
//! `querySelector`, and visibility is a class toggled through `classList`.
//!
//! # CSS Integration
//!
//! The stylesheet is expected to hide the configured class:
//! ```css
//! .Hidden {
//!     display: none;
//! }
//! ```

use std::rc::Rc;

use papersearch_pager::{ItemCollection, PagerButton, PagerConfig, PagerHost, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlCollection};

/// The document a pager attaches to.
#[derive(Debug, Clone)]
pub struct BrowserHost {
    document: Document,
    offset_attribute: Rc<str>,
}

impl BrowserHost {
    pub fn new(document: Document, config: &PagerConfig) -> Self {
        Self {
            document,
            offset_attribute: Rc::from(config.offset_attribute.as_str()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// A class-name collection with its length pinned at lookup.
///
/// `HtmlCollection` is live, but result pages never add or remove items after
/// load, so the first length is the only one.
#[derive(Debug, Clone)]
pub struct BrowserItems {
    items: HtmlCollection,
    len: usize,
}

impl BrowserItems {
    fn item(&self, index: usize) -> Option<Element> {
        u32::try_from(index).ok().and_then(|index| self.items.item(index))
    }
}

impl ItemCollection for BrowserItems {
    fn len(&self) -> usize {
        self.len
    }

    fn has_class(&self, index: usize, class: &str) -> bool {
        self.item(index)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_class(&self, index: usize, class: &str, present: bool) -> Result<(), PlatformError> {
        let element = self
            .item(index)
            .ok_or_else(|| PlatformError(format!("item {index} no longer in document")))?;
        element
            .class_list()
            .toggle_with_force(class, present)
            .map(|_| ())
            .map_err(js_error)
    }
}

#[derive(Debug, Clone)]
pub struct BrowserButton {
    element: HtmlButtonElement,
    offset_attribute: Rc<str>,
}

impl BrowserButton {
    pub fn element(&self) -> &HtmlButtonElement {
        &self.element
    }
}

impl PagerButton for BrowserButton {
    fn offset(&self) -> Option<isize> {
        self.element
            .get_attribute(&self.offset_attribute)?
            .trim()
            .parse()
            .ok()
    }

    fn set_offset(&self, offset: isize) -> Result<(), PlatformError> {
        self.element
            .set_attribute(&self.offset_attribute, &offset.to_string())
            .map_err(js_error)
    }

    fn is_disabled(&self) -> bool {
        self.element.disabled()
    }

    fn set_disabled(&self, disabled: bool) -> Result<(), PlatformError> {
        self.element.set_disabled(disabled);
        Ok(())
    }
}

impl PagerHost for BrowserHost {
    type Items = BrowserItems;
    type Button = BrowserButton;

    fn collection(&self, marker: &str) -> BrowserItems {
        let items = self.document.get_elements_by_class_name(marker);
        let len = items.length() as usize;
        BrowserItems { items, len }
    }

    fn button(&self, marker: &str) -> Option<BrowserButton> {
        let element = match self.document.query_selector(&format!(".{marker}")) {
            Ok(element) => element?,
            Err(err) => {
                tracing::warn!(marker, error = %js_error(err), "paging control lookup failed");
                return None;
            }
        };
        match element.dyn_into::<HtmlButtonElement>() {
            Ok(element) => Some(BrowserButton {
                element,
                offset_attribute: Rc::clone(&self.offset_attribute),
            }),
            Err(element) => {
                tracing::debug!(
                    marker,
                    tag = %element.tag_name(),
                    "paging control is not a <button>"
                );
                None
            }
        }
    }
}

fn js_error(value: JsValue) -> PlatformError {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return PlatformError(String::from(error.message()));
    }
    PlatformError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}
