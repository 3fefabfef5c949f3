//! In-memory document.
//!
//! A flat arena of elements with classes, attributes and text, standing in
//! for the browser DOM. Tests build one with [`MemoryDocument::search_page`];
//! the command-line harness fills one from a saved HTML page.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::config::PagerConfig;
use crate::platform::{ItemCollection, PagerButton, PagerHost, PlatformError};

/// Position of an element in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
}

impl MemoryElement {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled")
    }
}

/// Shared handle to an element arena. Clones see the same elements.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: Rc<RefCell<Vec<MemoryElement>>>,
    offset_attribute: Rc<str>,
}

impl MemoryDocument {
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            elements: Rc::default(),
            offset_attribute: Rc::from(config.offset_attribute.as_str()),
        }
    }

    pub fn from_elements(elements: Vec<MemoryElement>, config: &PagerConfig) -> Self {
        Self {
            elements: Rc::new(RefCell::new(elements)),
            offset_attribute: Rc::from(config.offset_attribute.as_str()),
        }
    }

    /// A result page as the server renders it: the first page of each list
    /// visible, the rest hidden, forward buttons pointing at the second page
    /// and disabled backward buttons pointing one page before the first.
    pub fn search_page(papers: usize, authors: usize, config: &PagerConfig) -> Self {
        let doc = Self::new(config);
        doc.push_collection(&config.papers.items, "Paper", papers, config);
        doc.push_collection(&config.authors.items, "Author", authors, config);

        let page_size = config.page_size.to_string();
        let before_first = format!("-{}", config.page_size);
        for markers in [&config.papers, &config.authors] {
            doc.push(
                MemoryElement::new([markers.next.as_str()])
                    .with_attribute(config.offset_attribute.as_str(), page_size.as_str())
                    .with_text("Next"),
            );
            doc.push(
                MemoryElement::new([markers.prev.as_str()])
                    .with_attribute(config.offset_attribute.as_str(), before_first.as_str())
                    .with_attribute("disabled", "")
                    .with_text("Previous"),
            );
        }
        doc
    }

    fn push_collection(&self, marker: &str, label: &str, count: usize, config: &PagerConfig) {
        for index in 0..count {
            let mut element = MemoryElement::new([marker]).with_text(format!("{label} {index}"));
            if index >= config.page_size {
                element.classes.insert(config.hidden_class.clone());
            }
            self.push(element);
        }
    }

    pub fn push(&self, element: MemoryElement) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        elements.push(element);
        ElementId(elements.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, id: ElementId) -> Option<MemoryElement> {
        self.elements.borrow().get(id.0).cloned()
    }

    /// Elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, element)| element.has_class(class))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    pub fn first_with_class(&self, class: &str) -> Option<ElementId> {
        self.elements
            .borrow()
            .iter()
            .position(|element| element.has_class(class))
            .map(ElementId)
    }

    /// Collection-relative indices of `marker` items lacking `hidden_class`.
    pub fn visible_indices(&self, marker: &str, hidden_class: &str) -> Vec<usize> {
        self.elements
            .borrow()
            .iter()
            .filter(|element| element.has_class(marker))
            .enumerate()
            .filter(|(_, element)| !element.has_class(hidden_class))
            .map(|(index, _)| index)
            .collect()
    }

    /// Disabled flag of the first element carrying `marker`.
    pub fn is_disabled(&self, marker: &str) -> Option<bool> {
        let id = self.first_with_class(marker)?;
        self.element(id).map(|element| element.is_disabled())
    }

    /// Offset attribute of the first element carrying `marker`, unparsed.
    pub fn offset(&self, marker: &str) -> Option<String> {
        let id = self.first_with_class(marker)?;
        self.element(id)?
            .attributes
            .get(&*self.offset_attribute)
            .cloned()
    }

    fn with_element<T>(
        &self,
        id: ElementId,
        f: impl FnOnce(&mut MemoryElement) -> T,
    ) -> Result<T, PlatformError> {
        let mut elements = self.elements.borrow_mut();
        let element = elements
            .get_mut(id.0)
            .ok_or_else(|| PlatformError(format!("no element at {}", id.0)))?;
        Ok(f(element))
    }
}

/// Items of one collection, captured at lookup time.
#[derive(Debug, Clone)]
pub struct MemoryItems {
    doc: MemoryDocument,
    ids: Vec<ElementId>,
}

impl ItemCollection for MemoryItems {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn has_class(&self, index: usize, class: &str) -> bool {
        self.ids
            .get(index)
            .and_then(|&id| self.doc.element(id))
            .is_some_and(|element| element.has_class(class))
    }

    fn set_class(&self, index: usize, class: &str, present: bool) -> Result<(), PlatformError> {
        let id = *self
            .ids
            .get(index)
            .ok_or_else(|| PlatformError(format!("item index {index} out of range")))?;
        self.doc.with_element(id, |element| {
            if present {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct MemoryButton {
    doc: MemoryDocument,
    id: ElementId,
}

impl PagerButton for MemoryButton {
    fn offset(&self) -> Option<isize> {
        self.doc
            .element(self.id)?
            .attributes
            .get(&*self.doc.offset_attribute)?
            .trim()
            .parse()
            .ok()
    }

    fn set_offset(&self, offset: isize) -> Result<(), PlatformError> {
        let name = self.doc.offset_attribute.to_string();
        self.doc.with_element(self.id, |element| {
            element.attributes.insert(name, offset.to_string());
        })
    }

    fn is_disabled(&self) -> bool {
        self.doc
            .element(self.id)
            .is_some_and(|element| element.is_disabled())
    }

    fn set_disabled(&self, disabled: bool) -> Result<(), PlatformError> {
        self.doc.with_element(self.id, |element| {
            if disabled {
                element
                    .attributes
                    .insert("disabled".to_string(), String::new());
            } else {
                element.attributes.remove("disabled");
            }
        })
    }
}

impl PagerHost for MemoryDocument {
    type Items = MemoryItems;
    type Button = MemoryButton;

    fn collection(&self, marker: &str) -> MemoryItems {
        MemoryItems {
            doc: self.clone(),
            ids: self.elements_with_class(marker),
        }
    }

    fn button(&self, marker: &str) -> Option<MemoryButton> {
        self.first_with_class(marker).map(|id| MemoryButton {
            doc: self.clone(),
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_shape() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::search_page(25, 3, &config);

        assert_eq!(doc.elements_with_class("js-paperTitle").len(), 25);
        assert_eq!(
            doc.visible_indices("js-paperTitle", "Hidden"),
            (0..10).collect::<Vec<_>>()
        );
        assert_eq!(doc.visible_indices("js-authorTitle", "Hidden"), vec![0, 1, 2]);
        assert_eq!(doc.offset("js-nextPaperButton").as_deref(), Some("10"));
        assert_eq!(doc.offset("js-prevAuthorButton").as_deref(), Some("-10"));
        assert_eq!(doc.is_disabled("js-prevPaperButton"), Some(true));
        assert_eq!(doc.is_disabled("js-nextPaperButton"), Some(false));
        assert_eq!(doc.is_disabled("js-missing"), None);
    }

    #[test]
    fn test_button_offset_round_trip() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::search_page(0, 0, &config);
        let button = doc.button("js-nextAuthorButton").unwrap();

        assert_eq!(button.offset(), Some(10));
        button.set_offset(-10).unwrap();
        assert_eq!(button.offset(), Some(-10));
        assert_eq!(doc.offset("js-nextAuthorButton").as_deref(), Some("-10"));
    }

    #[test]
    fn test_non_numeric_offset_is_none() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::new(&config);
        doc.push(
            MemoryElement::new(["js-nextPaperButton"]).with_attribute("data-next-start", "ten"),
        );
        assert_eq!(doc.button("js-nextPaperButton").unwrap().offset(), None);
    }

    #[test]
    fn test_set_class_out_of_range() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::search_page(2, 0, &config);
        let items = doc.collection("js-paperTitle");
        assert!(items.set_class(1, "Hidden", true).is_ok());
        assert!(items.has_class(1, "Hidden"));
        assert!(items.set_class(2, "Hidden", true).is_err());
        assert!(!items.has_class(2, "Hidden"));
    }
}
