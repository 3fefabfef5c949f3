//! Saved result pages as in-memory documents.

use std::ops::Range;
use std::path::Path;

use miette::miette;
use papersearch_pager::{MemoryDocument, MemoryElement, PagerConfig};
use scraper::{Html, Selector};

pub fn open(path: &Path, config: &PagerConfig) -> miette::Result<MemoryDocument> {
    let html = std::fs::read_to_string(path)
        .map_err(|e| miette!("error reading page {}: {}", path.display(), e))?;
    parse(&html, config)
}

/// Every element with a `class` attribute, in document order.
///
/// Only classed elements can be items or buttons, so the rest of the tree is
/// dropped.
pub fn parse(html: &str, config: &PagerConfig) -> miette::Result<MemoryDocument> {
    let document = Html::parse_document(html);
    let classed = Selector::parse("[class]").map_err(|e| miette!("bad selector: {}", e))?;

    let elements: Vec<MemoryElement> = document
        .select(&classed)
        .map(|el| {
            let value = el.value();
            let mut element = MemoryElement::new(value.classes())
                .with_text(el.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" "));
            for (name, attr) in value.attrs() {
                if name != "class" {
                    element = element.with_attribute(name, attr);
                }
            }
            element
        })
        .collect();

    tracing::debug!(elements = elements.len(), "parsed page");
    Ok(MemoryDocument::from_elements(elements, config))
}

/// Text of the items of `marker` within `range`, with their indices.
pub fn titles(doc: &MemoryDocument, marker: &str, range: Range<usize>) -> Vec<(usize, String)> {
    doc.elements_with_class(marker)
        .into_iter()
        .enumerate()
        .skip(range.start)
        .take(range.len())
        .filter_map(|(index, id)| doc.element(id).map(|element| (index, element.text)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use papersearch_pager::{CollectionKind, Control, Paginator, audit};

    const FIXTURE: &str = include_str!("../tests/fixtures/search.html");

    fn fixture() -> (MemoryDocument, PagerConfig) {
        let config = PagerConfig::default();
        let doc = parse(FIXTURE, &config).unwrap();
        (doc, config)
    }

    #[test]
    fn test_fixture_collections() {
        let (doc, config) = fixture();
        assert_eq!(doc.elements_with_class(&config.papers.items).len(), 23);
        assert_eq!(doc.elements_with_class(&config.authors.items).len(), 8);
        assert_eq!(
            doc.visible_indices(&config.papers.items, &config.hidden_class),
            (0..10).collect::<Vec<_>>()
        );
        assert_eq!(doc.offset(&config.papers.next).as_deref(), Some("10"));
        assert_eq!(doc.is_disabled(&config.papers.prev), Some(true));
    }

    #[test]
    fn test_fixture_passes_audit() {
        let (doc, config) = fixture();
        assert_eq!(audit(&doc, &config), vec![]);
    }

    #[test]
    fn test_titles_are_whitespace_normalized() {
        let (doc, config) = fixture();
        let first = titles(&doc, &config.papers.items, 0..2);
        assert_eq!(
            first,
            vec![
                (0, "Attention Is All You Need".to_string()),
                (1, "Deep Residual Learning for Image Recognition".to_string()),
            ]
        );
        assert_eq!(titles(&doc, &config.authors.items, 7..12).len(), 1);
    }

    #[test]
    fn test_replay_over_fixture() {
        let (doc, config) = fixture();
        let mut paginator = Paginator::attach(&doc, &config).unwrap().unwrap();

        // Eight authors: nothing to page through.
        assert!(!paginator.pager(CollectionKind::Authors).snapshot().next_enabled);

        paginator.handle(Control::NextPaper).unwrap();
        paginator.handle(Control::NextPaper).unwrap();
        let papers = paginator.pager(CollectionKind::Papers).snapshot();
        assert_eq!(papers.visible, 20..23);
        assert!(!papers.next_enabled);
        assert_eq!(
            doc.visible_indices(&config.papers.items, &config.hidden_class),
            vec![20, 21, 22]
        );
    }

    #[test]
    fn test_page_without_controls() {
        let config = PagerConfig::default();
        let doc = parse(
            r#"<html><body><p class="NoResults">No results for "quantum"</p></body></html>"#,
            &config,
        )
        .unwrap();
        assert_eq!(doc.len(), 1);
        assert!(Paginator::attach(&doc, &config).unwrap().is_none());
    }
}
