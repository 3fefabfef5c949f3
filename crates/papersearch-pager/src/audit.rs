//! Checks a rendered page against the markup the pager expects.
//!
//! The pager trusts the server to render the first page visible and the
//! rest hidden, and never fixes initial visibility itself. A page that breaks
//! that contract still attaches but shows the wrong items until the first
//! click; this module reports such pages without touching them.

use std::fmt;

use serde::Serialize;

use crate::config::{CollectionMarkers, PagerConfig};
use crate::pager::CollectionKind;
use crate::platform::{ItemCollection, PagerButton, PagerHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Pagination works but the page looks wrong before the first click.
    Warning,
    /// Pagination will not attach.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// `None` for page-wide findings.
    pub collection: Option<CollectionKind>,
    pub message: String,
}

impl Finding {
    fn error(collection: Option<CollectionKind>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            collection,
            message: message.into(),
        }
    }

    fn warning(collection: CollectionKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            collection: Some(collection),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.collection {
            Some(kind) => write!(f, "{severity}: {kind}: {}", self.message),
            None => write!(f, "{severity}: {}", self.message),
        }
    }
}

pub fn has_errors(findings: &[Finding]) -> bool {
    findings
        .iter()
        .any(|finding| finding.severity == Severity::Error)
}

/// Inspect `host` as it stands, before any pager attaches.
pub fn audit<H: PagerHost>(host: &H, config: &PagerConfig) -> Vec<Finding> {
    if let Err(err) = config.validate() {
        return vec![Finding::error(None, format!("invalid config: {err}"))];
    }

    let mut findings = Vec::new();
    audit_collection(host, config, CollectionKind::Papers, &config.papers, &mut findings);
    audit_collection(host, config, CollectionKind::Authors, &config.authors, &mut findings);
    findings
}

fn audit_collection<H: PagerHost>(
    host: &H,
    config: &PagerConfig,
    kind: CollectionKind,
    markers: &CollectionMarkers,
    findings: &mut Vec<Finding>,
) {
    let page_size = config.page_size;
    let items = host.collection(&markers.items);

    let mut hidden_early = Vec::new();
    let mut shown_late = Vec::new();
    for index in 0..items.len() {
        let hidden = items.has_class(index, &config.hidden_class);
        if index < page_size && hidden {
            hidden_early.push(index);
        } else if index >= page_size && !hidden {
            shown_late.push(index);
        }
    }
    if !hidden_early.is_empty() {
        findings.push(Finding::warning(
            kind,
            format!("first-page items hidden: {}", list(&hidden_early)),
        ));
    }
    if !shown_late.is_empty() {
        findings.push(Finding::warning(
            kind,
            format!("items past the first page visible: {}", list(&shown_late)),
        ));
    }

    match host.button(&markers.next) {
        None => findings.push(Finding::error(
            Some(kind),
            format!("forward button `.{}` missing", markers.next),
        )),
        Some(next) => {
            let expected = isize::try_from(page_size).unwrap_or(isize::MAX);
            match next.offset() {
                Some(offset) if offset == expected => {}
                Some(offset) => findings.push(Finding::warning(
                    kind,
                    format!("forward offset is {offset}, expected {expected}"),
                )),
                None => findings.push(Finding::warning(
                    kind,
                    format!("forward offset `{}` missing or not numeric", config.offset_attribute),
                )),
            }
        }
    }

    match host.button(&markers.prev) {
        None => findings.push(Finding::error(
            Some(kind),
            format!("backward button `.{}` missing", markers.prev),
        )),
        Some(prev) => {
            if !prev.is_disabled() {
                findings.push(Finding::warning(kind, "backward button enabled on first page"));
            }
        }
    }
}

fn list(indices: &[usize]) -> String {
    const SHOWN: usize = 5;
    let mut out = indices
        .iter()
        .take(SHOWN)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if indices.len() > SHOWN {
        out.push_str(&format!(" and {} more", indices.len() - SHOWN));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDocument, MemoryElement};

    #[test]
    fn test_clean_page_has_no_findings() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::search_page(25, 4, &config);
        assert_eq!(audit(&doc, &config), vec![]);
    }

    #[test]
    fn test_second_window_visible_at_load() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::search_page(0, 0, &config);
        for index in 0..14 {
            doc.push(MemoryElement::new(["js-paperTitle"]).with_text(format!("Paper {index}")));
        }

        let findings = audit(&doc, &config);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(
            findings[0].to_string(),
            "warning: papers: items past the first page visible: 10, 11, 12, 13"
        );
        assert!(!has_errors(&findings));
    }

    #[test]
    fn test_missing_buttons_are_errors() {
        let config = PagerConfig::default();
        let doc = MemoryDocument::new(&config);
        let findings = audit(&doc, &config);

        assert_eq!(findings.len(), 4);
        assert!(has_errors(&findings));
        assert_eq!(
            findings[0].to_string(),
            "error: papers: forward button `.js-nextPaperButton` missing"
        );
    }

    #[test]
    fn test_long_index_lists_are_truncated() {
        assert_eq!(list(&[1, 2, 3]), "1, 2, 3");
        assert_eq!(list(&(10..20).collect::<Vec<_>>()), "10, 11, 12, 13, 14 and 5 more");
    }
}
