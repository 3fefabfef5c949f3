//! The result-page paginator: papers and authors, paged independently.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::{CollectionMarkers, ConfigError, PagerConfig};
use crate::pager::{CollectionKind, ListPager, PagerSnapshot, Transition};
use crate::platform::{PagerHost, PlatformError};

/// One of the four paging buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    NextPaper,
    PrevPaper,
    NextAuthor,
    PrevAuthor,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::NextPaper,
        Control::PrevPaper,
        Control::NextAuthor,
        Control::PrevAuthor,
    ];

    pub fn collection(self) -> CollectionKind {
        match self {
            Control::NextPaper | Control::PrevPaper => CollectionKind::Papers,
            Control::NextAuthor | Control::PrevAuthor => CollectionKind::Authors,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(self, Control::NextPaper | Control::NextAuthor)
    }

    /// Class marker of this control's button.
    pub fn marker(self, config: &PagerConfig) -> &str {
        let markers = match self.collection() {
            CollectionKind::Papers => &config.papers,
            CollectionKind::Authors => &config.authors,
        };
        if self.is_forward() {
            markers.next.as_str()
        } else {
            markers.prev.as_str()
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Control::NextPaper => "next-paper",
            Control::PrevPaper => "prev-paper",
            Control::NextAuthor => "next-author",
            Control::PrevAuthor => "prev-author",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control `{0}`")]
pub struct UnknownControl(pub String);

impl FromStr for Control {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::ALL
            .into_iter()
            .find(|control| control.as_str() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Error from [`Paginator::attach`].
///
/// Missing page elements are not an error; they make `attach` return
/// `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    #[error("invalid pager config")]
    Config(#[from] ConfigError),

    #[error("failed to reconcile paging buttons")]
    Platform(#[from] PlatformError),
}

/// The per-collection pager for a given host.
pub type HostPager<H> = ListPager<<H as PagerHost>::Items, <H as PagerHost>::Button>;

/// Windowed pagination of a result page's paper and author lists.
///
/// Built once per page from explicit document handles; each list keeps its
/// own window and buttons, and clicks on one never touch the other.
pub struct Paginator<H: PagerHost> {
    papers: HostPager<H>,
    authors: HostPager<H>,
}

impl<H: PagerHost> Paginator<H> {
    /// Locate both collections and all four buttons and take them over.
    ///
    /// Returns `Ok(None)` and leaves the document untouched when any button
    /// is missing; pages without results carry no paging controls. The
    /// next-paper button is looked up first and its absence short-circuits
    /// everything else.
    ///
    /// Button offsets and disabled flags are written only once every handle
    /// is in hand. A host error during those writes is returned as
    /// [`AttachError::Platform`] and leaves earlier writes in place.
    pub fn attach(host: &H, config: &PagerConfig) -> Result<Option<Self>, AttachError> {
        config.validate()?;

        let Some(next_paper) = host.button(&config.papers.next) else {
            tracing::debug!("no paging controls on page, pagination disabled");
            return Ok(None);
        };
        let Some((prev_paper, next_author, prev_author)) = locate_rest(host, config) else {
            return Ok(None);
        };

        let papers = ListPager::new(
            CollectionKind::Papers,
            host.collection(&config.papers.items),
            next_paper,
            prev_paper,
            config,
        );
        let authors = ListPager::new(
            CollectionKind::Authors,
            host.collection(&config.authors.items),
            next_author,
            prev_author,
            config,
        );
        papers.refresh_controls()?;
        authors.refresh_controls()?;

        Ok(Some(Self { papers, authors }))
    }

    /// Apply one click.
    pub fn handle(&mut self, control: Control) -> Result<Transition, PlatformError> {
        let pager = self.pager_mut(control.collection());
        let transition = if control.is_forward() {
            pager.advance()?
        } else {
            pager.retreat()?
        };
        tracing::debug!(%control, ?transition, "handled click");
        Ok(transition)
    }

    pub fn pager(&self, kind: CollectionKind) -> &HostPager<H> {
        match kind {
            CollectionKind::Papers => &self.papers,
            CollectionKind::Authors => &self.authors,
        }
    }

    fn pager_mut(&mut self, kind: CollectionKind) -> &mut HostPager<H> {
        match kind {
            CollectionKind::Papers => &mut self.papers,
            CollectionKind::Authors => &mut self.authors,
        }
    }

    /// Snapshots of papers then authors.
    pub fn snapshot(&self) -> [PagerSnapshot; 2] {
        [self.papers.snapshot(), self.authors.snapshot()]
    }
}

fn locate_rest<H: PagerHost>(
    host: &H,
    config: &PagerConfig,
) -> Option<(H::Button, H::Button, H::Button)> {
    let find = |markers: &CollectionMarkers, marker: &str| {
        let button = host.button(marker);
        if button.is_none() {
            tracing::debug!(
                items = %markers.items,
                missing = %marker,
                "paging button missing, pagination disabled"
            );
        }
        button
    };

    let prev_paper = find(&config.papers, config.papers.prev.as_str())?;
    let next_author = find(&config.authors, config.authors.next.as_str())?;
    let prev_author = find(&config.authors, config.authors.prev.as_str())?;
    Some((prev_paper, next_author, prev_author))
}
