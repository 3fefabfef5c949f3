//! Click wiring.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use papersearch_pager::{
    AttachError, Control, PagerConfig, PagerHost, PagerSnapshot, Paginator, PlatformError,
    Transition,
};
use web_sys::Document;

use crate::dom::BrowserHost;

/// A paginator bound to a document, with one click listener per button.
///
/// Dropping this removes the listeners. Call [`MountedPager::forget`] to keep
/// them for the rest of the page's life.
pub struct MountedPager {
    paginator: Rc<RefCell<Paginator<BrowserHost>>>,
    listeners: Vec<EventListener>,
}

impl MountedPager {
    /// Apply a click without going through the DOM event.
    pub fn click(&self, control: Control) -> Result<Transition, PlatformError> {
        self.paginator.borrow_mut().handle(control)
    }

    pub fn snapshot(&self) -> [PagerSnapshot; 2] {
        self.paginator.borrow().snapshot()
    }

    pub fn forget(self) {
        for listener in self.listeners {
            listener.forget();
        }
    }
}

/// Attach a paginator to `document` and listen for clicks on its buttons.
///
/// `Ok(None)` when the page has no paging controls.
pub fn mount(
    document: &Document,
    config: &PagerConfig,
) -> Result<Option<MountedPager>, AttachError> {
    let host = BrowserHost::new(document.clone(), config);
    let Some(paginator) = Paginator::attach(&host, config)? else {
        return Ok(None);
    };
    let paginator = Rc::new(RefCell::new(paginator));

    let mut listeners = Vec::with_capacity(Control::ALL.len());
    for control in Control::ALL {
        // Attach already found every button, so this lookup only fails if the
        // page changed in between.
        let Some(button) = host.button(control.marker(config)) else {
            tracing::warn!(%control, "paging button vanished during mount");
            continue;
        };
        let paginator = Rc::clone(&paginator);
        listeners.push(EventListener::new(button.element(), "click", move |_event| {
            let Ok(mut paginator) = paginator.try_borrow_mut() else {
                tracing::warn!(%control, "click while pager busy, ignored");
                return;
            };
            if let Err(err) = paginator.handle(control) {
                tracing::warn!(%control, error = %err, "paging failed");
            }
        }));
    }

    tracing::info!("result pagination mounted");
    Ok(Some(MountedPager {
        paginator,
        listeners,
    }))
}
