//! DOM and dialog implementations of the page capabilities.

use crate::capabilities::{Prompt, Shell};
use crate::config::FinanceConfig;
use crate::error::PageError;
use crate::pages::markup::{REMOVE_ACCOUNT_CLASS, REMOVE_TRANSACTION_CLASS};
use crate::pages::transactions::{ClickTarget, PageAction, PageView};
use gloo::events::EventListener;
use log::{debug, error, warn};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Document, Element, Event};

/// Dispatched on `document` after an account was deleted
pub const ACCOUNTS_CHANGED_EVENT: &str = "finance:accounts-changed";
/// Dispatched on `document` when the whole app should reload
pub const REFRESH_EVENT: &str = "finance:refresh";

pub struct DomView {
    document: Document,
    container: Element,
    content: Element,
    title_selector: String,
}

impl DomView {
    /// Find the page container and its content area.
    ///
    /// `Ok(None)` means the container itself is absent; a container without
    /// a content area is an error.
    pub fn locate(document: &Document, config: &FinanceConfig) -> Result<Option<Self>, PageError> {
        let Some(container) = document
            .query_selector(&config.container_selector)
            .ok()
            .flatten()
        else {
            return Ok(None);
        };
        let content = container
            .query_selector(&config.content_selector)
            .ok()
            .flatten()
            .ok_or_else(|| PageError::MissingElement {
                selector: config.content_selector.clone(),
            })?;

        Ok(Some(Self {
            document: document.clone(),
            container,
            content,
            title_selector: config.title_selector.clone(),
        }))
    }
}

fn click_target(event: &Event) -> ClickTarget {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return ClickTarget::default();
    };
    let closest = |class: &str| target.closest(&format!(".{}", class)).ok().flatten();

    ClickTarget {
        in_remove_account: closest(REMOVE_ACCOUNT_CLASS).is_some(),
        remove_transaction_id: closest(REMOVE_TRANSACTION_CLASS)
            .and_then(|button| button.get_attribute("data-id")),
    }
}

impl PageView for DomView {
    fn set_title(&self, title: &str) {
        match self.document.query_selector(&self.title_selector) {
            Ok(Some(element)) => element.set_text_content(Some(title)),
            _ => warn!("Title element {} not found", self.title_selector),
        }
    }

    fn append_row(&self, markup: &str) {
        if let Err(e) = self.content.insert_adjacent_html("beforeend", markup) {
            error!("Failed to insert row: {:?}", e);
        }
    }

    fn clear_rows(&self) {
        while let Some(child) = self.content.first_element_child() {
            child.remove();
        }
    }

    fn bind_actions(&self, handler: Rc<dyn Fn(PageAction)>) {
        // Lives as long as the page
        EventListener::new(&self.container, "click", move |event| {
            if let Some(action) = PageAction::from_click(&click_target(event)) {
                handler(action);
            }
        })
        .forget();
    }
}

/// Native `confirm()` / `alert()` dialogs
#[derive(Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}

/// Forwards shell notifications to whoever listens on `document`
pub struct DomShell {
    document: Document,
}

impl DomShell {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn dispatch(&self, name: &str) {
        let dispatched = CustomEvent::new(name).and_then(|event| self.document.dispatch_event(&event));
        match dispatched {
            Ok(_) => debug!("Dispatched {}", name),
            Err(e) => error!("Failed to dispatch {}: {:?}", name, e),
        }
    }
}

impl Shell for DomShell {
    fn notify_siblings_changed(&self) {
        self.dispatch(ACCOUNTS_CHANGED_EVENT);
    }

    fn refresh_all(&self) {
        self.dispatch(REFRESH_EVENT);
    }
}
