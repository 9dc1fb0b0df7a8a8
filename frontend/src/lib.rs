//! Browser client for the personal finance API.
//!
//! The host page mounts the transactions page with
//! `mountTransactionsPage(configJson)` and drives it through the returned
//! handle; the app shell listens for `finance:*` events on `document`.

pub mod browser;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod pages;
pub mod services;

#[cfg(test)]
mod testing;

use anyhow::Context;
use browser::{BrowserPrompt, DomShell, DomView};
use capabilities::Prompt;
use config::FinanceConfig;
use log::{debug, info};
use pages::{PageView, RenderOptions, TransactionsPage};
use services::http::GlooTransport;
use services::logging::ConsoleLogger;
use services::resources::{ResourceClient, RestFinanceApi};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct TransactionsPageHandle {
    page: TransactionsPage,
}

#[wasm_bindgen]
impl TransactionsPageHandle {
    /// Show `account_id`; without an id the page is left as it is.
    pub fn render(&self, account_id: Option<String>) {
        self.page.render(account_id.map(RenderOptions::for_account));
    }

    pub fn update(&self) {
        self.page.update();
    }

    pub fn clear(&self) {
        self.page.clear();
    }
}

/// Bind the transactions page to the document. Throws when the page
/// container is missing or the configuration is invalid.
#[wasm_bindgen(js_name = mountTransactionsPage)]
pub fn mount_transactions_page(config_json: Option<String>) -> Result<TransactionsPageHandle, JsValue> {
    console_error_panic_hook::set_once();
    mount(config_json.as_deref())
        .map(|page| TransactionsPageHandle { page })
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn mount(config_json: Option<&str>) -> anyhow::Result<TransactionsPage> {
    let config = FinanceConfig::from_json(config_json)?;
    if ConsoleLogger::init(config.log_level_filter()?).is_err() {
        debug!("Console logger already installed");
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .context("no document to mount into")?;
    let view = DomView::locate(&document, &config)?;

    let prompt: Rc<dyn Prompt> = Rc::new(BrowserPrompt);
    let client = ResourceClient::new(
        config.api_base_url.clone(),
        Rc::new(GlooTransport::new()),
        config.status_policy,
        prompt.clone(),
    );
    let page = TransactionsPage::new(
        view.map(|view| Rc::new(view) as Rc<dyn PageView>),
        Rc::new(RestFinanceApi::new(client)),
        Rc::new(DomShell::new(document)),
        prompt,
        config.page.clone(),
    )
    .with_context(|| format!("cannot mount on {}", config.container_selector))?;

    info!("Transactions page mounted on {}", config.container_selector);
    Ok(page)
}
