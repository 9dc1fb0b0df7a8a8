//! Transactions page: title and transaction rows of one account, plus the
//! account and transaction deletion gestures.

use crate::capabilities::{FinanceApi, Prompt, Shell};
use crate::config::PageSettings;
use crate::error::PageError;
use crate::pages::markup::transaction_html;
use log::{debug, error, info, warn};
use shared::TransactionItem;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// The DOM subtree a page owns
pub trait PageView {
    fn set_title(&self, title: &str);
    /// Append one rendered fragment after the existing rows
    fn append_row(&self, markup: &str);
    fn clear_rows(&self);
    /// Install the single delegated gesture handler. Called once per page.
    fn bind_actions(&self, handler: Rc<dyn Fn(PageAction)>);
}

/// A gesture recognised inside the page container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    RemoveAccount,
    RemoveTransaction(String),
}

/// What the delegated listener learned about a click target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    /// The click landed on or inside the remove-account control
    pub in_remove_account: bool,
    /// `data-id` of the enclosing remove-transaction button
    pub remove_transaction_id: Option<String>,
}

impl PageAction {
    pub fn from_click(target: &ClickTarget) -> Option<Self> {
        if target.in_remove_account {
            return Some(PageAction::RemoveAccount);
        }
        target
            .remove_transaction_id
            .clone()
            .map(PageAction::RemoveTransaction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub account_id: String,
}

impl RenderOptions {
    pub fn for_account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Uninitialized,
    Empty,
    Loaded(String),
}

struct PageState {
    status: PageStatus,
    last_options: Option<RenderOptions>,
    /// Bumped by every clear/render; completions from older renders are dropped
    generation: u64,
}

struct PageInner {
    view: Rc<dyn PageView>,
    api: Rc<dyn FinanceApi>,
    shell: Rc<dyn Shell>,
    prompt: Rc<dyn Prompt>,
    settings: PageSettings,
    state: RefCell<PageState>,
}

/// Controller of the transactions page. Cloning yields another handle to the same page.
#[derive(Clone)]
pub struct TransactionsPage {
    inner: Rc<PageInner>,
}

impl TransactionsPage {
    /// Bind to `view` and install the delegated gesture handler.
    ///
    /// Fails with [`PageError::MissingContainer`] when there is no view to bind to.
    pub fn new(
        view: Option<Rc<dyn PageView>>,
        api: Rc<dyn FinanceApi>,
        shell: Rc<dyn Shell>,
        prompt: Rc<dyn Prompt>,
        settings: PageSettings,
    ) -> Result<Self, PageError> {
        let view = view.ok_or(PageError::MissingContainer)?;
        let inner = Rc::new(PageInner {
            view,
            api,
            shell,
            prompt,
            settings,
            state: RefCell::new(PageState {
                status: PageStatus::Uninitialized,
                last_options: None,
                generation: 0,
            }),
        });

        let weak: Weak<PageInner> = Rc::downgrade(&inner);
        inner.view.bind_actions(Rc::new(move |action: PageAction| {
            if let Some(page) = weak.upgrade() {
                page.handle(action);
            }
        }));

        Ok(Self { inner })
    }

    /// Load and show the account in `options`. `None` keeps the current state.
    pub fn render(&self, options: Option<RenderOptions>) {
        self.inner.render(options);
    }

    /// Re-render with the last options, if any
    pub fn update(&self) {
        self.inner.update();
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn remove_account(&self) {
        self.inner.remove_account();
    }

    pub fn remove_transaction(&self, id: &str) {
        self.inner.remove_transaction(id);
    }

    pub fn status(&self) -> PageStatus {
        self.inner.state.borrow().status.clone()
    }

    pub fn last_options(&self) -> Option<RenderOptions> {
        self.inner.state.borrow().last_options.clone()
    }
}

impl PageInner {
    fn handle(self: &Rc<Self>, action: PageAction) {
        debug!("Page action {:?}", action);
        match action {
            PageAction::RemoveAccount => self.remove_account(),
            PageAction::RemoveTransaction(id) => self.remove_transaction(&id),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    fn shows_account(&self, account_id: &str) -> bool {
        matches!(&self.state.borrow().last_options, Some(options) if options.account_id == account_id)
    }

    fn render(self: &Rc<Self>, options: Option<RenderOptions>) {
        let Some(options) = options else {
            debug!("Render without options, keeping current state");
            return;
        };

        self.clear();
        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.status = PageStatus::Loaded(options.account_id.clone());
            state.last_options = Some(options.clone());
            state.generation
        };
        info!("Rendering account {}", options.account_id);

        let weak = Rc::downgrade(self);
        let account_id = options.account_id.clone();
        self.api.fetch_account(
            &options.account_id,
            Box::new(move |result| {
                let Some(page) = weak.upgrade() else { return };
                if !page.is_current(generation) {
                    debug!("Dropping stale account {} title", account_id);
                    return;
                }
                match result {
                    Ok(account) => page.render_title(&account.name),
                    Err(e) => warn!("Failed to load account {}: {}", account_id, e),
                }
            }),
        );

        let weak = Rc::downgrade(self);
        let account_id = options.account_id.clone();
        self.api.fetch_transactions(
            &options.account_id,
            Box::new(move |result| {
                let Some(page) = weak.upgrade() else { return };
                if !page.is_current(generation) {
                    debug!("Dropping stale transactions of account {}", account_id);
                    return;
                }
                match result {
                    Ok(items) => page.render_transactions(&items),
                    Err(e) => warn!("Failed to load transactions of account {}: {}", account_id, e),
                }
            }),
        );
    }

    fn update(self: &Rc<Self>) {
        let last_options = self.state.borrow().last_options.clone();
        self.render(last_options);
    }

    fn clear(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.status = PageStatus::Empty;
            state.last_options = None;
        }
        self.render_transactions(&[]);
        self.render_title(&self.settings.placeholder_title);
    }

    fn remove_account(self: &Rc<Self>) {
        let last_options = self.state.borrow().last_options.clone();
        let Some(options) = last_options else {
            debug!("No account shown, nothing to remove");
            return;
        };
        if !self.prompt.confirm(&self.settings.confirm_remove_account) {
            info!("Removal of account {} declined", options.account_id);
            return;
        }

        let clear_eagerly = self.settings.clear_on_confirmed_account_delete;
        let weak = Rc::downgrade(self);
        let shell = self.shell.clone();
        let account_id = options.account_id.clone();
        self.api.delete_account(
            &options.account_id,
            Box::new(move |result| match result {
                Ok(()) => {
                    info!("Account {} removed", account_id);
                    if !clear_eagerly {
                        if let Some(page) = weak.upgrade() {
                            if page.shows_account(&account_id) {
                                page.clear();
                            }
                        }
                    }
                    shell.notify_siblings_changed();
                }
                Err(e) => error!("Failed to remove account {}: {}", account_id, e),
            }),
        );

        // The page goes blank even if the deletion later fails
        if clear_eagerly {
            self.clear();
        }
    }

    fn remove_transaction(&self, id: &str) {
        if !self.prompt.confirm(&self.settings.confirm_remove_transaction) {
            info!("Removal of transaction {} declined", id);
            return;
        }

        let shell = self.shell.clone();
        let transaction_id = id.to_string();
        self.api.delete_transaction(
            id,
            Box::new(move |result| match result {
                Ok(()) => {
                    info!("Transaction {} removed", transaction_id);
                    shell.refresh_all();
                }
                Err(e) => error!("Failed to remove transaction {}: {}", transaction_id, e),
            }),
        );
    }

    fn render_title(&self, name: &str) {
        self.view.set_title(name);
    }

    /// An empty list removes every row; otherwise rows are appended in order
    fn render_transactions(&self, items: &[TransactionItem]) {
        if items.is_empty() {
            self.view.clear_rows();
            return;
        }
        for item in items {
            self.view.append_row(&transaction_html(item));
        }
        debug!("Rendered {} transactions", items.len());
    }
}
