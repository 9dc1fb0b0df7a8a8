//! In-memory collaborators for unit tests. Requests stay pending until a test
//! completes them, which stands in for the browser event loop.

use crate::capabilities::{Completion, FinanceApi, Prompt, Shell};
use crate::error::{ApiError, RequestError};
use crate::pages::transactions::{PageAction, PageView};
use crate::services::transport::{HttpRequest, HttpTransport, RawResponse, TransportCallback};
use serde_json::Value;
use shared::{AccountSummary, TransactionItem, TransactionType};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Default)]
pub struct QueueTransport {
    sent: RefCell<Vec<HttpRequest>>,
    pending: RefCell<VecDeque<(String, TransportCallback)>>,
}

impl QueueTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Complete the oldest pending request
    pub fn respond(&self, status: u16, body: Value) {
        self.respond_raw(RawResponse {
            status,
            body: Some(body),
        });
    }

    pub fn respond_raw(&self, response: RawResponse) {
        let (_, on_complete) = self
            .pending
            .borrow_mut()
            .pop_front()
            .expect("no pending request");
        on_complete(Ok(response));
    }

    /// Complete the oldest pending request sent to exactly `url`
    pub fn respond_to(&self, url: &str, status: u16, body: Value) {
        let on_complete = {
            let mut pending = self.pending.borrow_mut();
            let index = pending
                .iter()
                .position(|(pending_url, _)| pending_url == url)
                .unwrap_or_else(|| panic!("no pending request to {}", url));
            pending.remove(index).map(|(_, on_complete)| on_complete)
        };
        if let Some(on_complete) = on_complete {
            on_complete(Ok(RawResponse {
                status,
                body: Some(body),
            }));
        }
    }

    pub fn fail(&self, error: RequestError) {
        let (_, on_complete) = self
            .pending
            .borrow_mut()
            .pop_front()
            .expect("no pending request");
        on_complete(Err(error));
    }
}

impl HttpTransport for QueueTransport {
    fn dispatch(&self, request: HttpRequest, on_complete: TransportCallback) {
        let url = request.url.clone();
        self.sent.borrow_mut().push(request);
        self.pending.borrow_mut().push_back((url, on_complete));
    }
}

#[derive(Default)]
pub struct RecordingPrompt {
    answer: Cell<bool>,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        let prompt = Self::default();
        prompt.answer.set(answer);
        prompt
    }

    pub fn set_answer(&self, answer: bool) {
        self.answer.set(answer);
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer.get()
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingShell {
    sibling_notifications: Cell<usize>,
    refreshes: Cell<usize>,
}

impl RecordingShell {
    pub fn sibling_notifications(&self) -> usize {
        self.sibling_notifications.get()
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.get()
    }
}

impl Shell for RecordingShell {
    fn notify_siblings_changed(&self) {
        self.sibling_notifications.set(self.sibling_notifications.get() + 1);
    }

    fn refresh_all(&self) {
        self.refreshes.set(self.refreshes.get() + 1);
    }
}

#[derive(Default)]
pub struct FakeView {
    title: RefCell<String>,
    rows: RefCell<Vec<String>>,
    handler: RefCell<Option<Rc<dyn Fn(PageAction)>>>,
    bind_count: Cell<usize>,
}

impl FakeView {
    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn rows(&self) -> Vec<String> {
        self.rows.borrow().clone()
    }

    pub fn bind_count(&self) -> usize {
        self.bind_count.get()
    }

    /// Deliver a gesture through the delegated handler
    pub fn click(&self, action: PageAction) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(action);
        }
    }
}

impl PageView for FakeView {
    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
    }

    fn append_row(&self, markup: &str) {
        self.rows.borrow_mut().push(markup.to_string());
    }

    fn clear_rows(&self) {
        self.rows.borrow_mut().clear();
    }

    fn bind_actions(&self, handler: Rc<dyn Fn(PageAction)>) {
        self.bind_count.set(self.bind_count.get() + 1);
        *self.handler.borrow_mut() = Some(handler);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchAccount(String),
    FetchTransactions(String),
    DeleteAccount(String),
    DeleteTransaction(String),
}

type Pending<T> = RefCell<VecDeque<Completion<T>>>;

/// `FinanceApi` whose calls wait for the test to complete them
#[derive(Default)]
pub struct FakeApi {
    calls: RefCell<Vec<ApiCall>>,
    accounts: Pending<AccountSummary>,
    transactions: Pending<Vec<TransactionItem>>,
    account_deletes: Pending<()>,
    transaction_deletes: Pending<()>,
}

fn pop<T>(queue: &Pending<T>, what: &str) -> Completion<T> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| panic!("no pending {}", what))
}

impl FakeApi {
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    pub fn complete_account(&self, result: Result<AccountSummary, ApiError>) {
        pop(&self.accounts, "account fetch")(result);
    }

    pub fn complete_transactions(&self, result: Result<Vec<TransactionItem>, ApiError>) {
        pop(&self.transactions, "transaction fetch")(result);
    }

    pub fn complete_account_delete(&self, result: Result<(), ApiError>) {
        pop(&self.account_deletes, "account delete")(result);
    }

    pub fn complete_transaction_delete(&self, result: Result<(), ApiError>) {
        pop(&self.transaction_deletes, "transaction delete")(result);
    }
}

impl FinanceApi for FakeApi {
    fn fetch_account(&self, account_id: &str, done: Completion<AccountSummary>) {
        self.calls.borrow_mut().push(ApiCall::FetchAccount(account_id.to_string()));
        self.accounts.borrow_mut().push_back(done);
    }

    fn fetch_transactions(&self, account_id: &str, done: Completion<Vec<TransactionItem>>) {
        self.calls
            .borrow_mut()
            .push(ApiCall::FetchTransactions(account_id.to_string()));
        self.transactions.borrow_mut().push_back(done);
    }

    fn delete_account(&self, account_id: &str, done: Completion<()>) {
        self.calls.borrow_mut().push(ApiCall::DeleteAccount(account_id.to_string()));
        self.account_deletes.borrow_mut().push_back(done);
    }

    fn delete_transaction(&self, transaction_id: &str, done: Completion<()>) {
        self.calls
            .borrow_mut()
            .push(ApiCall::DeleteTransaction(transaction_id.to_string()));
        self.transaction_deletes.borrow_mut().push_back(done);
    }
}

pub fn account(id: &str, name: &str) -> AccountSummary {
    AccountSummary {
        id: id.to_string(),
        name: name.to_string(),
        sum: 0.0,
    }
}

pub fn transaction(id: &str, transaction_type: TransactionType, name: &str, sum: f64) -> TransactionItem {
    TransactionItem {
        id: id.to_string(),
        transaction_type,
        name: name.to_string(),
        sum,
        created_at: "2019-03-10T03:20:41".to_string(),
        account_id: None,
    }
}
