//! Narrow contracts a page controller depends on, injected at construction.

use crate::error::ApiError;
use shared::{AccountSummary, TransactionItem};

/// Completion of an asynchronous resource call
pub type Completion<T> = Box<dyn FnOnce(Result<T, ApiError>)>;

/// Remote finance operations used by the transactions page
pub trait FinanceApi {
    fn fetch_account(&self, account_id: &str, done: Completion<AccountSummary>);
    fn fetch_transactions(&self, account_id: &str, done: Completion<Vec<TransactionItem>>);
    fn delete_account(&self, account_id: &str, done: Completion<()>);
    fn delete_transaction(&self, transaction_id: &str, done: Completion<()>);
}

/// Application shell hooks owned outside the page
pub trait Shell {
    /// Account list widgets and create forms should reload
    fn notify_siblings_changed(&self);
    /// Everything, including the current page, should reload
    fn refresh_all(&self);
}

/// Blocking user dialogs
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}
