pub mod markup;
pub mod transactions;

pub use transactions::{PageAction, PageView, RenderOptions, TransactionsPage};
