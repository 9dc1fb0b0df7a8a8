//! HTML fragments produced by the pages. Class names are part of the DOM
//! contract the delegated click handler relies on.

use crate::services::dates::format_date;
use shared::TransactionItem;

pub const REMOVE_ACCOUNT_CLASS: &str = "remove-account";
pub const REMOVE_TRANSACTION_CLASS: &str = "transaction__remove";
pub const REMOVE_TRANSACTION_ICON_CLASS: &str = "fa-trash";

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn transaction_html(item: &TransactionItem) -> String {
    format!(
        r#"<div class="transaction transaction_{kind} row">
    <div class="col-md-7 transaction__details">
        <div class="transaction__icon">
            <span class="fa fa-money fa-2x"></span>
        </div>
        <div class="transaction__info">
            <h4 class="transaction__title">{name}</h4>
            <div class="transaction__date">{date}</div>
        </div>
    </div>
    <div class="col-md-3">
        <div class="transaction__summ">
            {sum} <span class="currency">₽</span>
        </div>
    </div>
    <div class="col-md-2 transaction__controls">
        <button class="btn btn-danger {remove_class}" data-id="{id}">
            <i class="fa {icon_class}"></i>
        </button>
    </div>
</div>"#,
        kind = item.transaction_type.as_str(),
        name = escape_html(&item.name),
        date = escape_html(&format_date(&item.created_at)),
        sum = item.sum,
        remove_class = REMOVE_TRANSACTION_CLASS,
        id = escape_html(&item.id),
        icon_class = REMOVE_TRANSACTION_ICON_CLASS,
    )
}
