use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single income or expense row as returned by `GET /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    /// Server-side identifier (the API sends either a number or a string)
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub name: String,
    pub sum: f64,
    /// Creation timestamp, `YYYY-MM-DDTHH:MM:SS(.fraction)`
    pub created_at: String,
    /// Owning account, present on some server responses
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_optional_id")]
    pub account_id: Option<String>,
}

/// Direction of a transaction; drives the `transaction_<type>` CSS modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account as returned by `GET /account/:id` and `GET /account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    /// Current balance
    #[serde(default)]
    pub sum: f64,
}

/// Payload for `POST /account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
}

impl NewAccount {
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![("name".to_string(), self.name.clone())]
    }
}

/// Payload for `POST /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub name: String,
    pub sum: f64,
    pub account_id: String,
}

impl NewTransaction {
    /// Flatten into the scalar form fields the server expects
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("type".to_string(), self.transaction_type.as_str().to_string()),
            ("name".to_string(), self.name.clone()),
            ("sum".to_string(), self.sum.to_string()),
            ("account_id".to_string(), self.account_id.clone()),
        ]
    }
}

/// Conventional server reply: `{ success, data?, error? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Split on the `success` discriminator.
    ///
    /// A rejected reply without an `error` message still yields an error so
    /// callers never mistake it for success.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "request was rejected by the server".to_string()))
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
