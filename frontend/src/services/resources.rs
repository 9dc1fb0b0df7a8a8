use crate::capabilities::{Completion, FinanceApi, Prompt};
use crate::error::{ApiError, RequestError};
use crate::services::transport::{create_request, HttpTransport, Method, RequestData, RequestOptions, StatusPolicy};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{AccountSummary, ApiEnvelope, NewAccount, NewTransaction, TransactionItem};
use std::rc::Rc;

/// Shared plumbing of every resource: base URL, transport and the
/// interpretation of the `{success, data, error}` envelope.
#[derive(Clone)]
pub struct ResourceClient {
    base_url: String,
    transport: Rc<dyn HttpTransport>,
    policy: StatusPolicy,
    prompt: Rc<dyn Prompt>,
}

impl ResourceClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn HttpTransport>,
        policy: StatusPolicy,
        prompt: Rc<dyn Prompt>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            policy,
            prompt,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one request and hand back the envelope's `data`.
    ///
    /// A `success: false` reply is shown to the user before it is returned
    /// as `ApiError::Rejected`.
    fn call<T: DeserializeOwned + 'static>(
        &self,
        method: Method,
        path: &str,
        data: RequestData,
        done: Completion<Option<T>>,
    ) {
        let prompt = self.prompt.clone();
        let options = RequestOptions::new(method, self.url(path), move |outcome| {
            done(decode_envelope(outcome, prompt.as_ref()))
        })
        .with_data(data);
        create_request(self.transport.as_ref(), self.policy, options);
    }
}

fn decode_envelope<T: DeserializeOwned>(
    outcome: Result<Value, RequestError>,
    prompt: &dyn Prompt,
) -> Result<Option<T>, ApiError> {
    let body = outcome?;
    let envelope: ApiEnvelope<T> =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.into_result().map_err(|message| {
        warn!("Server rejected request: {}", message);
        prompt.alert(&message);
        ApiError::Rejected(message)
    })
}

fn require<T>(data: Option<T>, what: &str) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::Decode(format!("response carries no {}", what)))
}

/// `/account` resource
#[derive(Clone)]
pub struct AccountResource {
    client: ResourceClient,
}

impl AccountResource {
    pub const URL: &'static str = "/account";

    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub fn get(&self, id: &str, done: Completion<AccountSummary>) {
        self.client.call::<AccountSummary>(
            Method::Get,
            &format!("{}/{}", Self::URL, id),
            RequestData::new(),
            Box::new(move |result| done(result.and_then(|data| require(data, "account")))),
        );
    }

    pub fn list(&self, done: Completion<Vec<AccountSummary>>) {
        self.client.call::<Vec<AccountSummary>>(
            Method::Get,
            Self::URL,
            RequestData::new(),
            Box::new(move |result| done(result.map(Option::unwrap_or_default))),
        );
    }

    pub fn create(&self, account: &NewAccount, done: Completion<()>) {
        let name = account.name.clone();
        self.client.call::<Value>(
            Method::Post,
            Self::URL,
            account.to_fields().into_iter().collect(),
            Box::new(move |result| {
                if result.is_ok() {
                    info!("Created account {:?}", name);
                }
                done(result.map(|_| ()))
            }),
        );
    }

    pub fn remove(&self, id: &str, done: Completion<()>) {
        self.client.call::<Value>(
            Method::Delete,
            &format!("{}/{}", Self::URL, id),
            RequestData::new().with("id", id),
            Box::new(move |result| done(result.map(|_| ()))),
        );
    }
}

/// `/transaction` resource
#[derive(Clone)]
pub struct TransactionResource {
    client: ResourceClient,
}

impl TransactionResource {
    pub const URL: &'static str = "/transaction";

    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub fn list(&self, account_id: &str, done: Completion<Vec<TransactionItem>>) {
        self.client.call::<Vec<TransactionItem>>(
            Method::Get,
            Self::URL,
            RequestData::new().with("account_id", account_id),
            Box::new(move |result| done(result.map(Option::unwrap_or_default))),
        );
    }

    pub fn create(&self, transaction: &NewTransaction, done: Completion<()>) {
        self.client.call::<Value>(
            Method::Post,
            Self::URL,
            transaction.to_fields().into_iter().collect(),
            Box::new(move |result| done(result.map(|_| ()))),
        );
    }

    pub fn remove(&self, id: &str, done: Completion<()>) {
        self.client.call::<Value>(
            Method::Delete,
            &format!("{}/{}", Self::URL, id),
            RequestData::new().with("id", id),
            Box::new(move |result| done(result.map(|_| ()))),
        );
    }
}

/// `FinanceApi` over the REST resources
#[derive(Clone)]
pub struct RestFinanceApi {
    pub accounts: AccountResource,
    pub transactions: TransactionResource,
}

impl RestFinanceApi {
    pub fn new(client: ResourceClient) -> Self {
        Self {
            accounts: AccountResource::new(client.clone()),
            transactions: TransactionResource::new(client),
        }
    }
}

impl FinanceApi for RestFinanceApi {
    fn fetch_account(&self, account_id: &str, done: Completion<AccountSummary>) {
        self.accounts.get(account_id, done);
    }

    fn fetch_transactions(&self, account_id: &str, done: Completion<Vec<TransactionItem>>) {
        self.transactions.list(account_id, done);
    }

    fn delete_account(&self, account_id: &str, done: Completion<()>) {
        self.accounts.remove(account_id, done);
    }

    fn delete_transaction(&self, transaction_id: &str, done: Completion<()>) {
        self.transactions.remove(transaction_id, done);
    }
}
