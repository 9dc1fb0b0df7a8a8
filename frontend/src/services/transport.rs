//! Request transport: turns declarative request options into exactly one
//! network call and exactly one callback invocation.

use crate::error::RequestError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat string→scalar mapping sent with a request, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    entries: Vec<(String, String)>,
}

impl RequestData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a field. An overwritten field keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RequestData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = RequestData::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

/// Receives the parsed body on success or the reason of failure, once.
pub type RequestCallback = Box<dyn FnOnce(Result<Value, RequestError>)>;

pub struct RequestOptions {
    pub url: String,
    pub method: Method,
    pub data: RequestData,
    pub callback: RequestCallback,
}

impl RequestOptions {
    pub fn new(
        method: Method,
        url: impl Into<String>,
        callback: impl FnOnce(Result<Value, RequestError>) + 'static,
    ) -> Self {
        Self {
            url: url.into(),
            method,
            data: RequestData::new(),
            callback: Box::new(callback),
        }
    }

    pub fn with_data(mut self, data: RequestData) -> Self {
        self.data = data;
        self
    }
}

/// A fully resolved request, ready for a transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Form fields; `None` for GET
    pub body: Option<RequestData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed JSON body; `None` when the body was empty or not JSON
    pub body: Option<Value>,
}

/// Decides which HTTP statuses count as success
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// 200..=299
    #[default]
    Range2xx,
    /// The status code's decimal text contains "20". Accepts e.g. 120 or 520
    /// and rejects 250.
    ContainsTwenty,
}

impl StatusPolicy {
    pub fn is_success(&self, status: u16) -> bool {
        match self {
            StatusPolicy::Range2xx => (200..=299).contains(&status),
            StatusPolicy::ContainsTwenty => status.to_string().contains("20"),
        }
    }
}

pub type TransportCallback = Box<dyn FnOnce(Result<RawResponse, RequestError>)>;

/// Issues a resolved request and reports its raw outcome.
///
/// Implementations must invoke `on_complete` exactly once, including when the
/// request cannot be sent at all.
pub trait HttpTransport {
    fn dispatch(&self, request: HttpRequest, on_complete: TransportCallback);
}

/// Append `data` to `url` as `?k1=v1&k2=v2`. Values are not escaped.
pub fn encode_query(url: &str, data: &RequestData) -> String {
    if data.is_empty() {
        return url.to_string();
    }
    let query = data
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", url, query)
}

/// Resolve method, url and data into the request that goes on the wire.
pub fn prepare(method: Method, url: &str, data: &RequestData) -> Result<HttpRequest, RequestError> {
    validate_url(url)?;
    if let Some((key, _)) = data.iter().find(|(key, _)| key.trim().is_empty()) {
        return Err(RequestError::InvalidField { key: key.to_string() });
    }

    Ok(match method {
        Method::Get => HttpRequest {
            method,
            url: encode_query(url, data),
            body: None,
        },
        _ => HttpRequest {
            method,
            url: url.to_string(),
            body: Some(data.clone()),
        },
    })
}

fn validate_url(url: &str) -> Result<(), RequestError> {
    let invalid = |reason: &str| RequestError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };
    if url.is_empty() {
        return Err(invalid("url is empty"));
    }
    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("url contains whitespace or control characters"));
    }
    Ok(())
}

/// Issue one request described by `options`.
///
/// Build failures, network failures and failing statuses all arrive through
/// `options.callback` as `Err`; a success delivers the parsed body
/// (`Value::Null` when the body was not JSON).
pub fn create_request(transport: &dyn HttpTransport, policy: StatusPolicy, options: RequestOptions) {
    let RequestOptions {
        url,
        method,
        data,
        callback,
    } = options;

    let request = match prepare(method, &url, &data) {
        Ok(request) => request,
        Err(e) => {
            warn!("Refusing to send {} {}: {}", method, url, e);
            callback(Err(e));
            return;
        }
    };

    debug!("{} {}", request.method, request.url);
    transport.dispatch(
        request,
        Box::new(move |outcome| callback(outcome.and_then(|response| classify(policy, response)))),
    );
}

fn classify(policy: StatusPolicy, response: RawResponse) -> Result<Value, RequestError> {
    if policy.is_success(response.status) {
        Ok(response.body.unwrap_or(Value::Null))
    } else {
        warn!("Request failed with status {}", response.status);
        Err(RequestError::Status {
            status: response.status,
            body: response.body,
        })
    }
}
