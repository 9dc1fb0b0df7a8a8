use crate::error::RequestError;
use crate::services::transport::{HttpRequest, HttpTransport, Method, RawResponse, RequestData, TransportCallback};
use gloo::net::http::{Request, RequestBuilder};
use log::error;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::FormData;

/// Browser transport backed by `fetch`
#[derive(Clone, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }

    fn build(request: &HttpRequest) -> Result<Request, RequestError> {
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        match &request.body {
            Some(data) => Self::with_form(builder, data),
            None => builder
                .build()
                .map_err(|e| RequestError::Build(e.to_string())),
        }
    }

    fn with_form(builder: RequestBuilder, data: &RequestData) -> Result<Request, RequestError> {
        let form = FormData::new()
            .map_err(|e| RequestError::Build(format!("FormData unavailable: {:?}", e)))?;
        for (key, value) in data.iter() {
            form.append_with_str(key, value)
                .map_err(|e| RequestError::Build(format!("failed to append {}: {:?}", key, e)))?;
        }
        builder
            .body(form)
            .map_err(|e| RequestError::Build(e.to_string()))
    }
}

impl HttpTransport for GlooTransport {
    fn dispatch(&self, request: HttpRequest, on_complete: TransportCallback) {
        let built = match Self::build(&request) {
            Ok(built) => built,
            Err(e) => {
                error!("Failed to build {} {}: {}", request.method, request.url, e);
                on_complete(Err(e));
                return;
            }
        };

        spawn_local(async move {
            match built.send().await {
                Ok(response) => {
                    let status = response.status();
                    let body = response.json::<Value>().await.ok();
                    on_complete(Ok(RawResponse { status, body }));
                }
                Err(e) => {
                    error!("Network error on {} {}: {}", request.method, request.url, e);
                    on_complete(Err(RequestError::Network(e.to_string())));
                }
            }
        });
    }
}
