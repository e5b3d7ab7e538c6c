//! Blocking HTTP client for the webhook gateway.
//!
//! Every call is a single JSON POST; no retries are attempted. The account
//! identifier field is stamped onto each body here so callers only build the
//! operation-specific part.

use crate::api::endpoints::{Endpoint, EndpointPaths};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use reqwest::blocking::{Client, Response};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub type Payload = Map<String, Value>;

pub struct WebhookClient {
    client: Client,
    base: String,
    paths: EndpointPaths,
    account_field: String,
    account_id: String,
}

impl WebhookClient {
    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::default()
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Self::builder()
            .base(&cfg.webhook_base)
            .paths(cfg.endpoints.clone())
            .account(&cfg.account_field, &cfg.account_id)
            .timeout(cfg.request_timeout())
            .build()
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.paths.url(&self.base, endpoint)
    }

    /// POST `body` to `endpoint` and decode the reply.
    ///
    /// - transport failure → `AppError::Http`
    /// - error flag in the payload or non-2xx status → `AppError::Remote`
    /// - empty or non-JSON body → `Value::Null` (normalizes to no records)
    pub fn post(&self, endpoint: Endpoint, body: Payload) -> AppResult<Value> {
        let response = self.send(endpoint, body)?;
        let status = response.status();
        let text = response.text()?;

        let value = decode_body(endpoint, &text);
        debug!(%endpoint, %status, reply = %value, "webhook reply");

        if let Some(message) = remote_error(&value) {
            return Err(AppError::Remote(message));
        }
        if !status.is_success() {
            return Err(AppError::Remote(format!(
                "The server responded with status {status}"
            )));
        }
        Ok(value)
    }

    /// POST `body` and report only whether the gateway accepted it (2xx).
    pub fn post_accepted(&self, endpoint: Endpoint, body: Payload) -> AppResult<bool> {
        let response = self.send(endpoint, body)?;
        let status = response.status();
        debug!(%endpoint, %status, "webhook status");
        Ok(status.is_success())
    }

    fn send(&self, endpoint: Endpoint, mut body: Payload) -> AppResult<Response> {
        body.insert(
            self.account_field.clone(),
            Value::String(self.account_id.clone()),
        );
        let url = self.url(endpoint);
        debug!(%endpoint, %url, "sending webhook request");

        self.client
            .post(&url)
            .json(&Value::Object(body))
            .send()
            .map_err(|e| {
                warn!(%endpoint, error = %e, "webhook request failed");
                AppError::from(e)
            })
    }
}

fn decode_body(endpoint: Endpoint, text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!(%endpoint, error = %e, "webhook reply is not JSON");
            Value::Null
        }
    }
}

/// Message of a gateway-reported failure: `status == "error"` or `error == true`.
pub fn remote_error(value: &Value) -> Option<String> {
    let obj = value.as_object()?;

    let status_error = obj
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case("error"));
    let flag_error = obj.get("error").and_then(Value::as_bool).unwrap_or(false);

    if !(status_error || flag_error) {
        return None;
    }

    let message = obj
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or("The server reported an error.");
    Some(message.to_string())
}

/// Builder for [`WebhookClient`].
#[derive(Debug)]
pub struct WebhookClientBuilder {
    base: String,
    paths: EndpointPaths,
    account_field: String,
    account_id: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for WebhookClientBuilder {
    fn default() -> Self {
        Self {
            base: String::new(),
            paths: EndpointPaths::default(),
            account_field: "id_subcuenta".to_string(),
            account_id: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("shifttrack/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl WebhookClientBuilder {
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn paths(mut self, paths: EndpointPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn account(mut self, field: impl Into<String>, id: impl Into<String>) -> Self {
        self.account_field = field.into();
        self.account_id = id.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> AppResult<WebhookClient> {
        if self.base.trim().is_empty() {
            return Err(AppError::Config("webhook base URL is not set".into()));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;

        Ok(WebhookClient {
            client,
            base: self.base,
            paths: self.paths,
            account_field: self.account_field,
            account_id: self.account_id,
        })
    }
}
