//! Uniform request executor.
//!
//! Every outbound call funnels through [`ApiClient::fetch`], which normalizes
//! success and failure into the tagged [`Fetched`] result. Transport-level
//! failures are fully absorbed here: they are reported to diagnostics
//! (`tracing`) and to the user (a blocking [`WorkflowEvent::Notice`]), and the
//! caller only ever sees `Fetched::Absent`.

use crate::model::{AppConfig, Fetched, WorkflowEvent};
use anyhow::Result;
use reqwest::Method;
use tokio::sync::mpsc::UnboundedSender;

/// Generic notification shown for any transport-level problem. Callers never
/// receive a distinguishable error, only this message and an absent result.
pub const SERVER_ERROR_NOTICE: &str = "An error occurred while communicating with the server.";

/// Optional per-request configuration. Defaults to a bare GET.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    event_tx: Option<UnboundedSender<WorkflowEvent>>,
}

impl ApiClient {
    /// Build a client from config. When an event sender is attached, request
    /// failures surface to the user through it; without one they only reach
    /// the diagnostic log.
    pub fn new(cfg: &AppConfig, event_tx: Option<UnboundedSender<WorkflowEvent>>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .timeout(cfg.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            event_tx,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one request and normalize the outcome.
    ///
    /// A non-success status is a failure regardless of body content. On
    /// success the body is interpreted as JSON when possible, otherwise kept
    /// as plain text. Exactly one `Fetched` variant is produced per call.
    pub async fn fetch(&self, url: &str, opts: RequestOptions) -> Fetched {
        let mut req = self.http.request(opts.method, url);
        for (name, value) in &opts.headers {
            req = req.header(name, value);
        }
        if let Some(body) = opts.body {
            req = req.body(body);
        }

        let res = match req.send().await {
            Ok(res) => res,
            Err(err) => return self.fail(url, &err.to_string()),
        };
        let status = res.status();
        if !status.is_success() {
            return self.fail(url, &format!("HTTP {}", status.as_u16()));
        }
        let text = match res.text().await {
            Ok(text) => text,
            Err(err) => return self.fail(url, &err.to_string()),
        };
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => Fetched::Structured(value),
            Err(_) => Fetched::Text(text),
        }
    }

    fn fail(&self, url: &str, detail: &str) -> Fetched {
        tracing::warn!(url, detail, "request failed");
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(WorkflowEvent::Notice(SERVER_ERROR_NOTICE.into()));
        }
        Fetched::Absent
    }

    // Endpoint helpers. All GET; query values are URL-encoded.

    pub async fn summarize(&self, query: &str) -> Fetched {
        let url = format!(
            "{}/ai/summarize?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.fetch(&url, RequestOptions::default()).await
    }

    pub async fn publications(&self) -> Fetched {
        let url = format!("{}/publications/api", self.base_url);
        self.fetch(&url, RequestOptions::default()).await
    }

    /// An empty query is still forwarded; the service treats it as "all".
    pub async fn search_publications(&self, query: &str) -> Fetched {
        let url = format!(
            "{}/publications/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        self.fetch(&url, RequestOptions::default()).await
    }

    pub async fn report_history(&self) -> Fetched {
        let url = format!("{}/report/history", self.base_url);
        self.fetch(&url, RequestOptions::default()).await
    }

    /// Report URL handed to the host browser; never fetched by this client.
    pub fn report_url(&self, query: &str) -> String {
        format!(
            "{}/report/generate?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    pub fn report_view_url(&self, id: i64) -> String {
        format!("{}/report/view/{}", self.base_url, id)
    }
}
