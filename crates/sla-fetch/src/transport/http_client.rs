//! HTTP query service over the resource-graph endpoint.
//!
//! One call is one attempt; retries and backoff belong to the fetcher.

use sla_core::config::TransportConfig;
use sla_core::errors::QueryError;

use super::protocol::{classify, decode_page, error_detail, GraphRequest};
use crate::service::{QueryPage, QueryRequest, QueryService};

const QUERY_PATH: &str = "/providers/Microsoft.ResourceGraph/resources";

fn transient(reason: String) -> QueryError {
    QueryError::Transient { reason }
}

#[derive(Debug)]
pub struct HttpQueryService {
    client: reqwest::blocking::Client,
    url: String,
    bearer_token: Option<String>,
}

impl HttpQueryService {
    /// Build a service from transport config. The bearer token is read from
    /// the configured environment variable.
    pub fn new(config: &TransportConfig) -> Result<Self, QueryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .build()
            .map_err(|e| transient(e.to_string()))?;

        let url = format!(
            "{}{QUERY_PATH}?api-version={}",
            config.base_url.trim_end_matches('/'),
            config.api_version
        );

        Ok(Self {
            client,
            url,
            bearer_token: config.bearer_token(),
        })
    }
}

impl QueryService for HttpQueryService {
    fn execute(&self, request: &QueryRequest) -> Result<QueryPage, QueryError> {
        let body = GraphRequest::from(request);
        let mut req = self.client.post(&self.url).json(&body);
        if let Some(ref token) = self.bearer_token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|e| transient(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| transient(e.to_string()))?;

        if status.is_success() {
            decode_page(&body)
        } else {
            Err(classify(status.as_u16(), &error_detail(&body)))
        }
    }
}
