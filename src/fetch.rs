use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use wreq::Client;

use crate::error::{self, DashboardError};
use crate::filter::FilterCriteria;
use crate::model::{Flight, Stats};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub api_url: String,
    pub proxy: Option<String>,
    pub timeout: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            proxy: None,
            timeout: 30,
        }
    }
}

/// The backend the dashboard polls.
#[async_trait]
pub trait FlightApi: Send + Sync {
    async fn fetch_stats(&self) -> Result<Stats, DashboardError>;

    async fn fetch_flights(&self, filters: &FilterCriteria) -> Result<Vec<Flight>, DashboardError>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(options: &FetchOptions) -> Result<Self, DashboardError> {
        let mut builder = Client::builder().timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;

        Ok(Self {
            client,
            base_url: options.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, DashboardError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?params, "GET");

        let mut request = self.client.get(url.as_str());
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        match status {
            429 => return Err(DashboardError::RateLimited),
            _ if status >= 400 => return Err(DashboardError::HttpStatus(status)),
            _ => {}
        }

        let body = response.text().await.map_err(error::from_http_error)?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl FlightApi for HttpApi {
    async fn fetch_stats(&self) -> Result<Stats, DashboardError> {
        self.get_json("/stats", &[]).await
    }

    async fn fetch_flights(&self, filters: &FilterCriteria) -> Result<Vec<Flight>, DashboardError> {
        let request = filters.request();
        self.get_json(request.endpoint.path(), &request.params).await
    }
}
