use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use fz_core::{Articles, Category, CategoryOrder, Culture, Error, Result, Subcategory};

use crate::config::ClientConfig;
use crate::query::{ArticleQuery, QueryBuilder};
use crate::request::{self, RequestTarget};

const MAX_REDIRECTS: usize = 5;

/// Blocking client for the Feedzilla news API.
///
/// Every call is a single GET round trip with no retries. The transport is
/// held until [`ApiClient::close`] or drop.
#[derive(Debug)]
pub struct ApiClient {
    config: ClientConfig,
    http: Option<Client>,
}

impl ApiClient {
    /// Client against the public API root.
    pub fn new(timeout_ms: u64) -> Result<Self> {
        Self::from_config(ClientConfig::default().with_timeout_ms(timeout_ms))
    }

    pub fn with_base_url(timeout_ms: u64, url: &str) -> Result<Self> {
        Self::from_config(ClientConfig::default().with_timeout_ms(timeout_ms).with_base_url(url)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = build_transport(&config)?;
        info!(
            "📰 Feedzilla client ready at {} (timeout {}ms)",
            config.base_url,
            config.timeout.as_millis()
        );
        Ok(Self {
            config,
            http: Some(http),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn client_source(&self) -> &str {
        &self.config.client_source
    }

    pub fn set_client_source(&mut self, source: impl Into<String>) {
        self.config.client_source = source.into();
    }

    pub fn list_cultures(&self) -> Result<Vec<Culture>> {
        self.get(&request::cultures_request())
    }

    /// All categories, unordered.
    pub fn categories(&self) -> Result<Vec<Category>> {
        self.list_categories(None, Some(CategoryOrder::None))
    }

    pub fn list_categories(&self, culture: Option<&Culture>, order: Option<CategoryOrder>) -> Result<Vec<Category>> {
        self.get(&request::categories_request(culture, order))
    }

    /// All subcategories across categories, unordered.
    pub fn subcategories(&self) -> Result<Vec<Subcategory>> {
        self.list_subcategories(None, None, Some(CategoryOrder::None))
    }

    pub fn list_subcategories(
        &self,
        category: Option<&Category>,
        culture: Option<&Culture>,
        order: Option<CategoryOrder>,
    ) -> Result<Vec<Subcategory>> {
        self.get(&request::subcategories_request(category, culture, order))
    }

    /// Starts a fluent article query bound to this client.
    pub fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Lists (`search` is `None`) or searches articles matching `query`.
    pub fn query_articles(&self, query: &ArticleQuery, search: Option<&str>) -> Result<Articles> {
        let target = request::articles_request(query, search, &self.config.client_source);
        self.get(&target)
    }

    /// Releases the transport. Safe to call more than once.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            info!("Feedzilla client at {} closed", self.config.base_url);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    fn get<T: DeserializeOwned>(&self, target: &RequestTarget) -> Result<T> {
        let http = self.http.as_ref().ok_or(Error::Closed)?;
        let url = target.to_url(&self.config.base_url)?;
        debug!("GET {}", url);

        let response = http.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            warn!("⚠️ {} returned {}", url, status);
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("json") {
            debug!("{} answered with content type {:?}, expected JSON", url, content_type);
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn build_transport(config: &ClientConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    // Redirects may not leave the configured host.
    let host = config.host().map(str::to_string);
    let redirects = Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if attempt.url().host_str() == host.as_deref() {
            attempt.follow()
        } else {
            attempt.stop()
        }
    });

    // A zero timeout means wait indefinitely.
    let timeout = (!config.timeout.is_zero()).then_some(config.timeout);
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .redirect(redirects)
        .build()?;
    Ok(client)
}
