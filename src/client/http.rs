//! HTTP implementation of [`PortariaApi`] over reqwest

use async_trait::async_trait;
use config::ConfigError;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE},
    Client, Method, RequestBuilder, Url,
};
use serde::de::DeserializeOwned;

use super::{
    response::{decode_body, is_empty_response, required},
    PortariaApi,
};
use crate::{
    config::ApiConfig,
    error::{ConsoleError, ConsoleResult},
    models::{ClearReport, Dashboard, HandoverRequest, Item, ItemForm, Loan, LoanRequest, User, UserForm},
};

/// Stateless client for the loan service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

/// Headers sent with every request
pub fn default_headers(config: &ApiConfig) -> ConsoleResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let name = HeaderName::from_bytes(config.bypass_header.as_bytes()).map_err(|e| {
        ConsoleError::Config(ConfigError::Message(format!(
            "Invalid bypass header name '{}': {}",
            config.bypass_header, e
        )))
    })?;
    let value = HeaderValue::from_str(&config.bypass_value).map_err(|e| {
        ConsoleError::Config(ConfigError::Message(format!("Invalid bypass header value: {}", e)))
    })?;
    headers.insert(name, value);

    Ok(headers)
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> ConsoleResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ConsoleError::Config(ConfigError::Message(format!("Invalid API base URL '{}': {}", config.base_url, e)))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConsoleError::Config(ConfigError::Message(format!(
                "API base URL '{}' cannot carry a path",
                config.base_url
            ))));
        }

        let http = Client::builder().default_headers(default_headers(config)?).build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an endpoint; each segment is percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> ConsoleResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConsoleError::InvalidState(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ConsoleResult<RequestBuilder> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// Send a request and normalize the response
    async fn execute<T: DeserializeOwned + Send>(&self, builder: RequestBuilder) -> ConsoleResult<Option<T>> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        tracing::debug!("Request: {} {}", method, url);

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::error!("Request {} {} failed: {}", method, url, e);
            ConsoleError::Transport(e)
        })?;
        let status = response.status();

        tracing::debug!("Response: {} {} -> {}", method, url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error on {} {}: {} - {}", method, url, status.as_u16(), body);
            return Err(ConsoleError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let content_length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        if is_empty_response(status, content_length) {
            tracing::debug!("Empty response ({})", status);
            return Ok(None);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await?;

        decode_body(content_type.as_deref(), &text)
    }

    async fn fetch<T: DeserializeOwned + Send>(&self, method: Method, segments: &[&str]) -> ConsoleResult<T> {
        let what = format!("{} /{}", method, segments.join("/"));
        let payload = self.execute(self.request(method, segments)?).await?;
        required(payload, &what)
    }

    async fn fetch_list<T: DeserializeOwned + Send>(&self, segments: &[&str]) -> ConsoleResult<Vec<T>> {
        let payload: Option<Vec<T>> = self.execute(self.request(Method::GET, segments)?).await?;
        Ok(payload.unwrap_or_default())
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> ConsoleResult<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let what = format!("{} /{}", method, segments.join("/"));
        let payload = self.execute(self.request(method, segments)?.json(body)).await?;
        required(payload, &what)
    }

    async fn delete(&self, segments: &[&str]) -> ConsoleResult<()> {
        let _: Option<serde_json::Value> = self.execute(self.request(Method::DELETE, segments)?).await?;
        Ok(())
    }
}

#[async_trait]
impl PortariaApi for ApiClient {
    async fn dashboard(&self) -> ConsoleResult<Dashboard> {
        self.fetch(Method::GET, &["portaria", "dashboard"]).await
    }

    async fn list_users(&self) -> ConsoleResult<Vec<User>> {
        self.fetch_list(&["users"]).await
    }

    async fn get_user(&self, id: &str) -> ConsoleResult<User> {
        self.fetch(Method::GET, &["users", id]).await
    }

    async fn find_user_by_badge(&self, badge: &str) -> ConsoleResult<User> {
        self.fetch(Method::GET, &["users", "matricula", badge]).await
    }

    async fn create_user(&self, form: &UserForm) -> ConsoleResult<User> {
        self.send_json(Method::POST, &["users"], form).await
    }

    async fn update_user(&self, id: &str, form: &UserForm) -> ConsoleResult<User> {
        self.send_json(Method::PUT, &["users", id], form).await
    }

    async fn delete_user(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&["users", id]).await
    }

    async fn list_items(&self) -> ConsoleResult<Vec<Item>> {
        self.fetch_list(&["items"]).await
    }

    async fn list_available_items(&self) -> ConsoleResult<Vec<Item>> {
        self.fetch_list(&["items", "disponiveis"]).await
    }

    async fn get_item(&self, id: &str) -> ConsoleResult<Item> {
        self.fetch(Method::GET, &["items", id]).await
    }

    async fn create_item(&self, form: &ItemForm) -> ConsoleResult<Item> {
        self.send_json(Method::POST, &["items"], form).await
    }

    async fn update_item(&self, id: &str, form: &ItemForm) -> ConsoleResult<Item> {
        self.send_json(Method::PUT, &["items", id], form).await
    }

    async fn set_item_availability(&self, id: &str, available: bool) -> ConsoleResult<Item> {
        let builder = self
            .request(Method::PATCH, &["items", id, "disponibilidade"])?
            .query(&[("disponivel", available)]);
        let payload = self.execute(builder).await?;
        required(payload, "PATCH /items/{id}/disponibilidade")
    }

    async fn delete_item(&self, id: &str) -> ConsoleResult<()> {
        self.delete(&["items", id]).await
    }

    async fn list_loans(&self) -> ConsoleResult<Vec<Loan>> {
        self.fetch_list(&["reservas"]).await
    }

    async fn list_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>> {
        self.fetch_list(&["reservas", "usuario", "matricula", badge]).await
    }

    async fn list_active_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>> {
        self.fetch_list(&["reservas", "ativas", "matricula", badge]).await
    }

    async fn create_loan(&self, request: &LoanRequest) -> ConsoleResult<Loan> {
        self.send_json(Method::POST, &["reservas"], request).await
    }

    async fn register_pickup(&self, loan_id: &str, request: &HandoverRequest) -> ConsoleResult<Loan> {
        self.send_json(Method::PATCH, &["reservas", loan_id, "retirada"], request).await
    }

    async fn register_return(&self, loan_id: &str, request: &HandoverRequest) -> ConsoleResult<Loan> {
        self.send_json(Method::PATCH, &["reservas", loan_id, "devolucao"], request).await
    }

    async fn clear_all_loans(&self) -> ConsoleResult<ClearReport> {
        self.fetch(Method::DELETE, &["portaria", "limpar"]).await
    }

    async fn read_badge(&self, badge: &str) -> ConsoleResult<User> {
        self.fetch(Method::GET, &["portaria", "cracha", badge]).await
    }

    async fn reserve_by_badge(&self, badge: &str, item_id: &str) -> ConsoleResult<Loan> {
        self.fetch(Method::POST, &["portaria", "cracha", badge, "reservar", item_id]).await
    }

    async fn pickup_by_badge(&self, badge: &str, loan_id: &str) -> ConsoleResult<Loan> {
        self.fetch(Method::POST, &["portaria", "cracha", badge, "retirar", loan_id]).await
    }

    async fn return_by_badge(&self, badge: &str, loan_id: &str) -> ConsoleResult<Loan> {
        self.fetch(Method::POST, &["portaria", "cracha", badge, "devolver", loan_id]).await
    }

    async fn active_loans_by_badge(&self, badge: &str) -> ConsoleResult<Vec<Loan>> {
        self.fetch_list(&["portaria", "cracha", badge, "reservas-ativas"]).await
    }
}
