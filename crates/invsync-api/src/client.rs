//! HTTP client for the inventory REST API.
//!
//! Wraps `reqwest` with inventory-specific error handling, session cookie
//! management, and typed response deserialization. Non-2xx responses are
//! surfaced as [`ApiError::Api`] carrying the server's `msg`/`message`
//! body field when one is present.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};

use crate::error::ApiError;
use crate::session::SessionToken;
use crate::types::{
    AuthResponse, ColorRecord, ColorsResponse, Credentials, NewProduct, Product, RegisterPayload,
};

const DEFAULT_USER_AGENT: &str = "invsync/0.1 (inventory-import)";
const DEFAULT_UPDATE_TIMEOUT_SECS: u64 = 5;

/// Client for the inventory REST API.
///
/// Manages the HTTP client, base URL, per-update timeout, and the optional
/// session token. Use [`InventoryClient::new`] for the common case or
/// [`InventoryClient::with_options`] to set everything explicitly (tests
/// point the base URL at a wiremock server).
pub struct InventoryClient {
    client: Client,
    base_url: Url,
    update_timeout: Duration,
    session: Option<SessionToken>,
}

impl InventoryClient {
    /// Creates a client with the default user agent and update timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::with_options(
            base_url,
            timeout_secs,
            DEFAULT_UPDATE_TIMEOUT_SECS,
            DEFAULT_USER_AGENT,
        )
    }

    /// Creates a client with explicit timeouts and user agent.
    ///
    /// `update_timeout_secs` applies only to `PUT /api/product/:id` calls,
    /// which get a short per-request deadline so one hung update cannot
    /// stall a whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_options(
        base_url: &str,
        timeout_secs: u64,
        update_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining relative endpoint paths appends rather than replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            update_timeout: Duration::from_secs(update_timeout_secs),
            session: None,
        })
    }

    /// Installs a previously established session token.
    pub fn set_session(&mut self, token: SessionToken) {
        self.session = Some(token);
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    /// Lists products, optionally filtered server-side by style code.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the body does not match the expected shape.
    pub async fn list_products(
        &self,
        style_code: Option<&str>,
    ) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("api/product")?;
        if let Some(code) = style_code {
            url.query_pairs_mut().append_pair("style_code", code);
        }
        let body = self.send_json(self.request(Method::GET, &url), &url).await?;
        let products: Vec<Product> =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        tracing::debug!(count = products.len(), "fetched product listing");
        Ok(products)
    }

    /// Creates a product. The response body is not consulted; any 2xx
    /// status counts as created.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response (server `msg` preferred).
    /// - [`ApiError::Http`] on network failure.
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        let url = self.endpoint("api/product")?;
        let response = self.request(Method::POST, &url).json(product).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    /// Updates a product's rack space.
    ///
    /// Returns the echoed `product` object when the server includes one,
    /// `None` otherwise — callers decide what a missing echo means. Runs
    /// under the short update timeout.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response (server `msg` preferred).
    /// - [`ApiError::Http`] on network failure or timeout.
    pub async fn update_rack_space(
        &self,
        product_id: &str,
        rack_space: &str,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let url = self.endpoint(&format!("api/product/{product_id}"))?;
        let response = self
            .request(Method::PUT, &url)
            .timeout(self.update_timeout)
            .json(&serde_json::json!({ "rack_space": rack_space }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        // A 2xx with a non-JSON or product-less body is not an error at this
        // layer; it simply carries no echo.
        let text = response.text().await?;
        let echoed = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| body.get("product").filter(|v| !v.is_null()).cloned());
        Ok(echoed)
    }

    /// Lists color records from the colors endpoint envelope.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if the envelope does not match.
    pub async fn list_colors(&self) -> Result<Vec<ColorRecord>, ApiError> {
        let url = self.endpoint("api/v1/colors/get-colors")?;
        let body = self.send_json(self.request(Method::GET, &url), &url).await?;
        let envelope: ColorsResponse =
            serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(envelope.data)
    }

    /// Logs in, capturing the session token from the response when the
    /// server returns one. Returns the server message.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response (server `message` preferred).
    /// - [`ApiError::Http`] on network failure.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.endpoint("api/auth/login")?;
        let auth = self.auth_request(&url, credentials).await?;
        if let Some(token) = auth.token {
            tracing::debug!("session token captured from login response");
            self.session = Some(SessionToken::new(token));
        }
        Ok(auth.message)
    }

    /// Registers a new user; credentials are forwarded as-is.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<String, ApiError> {
        let url = self.endpoint("api/auth/register")?;
        let auth = self.auth_request(&url, payload).await?;
        Ok(auth.message)
    }

    /// Logs out and drops the local session token regardless of the
    /// server's answer to the logout call.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] on a non-2xx response.
    /// - [`ApiError::Http`] on network failure.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let url = self.endpoint("api/v1/users/logout")?;
        let request = self.request(Method::POST, &url);
        self.session = None;
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidBaseUrl {
            url: format!("{}{path}", self.base_url),
            reason: e.to_string(),
        })
    }

    /// Starts a request, attaching the session cookie when present.
    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        let builder = self.client.request(method, url.clone());
        match &self.session {
            Some(token) => builder.header(reqwest::header::COOKIE, token.cookie_value()),
            None => builder,
        }
    }

    /// Sends a request, asserts a 2xx status, and parses the body as JSON.
    async fn send_json(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<serde_json::Value, ApiError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    async fn auth_request<T: serde::Serialize + ?Sized>(
        &self,
        url: &Url,
        payload: &T,
    ) -> Result<AuthResponse, ApiError> {
        let body = self
            .send_json(self.request(Method::POST, url).json(payload), url)
            .await?;
        serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Builds an [`ApiError::Api`] from a non-2xx response, preferring the
    /// server's `msg`/`message` body field over the raw status line.
    async fn error_from_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let server_message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| {
                v.get("msg")
                    .or_else(|| v.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            });
        let message = server_message.unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.to_string()
            } else {
                text.trim().to_string()
            }
        });
        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> InventoryClient {
        InventoryClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoint_appends_to_normalised_base() {
        let client = test_client("http://api.example.com");
        let url = client.endpoint("api/product").unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/api/product");
    }

    #[test]
    fn endpoint_strips_duplicate_trailing_slash() {
        let client = test_client("http://api.example.com/");
        let url = client.endpoint("api/v1/colors/get-colors").unwrap();
        assert_eq!(url.as_str(), "http://api.example.com/api/v1/colors/get-colors");
    }

    #[test]
    fn style_code_filter_is_query_encoded() {
        let client = test_client("http://api.example.com");
        let mut url = client.endpoint("api/product").unwrap();
        url.query_pairs_mut().append_pair("style_code", "14321");
        assert_eq!(
            url.as_str(),
            "http://api.example.com/api/product?style_code=14321"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = InventoryClient::new("not a url", 30);
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl { .. })));
    }
}
