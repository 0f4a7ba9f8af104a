use super::AimanClient;
use crate::config::DEFAULT_TIMEOUT;
use crate::credential::TokenCredential;
use crate::errors::AimanError;
use crate::types::{HostUrl, Username};
use reqwest_middleware::{ClientWithMiddleware, Middleware};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [AimanClient]. The HTTP client is created when connecting.
pub struct AimanClientBuilder {
    host: HostUrl,
    timeout: Duration,
    auto_refresh: bool,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl AimanClientBuilder {
    pub(crate) fn new(host: HostUrl) -> Self {
        Self {
            host,
            timeout: DEFAULT_TIMEOUT,
            auto_refresh: true,
            middleware: Vec::new(),
        }
    }

    /// Time limit of every request, including authentication.
    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Whether an expired token is refreshed before the next request (default: yes).
    pub fn auto_refresh(self, auto_refresh: bool) -> Self {
        Self {
            auto_refresh,
            ..self
        }
    }

    /// Add middleware to the HTTP client.
    pub fn with<M: Middleware>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Log in with a username and password.
    pub async fn connect_with_password(
        self,
        username: Username,
        password: impl Into<String>,
    ) -> Result<AimanClient, AimanError> {
        let password = password.into();
        if username.as_str().is_empty() {
            return Err(AimanError::Validation("username".to_string()));
        }
        if password.is_empty() {
            return Err(AimanError::Validation("password".to_string()));
        }
        let client = self.http_client()?;
        let credential = TokenCredential::authenticate(&client, self.host, username, password)
            .await?
            .auto_refresh(self.auto_refresh);
        Ok(AimanClient::new(client, credential))
    }

    /// Use a token which was obtained elsewhere. `expires_on` is a unix timestamp.
    pub fn connect_with_token(
        self,
        token: impl Into<String>,
        expires_on: Option<i64>,
    ) -> Result<AimanClient, AimanError> {
        let credential = TokenCredential::with_token(self.host.clone(), token, expires_on);
        self.connect_with_credential(credential)
    }

    /// Use a prepared credential. Its host takes precedence over the builder's.
    pub fn connect_with_credential(
        self,
        credential: TokenCredential,
    ) -> Result<AimanClient, AimanError> {
        if credential.token().is_empty() {
            return Err(AimanError::Validation("token".to_string()));
        }
        let client = self.http_client()?;
        Ok(AimanClient::new(
            client,
            credential.auto_refresh(self.auto_refresh),
        ))
    }

    fn http_client(&self) -> Result<ClientWithMiddleware, reqwest::Error> {
        let client = reqwest::ClientBuilder::new().timeout(self.timeout).build()?;
        let builder = self
            .middleware
            .iter()
            .cloned()
            .fold(reqwest_middleware::ClientBuilder::new(client), |b, m| {
                b.with_arc(m)
            });
        Ok(builder.build())
    }
}
