mod builder;
mod datasource;
mod dispatch;
mod prompt;

pub use builder::AimanClientBuilder;
pub use dispatch::Dispatcher;
pub(crate) use dispatch::with_json;
pub use prompt::PromptBuilder;

use crate::config::{AuthConfig, ClientConfig};
use crate::credential::TokenCredential;
use crate::errors::AimanError;
use crate::models::{AiModel, ModelList};
use crate::routes::Route;
use crate::types::HostUrl;
use reqwest_middleware::ClientWithMiddleware;

/// AI Manager service client.
#[derive(Debug)]
pub struct AimanClient {
    host: HostUrl,
    dispatcher: Dispatcher,
}

impl AimanClient {
    /// Create a client builder.
    pub fn build(host: HostUrl) -> AimanClientBuilder {
        AimanClientBuilder::new(host)
    }

    /// Connect using settings from a [ClientConfig], e.g. one read from the environment.
    pub async fn from_config(config: ClientConfig) -> Result<Self, AimanError> {
        let builder = Self::build(config.host.clone())
            .timeout(config.timeout())
            .auto_refresh(config.auto_refresh);
        match config.auth {
            AuthConfig::Password { username, password } => {
                builder.connect_with_password(username, password).await
            }
            AuthConfig::Token {
                token,
                expires_on,
                refresh_token,
            } => {
                let credential = TokenCredential::with_token(config.host, token, expires_on);
                let credential = match refresh_token {
                    Some(refresh_token) => credential.with_refresh_token(refresh_token),
                    None => credential,
                };
                builder.connect_with_credential(credential)
            }
        }
    }

    pub(crate) fn new(client: ClientWithMiddleware, credential: TokenCredential) -> Self {
        Self {
            host: credential.host().clone(),
            dispatcher: Dispatcher::new(client, credential),
        }
    }

    /// Get the API host.
    pub fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Lower-level access to the API, for routes without a method here.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get all models available to prompt on.
    pub async fn list_models(&self) -> Result<Vec<AiModel>, AimanError> {
        let list: ModelList = self.dispatcher.get(&Route::Models).await?;
        Ok(list.models)
    }

    /// Replace the access token now, without waiting for it to expire.
    pub async fn refresh_token(&self) -> Result<(), AimanError> {
        self.dispatcher.refresh().await
    }

    /// Whether the current access token is expired.
    pub async fn token_expired(&self) -> bool {
        self.dispatcher.credential().await.is_expired()
    }
}
