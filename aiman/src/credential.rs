//! Access tokens for the AI Manager API: obtaining them with a username and
//! password, and renewing them once they expire.

use crate::client::with_json;
use crate::errors::{is_success, AuthError};
use crate::models::Envelope;
use crate::routes::Route;
use crate::types::{HostUrl, Username};
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a Username,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(alias = "token", alias = "access_token")]
    access_token: String,
    #[serde(default, alias = "refresh_token")]
    refresh_token: Option<String>,
    #[serde(default, alias = "expiresAt", alias = "expires_on")]
    expires_on: Option<i64>,
    /// Seconds from now, for services which do not send an absolute time.
    #[serde(default, alias = "expires_in")]
    expires_in: Option<i64>,
}

/// An access token and what is known about its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) at which the token stops being valid.
    /// `None` if the token does not expire, as far as we know.
    pub expires_on: Option<i64>,
}

#[derive(Clone)]
struct Login {
    username: Username,
    password: String,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Host and token used by one client to talk to the AI Manager API.
#[derive(Debug, Clone)]
pub struct TokenCredential {
    host: HostUrl,
    access: AccessToken,
    login: Option<Login>,
    auto_refresh: bool,
}

pub(crate) fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

impl TokenCredential {
    /// Exchange a username and password for a token.
    pub async fn authenticate(
        client: &ClientWithMiddleware,
        host: HostUrl,
        username: Username,
        password: String,
    ) -> Result<Self, AuthError> {
        let req = with_json(
            client.post(host.join(&Route::Authenticate)),
            &Credentials {
                username: &username,
                password: &password,
            },
        )
        .map_err(AuthError::Body)?;
        let access = request_token(req).await?;
        log::info!("authenticated as {} at {}", username, host);
        Ok(Self {
            host,
            access,
            login: Some(Login { username, password }),
            auto_refresh: true,
        })
    }

    /// Use a token which was obtained elsewhere.
    pub fn with_token(host: HostUrl, token: impl Into<String>, expires_on: Option<i64>) -> Self {
        Self {
            host,
            access: AccessToken {
                token: token.into(),
                refresh_token: None,
                expires_on,
            },
            login: None,
            auto_refresh: true,
        }
    }

    /// Also use a refresh token when the access token expires.
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.access.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn auto_refresh(mut self, enabled: bool) -> Self {
        self.auto_refresh = enabled;
        self
    }

    pub fn is_auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn host(&self) -> &HostUrl {
        &self.host
    }

    pub fn access(&self) -> &AccessToken {
        &self.access
    }

    pub fn token(&self) -> &str {
        &self.access.token
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now())
    }

    /// Whether the token is expired at the given unix time.
    pub fn is_expired_at(&self, unix_time: i64) -> bool {
        self.access
            .expires_on
            .map(|expires_on| unix_time >= expires_on)
            .unwrap_or(false)
    }

    /// Get a new token, replacing the current one.
    ///
    /// A refresh token is preferred. Without one, the username and password
    /// are exchanged again. On failure the current token must not be relied on.
    pub async fn refresh(&mut self, client: &ClientWithMiddleware) -> Result<(), AuthError> {
        let url = self.host.join(&Route::RefreshToken);
        let req = if let Some(refresh_token) = &self.access.refresh_token {
            with_json(
                client
                    .post(url)
                    .header(AUTHORIZATION, bearer(&self.access.token)),
                &RefreshRequest { refresh_token },
            )
        } else if let Some(login) = &self.login {
            with_json(
                client.post(self.host.join(&Route::Authenticate)),
                &Credentials {
                    username: &login.username,
                    password: &login.password,
                },
            )
        } else {
            return Err(AuthError::NotRefreshable);
        }
        .map_err(AuthError::Body)?;
        let mut access = request_token(req).await?;
        if access.refresh_token.is_none() {
            access.refresh_token = self.access.refresh_token.take();
        }
        self.access = access;
        log::info!("refreshed access token for {}", self.host);
        Ok(())
    }
}

/// Value of the `Authorization` header for a token.
pub(crate) fn bearer(token: &str) -> HeaderValue {
    let mut value: HeaderValue = format!("Bearer {}", token)
        .parse()
        .unwrap_or_else(|_| HeaderValue::from_static("Bearer"));
    value.set_sensitive(true);
    value
}

async fn request_token(req: reqwest_middleware::RequestBuilder) -> Result<AccessToken, AuthError> {
    let res = req.header(ACCEPT, "application/json").send().await?;
    let status = res.status();
    if !is_success(status) {
        let reason = status.canonical_reason().unwrap_or("unknown reason");
        let text = res.text().await?;
        return Err(AuthError::Rejected {
            status,
            reason,
            text,
        });
    }
    let envelope: Envelope = res
        .json()
        .await
        .map_err(|e| AuthError::Malformed(e.to_string()))?;
    let token: TokenResponse = serde_json::from_value(envelope.into_data())
        .map_err(|e| AuthError::Malformed(e.to_string()))?;
    into_access(token, now())
}

fn into_access(res: TokenResponse, now: i64) -> Result<AccessToken, AuthError> {
    if res.access_token.is_empty() {
        return Err(AuthError::Malformed("empty access token".to_string()));
    }
    let expires_on = res
        .expires_on
        .or_else(|| res.expires_in.map(|seconds| now + seconds));
    if let Some(expires_on) = expires_on {
        if expires_on <= now {
            return Err(AuthError::Malformed(format!(
                "token already expired at {}",
                expires_on
            )));
        }
    }
    Ok(AccessToken {
        token: res.access_token,
        refresh_token: res.refresh_token,
        expires_on,
    })
}
