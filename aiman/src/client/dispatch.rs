use crate::credential::{bearer, TokenCredential};
use crate::errors::{check, AimanError};
use crate::models::{decode, Envelope};
use crate::routes::Route;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

/// Sends authorized requests to the API and unwraps their responses.
///
/// Owns the credential of a client. When auto-refresh is enabled, an expired
/// token is refreshed before the request which needs it is sent.
#[derive(Debug)]
pub struct Dispatcher {
    client: ClientWithMiddleware,
    credential: Mutex<TokenCredential>,
}

impl Dispatcher {
    pub(crate) fn new(client: ClientWithMiddleware, credential: TokenCredential) -> Self {
        Self {
            client,
            credential: Mutex::new(credential),
        }
    }

    /// Send a request and return the `data` of the response envelope.
    pub async fn send(
        &self,
        method: Method,
        route: &Route,
        body: Option<&Value>,
    ) -> Result<Value, AimanError> {
        self.request(method, route, body).await
    }

    /// Send a request and decode the `data` of the response envelope.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        route: &Route,
        body: Option<&B>,
    ) -> Result<T, AimanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let data = self.request(method, route, body).await?;
        Ok(decode(data)?)
    }

    /// Send a DELETE request and return its status code as-is.
    ///
    /// Unlike other methods, the status is not checked and the body is not read.
    pub async fn delete(&self, route: &Route) -> Result<u16, AimanError> {
        let req = self.authorized(Method::DELETE, route).await?;
        let res = req.header(CONTENT_TYPE, "application/json").send().await?;
        Ok(res.status().as_u16())
    }

    /// Refresh the token now, regardless of its expiry.
    pub async fn refresh(&self) -> Result<(), AimanError> {
        let mut credential = self.credential.lock().await;
        credential.refresh(&self.client).await?;
        Ok(())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, route: &Route) -> Result<T, AimanError> {
        self.send_json::<Value, T>(Method::GET, route, None).await
    }

    pub(crate) async fn post<B, T>(&self, route: &Route, body: &B) -> Result<T, AimanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, route, Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, route: &Route, body: &B) -> Result<T, AimanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, route, Some(body)).await
    }

    /// A copy of the current credential.
    pub async fn credential(&self) -> TokenCredential {
        self.credential.lock().await.clone()
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &Route,
        body: Option<&B>,
    ) -> Result<Value, AimanError> {
        let req = self.authorized(method, route).await?;
        let req = match body {
            Some(body) => with_json(req, body).map_err(AimanError::Body)?,
            None => req,
        };
        let res = req.send().await?;
        let bytes = check(res).await?.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.into_data())
    }

    /// Start a request carrying the current token, refreshing it first if needed.
    async fn authorized(&self, method: Method, route: &Route) -> Result<RequestBuilder, AimanError> {
        let mut credential = self.credential.lock().await;
        if credential.is_auto_refresh() && credential.is_expired() {
            log::warn!("access token for {} expired, refreshing", credential.host());
            credential.refresh(&self.client).await?;
        }
        let url = credential.host().join(route);
        log::debug!("{} {}", method, url);
        Ok(self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, bearer(credential.token())))
    }
}

/// Serialize `body` as the JSON body of a request.
pub(crate) fn with_json<B: Serialize + ?Sized>(
    req: RequestBuilder,
    body: &B,
) -> Result<RequestBuilder, serde_json::Error> {
    let bytes = serde_json::to_vec(body)?;
    Ok(req.header(CONTENT_TYPE, "application/json").body(bytes))
}
