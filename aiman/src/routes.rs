use crate::types::{DatasourceId, ModelTag};

/// Endpoints of the AI Manager API, relative to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Models,
    Authenticate,
    RefreshToken,
    /// Prompt a model by tag. Datasource prompts use this route too,
    /// with the datasource ID in the body.
    Prompt(ModelTag),
    Datasources,
    Datasource(DatasourceId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Models => "/api/v1/models".to_string(),
            Route::Authenticate => "/api/v1/auth/authenticate".to_string(),
            Route::RefreshToken => "/api/v1/auth/refresh".to_string(),
            Route::Prompt(tag) => format!("/api/v1/prompts/{}", tag),
            Route::Datasources => "/api/v1/datasources".to_string(),
            Route::Datasource(id) => format!("/api/v1/datasources/{}", id),
        }
    }
}
