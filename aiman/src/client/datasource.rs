use super::AimanClient;
use crate::attachment::build_attachments;
use crate::errors::AimanError;
use crate::models::{Datasource, DatasourceBody, DatasourceList, DatasourceWrapper, MaybeWrapped};
use crate::routes::Route;
use crate::types::DatasourceId;
use serde_json::Value;

impl AimanClient {
    /// Get all datasources of the account.
    ///
    /// The list endpoint only returns IDs, so each datasource is fetched separately.
    pub async fn list_datasources(&self) -> Result<Vec<Datasource>, AimanError> {
        let list: DatasourceList = self.dispatcher.get(&Route::Datasources).await?;
        let mut datasources = Vec::with_capacity(list.datasources.len());
        for stub in list.datasources {
            datasources.push(self.get_datasource(stub.id).await?);
        }
        Ok(datasources)
    }

    /// Get a datasource by ID.
    pub async fn get_datasource(&self, id: DatasourceId) -> Result<Datasource, AimanError> {
        let wrapper: DatasourceWrapper<Datasource> =
            self.dispatcher.get(&Route::Datasource(id)).await?;
        Ok(wrapper.datasource)
    }

    /// Create an empty datasource and return its ID.
    pub async fn create_datasource(
        &self,
        name: &str,
        summary: &str,
        tags: Option<Vec<String>>,
        categories: Option<Vec<String>>,
    ) -> Result<DatasourceId, AimanError> {
        if name.trim().is_empty() {
            return Err(AimanError::Validation("name".to_string()));
        }
        let body = DatasourceBody {
            name,
            summary,
            tags: tags.as_deref().unwrap_or_default(),
            categories: categories.as_deref().unwrap_or_default(),
            assoc_contexts: &[],
            media: &[],
        };
        let data: Value = self.dispatcher.post(&Route::Datasources, &body).await?;
        data.get("datasource")
            .and_then(|ds| ds.get("id"))
            .and_then(Value::as_i64)
            .map(DatasourceId)
            .ok_or_else(|| {
                AimanError::UnexpectedResponse(format!("no datasource ID in {}", data))
            })
    }

    /// Delete a datasource. Returns the HTTP status code of the response, unchecked.
    pub async fn delete_datasource(&self, id: DatasourceId) -> Result<u16, AimanError> {
        self.dispatcher.delete(&Route::Datasource(id)).await
    }

    /// Replace a datasource with the given one.
    pub async fn update_datasource(&self, datasource: &Datasource) -> Result<Datasource, AimanError> {
        let res: MaybeWrapped = self
            .dispatcher
            .put(
                &Route::Datasource(datasource.id),
                &DatasourceBody::from(datasource),
            )
            .await?;
        Ok(res.into_inner())
    }

    /// Add local files or URLs to the media of a datasource.
    pub async fn add_documents<S: AsRef<str>>(
        &self,
        id: DatasourceId,
        sources: impl IntoIterator<Item = S>,
    ) -> Result<Datasource, AimanError> {
        let mut datasource = self.get_datasource(id).await?;
        datasource.media.extend(build_attachments(sources)?);
        self.update_datasource(&datasource).await
    }
}
