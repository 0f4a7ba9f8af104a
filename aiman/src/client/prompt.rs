use super::AimanClient;
use crate::attachment::{build_attachments, content_attachment};
use crate::errors::AimanError;
use crate::loader::{DocumentContent, Loader};
use crate::models::{PromptOptions, PromptPayload, PromptResponse};
use crate::routes::Route;
use crate::types::{DatasourceId, ModelTag};
use camino::Utf8PathBuf;

/// A prompt which is about to be sent. Created by [AimanClient::prompt].
#[must_use]
pub struct PromptBuilder<'a> {
    client: &'a AimanClient,
    model_tag: ModelTag,
    query: String,
    sources: Vec<String>,
    append_file: Option<(Utf8PathBuf, Loader)>,
    rag_files: Vec<(Utf8PathBuf, Loader)>,
    options: Option<PromptOptions>,
}

impl<'a> PromptBuilder<'a> {
    /// Attach a local file (of a supported type) or reference a URL.
    pub fn attach(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Attach local files or reference URLs.
    pub fn attachments<S: Into<String>>(mut self, sources: impl IntoIterator<Item = S>) -> Self {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Read a document and add its text to the end of the query.
    ///
    /// Content which the loader does not turn into text (e.g. images) is
    /// attached instead.
    pub fn append_file(mut self, path: impl Into<Utf8PathBuf>, loader: Loader) -> Self {
        self.append_file = Some((path.into(), loader));
        self
    }

    /// Read documents and attach their content for retrieval.
    pub fn rag_files<P: Into<Utf8PathBuf>>(
        mut self,
        paths: impl IntoIterator<Item = P>,
        loader: Loader,
    ) -> Self {
        self.rag_files
            .extend(paths.into_iter().map(|p| (p.into(), loader)));
        self
    }

    /// Sampling options. [PromptOptions::default] is used if not given.
    pub fn options(mut self, options: PromptOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub async fn send(self) -> Result<PromptResponse, AimanError> {
        validate(&self.model_tag, &self.query)?;
        let mut query = self.query;
        let mut attachments = build_attachments(&self.sources)?;
        if let Some((path, loader)) = &self.append_file {
            match loader.resolve(path)? {
                DocumentContent::Text(text) => {
                    query.push(' ');
                    query.push_str(&text);
                }
                content => attachments.push(content_attachment(path, content)),
            }
        }
        for (path, loader) in &self.rag_files {
            let content = loader.resolve(path)?;
            attachments.push(content_attachment(path, content));
        }
        let options = self.options.unwrap_or_default();
        let payload = PromptPayload {
            attachments: &attachments,
            ..PromptPayload::new(&query, &options)
        };
        self.client
            .dispatcher
            .post(&Route::Prompt(self.model_tag), &payload)
            .await
    }
}

fn validate(model_tag: &ModelTag, query: &str) -> Result<(), AimanError> {
    if model_tag.as_str().trim().is_empty() {
        return Err(AimanError::Validation("model_tag".to_string()));
    }
    if query.trim().is_empty() {
        return Err(AimanError::Validation("query".to_string()));
    }
    Ok(())
}

impl AimanClient {
    /// Prompt a model, e.g. `client.prompt("llama3:8b", "hello").send().await`.
    pub fn prompt(&self, model_tag: impl Into<ModelTag>, query: impl Into<String>) -> PromptBuilder {
        PromptBuilder {
            client: self,
            model_tag: model_tag.into(),
            query: query.into(),
            sources: Vec::new(),
            append_file: None,
            rag_files: Vec::new(),
            options: None,
        }
    }

    /// Prompt a model on the documents of a datasource.
    pub async fn prompt_on_datasource(
        &self,
        datasource_id: DatasourceId,
        model_tag: impl Into<ModelTag>,
        query: &str,
        options: Option<PromptOptions>,
    ) -> Result<PromptResponse, AimanError> {
        let model_tag = model_tag.into();
        validate(&model_tag, query)?;
        let options = options.unwrap_or_default();
        let payload = PromptPayload {
            datasource_id,
            ..PromptPayload::new(query, &options)
        };
        self.dispatcher
            .post(&Route::Prompt(model_tag), &payload)
            .await
    }
}
