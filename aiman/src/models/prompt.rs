use super::Attachment;
use crate::types::DatasourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sampling options passed through to the model unchanged.
///
/// Missing keys take the defaults below when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptOptions {
    pub mirostat: u32,
    pub mirostat_eta: f64,
    pub mirostat_tau: u32,
    pub num_ctx: u32,
    pub num_gqa: u32,
    pub num_gpu: u32,
    pub num_thread: u32,
    pub repeat_last_n: i32,
    pub repeat_penalty: f64,
    pub temperature: f64,
    pub seed: i64,
    pub stop: Option<String>,
    pub tfs_z: u32,
    pub num_predict: i32,
    pub top_k: u32,
    pub top_p: f64,
    pub raw: bool,
    pub keep_context: bool,
    /// Copied to the top level of the prompt payload.
    #[serde(skip)]
    pub stream: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            mirostat: 0,
            mirostat_eta: 0.1,
            mirostat_tau: 5,
            num_ctx: 4096,
            num_gqa: 8,
            num_gpu: 0,
            num_thread: 0,
            repeat_last_n: 64,
            repeat_penalty: 1.1,
            temperature: 0.8,
            seed: 0,
            stop: None,
            tfs_z: 1,
            num_predict: 2048,
            top_k: 40,
            top_p: 0.9,
            raw: false,
            keep_context: true,
            stream: false,
        }
    }
}

/// Body of a prompt request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptPayload<'a> {
    pub prompt: &'a str,
    pub model_tag_id: u32,
    pub raw: bool,
    pub stream: bool,
    pub project_id: u32,
    pub project_tab_id: u32,
    pub user_id: u32,
    pub verbose: bool,
    #[serde(skip_serializing_if = "no_attachments")]
    pub attachments: &'a [Attachment],
    pub keep_context: bool,
    pub keep_alive: &'static str,
    pub datasource_id: DatasourceId,
    pub options: &'a PromptOptions,
}

impl<'a> PromptPayload<'a> {
    pub fn new(prompt: &'a str, options: &'a PromptOptions) -> Self {
        Self {
            prompt,
            model_tag_id: 0,
            raw: options.raw,
            stream: options.stream,
            project_id: 1,
            project_tab_id: 1,
            user_id: 1,
            verbose: true,
            attachments: &[],
            keep_context: options.keep_context,
            keep_alive: "5m",
            datasource_id: DatasourceId(0),
            options,
        }
    }
}

fn no_attachments(attachments: &&[Attachment]) -> bool {
    attachments.is_empty()
}

/// Unwrapped response to a prompt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    #[serde(default)]
    pub response_text: Option<String>,
    /// Everything else the service returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
