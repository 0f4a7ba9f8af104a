use crate::types::{ModelId, ModelTagId};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

/// A model which can be prompted. Missing or `null` values take defaults.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiModel {
    #[serde_as(as = "DefaultOnNull")]
    pub id: ModelId,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "uuId")]
    pub uu_id: String,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub short_description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub long_description: String,
    #[serde_as(as = "DefaultOnNull")]
    pub default_model_tag_id: ModelTagId,
    #[serde_as(as = "DefaultOnNull")]
    pub amount_of_pulls: String,
    #[serde_as(as = "DefaultOnNull")]
    pub amount_of_tags: u32,
    #[serde_as(as = "DefaultOnNull")]
    pub required_memory: String,
    #[serde_as(as = "DefaultOnNull")]
    pub size: u64,
}

/// Payload of the list models response.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct ModelList {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Models", default)]
    pub models: Vec<AiModel>,
}
