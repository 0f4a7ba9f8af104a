use super::Media;
use crate::types::DatasourceId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

/// A datasource (collection of documents to prompt on) of the current account.
///
/// Missing and `null` values both take the defaults, `-1` for unknown numbers.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Datasource {
    #[serde(deserialize_with = "id_or_unknown")]
    pub id: DatasourceId,
    #[serde_as(as = "DefaultOnNull")]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    pub summary: String,
    #[serde_as(as = "DefaultOnNull")]
    pub categories: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub tags: Vec<String>,
    #[serde_as(as = "DefaultOnNull")]
    pub assoc_contexts: Vec<Value>,
    #[serde_as(as = "DefaultOnNull")]
    pub media: Vec<Media>,
    #[serde(deserialize_with = "number_or_unknown")]
    pub status: i64,
    #[serde(deserialize_with = "number_or_unknown")]
    pub media_count: i64,
    #[serde(deserialize_with = "number_or_unknown")]
    pub owner_id: i64,
}

fn number_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(-1))
}

fn id_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DatasourceId, D::Error> {
    number_or_unknown(deserializer).map(DatasourceId)
}

impl Default for Datasource {
    fn default() -> Self {
        Self {
            id: DatasourceId(-1),
            name: Default::default(),
            summary: Default::default(),
            categories: Default::default(),
            tags: Default::default(),
            assoc_contexts: Default::default(),
            media: Default::default(),
            status: -1,
            media_count: -1,
            owner_id: -1,
        }
    }
}

/// Body of create and update requests. Updates replace the whole datasource.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatasourceBody<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub tags: &'a [String],
    pub categories: &'a [String],
    pub assoc_contexts: &'a [Value],
    pub media: &'a [Media],
}

impl<'a> From<&'a Datasource> for DatasourceBody<'a> {
    fn from(ds: &'a Datasource) -> Self {
        Self {
            name: &ds.name,
            summary: &ds.summary,
            tags: &ds.tags,
            categories: &ds.categories,
            assoc_contexts: &ds.assoc_contexts,
            media: &ds.media,
        }
    }
}

/// Payload of the datasource list response, which only carries IDs.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct DatasourceList {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub datasources: Vec<DatasourceStub>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatasourceStub {
    pub id: DatasourceId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatasourceWrapper<T> {
    pub datasource: T,
}

/// Update responses have been seen both wrapped and bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeWrapped {
    Wrapped(DatasourceWrapper<Datasource>),
    Bare(Datasource),
}

impl MaybeWrapped {
    pub fn into_inner(self) -> Datasource {
        match self {
            MaybeWrapped::Wrapped(w) => w.datasource,
            MaybeWrapped::Bare(ds) => ds,
        }
    }
}
