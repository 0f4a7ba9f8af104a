use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DefaultOnNull};

/// Mime type marking an attachment as a reference to a URL.
pub const URI_MIME_TYPE: &str = "text/x-uri";

/// How the content of an [Attachment] is carried.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadEncoding {
    Base64,
    Uri,
}

/// A file or URL sent along with a prompt, or stored as a datasource medium.
///
/// Keys which the service returns and this struct does not know are kept
/// in `extra`, so that a fetched datasource can be sent back unchanged.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(
        default,
        alias = "mimeType",
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Media of a datasource have the same shape as prompt attachments.
pub type Media = Attachment;

impl Attachment {
    /// An attachment carrying base64-encoded content.
    pub fn base64(name: impl Into<String>, encoded: String) -> Self {
        Self {
            name: name.into(),
            base64: Some(encoded),
            ..Default::default()
        }
    }

    /// An attachment which only references a URL.
    pub fn uri(url: impl Into<String>) -> Self {
        Self {
            name: url.into(),
            mime_type: Some(URI_MIME_TYPE.to_string()),
            ..Default::default()
        }
    }

    pub fn encoding(&self) -> PayloadEncoding {
        if self.base64.is_none() && self.mime_type.as_deref() == Some(URI_MIME_TYPE) {
            PayloadEncoding::Uri
        } else {
            PayloadEncoding::Base64
        }
    }
}
