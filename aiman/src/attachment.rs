//! Turning file paths and URLs into [Attachment]s.

use crate::errors::LoaderError;
use crate::loader::{DocumentContent, FileType, Loader};
use crate::models::Attachment;
use base64::Engine;
use camino::Utf8Path;

/// Build one attachment per source, in order.
///
/// URLs become references (nothing is fetched). Anything else is read as a
/// local file whose extension must be one of the supported file types.
pub fn build_attachments<S: AsRef<str>>(
    sources: impl IntoIterator<Item = S>,
) -> Result<Vec<Attachment>, LoaderError> {
    sources
        .into_iter()
        .map(|source| {
            let source = source.as_ref();
            if is_url(source) {
                Ok(Attachment::uri(source))
            } else {
                file_attachment(Utf8Path::new(source))
            }
        })
        .collect()
}

/// Read a local file of a supported type into a base64 attachment.
pub fn file_attachment(path: &Utf8Path) -> Result<Attachment, LoaderError> {
    let file_type = file_type(path)?;
    let content = Loader::Base64Only.resolve(path)?.into_bytes();
    let encoded = encode(&content);
    let size = reported_size(encoded.len());
    Ok(Attachment {
        mime_type: Some(file_type.mime_type.to_string()),
        size: Some(size),
        ..Attachment::base64(file_name(path), encoded)
    })
}

/// Base64 attachment of already resolved content, e.g. text extracted from a PDF.
///
/// Only unconverted bytes carry the mime type of the file. Extracted text has none.
pub(crate) fn content_attachment(path: &Utf8Path, content: DocumentContent) -> Attachment {
    let mime_type = match &content {
        DocumentContent::Bytes(_) => extension(path)
            .and_then(|ext| Loader::for_extension(&ext))
            .map(|t| t.mime_type.to_string()),
        DocumentContent::Text(_) => None,
    };
    Attachment {
        mime_type,
        ..Attachment::base64(file_name(path), encode(&content.into_bytes()))
    }
}

/// Loader and mime type of a file, decided by its extension.
pub fn file_type(path: &Utf8Path) -> Result<FileType, LoaderError> {
    let ext = extension(path).unwrap_or_default();
    Loader::for_extension(&ext).ok_or_else(|| LoaderError::UnsupportedFileType {
        extension: ext,
        file: file_name(path),
    })
}

/// Size reported to the service for an attachment with `encoded_len` bytes of base64.
///
/// NOTE: this is not the decoded size. The formula is what the service has
/// always been sent, so it is kept as-is.
pub fn reported_size(encoded_len: usize) -> f64 {
    (encoded_len as f64 * (3.0 / 4.0) - 1.0) * 10.0
}

/// Whether a source string is a web URL rather than a local path.
pub fn is_url(source: &str) -> bool {
    let lower = source.trim().to_lowercase();
    let candidate = if lower.starts_with("www.") {
        format!("https://{}", lower)
    } else if lower.starts_with("http://") || lower.starts_with("https://") {
        lower
    } else {
        return false;
    };
    url::Url::parse(&candidate)
        .map(|u| u.host_str().map(|h| !h.is_empty()).unwrap_or(false))
        .unwrap_or(false)
}

fn encode(content: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(content)
}

fn extension(path: &Utf8Path) -> Option<String> {
    path.extension().map(|e| e.to_lowercase())
}

fn file_name(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}
