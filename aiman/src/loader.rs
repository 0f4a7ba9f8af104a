//! Reading local documents into bytes or text before they are sent along with a prompt.

use crate::errors::LoaderError;
use calamine::{Reader, Xlsx};
use camino::Utf8Path;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Read};
use std::str::FromStr;

/// How the content of a file is read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Loader {
    #[serde(rename = "PDFReader")]
    Pdf,
    #[serde(rename = "PandasExcelReader")]
    Excel,
    #[serde(rename = "Base64")]
    Base64Only,
    #[serde(rename = "DocxReader")]
    Docx,
    #[serde(rename = "SimpleCSVReader")]
    Csv,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "img")]
    Image,
}

/// Content of a resolved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl DocumentContent {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            DocumentContent::Bytes(b) => b,
            DocumentContent::Text(t) => t.into_bytes(),
        }
    }
}

/// Mime type and loader for a supported file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FileType {
    pub loader: Loader,
    pub mime_type: &'static str,
}

impl Loader {
    /// Name of this loader as understood by the service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Loader::Pdf => "PDFReader",
            Loader::Excel => "PandasExcelReader",
            Loader::Base64Only => "Base64",
            Loader::Docx => "DocxReader",
            Loader::Csv => "SimpleCSVReader",
            Loader::Url => "url",
            Loader::Image => "img",
        }
    }

    /// Look up the loader and mime type for a (lower-case, dot-less) file extension.
    pub fn for_extension(ext: &str) -> Option<FileType> {
        let (loader, mime_type) = match ext {
            "pdf" => (Loader::Pdf, "application/pdf"),
            "csv" => (Loader::Csv, "application/csv"),
            "xlsx" => (
                Loader::Excel,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            "docx" => (
                Loader::Docx,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ),
            "png" => (Loader::Image, "image/png"),
            "tif" => (Loader::Image, "image/tif"),
            "jpeg" => (Loader::Image, "image/jpeg"),
            "jpg" => (Loader::Image, "image/jpg"),
            _ => return None,
        };
        Some(FileType { loader, mime_type })
    }

    /// Read the file at `path` the way this loader says to.
    pub fn resolve(self, path: impl AsRef<Utf8Path>) -> Result<DocumentContent, LoaderError> {
        let path = path.as_ref();
        let read = || fs_err::read(path.as_std_path());
        let content = match self {
            Loader::Base64Only | Loader::Image => DocumentContent::Bytes(read()?),
            Loader::Csv => DocumentContent::Text(csv_to_tsv(&read()?)?),
            Loader::Excel => DocumentContent::Text(xlsx_to_tsv(read()?)?),
            Loader::Pdf => DocumentContent::Text(pdf_text(&read()?)?),
            Loader::Docx => DocumentContent::Text(docx_text(read()?)?),
            Loader::Url => {
                return Err(LoaderError::UnsupportedLoader(self.wire_name().to_string()))
            }
        };
        log::debug!("resolved {} using {}", path, self.wire_name());
        Ok(content)
    }
}

impl FromStr for Loader {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PDFReader" => Ok(Loader::Pdf),
            "PandasExcelReader" => Ok(Loader::Excel),
            "Base64" => Ok(Loader::Base64Only),
            "DocxReader" => Ok(Loader::Docx),
            "SimpleCSVReader" => Ok(Loader::Csv),
            "url" => Ok(Loader::Url),
            "img" => Ok(Loader::Image),
            _ => Err(LoaderError::UnsupportedLoader(s.to_string())),
        }
    }
}

fn tsv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(vec![])
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, LoaderError> {
    let buf = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Re-emit comma-separated records (header row included) separated by tabs.
fn csv_to_tsv(bytes: &[u8]) -> Result<String, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut writer = tsv_writer();
    for record in reader.records() {
        writer.write_record(&record?)?;
    }
    finish(writer)
}

/// Rows of the first worksheet, separated by tabs.
fn xlsx_to_tsv(bytes: Vec<u8>) -> Result<String, LoaderError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(String::new()),
    };
    let mut writer = tsv_writer();
    for row in range.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    finish(writer)
}

/// Text of every page, in page order.
fn pdf_text(bytes: &[u8]) -> Result<String, LoaderError> {
    let document = lopdf::Document::load_mem(bytes)?;
    let mut text = String::new();
    for page_number in document.get_pages().keys() {
        text.push_str(&document.extract_text(&[*page_number])?);
    }
    Ok(text)
}

/// Text runs of the main document part of a DOCX archive.
fn docx_text(bytes: Vec<u8>) -> Result<String, LoaderError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_run_text => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}
