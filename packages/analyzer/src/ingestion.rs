//! Text extraction from contract documents.
//!
//! Supports plain text (`.txt`, decoded leniently as UTF-8) and PDF (`.pdf`,
//! extracted page by page with `lopdf`).

use std::fmt;
use std::path::Path;

use lopdf::Document;

use crate::error::{AnalyzerError, Result};

/// Supported document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Txt,
    Pdf,
}

impl DocumentKind {
    /// Resolve the document kind from a file name or path.
    ///
    /// The extension is matched case-insensitively.
    ///
    /// # Examples
    /// ```
    /// use contract_risk_analyzer::ingestion::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::from_file_name("Contract.PDF").unwrap(), DocumentKind::Pdf);
    /// assert!(DocumentKind::from_file_name("contract.docx").is_err());
    /// ```
    pub fn from_file_name(file_name: impl AsRef<Path>) -> Result<Self> {
        let extension = file_name
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            _ => Err(AnalyzerError::UnsupportedFileType {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    format!(".{extension}")
                },
            }),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Txt => f.write_str("TXT"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// Extract text from an uploaded document.
///
/// # Arguments
/// * `file_name` - Original file name, used only to pick the document type
/// * `payload` - Raw file bytes
///
/// # Errors
/// * `EmptyDocument` if the payload is empty or a text file has no readable text
/// * `UnsupportedFileType` for anything other than `.txt` and `.pdf`
/// * `UnreadableDocument` if a PDF cannot be parsed
pub fn extract_text_from_upload(file_name: &str, payload: &[u8]) -> Result<String> {
    if payload.is_empty() {
        return Err(AnalyzerError::EmptyDocument(
            "Uploaded file is empty.".to_string(),
        ));
    }

    match DocumentKind::from_file_name(file_name)? {
        DocumentKind::Txt => {
            let text = decode_lenient(payload);
            let text = text.trim();
            if text.is_empty() {
                return Err(AnalyzerError::EmptyDocument(
                    "No readable text found in TXT file.".to_string(),
                ));
            }
            Ok(text.to_string())
        }
        DocumentKind::Pdf => extract_text_from_pdf(file_name, payload),
    }
}

/// Extract text from a document on disk.
///
/// Text files are expected to be UTF-8; invalid sequences are dropped with
/// a warning rather than failing the whole document.
pub fn extract_text_from_path(path: &Path) -> Result<String> {
    let kind = DocumentKind::from_file_name(path)?;
    let bytes = std::fs::read(path)?;

    tracing::debug!(path = %path.display(), kind = %kind, bytes = bytes.len(), "Read document");

    match kind {
        DocumentKind::Txt => {
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e.utf8_error(),
                        "Document is not valid UTF-8, dropping invalid bytes"
                    );
                    decode_lenient(e.as_bytes())
                }
            };
            Ok(text.trim().to_string())
        }
        DocumentKind::Pdf => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            extract_text_from_pdf(&name, &bytes)
        }
    }
}

/// Extract text from PDF bytes.
///
/// Pages are trimmed, empty pages are skipped, and the remaining pages are
/// joined with a blank line.
pub fn extract_text_from_pdf(name: &str, bytes: &[u8]) -> Result<String> {
    let unreadable = |reason: String| AnalyzerError::UnreadableDocument {
        name: name.to_string(),
        reason,
    };

    let doc = Document::load_mem(bytes).map_err(|e| {
        unreadable(format!("file may be corrupted or encrypted ({e})"))
    })?;

    if doc.is_encrypted() {
        return Err(unreadable("document is encrypted".to_string()));
    }

    let mut pages: Vec<String> = Vec::new();
    for (&page_number, _) in doc.get_pages().iter() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| unreadable(format!("page {page_number}: {e}")))?;
        let page_text = page_text.trim();
        if !page_text.is_empty() {
            pages.push(page_text.to_string());
        }
    }

    tracing::debug!(name, pages = pages.len(), "Extracted PDF text");

    Ok(pages.join("\n\n").trim().to_string())
}

/// Decode UTF-8, dropping invalid byte sequences.
fn decode_lenient(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("a.txt").unwrap(), DocumentKind::Txt);
        assert_eq!(DocumentKind::from_file_name("a.TXT").unwrap(), DocumentKind::Txt);
        assert_eq!(DocumentKind::from_file_name("dir/a.pdf").unwrap(), DocumentKind::Pdf);
    }

    #[test]
    fn test_document_kind_unsupported() {
        let err = DocumentKind::from_file_name("contract.docx").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::UnsupportedFileType { ref extension } if extension == ".docx"
        ));

        let err = DocumentKind::from_file_name("README").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::UnsupportedFileType { ref extension } if extension == "(none)"
        ));
    }

    #[test]
    fn test_decode_lenient_drops_invalid_bytes() {
        assert_eq!(decode_lenient(b"caf\xc3\xa9 \xff\xfeok"), "café ok");
    }

    #[test]
    fn test_upload_txt() {
        let text = extract_text_from_upload("contract.txt", b"  1 Scope of work.\n").unwrap();
        assert_eq!(text, "1 Scope of work.");
    }

    #[test]
    fn test_upload_empty_payload() {
        let err = extract_text_from_upload("empty.txt", b"").unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyDocument(_)));
    }

    #[test]
    fn test_upload_empty_payload_checked_before_extension() {
        let err = extract_text_from_upload("empty.docx", b"").unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyDocument(_)));
    }

    #[test]
    fn test_upload_whitespace_txt() {
        let err = extract_text_from_upload("blank.txt", b" \n\t \xff").unwrap_err();
        assert!(matches!(err, AnalyzerError::EmptyDocument(_)));
    }

    #[test]
    fn test_upload_unsupported_extension() {
        let err = extract_text_from_upload("contract.docx", b"dummy").unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_upload_corrupted_pdf() {
        let err = extract_text_from_upload("bad.pdf", b"not-a-real-pdf").unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::UnreadableDocument { ref name, .. } if name == "bad.pdf"
        ));
    }

    /// In-memory PDF with one page per entry; `None` is a page without text.
    fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                    ),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations }.encode().unwrap();
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_upload_pdf_joins_pages_and_skips_empty_ones() {
        let bytes = pdf_with_pages(&[
            Some("1. The Supplier shall deliver the Goods."),
            None,
            Some("2. This Agreement is governed by English law."),
        ]);

        let text = extract_text_from_upload("x.pdf", &bytes).unwrap();
        assert_eq!(
            text,
            "1. The Supplier shall deliver the Goods.\n\n\
             2. This Agreement is governed by English law."
        );
    }

    #[test]
    fn test_upload_pdf_without_text_is_empty() {
        let bytes = pdf_with_pages(&[None]);
        assert_eq!(extract_text_from_upload("scan.pdf", &bytes).unwrap(), "");
    }
}
