//! Source document loading: one [`DocumentPage`] per physical page.
//!
//! - `.pdf` files are parsed with `lopdf`, page by page.
//! - Anything else is read as UTF-8 text; form-feed (`\x0c`) separates pages.
//!
//! Pages are never concatenated; chunking happens per page.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::RagError;
use crate::record::DocumentPage;

/// Loads all pages of the document at `path`.
///
/// # Errors
/// - [`RagError::Document`] if the file is missing or cannot be parsed
/// - [`RagError::EmptyDocument`] if no page carries any text
pub fn load_pages(path: &Path) -> Result<Vec<DocumentPage>, RagError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let pages = if is_pdf {
        load_pdf(path)?
    } else {
        let raw = std::fs::read_to_string(path).map_err(|e| RagError::Document {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        split_text_pages(&raw)
    };

    if pages.iter().all(|p| p.text.trim().is_empty()) {
        return Err(RagError::EmptyDocument(path.to_path_buf()));
    }

    info!(path = ?path, pages = pages.len(), "document loaded");
    Ok(pages)
}

fn load_pdf(path: &Path) -> Result<Vec<DocumentPage>, RagError> {
    let doc = lopdf::Document::load(path).map_err(|e| RagError::Document {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut out = Vec::new();
    for (idx, page_no) in doc.get_pages().keys().enumerate() {
        let text = doc
            .extract_text(&[*page_no])
            .map_err(|e| RagError::Document {
                path: path.to_path_buf(),
                reason: format!("page {page_no}: {e}"),
            })?;
        debug!(page = idx, chars = text.len(), "pdf page extracted");
        out.push(DocumentPage {
            page: idx as u32,
            text,
        });
    }
    Ok(out)
}

/// Splits plain text into pages on form-feed characters.
pub fn split_text_pages(raw: &str) -> Vec<DocumentPage> {
    raw.split('\x0c')
        .enumerate()
        .map(|(i, text)| DocumentPage {
            page: i as u32,
            text: text.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feed_separates_pages() {
        let pages = split_text_pages("page one\x0cpage two\x0c");
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].page, 1);
        assert_eq!(pages[1].text, "page two");
        assert_eq!(pages[2].text, "");
    }

    #[test]
    fn missing_document_is_a_document_error() {
        let err = load_pages(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, RagError::Document { .. }));
    }

    #[test]
    fn blank_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\x0c\t").unwrap();
        let err = load_pages(&path).unwrap_err();
        assert!(matches!(err, RagError::EmptyDocument(_)));
    }
}
