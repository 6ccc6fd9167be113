//! PDF text extraction for the source document.

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::document::Document;
use crate::error::{RagError, Result};

/// Load a PDF file and extract its text into a [`Document`].
///
/// Extraction runs on a blocking thread since `pdf_extract` is synchronous.
/// The document is loaded exactly once per process; everything downstream
/// treats the returned text as immutable.
///
/// # Errors
///
/// Returns [`RagError::DocumentError`] when the file cannot be parsed or
/// when extraction yields no usable (non-whitespace) content across all
/// pages. Neither case is retried.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    let path_buf = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path_buf))
        .await
        .map_err(|e| RagError::DocumentError(format!("extraction task failed: {e}")))?
        .map_err(|e| {
            RagError::DocumentError(format!(
                "failed to extract text from '{}': {e}",
                path.display()
            ))
        })?;

    if text.trim().is_empty() {
        return Err(RagError::DocumentError(format!(
            "no usable text extracted from '{}'",
            path.display()
        )));
    }

    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();

    info!(document.id = %id, text_len = text.len(), "loaded document");

    Ok(Document {
        id,
        text,
        metadata: HashMap::from([("content_type".to_string(), "application/pdf".to_string())]),
        source_uri: Some(path.display().to_string()),
    })
}
