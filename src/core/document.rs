//! Input drawings: discovery in the input directory and text extraction.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};
use crate::io;

/// Turns a drawing file into plain text, pages joined by newlines.
pub trait TextSource {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Text layer extraction from PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfText;

impl TextSource for PdfText {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = io::read_bytes(path, &format!("read {}", path.display()))?;
        let display = path.display().to_string();

        // pdf-extract panics on some malformed documents instead of returning Err.
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(Error::document_extract_failed(display, e.to_string())),
            Err(_) => Err(Error::document_extract_failed(
                display,
                "PDF parser aborted on malformed content",
            )),
        }
    }
}

/// All `.pdf` files (any letter case) directly inside `input_dir`, sorted by name.
pub fn discover(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let escaped = Pattern::escape(&input_dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.pdf");
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut documents: Vec<PathBuf> = glob::glob_with(&pattern.to_string_lossy(), options)
        .map_err(|e| {
            Error::validation_invalid_argument(
                "input",
                format!("Invalid input directory '{}': {}", input_dir.display(), e),
                Some(input_dir.display().to_string()),
            )
        })?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    documents.sort();
    documents.dedup();
    Ok(documents)
}

/// File name shown in the workbook's PDF column.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
