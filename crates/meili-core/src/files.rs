//! Reading document files for bulk import.

use crate::types::DocumentFormat;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Character encoding of a document file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileEncoding {
    /// UTF-8, validated before upload.
    #[default]
    Utf8,
    /// ISO-8859-1, transcoded to UTF-8 before upload.
    Latin1,
}

impl FromStr for FileEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            other => Err(Error::Config(format!(
                "Unsupported encoding '{other}'. Supported encodings are utf-8 and latin-1"
            ))),
        }
    }
}

impl fmt::Display for FileEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
        })
    }
}

/// A document file ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// Format chosen from the extension.
    pub format: DocumentFormat,
    /// UTF-8 body.
    pub body: Vec<u8>,
}

/// Read a document file and convert it to UTF-8.
///
/// The extension is checked first, so an unsupported file is rejected even
/// when it does not exist.
pub fn read_document_file(path: &Path, encoding: FileEncoding) -> Result<DocumentFile> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), %encoding, "Read document file");

    let body = match encoding {
        FileEncoding::Utf8 => String::from_utf8(bytes)
            .map_err(|_| {
                Error::Parse(format!(
                    "{} is not valid UTF-8. Use --encoding to pick another encoding",
                    path.display()
                ))
            })?
            .into_bytes(),
        // Every latin-1 byte is the Unicode code point of the same value.
        FileEncoding::Latin1 => bytes
            .iter()
            .map(|&b| char::from(b))
            .collect::<String>()
            .into_bytes(),
    };

    Ok(DocumentFile { format, body })
}
