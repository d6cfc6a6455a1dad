//! Extension-based format detection and well-formedness probes.
//!
//! Probes only answer "does the underlying parser accept this file"; the
//! parsed documents are dropped as soon as the probe returns.
//!
//! XML bytes are decoded before parsing: a byte order mark wins, then the
//! `encoding` of the XML declaration, then UTF-8.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use serde::de::IgnoredAny;
use thiserror::Error;

/// Format-specific check family, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    Xml,
    Json,
    Mesh,
}

impl AssetFormat {
    /// Case-insensitive extension lookup; `None` means no format check runs.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" => Some(Self::Xml),
            "json" => Some(Self::Json),
            "obj" => Some(Self::Mesh),
            _ => None,
        }
    }
}

/// Why a probe rejected a file.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("{0}")]
    Encoding(String),

    #[error("{0}")]
    Xml(#[from] roxmltree::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl ProbeError {
    /// Detail string stored on the failed check record.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Read(error) => format!("Error: {error}"),
            Self::Encoding(reason) => format!("Error: {reason}"),
            Self::Xml(error) => format!("Error-msg: {error}\nPosition: {}", error.pos()),
            Self::Json(error) => format!("Error: {error}"),
        }
    }
}

/// Parse `path` as an XML document, DTDs allowed.
///
/// # Errors
///
/// [`ProbeError::Read`] if the file cannot be read,
/// [`ProbeError::Encoding`] if its bytes do not decode, and
/// [`ProbeError::Xml`] if the text is not well-formed.
pub fn probe_xml(path: &Path) -> Result<(), ProbeError> {
    let bytes = fs::read(path)?;
    let text = decode_xml(&bytes)?;
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(&text, options)?;
    Ok(())
}

/// Parse `path` as a single JSON value without building it in memory.
///
/// # Errors
///
/// [`ProbeError::Read`] if the file cannot be opened and
/// [`ProbeError::Json`] if it does not hold exactly one JSON value.
pub fn probe_json(path: &Path) -> Result<(), ProbeError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader::<_, IgnoredAny>(reader)?;
    Ok(())
}

fn decode_xml(bytes: &[u8]) -> Result<Cow<'_, str>, ProbeError> {
    let (encoding, body) = if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        (encoding, &bytes[bom_len..])
    } else if bytes.starts_with(b"<\0?\0") {
        (UTF_16LE, bytes)
    } else if bytes.starts_with(b"\0<\0?") {
        (UTF_16BE, bytes)
    } else {
        let declared = match declared_encoding(bytes) {
            Some(label) => Encoding::for_label(label).ok_or_else(|| {
                ProbeError::Encoding(format!(
                    "unsupported encoding `{}`",
                    String::from_utf8_lossy(label)
                ))
            })?,
            None => UTF_8,
        };
        // An ASCII prolog cannot be UTF-16, whatever it claims.
        (declared.output_encoding(), bytes)
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| ProbeError::Encoding(format!("stream is not valid {}", encoding.name())))
}

/// The `encoding` value of a leading `<?xml ... ?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let prolog = bytes.strip_prefix(b"<?xml")?;
    let end = prolog.windows(2).position(|w| w == b"?>")?;
    let declaration = &prolog[..end];
    let at = declaration.windows(8).position(|w| w == b"encoding")?;
    let value = declaration[at + 8..]
        .trim_ascii_start()
        .strip_prefix(b"=")?
        .trim_ascii_start();
    let (&quote, rest) = value.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = rest.iter().position(|&b| b == quote)?;
    Some(&rest[..len])
}
