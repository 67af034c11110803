//! Error types for PDO parsing
//!
//! Every error carries a code so callers can categorize failures without
//! matching on message text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and truncation errors
//! - **E2xxx**: Malformed stream errors
//! - **E3xxx**: Model validation errors
//! - **E4xxx**: Texture payload errors
//! - **E5xxx**: Export errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error outside of a parse stage
//! - `E1002`: File ended while a stage was being read
//! - `E1003`: I/O error inside a parse stage
//! - `E2001`: Magic literal mismatch
//! - `E2002`: Unsupported format version
//! - `E2003`: Invalid or oversized count
//! - `E2004`: Structurally invalid value
//! - `E3001`: Invalid model references
//! - `E4001`: Texture decode failure
//! - `E5001`: Export writing failure

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for PDO operations
pub type Result<T> = std::result::Result<T, Error>;

/// The section of the file the parser was in when a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Leading magic literal
    Magic,
    /// File header (version, string encoding, lock metadata)
    Header,
    /// 3D objects with their vertices, faces and edges
    Objects,
    /// Materials and their embedded textures
    Materials,
    /// Unfold section header (scale and overall bounds)
    Unfold,
    /// Printable parts and their lines
    Parts,
    /// Text annotations
    TextBlocks,
    /// Image annotations
    Images,
    /// Page and line style settings
    Settings,
}

impl Stage {
    /// Human-readable stage name
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Magic => "magic",
            Stage::Header => "header",
            Stage::Objects => "objects",
            Stage::Materials => "materials",
            Stage::Unfold => "unfold",
            Stage::Parts => "parts",
            Stage::TextBlocks => "text blocks",
            Stage::Images => "images",
            Stage::Settings => "settings",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur when parsing PDO files or decoding their payloads
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred outside of the structural parse
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stream ended before a stage was complete
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Interrupted download or copy
    /// - A count field was corrupted and points past the end of the file
    #[error("[E1002] Truncated file: unexpected end of data while reading {stage}")]
    Truncated {
        /// Stage that was being read
        stage: Stage,
    },

    /// An I/O error other than end-of-file occurred inside a stage
    ///
    /// **Error Code**: E1003
    #[error("[E1003] Read error in {stage}: {source}")]
    Read {
        /// Stage that was being read
        stage: Stage,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The file does not start with the PDO magic literal
    ///
    /// **Error Code**: E2001
    ///
    /// **Suggestions**:
    /// - Verify the file is a Pepakura Designer `.pdo` file
    #[error("[E2001] Invalid magic: expected \"version 3\\n\", got {0:?}")]
    InvalidMagic(String),

    /// The header declares a format version this parser does not know
    ///
    /// **Error Code**: E2002
    ///
    /// **Suggestions**:
    /// - Re-save the file with a Pepakura Designer release that writes
    ///   format version 4, 5 or 6
    #[error("[E2002] Unsupported format version {0} (supported: 4, 5, 6)")]
    UnsupportedVersion(i32),

    /// A count or size field is negative or larger than the configured limit
    ///
    /// **Error Code**: E2003
    ///
    /// **Suggestions**:
    /// - The file is most likely corrupt
    /// - Raise the limits in `ParserConfig` for unusually large models
    #[error("[E2003] Invalid {what} count {count} in {stage}")]
    InvalidCount {
        /// Stage that was being read
        stage: Stage,
        /// What the count describes
        what: &'static str,
        /// The raw count value
        count: i64,
    },

    /// A value is structurally impossible
    ///
    /// **Error Code**: E2004
    #[error("[E2004] Invalid format in {stage}: {message}")]
    InvalidFormat {
        /// Stage that was being read
        stage: Stage,
        /// Description of the problem
        message: String,
    },

    /// The parsed model contains dangling references
    ///
    /// **Error Code**: E3001
    ///
    /// Only produced when validation is requested via `ParserConfig::with_validation`
    /// or by calling [`crate::validator::validate_model`].
    #[error("[E3001] Invalid model: {0}")]
    InvalidModel(String),

    /// A texture payload could not be inflated into a pixel buffer
    ///
    /// **Error Code**: E4001
    ///
    /// This error only affects the texture being decoded; the rest of the
    /// model stays usable.
    #[error("[E4001] Texture decode error: {0}")]
    TextureDecode(String),

    /// An exporter could not write its output
    ///
    /// **Error Code**: E5001
    ///
    /// **Common Causes**:
    /// - I/O error on the output stream
    #[error("[E5001] Export error: {0}")]
    Export(String),
}

impl Error {
    /// Tag an I/O error with the stage it happened in
    pub(crate) fn in_stage(err: io::Error, stage: Stage) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { stage }
        } else {
            Error::Read { stage, source: err }
        }
    }

    /// Create an InvalidFormat error for the given stage
    pub(crate) fn invalid_format(stage: Stage, message: impl Into<String>) -> Self {
        Error::InvalidFormat {
            stage,
            message: message.into(),
        }
    }

    /// Create an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Error::Export(message.into())
    }

    /// The parse stage this error was raised in, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Truncated { stage }
            | Error::Read { stage, .. }
            | Error::InvalidCount { stage, .. }
            | Error::InvalidFormat { stage, .. } => Some(*stage),
            Error::InvalidMagic(_) => Some(Stage::Magic),
            Error::UnsupportedVersion(_) => Some(Stage::Header),
            Error::Io(_)
            | Error::InvalidModel(_)
            | Error::TextureDecode(_)
            | Error::Export(_) => None,
        }
    }

    /// Whether the error was caused by the data ending early
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }
}
