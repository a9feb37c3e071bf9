// this_file: fontscan/src/lib.rs
//
// Main library entry point for fontscan
use thiserror::Error;

/// Error type for fontscan
#[derive(Error, Debug)]
pub enum FontscanError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// No charset rule matches a name record's platform and encoding
    #[error("Unrecognized encoding: platform {platform_id}, encoding {encoding_id}")]
    UnrecognizedEncoding { platform_id: u16, encoding_id: u16 },

    /// A name record decoded to invalid or empty text
    #[error("Malformed encoded string: {0}")]
    MalformedEncodedString(String),

    /// The font parser could not produce a required table or face
    #[error("Parser failure: {0}")]
    ParserFailure(String),

    /// Output buffers could not be grown
    #[error("Allocation failure: {0}")]
    AllocationFailure(String),

    /// No usable name was found for a field
    #[error("No usable name: {0}")]
    NoUsableName(String),

    /// Instance number out of range for the face
    #[error("Invalid instance id: 0x{0:08x}")]
    InvalidInstance(u32),

    /// The variable pattern was requested but no axis varies
    #[error("Face has no varying weight, width or optical-size axis")]
    NoVariations,

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Regex errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

/// Result type for fontscan
pub type Result<T> = std::result::Result<T, FontscanError>;

pub mod capability;
pub mod charset;
pub mod cli;
pub mod face;
pub mod font;
pub mod langset;
pub mod matchers;
pub mod names;
pub mod properties;
pub mod query;
pub mod style;
pub mod tables;
pub mod transcode;
pub mod utils;
pub mod woff;

pub use face::FontFace;
pub use properties::FontProperties;
pub use query::{query, query_all, query_with_session, FaceSession, InstanceId};

// Implement From for common error types
impl From<std::io::Error> for FontscanError {
    fn from(err: std::io::Error) -> Self {
        FontscanError::Io(format!("{:?}: {}", err.kind(), err))
    }
}

impl From<std::collections::TryReserveError> for FontscanError {
    fn from(err: std::collections::TryReserveError) -> Self {
        FontscanError::AllocationFailure(err.to_string())
    }
}

impl From<String> for FontscanError {
    fn from(err: String) -> Self {
        FontscanError::Other(err)
    }
}

impl From<&str> for FontscanError {
    fn from(err: &str) -> Self {
        FontscanError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fontscan_err: FontscanError = io_err.into();

        match fontscan_err {
            FontscanError::Io(msg) => {
                assert!(msg.contains("file not found"));
                assert!(msg.contains("NotFound"));
            }
            _ => panic!("Expected Io error"),
        }

        let str_err = "test error";
        let fontscan_err: FontscanError = str_err.into();

        match fontscan_err {
            FontscanError::Other(msg) => assert_eq!(msg, "test error"),
            _ => panic!("Expected Other error"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = FontscanError::UnrecognizedEncoding {
            platform_id: 3,
            encoding_id: 7,
        };
        assert_eq!(
            err.to_string(),
            "Unrecognized encoding: platform 3, encoding 7"
        );
        assert_eq!(
            FontscanError::InvalidInstance(0x0003_0000).to_string(),
            "Invalid instance id: 0x00030000"
        );
    }
}
