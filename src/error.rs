use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Every failure a demo can report.
#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to decode base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("decoded data is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Request limit exceeded! ({limit} per {window_secs}s)")]
    RateLimited { limit: u32, window_secs: u64 },

    #[error("unknown event type '{0}'")]
    UnknownEvent(String),

    #[error("Please open a file first.")]
    NoFileOpen,

    #[error("missing required field: '{0}'")]
    MissingField(&'static str),

    #[error("invalid choice '{input}': expected {expected}")]
    InvalidChoice { input: String, expected: String },

    #[error("order total is too large")]
    OrderTooLarge,

    #[error("unsupported codec '{0}'")]
    UnsupportedCodec(String),

    #[error("input closed before an answer was given")]
    InputClosed,
}

impl PlaygroundError {
    pub fn invalid_choice(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidChoice {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_console_wording() {
        assert_eq!(
            PlaygroundError::NoFileOpen.to_string(),
            "Please open a file first."
        );
        let err = PlaygroundError::RateLimited {
            limit: 2,
            window_secs: 60,
        };
        assert!(err.to_string().starts_with("Request limit exceeded!"));
    }

    #[test]
    fn test_io_error_converts_with_question_mark() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(PlaygroundError::Io(_))));
    }
}
