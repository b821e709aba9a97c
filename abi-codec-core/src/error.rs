//! Structured error types for the ABI codec.
//!
//! Every decode, convert and transform call returns one of these. None of
//! them are retried: a failure in any nested field aborts the whole call.

use thiserror::Error;

/// Result type alias used throughout the codec.
pub type CodecResult<T> = Result<T, CodecError>;

/// Structured error type for codec operations.
///
/// # Example
/// ```rust
/// use abi_codec_core::error::CodecError;
///
/// fn check_name(name: &str) -> Result<(), CodecError> {
///     if name.is_empty() {
///         return Err(CodecError::invalid_input("endpoint name is empty"));
///     }
///     Ok(())
/// }
///
/// assert_eq!(check_name("").unwrap_err().error_code(), 2000);
/// ```
#[derive(Error, Debug)]
pub enum CodecError {
    /// Malformed type-name grammar, unknown type, or unsupported custom-type kind
    #[error("Invalid type `{type_name}`: {message}")]
    InvalidType {
        type_name: String,
        message: String,
    },

    /// Malformed call-site input (endpoint name, contract address, input list)
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    /// The buffer ended before the declared layout was fully read
    #[error("Buffer underrun: needed {needed} bytes, {available} available")]
    BufferUnderrun {
        needed: usize,
        available: usize,
    },

    /// Enum discriminant with no matching variant
    #[error("Enum `{enum_name}` has no variant with discriminant {discriminant}")]
    UnknownVariant {
        enum_name: String,
        discriminant: u8,
    },

    /// A nested failure, annotated with the type being decoded when it happened
    #[error("Failed to decode `{type_name}`: {source}")]
    Decode {
        type_name: String,
        #[source]
        source: Box<CodecError>,
    },

    /// The ABI document itself could not be parsed
    #[error("Invalid ABI document: {0}")]
    AbiJson(#[from] serde_json::Error),
}

impl CodecError {
    /// Create an invalid-type error for the given type name.
    pub fn invalid_type(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::InvalidType {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CodecError::InvalidInput {
            message: message.into(),
        }
    }

    /// Wrap this error with the type name that was being decoded.
    pub fn within(self, type_name: impl Into<String>) -> Self {
        CodecError::Decode {
            type_name: type_name.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any `Decode` annotations.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            CodecError::Decode { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get a numeric error code for client-side handling.
    ///
    /// `Decode` wrappers report the code of the error they wrap.
    pub fn error_code(&self) -> u32 {
        match self {
            CodecError::InvalidType { .. } => 1000,
            CodecError::InvalidInput { .. } => 2000,
            CodecError::BufferUnderrun { .. } => 3000,
            CodecError::UnknownVariant { .. } => 3001,
            CodecError::AbiJson(_) => 4000,
            CodecError::Decode { source, .. } => source.error_code(),
        }
    }
}
