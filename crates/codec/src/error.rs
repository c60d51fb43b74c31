//! Codec errors.

use thiserror::Error;

/// Errors raised while encoding, decoding or resolving schema layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),

    #[error("invalid discriminant {value} for `{type_name}` ({variants} variants declared)")]
    InvalidDiscriminant {
        type_name: &'static str,
        value: u8,
        variants: usize,
    },

    #[error("invalid option tag {0}, expected 0 or 1")]
    InvalidOptionTag(u8),

    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    #[error("length mismatch for {what}: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("length {0} does not fit in a u32 prefix")]
    LengthOverflow(usize),

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("unknown variant `{variant}` of `{type_name}`")]
    UnknownVariant { type_name: String, variant: String },

    #[error("`{type_name}` declares discriminant {found} where {expected} was expected")]
    DiscriminantGap {
        type_name: &'static str,
        expected: usize,
        found: u8,
    },

    #[error("`{0}` is not a tagged union")]
    NotAUnion(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
