//! Canonical binary codec for nearlite.
//!
//! This crate provides the deterministic encoding that transactions are
//! hashed and signed over:
//! - Fixed-width little-endian integers (8 to 128 bits)
//! - Length-prefixed UTF-8 strings and sequences
//! - Presence-tagged options and unprefixed fixed arrays
//! - Records and tagged unions declared with [`record!`] and [`tagged_union!`]
//! - A [`SchemaRegistry`] describing every declared layout
//!
//! # Example
//!
//! ```
//! use nearlite_codec::{Decode, Encode};
//!
//! let bytes = Some(7u64).encode().unwrap();
//! assert_eq!(bytes, [1, 7, 0, 0, 0, 0, 0, 0, 0]);
//! assert_eq!(Option::<u64>::decode(&bytes).unwrap(), Some(7));
//! ```

pub mod encode;
pub mod error;
mod macros;
pub mod reader;
pub mod schema;

// Re-export commonly used types at the crate root
pub use encode::{fixed_bytes, Decode, Encode};
pub use error::{Result, SchemaError};
pub use reader::Reader;
pub use schema::{
    Declared, Field, FieldType, Layout, Schema, SchemaRegistry, SchemaRegistryBuilder, Variant,
};
