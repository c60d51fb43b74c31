//! SHA-256 digests used as transaction identifiers.

use nearlite_codec::{fixed_bytes, Decode, Encode, FieldType, Reader, Schema, SchemaError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A named alias for a 32-byte(u8) array, used to represent a 256-bit hash.
pub type H256 = [u8; 32];

/// A 32-byte digest. Renders as base58, the form block explorers and RPC
/// nodes use for transaction and block hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CryptoHash(pub H256);

impl CryptoHash {
    /// The zero hash (all zeros).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a new hash from raw bytes.
    pub fn from_bytes(bytes: H256) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &H256 {
        &self.0
    }

    /// Convert to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Build from a slice, which must hold exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(Self(fixed_bytes("block hash", bytes)?))
    }

    /// Parse from a hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| HashParseError::InvalidHex)?;
        Ok(Self::from_slice(&bytes)?)
    }

    /// Convert to a base58 string.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }

    /// Parse from a base58 string.
    pub fn from_base58(s: &str) -> Result<Self, HashParseError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| HashParseError::InvalidBase58)?;
        Ok(Self::from_slice(&bytes)?)
    }
}

/// Errors from parsing a textual hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("invalid base58 hash")]
    InvalidBase58,
    #[error("invalid hex hash")]
    InvalidHex,
    #[error(transparent)]
    Length(#[from] SchemaError),
}

impl FromStr for CryptoHash {
    type Err = HashParseError;

    /// Accepts 64 hex characters (optionally 0x-prefixed) or base58.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        if trimmed.len() == 64 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(hash) = Self::from_hex(trimmed) {
                return Ok(hash);
            }
        }
        Self::from_base58(s)
    }
}

impl fmt::Debug for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CryptoHash({})", self.to_base58())
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl From<H256> for CryptoHash {
    fn from(bytes: H256) -> Self {
        Self(bytes)
    }
}

impl From<CryptoHash> for H256 {
    fn from(hash: CryptoHash) -> Self {
        hash.0
    }
}

impl AsRef<[u8]> for CryptoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// On the wire a hash is a bare 32-byte array.
impl Encode for CryptoHash {
    fn encode_to(&self, out: &mut Vec<u8>) -> nearlite_codec::Result<()> {
        self.0.encode_to(out)
    }
}

impl Decode for CryptoHash {
    fn decode_from(reader: &mut Reader<'_>) -> nearlite_codec::Result<Self> {
        Ok(Self(reader.take_array()?))
    }
}

impl Schema for CryptoHash {
    fn field_type() -> FieldType {
        H256::field_type()
    }
}

impl Serialize for CryptoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// SHA-256 of arbitrary data.
pub fn hash(data: &[u8]) -> CryptoHash {
    CryptoHash(Sha256::digest(data).into())
}
