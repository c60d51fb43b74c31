//! Key and signature types, and an Ed25519 key pair.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use nearlite_codec::{
    fixed_bytes, record, Declared, Decode, Encode, FieldType, Layout, Reader, Schema, SchemaError,
    Variant,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during key and signature operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("unsupported key type `{0}`")]
    UnsupportedKeyType(String),
    #[error("invalid base58 key data")]
    InvalidBase58,
    #[error(transparent)]
    Length(#[from] SchemaError),
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Curve of a key or signature. One byte on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyType {
    #[default]
    Ed25519 = 0,
}

impl KeyType {
    pub const VARIANTS: &'static [&'static str] = &["Ed25519"];

    /// Lowercase name used in the textual `type:base58` key form.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" => Ok(KeyType::Ed25519),
            _ => Err(KeyError::UnsupportedKeyType(s.to_string())),
        }
    }
}

impl Encode for KeyType {
    fn encode_to(&self, out: &mut Vec<u8>) -> nearlite_codec::Result<()> {
        out.push(*self as u8);
        Ok(())
    }
}

impl Decode for KeyType {
    fn decode_from(reader: &mut Reader<'_>) -> nearlite_codec::Result<Self> {
        match reader.read_u8()? {
            0 => Ok(KeyType::Ed25519),
            value => Err(SchemaError::InvalidDiscriminant {
                type_name: "KeyType",
                value,
                variants: Self::VARIANTS.len(),
            }),
        }
    }
}

impl Schema for KeyType {
    fn field_type() -> FieldType {
        FieldType::Named("KeyType")
    }
}

impl Declared for KeyType {
    const NAME: &'static str = "KeyType";

    fn layout() -> Layout {
        Layout::Union(vec![Variant {
            name: "Ed25519",
            discriminant: 0,
            payload: FieldType::Unit,
        }])
    }
}

/// Split `type:base58` (a bare base58 string means ed25519).
fn parse_typed_base58(s: &str) -> Result<(KeyType, Vec<u8>), KeyError> {
    let (key_type, data) = match s.split_once(':') {
        Some((prefix, data)) => (prefix.parse()?, data),
        None => (KeyType::Ed25519, s),
    };
    let bytes = bs58::decode(data)
        .into_vec()
        .map_err(|_| KeyError::InvalidBase58)?;
    Ok((key_type, bytes))
}

record! {
    /// A public key as it appears inside transactions.
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PublicKey {
        pub key_type: KeyType,
        pub data: [u8; 32],
    }
}

impl PublicKey {
    /// An Ed25519 public key.
    pub fn ed25519(data: [u8; 32]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }

    /// Build from a slice, which must hold exactly 32 bytes.
    pub fn from_slice(key_type: KeyType, bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(Self {
            key_type,
            data: fixed_bytes("public key", bytes)?,
        })
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        match (self.key_type, signature.key_type) {
            (KeyType::Ed25519, KeyType::Ed25519) => {
                let key = VerifyingKey::from_bytes(&self.data)
                    .map_err(|_| KeyError::InvalidPublicKey)?;
                let sig = DalekSignature::from_bytes(&signature.data);
                key.verify(message, &sig)
                    .map_err(|_| KeyError::VerificationFailed)
            }
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, bs58::encode(self.data).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key_type, bytes) = parse_typed_base58(s)?;
        Ok(Self::from_slice(key_type, &bytes)?)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

record! {
    /// A signature together with the curve that produced it.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct Signature {
        pub key_type: KeyType,
        pub data: [u8; 64],
    }
}

impl Signature {
    /// An Ed25519 signature.
    pub fn ed25519(data: [u8; 64]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }

    /// Build from a slice, which must hold exactly 64 bytes.
    pub fn from_slice(key_type: KeyType, bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(Self {
            key_type,
            data: fixed_bytes("signature", bytes)?,
        })
    }

    /// Convert the signature bytes to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.data)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key_type, bs58::encode(self.data).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl FromStr for Signature {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key_type, bytes) = parse_typed_base58(s)?;
        Ok(Self::from_slice(key_type, &bytes)?)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An Ed25519 key pair for local signing.
pub struct Keypair {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Create a keypair from a private key (32 bytes).
    pub fn from_private_key(bytes: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(bytes))
    }

    /// Create a keypair from a hex-encoded private key.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.trim()).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secret: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_private_key(&secret))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = PublicKey::ed25519(signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            public_key,
        }
    }

    /// Get the private key bytes.
    pub fn private_key(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::ed25519(self.signing_key.sign(message).to_bytes())
    }

    /// Verify a signature against our public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), KeyError> {
        self.public_key.verify(message, signature)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .finish()
    }
}
