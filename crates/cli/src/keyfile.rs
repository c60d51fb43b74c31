//! Key files: an account id with its Ed25519 key pair, stored as JSON.

use anyhow::{bail, Context, Result};
use nearlite_core::{Keypair, PublicKey};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct KeyFile {
    pub account_id: String,
    pub public_key: PublicKey,
    /// Hex-encoded 32-byte Ed25519 secret.
    pub private_key: String,
}

impl KeyFile {
    pub fn new(account_id: impl Into<String>, keypair: &Keypair) -> Self {
        Self {
            account_id: account_id.into(),
            public_key: keypair.public_key(),
            private_key: hex::encode(keypair.private_key()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Malformed key file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write key file: {}", path.display()))
    }

    /// The key pair, checked against the stored public key.
    pub fn keypair(&self) -> Result<Keypair> {
        let keypair = Keypair::from_hex(&self.private_key).context("Invalid private key")?;
        if keypair.public_key() != self.public_key {
            bail!(
                "Key file for {} is inconsistent: private key belongs to {}, not {}",
                self.account_id,
                keypair.public_key(),
                self.public_key
            );
        }
        Ok(keypair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keys").join("alice.json");
        let keypair = Keypair::from_private_key(&[4u8; 32]);

        KeyFile::new("alice.test", &keypair).save(&path).unwrap();
        let loaded = KeyFile::load(&path).unwrap();

        assert_eq!(loaded.account_id, "alice.test");
        assert_eq!(loaded.public_key, keypair.public_key());
        assert_eq!(loaded.keypair().unwrap().private_key(), [4u8; 32]);
    }

    #[test]
    fn test_public_key_is_written_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alice.json");
        let keypair = Keypair::from_private_key(&[4u8; 32]);
        KeyFile::new("alice.test", &keypair).save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["public_key"], keypair.public_key().to_string());
        assert!(json["public_key"].as_str().unwrap().starts_with("ed25519:"));
    }

    #[test]
    fn test_mismatched_keys_are_rejected() {
        let mut file = KeyFile::new("alice.test", &Keypair::from_private_key(&[4u8; 32]));
        file.public_key = Keypair::from_private_key(&[5u8; 32]).public_key();
        assert!(file.keypair().is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(KeyFile::load(&dir.path().join("nope.json")).is_err());
    }
}
