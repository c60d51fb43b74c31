//! The signing capability transactions are delegated to.

use crate::crypto::{Keypair, PublicKey};
use crate::hash::hash;
use async_trait::async_trait;
use thiserror::Error;

/// Raw signature bytes returned by a [`Signer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    pub signature: Vec<u8>,
}

/// Something that owns private keys and signs on request.
///
/// Both calls may suspend (remote service, hardware token, user prompt)
/// and may fail; failures are reported with the signer's own error type.
#[async_trait]
pub trait Signer: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Public key used for `account_id` on `network_id`.
    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, Self::Error>;

    /// Sign `message` with the key of `account_id` on `network_id`.
    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<SignedMessage, Self::Error>;
}

/// Errors from [`KeyPairSigner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPairSignerError {
    #[error("no key for account `{requested}`; this signer holds the key of `{held}`")]
    UnknownAccount { requested: String, held: String },
}

/// In-process signer over a single Ed25519 key pair.
///
/// Signs the SHA-256 digest of each message, matching
/// [`SignedTransaction::verify`](crate::SignedTransaction::verify).
#[derive(Debug)]
pub struct KeyPairSigner {
    keypair: Keypair,
    account_id: Option<String>,
}

impl KeyPairSigner {
    /// A signer that answers for any account.
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            account_id: None,
        }
    }

    /// A signer that only answers for `account_id`.
    pub fn for_account(keypair: Keypair, account_id: impl Into<String>) -> Self {
        Self {
            keypair,
            account_id: Some(account_id.into()),
        }
    }

    fn check_account(&self, requested: Option<&str>) -> Result<(), KeyPairSignerError> {
        match (&self.account_id, requested) {
            (Some(held), Some(requested)) if held != requested => {
                Err(KeyPairSignerError::UnknownAccount {
                    requested: requested.to_string(),
                    held: held.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Signer for KeyPairSigner {
    type Error = KeyPairSignerError;

    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        _network_id: Option<&str>,
    ) -> Result<PublicKey, Self::Error> {
        self.check_account(account_id)?;
        Ok(self.keypair.public_key())
    }

    async fn sign_message(
        &self,
        message: &[u8],
        account_id: Option<&str>,
        _network_id: Option<&str>,
    ) -> Result<SignedMessage, Self::Error> {
        self.check_account(account_id)?;
        let digest = hash(message);
        let signature = self.keypair.sign(digest.as_bytes());
        Ok(SignedMessage {
            signature: signature.data.to_vec(),
        })
    }
}
