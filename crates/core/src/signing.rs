//! Transaction signing protocol.
//!
//! The steps run strictly in order and stop at the first failure:
//!
//! 1. ask the signer for the public key of `account_id`
//! 2. assemble the transaction
//! 3. encode it once into `message`
//! 4. hash `message`
//! 5. ask the signer to sign `message`
//! 6. package the untouched transaction with the signature
//!
//! The transaction is not re-encoded or modified between steps 3 and 6, so
//! the signed bytes are always the encoding of the transaction returned.

use crate::action::Action;
use crate::crypto::Signature;
use crate::hash::CryptoHash;
use crate::signer::Signer;
use crate::transaction::{create_transaction, SignedTransaction};
use nearlite_codec::SchemaError;
use thiserror::Error;
use tracing::debug;

/// Errors from [`sign_transaction`].
#[derive(Debug, Error)]
pub enum SigningError<E>
where
    E: std::error::Error + 'static,
{
    /// The signer failed; its error is passed through untouched.
    #[error("signer failed")]
    Signer(#[source] E),

    /// Encoding failed or the signer returned a malformed signature.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl<E> SigningError<E>
where
    E: std::error::Error + 'static,
{
    /// The signer's own error, if that is what failed.
    pub fn signer_error(&self) -> Option<&E> {
        match self {
            SigningError::Signer(e) => Some(e),
            SigningError::Schema(_) => None,
        }
    }
}

/// Build, hash and sign a transaction for `account_id`.
///
/// Returns the transaction id and the signed transaction.
pub async fn sign_transaction<S>(
    receiver_id: impl Into<String>,
    nonce: u64,
    actions: Vec<Action>,
    block_hash: CryptoHash,
    signer: &S,
    account_id: &str,
    network_id: Option<&str>,
) -> Result<(CryptoHash, SignedTransaction), SigningError<S::Error>>
where
    S: Signer + ?Sized,
{
    let public_key = signer
        .get_public_key(Some(account_id), network_id)
        .await
        .map_err(SigningError::Signer)?;

    let transaction = create_transaction(
        account_id,
        public_key,
        receiver_id,
        nonce,
        actions,
        block_hash,
    );
    let (digest, message) = transaction.hash_and_encode()?;
    debug!(
        hash = %digest,
        signer_id = %transaction.signer_id,
        receiver_id = %transaction.receiver_id,
        nonce,
        actions = transaction.actions.len(),
        "signing transaction"
    );

    let signed = signer
        .sign_message(&message, Some(account_id), network_id)
        .await
        .map_err(SigningError::Signer)?;
    let signature = Signature::from_slice(transaction.public_key.key_type, &signed.signature)?;

    debug!(hash = %digest, "transaction signed");
    Ok((digest, SignedTransaction::new(transaction, signature)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::transfer;
    use crate::crypto::{Keypair, PublicKey};
    use crate::signer::{KeyPairSigner, SignedMessage};
    use async_trait::async_trait;

    #[derive(Debug, thiserror::Error)]
    #[error("device unplugged")]
    struct Unplugged;

    /// Returns a key but fails to sign.
    struct UnpluggedSigner;

    #[async_trait]
    impl Signer for UnpluggedSigner {
        type Error = Unplugged;

        async fn get_public_key(
            &self,
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<PublicKey, Self::Error> {
            Ok(PublicKey::ed25519([1u8; 32]))
        }

        async fn sign_message(
            &self,
            _message: &[u8],
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<SignedMessage, Self::Error> {
            Err(Unplugged)
        }
    }

    /// Returns a signature of the wrong length.
    struct ShortSigner;

    #[async_trait]
    impl Signer for ShortSigner {
        type Error = Unplugged;

        async fn get_public_key(
            &self,
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<PublicKey, Self::Error> {
            Ok(PublicKey::ed25519([1u8; 32]))
        }

        async fn sign_message(
            &self,
            _message: &[u8],
            _account_id: Option<&str>,
            _network_id: Option<&str>,
        ) -> Result<SignedMessage, Self::Error> {
            Ok(SignedMessage {
                signature: vec![0u8; 63],
            })
        }
    }

    #[tokio::test]
    async fn test_sign_with_keypair_verifies() {
        let signer = KeyPairSigner::new(Keypair::from_private_key(&[2u8; 32]));
        let (digest, signed) = sign_transaction(
            "bob.test",
            1,
            vec![transfer(1)],
            CryptoHash([9u8; 32]),
            &signer,
            "alice.test",
            Some("testnet"),
        )
        .await
        .unwrap();

        assert_eq!(signed.transaction.signer_id, "alice.test");
        assert_eq!(signed.hash().unwrap(), digest);
        assert!(signed.verify().is_ok());
    }

    #[tokio::test]
    async fn test_signer_error_passes_through() {
        let err = sign_transaction(
            "bob.test",
            1,
            vec![transfer(1)],
            CryptoHash::ZERO,
            &UnpluggedSigner,
            "alice.test",
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(err.signer_error(), Some(Unplugged)));
        assert_eq!(err.to_string(), "signer failed");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("device unplugged"));

        // walking the chain names the signer's message once
        let mut chain = vec![err.to_string()];
        let mut next = std::error::Error::source(&err);
        while let Some(e) = next {
            chain.push(e.to_string());
            next = e.source();
        }
        assert_eq!(chain.join(": "), "signer failed: device unplugged");
    }

    #[tokio::test]
    async fn test_malformed_signature_is_schema_error() {
        let err = sign_transaction(
            "bob.test",
            1,
            vec![transfer(1)],
            CryptoHash::ZERO,
            &ShortSigner,
            "alice.test",
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            SigningError::Schema(SchemaError::LengthMismatch {
                expected: 64,
                actual: 63,
                ..
            })
        ));
    }
}
