//! Transactions and signed transactions.

use crate::action::Action;
use crate::crypto::{KeyError, PublicKey, Signature};
use crate::hash::{hash, CryptoHash};
use nearlite_codec::{record, Encode, SchemaError};
use serde::{Deserialize, Serialize};

record! {
    /// An unsigned transaction. Its canonical encoding is what gets hashed
    /// and signed.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transaction {
        /// Account that signs and pays for the transaction.
        pub signer_id: String,
        /// Access key of `signer_id` used to sign.
        pub public_key: PublicKey,
        /// Access key nonce; must exceed the key's current nonce.
        pub nonce: u64,
        /// Account the actions apply to.
        pub receiver_id: String,
        /// Recent block the transaction is anchored to.
        pub block_hash: CryptoHash,
        pub actions: Vec<Action>,
    }
}

record! {
    /// A transaction together with a signature over its encoding.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SignedTransaction {
        pub transaction: Transaction,
        pub signature: Signature,
    }
}

/// Assemble a transaction from its parts.
pub fn create_transaction(
    signer_id: impl Into<String>,
    public_key: PublicKey,
    receiver_id: impl Into<String>,
    nonce: u64,
    actions: Vec<Action>,
    block_hash: CryptoHash,
) -> Transaction {
    Transaction {
        signer_id: signer_id.into(),
        public_key,
        nonce,
        receiver_id: receiver_id.into(),
        block_hash,
        actions,
    }
}

impl Transaction {
    /// Encode the transaction and hash the encoding.
    ///
    /// Returns the digest together with the exact bytes it was computed
    /// over, so callers can sign those bytes without encoding twice.
    pub fn hash_and_encode(&self) -> Result<(CryptoHash, Vec<u8>), SchemaError> {
        let message = self.encode()?;
        Ok((hash(&message), message))
    }

    /// Transaction id: SHA-256 of the canonical encoding.
    pub fn hash(&self) -> Result<CryptoHash, SchemaError> {
        Ok(self.hash_and_encode()?.0)
    }
}

impl SignedTransaction {
    pub fn new(transaction: Transaction, signature: Signature) -> Self {
        Self {
            transaction,
            signature,
        }
    }

    /// Id of the embedded transaction; the signature does not contribute.
    pub fn hash(&self) -> Result<CryptoHash, SchemaError> {
        self.transaction.hash()
    }

    /// Check the signature against the transaction's own public key.
    ///
    /// Ed25519 signers sign the SHA-256 digest of the encoded transaction,
    /// so that is what is verified here.
    pub fn verify(&self) -> Result<(), KeyError> {
        let digest = self.transaction.hash()?;
        self.transaction
            .public_key
            .verify(digest.as_bytes(), &self.signature)
    }
}
