//! Transaction model and signing for nearlite.
//!
//! This crate provides everything needed to turn a list of actions into a
//! signed, canonically encoded transaction:
//! - Keys, signatures and SHA-256 digests
//! - Access keys and the eight action kinds
//! - Action builders, typed and from loosely typed argument lists
//! - Transactions, signed transactions and their schema registry
//! - The [`Signer`] capability and the signing protocol
//!
//! # Example
//!
//! ```rust,no_run
//! use nearlite_core::{action, sign_transaction, CryptoHash, Keypair, KeyPairSigner};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let signer = KeyPairSigner::for_account(Keypair::generate(), "alice.test");
//! let block_hash: CryptoHash = "4reLvkAWfqk5fsqio1KLudk46cqRz9erQdaHkWZKMJDZ".parse()?;
//!
//! let (hash, signed) = sign_transaction(
//!     "bob.test",
//!     1,
//!     vec![action::transfer(1_000_000_000_000_000_000_000_000)],
//!     block_hash,
//!     &signer,
//!     "alice.test",
//!     Some("testnet"),
//! )
//! .await?;
//! println!("{} signed, {} bytes", hash, nearlite_codec::Encode::encode(&signed)?.len());
//! # Ok(())
//! # }
//! ```

pub mod access_key;
pub mod action;
pub mod args;
pub mod crypto;
pub mod hash;
pub mod registry;
pub mod signer;
pub mod signing;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use access_key::{
    full_access_key, function_call_access_key, AccessKey, AccessKeyPermission,
    FullAccessPermission, FunctionCallPermission,
};
pub use action::Action;
pub use args::{access_key_from_args, action_from_args, actions_from_json, ArgsError, ArityError};
pub use crypto::{KeyError, KeyType, Keypair, PublicKey, Signature};
pub use hash::{hash, CryptoHash, HashParseError, H256};
pub use registry::schema_registry;
pub use signer::{KeyPairSigner, KeyPairSignerError, SignedMessage, Signer};
pub use signing::{sign_transaction, SigningError};
pub use transaction::{create_transaction, SignedTransaction, Transaction};
