use std::sync::Mutex;

use async_trait::async_trait;
use nearlite_codec::{Encode, SchemaError};
use nearlite_core::{
    action, full_access_key, hash, sign_transaction, CryptoHash, KeyPairSigner, Keypair,
    PublicKey, SignedMessage, Signer, SigningError,
};

#[derive(Debug, thiserror::Error)]
enum MockError {
    #[error("no key for {0}")]
    NoKey(String),
}

/// Records every call and answers with a fixed key and signature.
#[derive(Default)]
struct RecordingSigner {
    key_requests: Mutex<Vec<(Option<String>, Option<String>)>>,
    messages: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl Signer for RecordingSigner {
    type Error = MockError;

    async fn get_public_key(
        &self,
        account_id: Option<&str>,
        network_id: Option<&str>,
    ) -> Result<PublicKey, Self::Error> {
        self.key_requests
            .lock()
            .unwrap()
            .push((account_id.map(str::to_owned), network_id.map(str::to_owned)));
        match account_id {
            Some("alice.test") => Ok(PublicKey::ed25519([7u8; 32])),
            other => Err(MockError::NoKey(other.unwrap_or("<none>").to_string())),
        }
    }

    async fn sign_message(
        &self,
        message: &[u8],
        _account_id: Option<&str>,
        _network_id: Option<&str>,
    ) -> Result<SignedMessage, Self::Error> {
        self.messages.lock().unwrap().push(message.to_vec());
        Ok(SignedMessage {
            signature: vec![0x22u8; 64],
        })
    }
}

#[tokio::test]
async fn signs_exactly_the_encoded_transaction() {
    let signer = RecordingSigner::default();
    let (digest, signed) = sign_transaction(
        "bob.test",
        1,
        vec![action::transfer(1_000_000_000_000_000_000_000_000)],
        CryptoHash::from_bytes([9u8; 32]),
        &signer,
        "alice.test",
        Some("testnet"),
    )
    .await
    .expect("sign");

    let messages = signer.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);

    let encoded = signed.transaction.encode().unwrap();
    assert_eq!(messages[0], encoded);
    assert_eq!(digest, hash(&encoded));
    assert_eq!(
        digest.to_hex(),
        "84d95c1e03716b002f84e7afff240826ee0e0cdf58986abb9094ffdc4b282deb"
    );
    assert_eq!(signed.signature.data, [0x22u8; 64]);
    assert_eq!(signed.transaction.public_key, PublicKey::ed25519([7u8; 32]));

    let requests = signer.key_requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![(Some("alice.test".to_string()), Some("testnet".to_string()))]
    );
}

#[tokio::test]
async fn key_failure_stops_before_signing() {
    let signer = RecordingSigner::default();
    let err = sign_transaction(
        "bob.test",
        1,
        vec![action::create_account()],
        CryptoHash::ZERO,
        &signer,
        "mallory.test",
        None,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SigningError::Signer(MockError::NoKey(ref who)) if who == "mallory.test"));
    assert!(signer.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_action_list_is_signed() {
    let signer = RecordingSigner::default();
    let (_, signed) = sign_transaction(
        "bob.test",
        0,
        Vec::new(),
        CryptoHash::ZERO,
        &signer,
        "alice.test",
        None,
    )
    .await
    .unwrap();

    assert!(signed.transaction.actions.is_empty());
    // trailing u32 action count of zero
    let encoded = signed.transaction.encode().unwrap();
    assert_eq!(&encoded[encoded.len() - 4..], &[0, 0, 0, 0]);
}

#[tokio::test]
async fn keypair_signer_round_trip() {
    let keypair = Keypair::from_private_key(&[5u8; 32]);
    let new_key = Keypair::from_private_key(&[6u8; 32]).public_key();
    let signer = KeyPairSigner::for_account(keypair, "alice.test");

    let (digest, signed) = sign_transaction(
        "alice.test",
        42,
        vec![
            action::add_key(new_key, full_access_key()),
            action::function_call("set", b"{}".to_vec(), 30_000_000_000_000, 0),
        ],
        CryptoHash::from_bytes([3u8; 32]),
        &signer,
        "alice.test",
        Some("testnet"),
    )
    .await
    .unwrap();

    assert!(signed.verify().is_ok());
    assert_eq!(signed.hash().unwrap(), digest);

    let mut tampered = signed.clone();
    tampered.transaction.nonce += 1;
    assert!(tampered.verify().is_err());
}

#[tokio::test]
async fn keypair_signer_refuses_other_accounts() {
    let signer = KeyPairSigner::for_account(Keypair::generate(), "alice.test");
    let err = sign_transaction(
        "bob.test",
        1,
        vec![action::transfer(1)],
        CryptoHash::ZERO,
        &signer,
        "carol.test",
        None,
    )
    .await
    .unwrap_err();

    assert!(err.signer_error().is_some());
    let source = err.signer_error().unwrap().to_string();
    assert!(source.contains("carol.test"));
    assert!(!err.to_string().contains("carol.test"));
}

/// Hands back signatures one byte short.
struct TruncatingSigner;

#[async_trait]
impl Signer for TruncatingSigner {
    type Error = MockError;

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
async fn malformed_signature_is_a_schema_error() {
    let err = sign_transaction(
        "bob.test",
        1,
        vec![action::transfer(1)],
        CryptoHash::ZERO,
        &TruncatingSigner,
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
