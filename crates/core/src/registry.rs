//! Process-wide schema registry for every transaction type.

use std::sync::OnceLock;

use crate::access_key::{AccessKey, AccessKeyPermission, FullAccessPermission, FunctionCallPermission};
use crate::action::{
    Action, AddKey, CreateAccount, DeleteAccount, DeleteKey, DeployContract, FunctionCall, Stake,
    Transfer,
};
use crate::crypto::{KeyType, PublicKey, Signature};
use crate::transaction::{SignedTransaction, Transaction};
use nearlite_codec::{SchemaRegistry, SchemaRegistryBuilder};

static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

fn builder() -> SchemaRegistryBuilder {
    SchemaRegistry::builder()
        .register::<KeyType>()
        .register::<PublicKey>()
        .register::<Signature>()
        .register::<FunctionCallPermission>()
        .register::<FullAccessPermission>()
        .register::<AccessKeyPermission>()
        .register::<AccessKey>()
        .register::<CreateAccount>()
        .register::<DeployContract>()
        .register::<FunctionCall>()
        .register::<Transfer>()
        .register::<Stake>()
        .register::<AddKey>()
        .register::<DeleteKey>()
        .register::<DeleteAccount>()
        .register::<Action>()
        .register::<Transaction>()
        .register::<SignedTransaction>()
}

/// Layouts of every type that can appear in a signed transaction.
///
/// Built and validated on first use, read-only afterwards.
pub fn schema_registry() -> &'static SchemaRegistry {
    REGISTRY.get_or_init(|| {
        builder()
            .build()
            .expect("built-in transaction schema is consistent")
    })
}
