//! Transaction actions and their constructors.
//!
//! Each constructor fills exactly one variant of [`Action`]; the enum makes
//! a value with zero or several populated variants unrepresentable.

use crate::access_key::AccessKey;
use crate::crypto::PublicKey;
use nearlite_codec::{record, tagged_union};
use serde::{Deserialize, Serialize};

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CreateAccount {}
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DeployContract {
        #[serde(with = "hex::serde")]
        pub code: Vec<u8>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FunctionCall {
        pub method_name: String,
        #[serde(with = "hex::serde")]
        pub args: Vec<u8>,
        pub gas: u64,
        pub deposit: u128,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transfer {
        pub deposit: u128,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Stake {
        pub stake: u128,
        pub public_key: PublicKey,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AddKey {
        pub public_key: PublicKey,
        pub access_key: AccessKey,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DeleteKey {
        pub public_key: PublicKey,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct DeleteAccount {
        pub beneficiary_id: String,
    }
}

tagged_union! {
    /// One step of a transaction. The discriminant order is part of the wire
    /// format and must never change.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub enum Action {
        CreateAccount(CreateAccount) = 0,
        DeployContract(DeployContract) = 1,
        FunctionCall(FunctionCall) = 2,
        Transfer(Transfer) = 3,
        Stake(Stake) = 4,
        AddKey(AddKey) = 5,
        DeleteKey(DeleteKey) = 6,
        DeleteAccount(DeleteAccount) = 7,
    }
}

pub fn create_account() -> Action {
    Action::CreateAccount(CreateAccount {})
}

pub fn deploy_contract(code: Vec<u8>) -> Action {
    Action::DeployContract(DeployContract { code })
}

/// Call `method_name` with raw `args`, attaching `gas` and `deposit`.
pub fn function_call(
    method_name: impl Into<String>,
    args: Vec<u8>,
    gas: u64,
    deposit: u128,
) -> Action {
    Action::FunctionCall(FunctionCall {
        method_name: method_name.into(),
        args,
        gas,
        deposit,
    })
}

pub fn transfer(deposit: u128) -> Action {
    Action::Transfer(Transfer { deposit })
}

pub fn stake(stake: u128, public_key: PublicKey) -> Action {
    Action::Stake(Stake { stake, public_key })
}

pub fn add_key(public_key: PublicKey, access_key: AccessKey) -> Action {
    Action::AddKey(AddKey {
        public_key,
        access_key,
    })
}

pub fn delete_key(public_key: PublicKey) -> Action {
    Action::DeleteKey(DeleteKey { public_key })
}

/// Delete the signer's account, sending its remaining balance to `beneficiary_id`.
pub fn delete_account(beneficiary_id: impl Into<String>) -> Action {
    Action::DeleteAccount(DeleteAccount {
        beneficiary_id: beneficiary_id.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_key::{full_access_key, function_call_access_key};
    use nearlite_codec::{Decode, Encode, SchemaError};

    fn all_actions() -> Vec<Action> {
        let key = PublicKey::ed25519([4u8; 32]);
        vec![
            create_account(),
            deploy_contract(vec![0x00, 0x61, 0x73, 0x6d]),
            function_call("set", br#"{"v":1}"#.to_vec(), 30_000_000_000_000, 1),
            transfer(123),
            stake(1_000_000, key),
            add_key(key, full_access_key()),
            delete_key(key),
            delete_account("carol.test"),
        ]
    }

    #[test]
    fn test_discriminants_follow_declaration_order() {
        for (index, action) in all_actions().iter().enumerate() {
            assert_eq!(usize::from(action.discriminant()), index);
            assert_eq!(action.encode().unwrap()[0] as usize, index);
            assert_eq!(Action::VARIANTS[index], action.variant_name());
        }
    }

    #[test]
    fn test_transfer_encoding() {
        let mut expected = vec![3u8];
        expected.extend_from_slice(&123u128.to_le_bytes());
        assert_eq!(transfer(123).encode().unwrap(), expected);
    }

    #[test]
    fn test_create_account_is_single_byte() {
        assert_eq!(create_account().encode().unwrap(), vec![0]);
    }

    #[test]
    fn test_delete_account_encoding() {
        assert_eq!(
            delete_account("ab").encode().unwrap(),
            vec![7, 2, 0, 0, 0, b'a', b'b']
        );
    }

    #[test]
    fn test_every_action_roundtrips() {
        for action in all_actions() {
            let bytes = action.encode().unwrap();
            assert_eq!(Action::decode(&bytes).unwrap(), action);
        }
    }

    #[test]
    fn test_add_function_call_key_roundtrips() {
        let action = add_key(
            PublicKey::ed25519([8u8; 32]),
            function_call_access_key("app.test", vec!["ping".to_string()], Some(10)),
        );
        let bytes = action.encode().unwrap();
        assert_eq!(bytes[0], 5);
        assert_eq!(Action::decode(&bytes).unwrap(), action);
    }

    #[test]
    fn test_discriminant_out_of_range() {
        for value in [8u8, 9, 0xFF] {
            assert_eq!(
                Action::decode(&[value]),
                Err(SchemaError::InvalidDiscriminant {
                    type_name: "Action",
                    value,
                    variants: 8
                })
            );
        }
    }

    #[test]
    fn test_json_is_externally_tagged() {
        let json = serde_json::to_value(transfer(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "Transfer": { "deposit": 5 } }));
    }
}
