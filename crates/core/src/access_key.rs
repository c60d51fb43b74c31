//! Access keys and their permissions.

use nearlite_codec::{record, tagged_union};
use serde::{Deserialize, Serialize};

record! {
    /// Permission to call a restricted set of methods on one contract.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FunctionCallPermission {
        /// Remaining amount the key may spend on fees, `None` for unlimited.
        pub allowance: Option<u128>,
        pub receiver_id: String,
        /// Callable methods; empty means any method of `receiver_id`.
        pub method_names: Vec<String>,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FullAccessPermission {}
}

tagged_union! {
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub enum AccessKeyPermission {
        FunctionCall(FunctionCallPermission) = 0,
        FullAccess(FullAccessPermission) = 1,
    }
}

record! {
    /// An access key attached to an account.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccessKey {
        pub nonce: u64,
        pub permission: AccessKeyPermission,
    }
}

impl AccessKey {
    /// Whether the key may sign any action.
    pub fn is_full_access(&self) -> bool {
        matches!(self.permission, AccessKeyPermission::FullAccess(_))
    }
}

/// A fresh key with full access to the account.
pub fn full_access_key() -> AccessKey {
    AccessKey {
        nonce: 0,
        permission: AccessKeyPermission::FullAccess(FullAccessPermission {}),
    }
}

/// A fresh key limited to calling `method_names` on `receiver_id`.
pub fn function_call_access_key(
    receiver_id: impl Into<String>,
    method_names: Vec<String>,
    allowance: Option<u128>,
) -> AccessKey {
    AccessKey {
        nonce: 0,
        permission: AccessKeyPermission::FunctionCall(FunctionCallPermission {
            allowance,
            receiver_id: receiver_id.into(),
            method_names,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearlite_codec::{Decode, Encode, SchemaError};

    #[test]
    fn test_full_access_key_encoding() {
        let key = full_access_key();
        assert!(key.is_full_access());
        // nonce, then discriminant 1 with an empty payload
        assert_eq!(key.encode().unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_function_call_key_encoding() {
        let key = function_call_access_key("c", vec!["m".to_string()], None);
        assert!(!key.is_full_access());
        assert_eq!(
            key.encode().unwrap(),
            vec![
                0, 0, 0, 0, 0, 0, 0, 0, // nonce
                0, // FunctionCall
                0, // no allowance
                1, 0, 0, 0, b'c', // receiver_id
                1, 0, 0, 0, 1, 0, 0, 0, b'm', // method_names
            ]
        );
    }

    #[test]
    fn test_function_call_key_roundtrip() {
        let key = function_call_access_key(
            "app.test",
            vec!["get".to_string(), "set".to_string()],
            Some(250_000_000_000_000_000_000_000),
        );
        let bytes = key.encode().unwrap();
        assert_eq!(AccessKey::decode(&bytes).unwrap(), key);
    }

    #[test]
    fn test_permission_discriminant_out_of_range() {
        let err = AccessKeyPermission::decode(&[2]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidDiscriminant {
                type_name: "AccessKeyPermission",
                value: 2,
                variants: 2
            }
        );
    }
}
