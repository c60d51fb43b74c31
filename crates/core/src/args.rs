//! Actions built from loosely typed argument lists.
//!
//! Operators describe actions as JSON arrays whose first element names the
//! builder, e.g. `["transfer", "1000"]` or
//! `["add_key", "ed25519:...", ["function_call", "app.test", ["get"]]]`.
//! The argument count is checked against the builder's arity before any
//! value is looked at, so a missing argument is never silently defaulted.

use crate::access_key::{full_access_key, function_call_access_key, AccessKey};
use crate::action::{self, Action};
use crate::crypto::PublicKey;
use serde_json::Value;
use thiserror::Error;

fn describe_arity(min: &usize, max: &usize) -> String {
    if min == max {
        format!("{}", min)
    } else {
        format!("{} to {}", min, max)
    }
}

/// A builder was called with the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{builder}` takes {} argument(s), got {got}", describe_arity(.min, .max))]
pub struct ArityError {
    pub builder: &'static str,
    pub min: usize,
    pub max: usize,
    pub got: usize,
}

/// Errors from turning argument lists into actions.
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error(transparent)]
    Arity(#[from] ArityError),

    #[error("`{builder}` argument {position}: {reason}")]
    Invalid {
        builder: &'static str,
        position: usize,
        reason: String,
    },

    #[error("unknown builder `{0}`")]
    UnknownBuilder(String),

    #[error("malformed argument list: {0}")]
    Malformed(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arguments of one builder call, already checked against its arity.
struct Args<'a> {
    builder: &'static str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    fn new(
        builder: &'static str,
        values: &'a [Value],
        min: usize,
        max: usize,
    ) -> Result<Self, ArityError> {
        if values.len() < min || values.len() > max {
            return Err(ArityError {
                builder,
                min,
                max,
                got: values.len(),
            });
        }
        Ok(Self { builder, values })
    }

    fn exact(builder: &'static str, values: &'a [Value], n: usize) -> Result<Self, ArityError> {
        Self::new(builder, values, n, n)
    }

    fn invalid(&self, position: usize, reason: impl Into<String>) -> ArgsError {
        ArgsError::Invalid {
            builder: self.builder,
            position,
            reason: reason.into(),
        }
    }

    fn value(&self, position: usize) -> &'a Value {
        // positions are always within the arity checked in `new`
        &self.values[position]
    }

    fn string(&self, position: usize) -> Result<String, ArgsError> {
        self.value(position)
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(position, "expected a string"))
    }

    fn amount(&self, position: usize) -> Result<u128, ArgsError> {
        match self.value(position) {
            Value::String(s) => s
                .parse()
                .map_err(|_| self.invalid(position, format!("`{}` is not a u128 amount", s))),
            Value::Number(n) => n
                .as_u64()
                .map(u128::from)
                .ok_or_else(|| self.invalid(position, "amount must be a non-negative integer")),
            _ => Err(self.invalid(position, "expected an amount")),
        }
    }

    fn optional_amount(&self, position: usize) -> Result<Option<u128>, ArgsError> {
        match self.values.get(position) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.amount(position).map(Some),
        }
    }

    fn gas(&self, position: usize) -> Result<u64, ArgsError> {
        let amount = self.amount(position)?;
        u64::try_from(amount).map_err(|_| self.invalid(position, "gas does not fit in u64"))
    }

    fn public_key(&self, position: usize) -> Result<PublicKey, ArgsError> {
        self.string(position)?
            .parse()
            .map_err(|e| self.invalid(position, format!("{}", e)))
    }

    fn hex_bytes(&self, position: usize) -> Result<Vec<u8>, ArgsError> {
        let s = self.string(position)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s))
            .map_err(|e| self.invalid(position, format!("invalid hex: {}", e)))
    }

    /// Call arguments: strings are taken verbatim, anything else is
    /// serialized as JSON.
    fn call_args(&self, position: usize) -> Result<Vec<u8>, ArgsError> {
        match self.value(position) {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Ok(serde_json::to_vec(other)?),
        }
    }

    fn strings(&self, position: usize) -> Result<Vec<String>, ArgsError> {
        let items = self
            .value(position)
            .as_array()
            .ok_or_else(|| self.invalid(position, "expected an array of strings"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(position, "expected an array of strings"))
            })
            .collect()
    }

    fn list(&self, position: usize) -> Result<&'a [Value], ArgsError> {
        self.value(position)
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid(position, "expected a nested argument list"))
    }
}

fn split_head(list: &[Value]) -> Result<(&str, &[Value]), ArgsError> {
    let (head, rest) = list
        .split_first()
        .ok_or_else(|| ArgsError::Malformed("empty argument list".to_string()))?;
    let name = head
        .as_str()
        .ok_or_else(|| ArgsError::Malformed("builder name must be a string".to_string()))?;
    Ok((name, rest))
}

/// Build an action from `[name, args...]`.
pub fn action_from_args(list: &[Value]) -> Result<Action, ArgsError> {
    let (name, values) = split_head(list)?;
    match name {
        "create_account" => {
            Args::exact("create_account", values, 0)?;
            Ok(action::create_account())
        }
        "deploy_contract" => {
            let args = Args::exact("deploy_contract", values, 1)?;
            Ok(action::deploy_contract(args.hex_bytes(0)?))
        }
        "function_call" => {
            let args = Args::exact("function_call", values, 4)?;
            Ok(action::function_call(
                args.string(0)?,
                args.call_args(1)?,
                args.gas(2)?,
                args.amount(3)?,
            ))
        }
        "transfer" => {
            let args = Args::exact("transfer", values, 1)?;
            Ok(action::transfer(args.amount(0)?))
        }
        "stake" => {
            let args = Args::exact("stake", values, 2)?;
            Ok(action::stake(args.amount(0)?, args.public_key(1)?))
        }
        "add_key" => {
            let args = Args::exact("add_key", values, 2)?;
            let access_key = access_key_from_args(args.list(1)?)?;
            Ok(action::add_key(args.public_key(0)?, access_key))
        }
        "delete_key" => {
            let args = Args::exact("delete_key", values, 1)?;
            Ok(action::delete_key(args.public_key(0)?))
        }
        "delete_account" => {
            let args = Args::exact("delete_account", values, 1)?;
            Ok(action::delete_account(args.string(0)?))
        }
        other => Err(ArgsError::UnknownBuilder(other.to_string())),
    }
}

/// Build an access key from `["full_access"]` or
/// `["function_call", receiver_id, [method_names...], allowance?]`.
pub fn access_key_from_args(list: &[Value]) -> Result<AccessKey, ArgsError> {
    let (name, values) = split_head(list)?;
    match name {
        "full_access" => {
            Args::exact("full_access_key", values, 0)?;
            Ok(full_access_key())
        }
        "function_call" => {
            let args = Args::new("function_call_access_key", values, 2, 3)?;
            Ok(function_call_access_key(
                args.string(0)?,
                args.strings(1)?,
                args.optional_amount(2)?,
            ))
        }
        other => Err(ArgsError::UnknownBuilder(other.to_string())),
    }
}

/// Parse a JSON array of argument lists into actions.
pub fn actions_from_json(json: &str) -> Result<Vec<Action>, ArgsError> {
    let value: Value = serde_json::from_str(json)?;
    let lists = value
        .as_array()
        .ok_or_else(|| ArgsError::Malformed("expected an array of actions".to_string()))?;
    lists
        .iter()
        .map(|list| {
            let list = list.as_array().ok_or_else(|| {
                ArgsError::Malformed("each action must be an argument list".to_string())
            })?;
            action_from_args(list)
        })
        .collect()
}
