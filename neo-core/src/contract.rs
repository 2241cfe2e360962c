//! Verification contracts: single-signature and m-of-n multisig.

use crate::error::{CoreError, CoreResult};
use crate::script::{syscalls, OpCode, ScriptBuilder, CHECK_SIG_PRICE};
use neo_crypto::ECPoint;
use neo_primitives::UInt160;

/// Largest key set a multisig redeem script may list.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// Number of signatures needed from `n` nodes while tolerating `(n - 1) / 3` faulty ones.
///
/// ```rust
/// assert_eq!(neo_core::bft_threshold(7), 5);
/// assert_eq!(neo_core::bft_threshold(1), 1);
/// ```
pub fn bft_threshold(n: usize) -> usize {
    n - n.saturating_sub(1) / 3
}

/// A verification script together with its script hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub script: Vec<u8>,
    /// Number of signatures the script consumes.
    pub parameter_count: usize,
    script_hash: UInt160,
}

impl Contract {
    fn new(script: Vec<u8>, parameter_count: usize) -> Self {
        let script_hash = UInt160::from_script(&script);
        Self {
            script,
            parameter_count,
            script_hash,
        }
    }

    pub fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    pub fn create_signature_contract(public_key: &ECPoint) -> Self {
        Self::new(Self::create_signature_redeem_script(public_key), 1)
    }

    pub fn create_signature_redeem_script(public_key: &ECPoint) -> Vec<u8> {
        let mut builder = ScriptBuilder::new();
        builder.emit_push(public_key.as_bytes());
        builder.emit_syscall(syscalls::SYSTEM_CRYPTO_CHECK_SIG);
        builder.to_array()
    }

    pub fn create_multi_sig_contract(m: usize, public_keys: &[ECPoint]) -> CoreResult<Self> {
        Ok(Self::new(
            Self::create_multi_sig_redeem_script(m, public_keys)?,
            m,
        ))
    }

    /// `PUSH m, PUSHDATA key.. (sorted), PUSH n, SYSCALL CheckMultisig`.
    pub fn create_multi_sig_redeem_script(m: usize, public_keys: &[ECPoint]) -> CoreResult<Vec<u8>> {
        let n = public_keys.len();
        if m == 0 || m > n || n > MAX_MULTISIG_KEYS {
            return Err(CoreError::InvalidArgument(format!(
                "invalid multisig parameters m={m} n={n}"
            )));
        }
        let mut keys = public_keys.to_vec();
        keys.sort();

        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(m as i64);
        for key in &keys {
            builder.emit_push(key.as_bytes());
        }
        builder.emit_push_int(n as i64);
        builder.emit_syscall(syscalls::SYSTEM_CRYPTO_CHECK_MULTISIG);
        Ok(builder.to_array())
    }
}

fn push_int_price(value: i64) -> i64 {
    let mut builder = ScriptBuilder::new();
    builder.emit_push_int(value);
    builder
        .as_bytes()
        .first()
        .and_then(|op| OpCode::from_u8(*op))
        .map_or(0, OpCode::price)
}

/// Execution cost (before the exec fee factor) of verifying a single signature contract.
pub fn signature_contract_cost() -> i64 {
    OpCode::PUSHDATA1.price() * 2 + OpCode::SYSCALL.price() + CHECK_SIG_PRICE
}

/// Execution cost (before the exec fee factor) of verifying an m-of-n multisig contract.
pub fn multi_signature_contract_cost(m: usize, n: usize) -> i64 {
    let mut fee = OpCode::PUSHDATA1.price() * (m + n) as i64;
    fee += push_int_price(m as i64);
    fee += push_int_price(n as i64);
    fee += OpCode::SYSCALL.price();
    fee += CHECK_SIG_PRICE * n as i64;
    fee
}
