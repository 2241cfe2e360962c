//! VM script construction.

mod call_flags;
mod op_code;
mod script_builder;

pub use call_flags::CallFlags;
pub use op_code::OpCode;
pub use script_builder::ScriptBuilder;

/// Interop service names used by verification and oracle scripts.
pub mod syscalls {
    pub const SYSTEM_CONTRACT_CALL: &str = "System.Contract.Call";
    pub const SYSTEM_CRYPTO_CHECK_SIG: &str = "System.Crypto.CheckSig";
    pub const SYSTEM_CRYPTO_CHECK_MULTISIG: &str = "System.Crypto.CheckMultisig";
}

/// GAS price of one signature check (`1 << 15` datoshi before the exec fee factor).
pub const CHECK_SIG_PRICE: i64 = 1 << 15;
