//! Native contract identities and the records the oracle service reads from them.

use neo_primitives::{UInt160, UInt256};
use serde::{Deserialize, Serialize};

/// The native Oracle contract.
pub struct OracleContract;

impl OracleContract {
    pub const ID: i32 = -9;

    /// `0xfe924b7cfe89ddd271abaf7210a80a7e11178758`
    pub const HASH: UInt160 = UInt160::from_array([
        0x58, 0x87, 0x17, 0x11, 0x7e, 0x0a, 0xa8, 0x10, 0x72, 0xaf, 0xab, 0x71, 0xd2, 0xdd, 0x89,
        0xfe, 0x7c, 0x4b, 0x92, 0xfe,
    ]);
}

/// Defaults of the native Policy contract.
pub struct PolicyContract;

impl PolicyContract {
    pub const DEFAULT_FEE_PER_BYTE: i64 = 1000;
    pub const DEFAULT_EXEC_FEE_FACTOR: i64 = 30;
    pub const DEFAULT_MAX_VALID_UNTIL_BLOCK_INCREMENT: u32 = 5760;
}

/// Roles assigned through the RoleManagement contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    StateValidator = 4,
    Oracle = 8,
    NeoFSAlphabetNode = 16,
    P2PNotary = 32,
}

/// An outstanding oracle request as stored by the Oracle contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Transaction that created the request.
    pub original_tx_id: UInt256,
    /// GAS (in datoshi) reserved to pay for the response transaction.
    pub gas_for_response: i64,
    pub url: String,
    /// JSONPath applied to the fetched payload.
    pub filter: Option<String>,
    pub callback_contract: UInt160,
    pub callback_method: String,
    pub user_data: Vec<u8>,
}
