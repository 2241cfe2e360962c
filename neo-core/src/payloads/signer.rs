use crate::io::{BinaryWriter, Serializable};
use neo_primitives::{UInt160, WitnessScope, UINT160_SIZE};

/// An account whose witness is required by a transaction.
///
/// Only scopes without trailing rule lists are modelled; oracle responses
/// always sign with `WitnessScope::NONE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signer {
    pub account: UInt160,
    pub scopes: WitnessScope,
}

impl Signer {
    pub fn new(account: UInt160, scopes: WitnessScope) -> Self {
        Self { account, scopes }
    }
}

impl Serializable for Signer {
    fn size(&self) -> usize {
        UINT160_SIZE + 1
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.account.as_bytes());
        writer.write_u8(self.scopes.bits());
    }
}
