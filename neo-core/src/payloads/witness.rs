use crate::io::{get_var_size_bytes, BinaryWriter, Serializable};
use neo_primitives::UInt160;

/// Invocation and verification scripts proving a signer's authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Witness {
    /// A witness with both scripts empty (verified natively by a deployed contract).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new_with_scripts(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script)
    }
}

impl Serializable for Witness {
    fn size(&self) -> usize {
        get_var_size_bytes(&self.invocation_script) + get_var_size_bytes(&self.verification_script)
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
    }
}
