use crate::io::{get_var_size_bytes, BinaryWriter, Serializable};
use crate::native::OracleContract;
use crate::script::{CallFlags, ScriptBuilder};
use neo_primitives::OracleResponseCode;

/// Largest result an oracle response may carry.
pub const MAX_RESULT_SIZE: usize = u16::MAX as usize;

/// The response to an oracle request, carried as a transaction attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OracleResponse {
    /// Id of the request being answered.
    pub id: u64,
    pub code: OracleResponseCode,
    /// Filtered payload; empty unless `code` is `Success`.
    pub result: Vec<u8>,
}

impl OracleResponse {
    pub fn new(id: u64, code: OracleResponseCode, result: Vec<u8>) -> Self {
        Self { id, code, result }
    }

    /// The script every response transaction runs: `OracleContract.finish()`.
    pub fn fixed_script() -> Vec<u8> {
        let mut builder = ScriptBuilder::new();
        builder.emit_dynamic_call(&OracleContract::HASH, "finish", CallFlags::ALL);
        builder.to_array()
    }
}

impl Serializable for OracleResponse {
    fn size(&self) -> usize {
        8 + 1 + get_var_size_bytes(&self.result)
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u64(self.id);
        writer.write_u8(self.code.to_byte());
        writer.write_var_bytes(&self.result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_script_calls_finish() {
        let script = OracleResponse::fixed_script();
        assert_eq!(
            hex::encode(&script),
            "c21f0c0666696e6973680c14588717117e0aa81072afab71d2dd89fe7c4b92fe41627d5b52"
        );
        assert_eq!(script.len(), 37);
    }

    #[test]
    fn size_counts_var_prefix() {
        let response = OracleResponse::new(1, OracleResponseCode::Success, vec![0]);
        assert_eq!(response.size(), 11);
        assert_eq!(response.to_array().len(), 11);
    }
}
