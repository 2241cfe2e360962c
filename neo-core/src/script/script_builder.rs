use super::{CallFlags, OpCode};
use neo_crypto::Crypto;
use neo_primitives::UInt160;

/// Incrementally assembles a NeoVM script.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    #[inline]
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    #[inline]
    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    #[inline]
    pub fn emit_instruction(&mut self, opcode: OpCode, operand: &[u8]) -> &mut Self {
        self.emit_opcode(opcode);
        self.script.extend_from_slice(operand);
        self
    }

    /// Pushes raw data with the smallest `PUSHDATA` prefix that fits.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= 0xFF {
            self.emit_instruction(OpCode::PUSHDATA1, &[len as u8]);
        } else if len <= 0xFFFF {
            self.emit_instruction(OpCode::PUSHDATA2, &(len as u16).to_le_bytes());
        } else {
            self.emit_instruction(OpCode::PUSHDATA4, &(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);
        self
    }

    /// Pushes an integer using `PUSHM1`/`PUSH0..PUSH16` or the narrowest `PUSHINT*`.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        if value == -1 {
            return self.emit_opcode(OpCode::PUSHM1);
        }
        if (0..=16).contains(&value) {
            self.script.push(OpCode::PUSH0 as u8 + value as u8);
            return self;
        }
        if let Ok(v) = i8::try_from(value) {
            self.emit_instruction(OpCode::PUSHINT8, &v.to_le_bytes())
        } else if let Ok(v) = i16::try_from(value) {
            self.emit_instruction(OpCode::PUSHINT16, &v.to_le_bytes())
        } else if let Ok(v) = i32::try_from(value) {
            self.emit_instruction(OpCode::PUSHINT32, &v.to_le_bytes())
        } else {
            self.emit_instruction(OpCode::PUSHINT64, &value.to_le_bytes())
        }
    }

    #[inline]
    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push(value.as_bytes())
    }

    /// Emits `SYSCALL` with the interop hash of `name` (first four bytes of its SHA-256).
    pub fn emit_syscall(&mut self, name: &str) -> &mut Self {
        let hash = Crypto::sha256(name.as_bytes());
        self.emit_instruction(OpCode::SYSCALL, &hash[..4])
    }

    /// Emits a parameterless `System.Contract.Call` to `script_hash.method`.
    pub fn emit_dynamic_call(
        &mut self,
        script_hash: &UInt160,
        method: &str,
        flags: CallFlags,
    ) -> &mut Self {
        self.emit_opcode(OpCode::NEWARRAY0);
        self.emit_push_int(i64::from(flags.bits()));
        self.emit_push_string(method);
        self.emit_push(script_hash.as_bytes());
        self.emit_syscall(super::syscalls::SYSTEM_CONTRACT_CALL)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.script
    }

    #[inline]
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_int_uses_compact_forms() {
        let mut sb = ScriptBuilder::new();
        sb.emit_push_int(-1).emit_push_int(0).emit_push_int(16);
        assert_eq!(sb.as_bytes(), &[0x0F, 0x10, 0x20]);

        let mut sb = ScriptBuilder::new();
        sb.emit_push_int(21);
        assert_eq!(sb.as_bytes(), &[0x00, 21]);

        let mut sb = ScriptBuilder::new();
        sb.emit_push_int(1024);
        assert_eq!(sb.as_bytes(), &[0x01, 0x00, 0x04]);
    }

    #[test]
    fn push_data_prefixes() {
        let mut sb = ScriptBuilder::new();
        sb.emit_push(&[1, 2, 3]);
        assert_eq!(sb.as_bytes(), &[0x0C, 3, 1, 2, 3]);

        let mut sb = ScriptBuilder::new();
        sb.emit_push(&vec![0u8; 256]);
        assert_eq!(&sb.as_bytes()[..3], &[0x0D, 0x00, 0x01]);
        assert_eq!(sb.len(), 259);
    }

    #[test]
    fn syscall_hashes_match_known_values() {
        let mut sb = ScriptBuilder::new();
        sb.emit_syscall("System.Crypto.CheckSig");
        assert_eq!(sb.as_bytes(), &[0x41, 0x56, 0xe7, 0xb3, 0x27]);

        let mut sb = ScriptBuilder::new();
        sb.emit_syscall("System.Contract.Call");
        assert_eq!(sb.as_bytes(), &[0x41, 0x62, 0x7d, 0x5b, 0x52]);
    }
}
