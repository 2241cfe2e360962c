//! The subset of NeoVM opcodes emitted by verification and oracle scripts.

/// NeoVM opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    PUSHINT8 = 0x00,
    PUSHINT16 = 0x01,
    PUSHINT32 = 0x02,
    PUSHINT64 = 0x03,
    PUSHINT128 = 0x04,
    PUSHINT256 = 0x05,
    PUSHT = 0x08,
    PUSHF = 0x09,
    PUSHNULL = 0x0B,
    PUSHDATA1 = 0x0C,
    PUSHDATA2 = 0x0D,
    PUSHDATA4 = 0x0E,
    PUSHM1 = 0x0F,
    PUSH0 = 0x10,
    PUSH1 = 0x11,
    PUSH2 = 0x12,
    PUSH3 = 0x13,
    PUSH4 = 0x14,
    PUSH5 = 0x15,
    PUSH6 = 0x16,
    PUSH7 = 0x17,
    PUSH8 = 0x18,
    PUSH9 = 0x19,
    PUSH10 = 0x1A,
    PUSH11 = 0x1B,
    PUSH12 = 0x1C,
    PUSH13 = 0x1D,
    PUSH14 = 0x1E,
    PUSH15 = 0x1F,
    PUSH16 = 0x20,
    NOP = 0x21,
    RET = 0x40,
    SYSCALL = 0x41,
    NEWARRAY0 = 0xC2,
}

impl OpCode {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        const PUSH_SMALL: [OpCode; 17] = [
            OpCode::PUSH0,
            OpCode::PUSH1,
            OpCode::PUSH2,
            OpCode::PUSH3,
            OpCode::PUSH4,
            OpCode::PUSH5,
            OpCode::PUSH6,
            OpCode::PUSH7,
            OpCode::PUSH8,
            OpCode::PUSH9,
            OpCode::PUSH10,
            OpCode::PUSH11,
            OpCode::PUSH12,
            OpCode::PUSH13,
            OpCode::PUSH14,
            OpCode::PUSH15,
            OpCode::PUSH16,
        ];
        match value {
            0x00 => Some(Self::PUSHINT8),
            0x01 => Some(Self::PUSHINT16),
            0x02 => Some(Self::PUSHINT32),
            0x03 => Some(Self::PUSHINT64),
            0x04 => Some(Self::PUSHINT128),
            0x05 => Some(Self::PUSHINT256),
            0x08 => Some(Self::PUSHT),
            0x09 => Some(Self::PUSHF),
            0x0B => Some(Self::PUSHNULL),
            0x0C => Some(Self::PUSHDATA1),
            0x0D => Some(Self::PUSHDATA2),
            0x0E => Some(Self::PUSHDATA4),
            0x0F => Some(Self::PUSHM1),
            0x10..=0x20 => Some(PUSH_SMALL[(value - 0x10) as usize]),
            0x21 => Some(Self::NOP),
            0x40 => Some(Self::RET),
            0x41 => Some(Self::SYSCALL),
            0xC2 => Some(Self::NEWARRAY0),
            _ => None,
        }
    }

    /// Base execution price in datoshi, before the exec fee factor.
    #[must_use]
    pub const fn price(self) -> i64 {
        match self {
            Self::PUSHINT128 | Self::PUSHINT256 => 1 << 2,
            Self::PUSHDATA1 => 1 << 3,
            Self::PUSHDATA2 => 1 << 9,
            Self::PUSHDATA4 => 1 << 12,
            Self::NEWARRAY0 => 1 << 4,
            Self::RET | Self::SYSCALL => 0,
            _ => 1,
        }
    }
}
