/// Permissions granted to a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CallFlags(u8);

impl CallFlags {
    pub const NONE: Self = Self(0b0000_0000);
    pub const READ_STATES: Self = Self(0b0000_0001);
    pub const WRITE_STATES: Self = Self(0b0000_0010);
    pub const ALLOW_CALL: Self = Self(0b0000_0100);
    pub const ALLOW_NOTIFY: Self = Self(0b0000_1000);
    pub const STATES: Self = Self(Self::READ_STATES.0 | Self::WRITE_STATES.0);
    pub const READ_ONLY: Self = Self(Self::READ_STATES.0 | Self::ALLOW_CALL.0);
    pub const ALL: Self = Self(Self::STATES.0 | Self::ALLOW_CALL.0 | Self::ALLOW_NOTIFY.0);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}
