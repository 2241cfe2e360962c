//! Signer witness scopes.

use std::fmt;

/// Scope of a transaction signer's witness.
///
/// Oracle response transactions only ever use `NONE`; the remaining flags
/// are kept so signers decode faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WitnessScope(u8);

impl WitnessScope {
    /// The witness is only used for transaction verification.
    pub const NONE: Self = Self(0x00);
    /// The witness is valid for the entry script only.
    pub const CALLED_BY_ENTRY: Self = Self(0x01);
    /// The witness is valid for the listed contracts.
    pub const CUSTOM_CONTRACTS: Self = Self(0x10);
    /// The witness is valid for the listed contract groups.
    pub const CUSTOM_GROUPS: Self = Self(0x20);
    /// The witness is valid when the listed rules match.
    pub const WITNESS_RULES: Self = Self(0x40);
    /// The witness is valid everywhere.
    pub const GLOBAL: Self = Self(0x80);

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Display for WitnessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("None");
        }
        let names = [
            (Self::CALLED_BY_ENTRY, "CalledByEntry"),
            (Self::CUSTOM_CONTRACTS, "CustomContracts"),
            (Self::CUSTOM_GROUPS, "CustomGroups"),
            (Self::WITNESS_RULES, "WitnessRules"),
            (Self::GLOBAL, "Global"),
        ];
        let parts: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&parts.join(", "))
    }
}
