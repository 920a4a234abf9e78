//! Signature hash flags.

use std::fmt;

use crate::TransactionError;

/// Sign all inputs and all outputs (the default).
pub const SIGHASH_ALL: u32 = 0x01;

/// Sign all inputs but no outputs.
pub const SIGHASH_NONE: u32 = 0x02;

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIGHASH_SINGLE: u32 = 0x03;

/// Fork-id marker OR'ed into the flag word on fork-id chains.
pub const SIGHASH_FORKID: u32 = 0x40;

/// Only sign the current input, allowing other inputs to be added later.
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

/// Mask applied to extract the base sighash type (ALL, NONE, SINGLE).
pub const SIGHASH_MASK: u32 = 0x1f;

/// Which outputs a signature commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseMode {
    All,
    None,
    Single,
}

/// A base mode plus the independent ANYONECANPAY modifier.
///
/// The fork-id bit is not part of the flags: the digest engine adds it
/// for chains that require it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SighashFlags {
    pub base: BaseMode,
    pub anyone_can_pay: bool,
}

impl SighashFlags {
    pub const ALL: SighashFlags = SighashFlags::new(BaseMode::All, false);
    pub const NONE: SighashFlags = SighashFlags::new(BaseMode::None, false);
    pub const SINGLE: SighashFlags = SighashFlags::new(BaseMode::Single, false);

    pub const fn new(base: BaseMode, anyone_can_pay: bool) -> Self {
        SighashFlags {
            base,
            anyone_can_pay,
        }
    }

    /// The same base mode with ANYONECANPAY set.
    pub const fn with_anyone_can_pay(self) -> Self {
        SighashFlags::new(self.base, true)
    }

    /// Parse a raw sighash value.
    ///
    /// The fork-id bit is accepted and dropped. Any other bit outside the
    /// base mask and ANYONECANPAY, or a base mode other than ALL, NONE or
    /// SINGLE, is rejected.
    pub fn from_raw(raw: u32) -> Result<Self, TransactionError> {
        if raw & !(SIGHASH_MASK | SIGHASH_FORKID | SIGHASH_ANYONECANPAY) != 0 {
            return Err(TransactionError::InvalidSighashType(raw));
        }
        let base = match raw & SIGHASH_MASK {
            SIGHASH_ALL => BaseMode::All,
            SIGHASH_NONE => BaseMode::None,
            SIGHASH_SINGLE => BaseMode::Single,
            _ => return Err(TransactionError::InvalidSighashType(raw)),
        };
        Ok(SighashFlags::new(base, raw & SIGHASH_ANYONECANPAY != 0))
    }

    /// The flag word without the fork-id bit.
    pub fn to_u32(self) -> u32 {
        let base = match self.base {
            BaseMode::All => SIGHASH_ALL,
            BaseMode::None => SIGHASH_NONE,
            BaseMode::Single => SIGHASH_SINGLE,
        };
        if self.anyone_can_pay {
            base | SIGHASH_ANYONECANPAY
        } else {
            base
        }
    }

    /// The flag word with the fork-id bit set.
    pub fn with_fork_id(self) -> u32 {
        self.to_u32() | SIGHASH_FORKID
    }
}

impl Default for SighashFlags {
    fn default() -> Self {
        SighashFlags::ALL
    }
}

impl TryFrom<u32> for SighashFlags {
    type Error = TransactionError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        SighashFlags::from_raw(raw)
    }
}

impl fmt::Display for SighashFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            BaseMode::All => "ALL",
            BaseMode::None => "NONE",
            BaseMode::Single => "SINGLE",
        };
        if self.anyone_can_pay {
            write!(f, "{}|ANYONECANPAY", base)
        } else {
            f.write_str(base)
        }
    }
}
