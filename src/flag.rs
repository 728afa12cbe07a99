use serde::{Deserialize, Serialize};

/// The handle of a flag registered with [crate::Matcher::add_flag].
///
/// Flags are numbered in registration order starting at 0. In the JSON pattern notation a flag
/// is referenced by the attribute name `FLAG<n>`, e.g. `{"FLAG0": true}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct FlagId(u32);

impl FlagId {
    /// Create a flag handle from its number.
    #[inline]
    pub const fn new(index: u32) -> Self {
        FlagId(index)
    }

    /// Get the handle as usize.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Get the number of the flag.
    #[inline]
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FlagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FLAG{}", self.0)
    }
}
