use std::sync::Arc;

use crate::FlagId;

/// A flag predicate over the text of a token.
pub(crate) type FlagFn = Arc<dyn Fn(&str) -> bool + 'static + Send + Sync>;

/// FlagRegistry is a registry of dynamically registered flags.
/// The handle of a flag is its index in the registry.
#[derive(Clone, Default)]
pub(crate) struct FlagRegistry {
    flags: Vec<FlagFn>,
}

impl FlagRegistry {
    /// Adds a flag predicate and returns its handle.
    pub(crate) fn add_flag(&mut self, flag: FlagFn) -> FlagId {
        let id = FlagId::new(self.flags.len() as u32);
        self.flags.push(flag);
        id
    }

    /// Evaluates the flag on the given text.
    /// Unknown handles never hold; patterns referencing them are rejected at registration.
    #[inline]
    pub(crate) fn check(&self, id: FlagId, text: &str) -> bool {
        self.flags.get(id.as_usize()).is_some_and(|f| f(text))
    }

    /// Returns the number of registered flags.
    pub(crate) fn len(&self) -> usize {
        self.flags.len()
    }
}

impl std::fmt::Debug for FlagRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FlagRegistry {{ flags: {} }}", self.flags.len())
    }
}
