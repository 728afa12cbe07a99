use log::trace;

use crate::{Result, Token, TokenSpec};

use super::{ids::TestIDBase, FlagRegistry, TestID, TokenTest};

/// TokenTestRegistry is a registry of token tests.
/// Specifiers with identical conditions share one test, regardless of their quantifiers.
#[derive(Debug, Clone, Default)]
pub(crate) struct TokenTestRegistry {
    token_tests: Vec<TokenTest>,
}

impl TokenTestRegistry {
    /// Adds a token test to the registry if it is not already present and returns its ID.
    pub(crate) fn add_token_test(&mut self, spec: &TokenSpec) -> Result<TestID> {
        if let Some(id) = self
            .token_tests
            .iter()
            .position(|t| t.conditions == spec.conditions())
        {
            Ok(TestID::new(id as TestIDBase))
        } else {
            let id = TestID::new(self.token_tests.len() as TestIDBase);
            let token_test = TokenTest::try_new(id, spec)?;
            trace!("Registered token test {}: {}", token_test.id(), token_test);
            self.token_tests.push(token_test);
            Ok(id)
        }
    }

    /// Returns the token test with the given ID.
    #[cfg_attr(not(feature = "dot_writer"), allow(dead_code))]
    pub(crate) fn get_token_test(&self, id: TestID) -> Option<&TokenTest> {
        self.token_tests.get(id.as_usize())
    }

    /// Evaluates the token test with the given ID on the token.
    #[inline]
    pub(crate) fn matches(&self, id: TestID, token: &Token, flags: &FlagRegistry) -> bool {
        self.token_tests[id].matches(token, flags)
    }

    /// Returns the number of token tests in the registry.
    pub(crate) fn len(&self) -> usize {
        self.token_tests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quantifier;

    #[test]
    fn test_deduplication() {
        let mut registry = TokenTestRegistry::default();
        let a = registry.add_token_test(&TokenSpec::lower("a")).unwrap();
        let b = registry.add_token_test(&TokenSpec::lower("b")).unwrap();
        let a2 = registry
            .add_token_test(&TokenSpec::lower("a").op(Quantifier::OneOrMore))
            .unwrap();
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get_token_test(b).map(|t| t.id()), Some(b));
    }
}
