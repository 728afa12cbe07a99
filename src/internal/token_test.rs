use regex::Regex;

use crate::{Attr, MatcherError, MatcherErrorKind, Predicate, Result, Token, TokenSpec, Value};

use super::{FlagRegistry, TestID};

/// The value of an attribute of a concrete token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrValue<'t> {
    Str(std::borrow::Cow<'t, str>),
    Int(i64),
    Bool(bool),
    Absent,
}

impl AttrValue<'_> {
    fn equals(&self, value: &Value) -> bool {
        match (self, value) {
            (AttrValue::Str(a), Value::Str(b)) => a == b,
            (AttrValue::Int(a), Value::Int(b)) => a == b,
            (AttrValue::Bool(a), Value::Bool(b)) => a == b,
            _ => false,
        }
    }
}

/// The compiled form of a predicate. Regular expressions are compiled once at registration.
#[derive(Debug, Clone)]
enum CompiledPredicate {
    Plain(Predicate),
    Regex(Regex),
}

/// A token test is the compiled form of the attribute conditions of a [TokenSpec].
/// The quantifier is not part of the test, it is reflected in the structure of the automaton.
#[derive(Debug, Clone)]
pub(crate) struct TokenTest {
    pub(crate) id: TestID,
    // The conditions as written, used for deduplication and display
    pub(crate) conditions: Vec<(Attr, Predicate)>,
    compiled: Vec<(Attr, CompiledPredicate)>,
}

impl TokenTest {
    pub(crate) fn try_new(id: TestID, spec: &TokenSpec) -> Result<Self> {
        let compiled = spec
            .conditions()
            .iter()
            .map(|(attr, predicate)| {
                let compiled = match predicate {
                    Predicate::Regex(rx) => CompiledPredicate::Regex(Regex::new(rx).map_err(
                        |e| MatcherError::new(MatcherErrorKind::InvalidRegex(e, rx.clone())),
                    )?),
                    _ => CompiledPredicate::Plain(predicate.clone()),
                };
                Ok((*attr, compiled))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id,
            conditions: spec.conditions().to_vec(),
            compiled,
        })
    }

    #[inline]
    pub(crate) fn id(&self) -> TestID {
        self.id
    }

    /// Returns true if all conditions hold for the token.
    pub(crate) fn matches(&self, token: &Token, flags: &FlagRegistry) -> bool {
        self.compiled.iter().all(|(attr, predicate)| {
            let value = attr_value(*attr, token, flags);
            match predicate {
                CompiledPredicate::Regex(rx) => match &value {
                    AttrValue::Str(s) => rx.is_match(s),
                    _ => false,
                },
                CompiledPredicate::Plain(Predicate::Eq(v)) => value.equals(v),
                CompiledPredicate::Plain(Predicate::In(vs)) => vs.iter().any(|v| value.equals(v)),
                CompiledPredicate::Plain(Predicate::NotIn(vs)) => {
                    !vs.iter().any(|v| value.equals(v))
                }
                CompiledPredicate::Plain(Predicate::Cmp(op, n)) => match value {
                    AttrValue::Int(i) => op.apply(i, *n),
                    _ => false,
                },
                // Regex predicates are always compiled
                CompiledPredicate::Plain(Predicate::Regex(_)) => false,
            }
        })
    }
}

impl std::fmt::Display for TokenTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (attr, predicate)) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", attr, predicate)?;
        }
        write!(f, "}}")
    }
}

fn attr_value<'t>(attr: Attr, token: &'t Token, flags: &FlagRegistry) -> AttrValue<'t> {
    let annotation = |a: Option<&'t str>| match a {
        Some(s) => AttrValue::Str(s.into()),
        None => AttrValue::Absent,
    };
    match attr {
        Attr::Orth => AttrValue::Str(token.text().into()),
        Attr::Lower => AttrValue::Str(token.lower().into()),
        Attr::Upper => AttrValue::Str(token.upper().into()),
        Attr::Shape => AttrValue::Str(token.shape().into()),
        Attr::Prefix => AttrValue::Str(token.prefix().into()),
        Attr::Suffix => AttrValue::Str(token.suffix().into()),
        Attr::Length => AttrValue::Int(token.length() as i64),
        Attr::IsAlpha => AttrValue::Bool(token.is_alpha()),
        Attr::IsAscii => AttrValue::Bool(token.is_ascii()),
        Attr::IsDigit => AttrValue::Bool(token.is_digit()),
        Attr::IsLower => AttrValue::Bool(token.is_lower()),
        Attr::IsUpper => AttrValue::Bool(token.is_upper()),
        Attr::IsTitle => AttrValue::Bool(token.is_title()),
        Attr::IsPunct => AttrValue::Bool(token.is_punct()),
        Attr::IsSpace => AttrValue::Bool(token.is_space()),
        Attr::IsBracket => AttrValue::Bool(token.is_bracket()),
        Attr::IsQuote => AttrValue::Bool(token.is_quote()),
        Attr::LikeNum => AttrValue::Bool(token.like_num()),
        Attr::LikeUrl => AttrValue::Bool(token.like_url()),
        Attr::LikeEmail => AttrValue::Bool(token.like_email()),
        Attr::Tag => annotation(token.tag()),
        Attr::Pos => annotation(token.pos()),
        Attr::Lemma => annotation(token.lemma()),
        Attr::Dep => annotation(token.dep()),
        Attr::EntType => annotation(token.ent_type()),
        Attr::Flag(id) => AttrValue::Bool(flags.check(id, token.text())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::CmpOp;

    fn test_of(spec: TokenSpec) -> TokenTest {
        TokenTest::try_new(TestID::new(0), &spec).unwrap()
    }

    #[test]
    fn test_equality_conditions() {
        let flags = FlagRegistry::default();
        let t = test_of(TokenSpec::lower("hello"));
        assert!(t.matches(&Token::new("Hello", false), &flags));
        assert!(!t.matches(&Token::new("Hallo", false), &flags));

        let t = test_of(TokenSpec::orth("Google"));
        assert!(t.matches(&Token::new("Google", false), &flags));
        assert!(!t.matches(&Token::new("google", false), &flags));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let flags = FlagRegistry::default();
        let t = test_of(
            TokenSpec::new()
                .with(Attr::IsTitle, true)
                .with(Attr::Length, Predicate::Cmp(CmpOp::Gt, 3)),
        );
        assert!(t.matches(&Token::new("Berlin", false), &flags));
        assert!(!t.matches(&Token::new("Rom", false), &flags));
        assert!(!t.matches(&Token::new("berlin", false), &flags));
    }

    #[test]
    fn test_set_and_regex_conditions() {
        let flags = FlagRegistry::default();
        let t = test_of(
            TokenSpec::new().with(Attr::Lower, Predicate::In(vec!["a".into(), "an".into()])),
        );
        assert!(t.matches(&Token::new("An", false), &flags));
        assert!(!t.matches(&Token::new("the", false), &flags));

        let t = test_of(
            TokenSpec::new().with(Attr::Lower, Predicate::NotIn(vec!["a".into(), "an".into()])),
        );
        assert!(t.matches(&Token::new("the", false), &flags));

        let t = test_of(TokenSpec::new().with(Attr::Orth, Predicate::Regex("^[Uu]".into())));
        assert!(t.matches(&Token::new("Unix", false), &flags));
        assert!(!t.matches(&Token::new("Linux", false), &flags));
    }

    #[test]
    fn test_invalid_regex() {
        let spec = TokenSpec::new().with(Attr::Orth, Predicate::Regex("(".into()));
        let err = TokenTest::try_new(TestID::new(0), &spec).unwrap_err();
        assert!(matches!(err.kind(), MatcherErrorKind::InvalidRegex(..)));
    }

    #[test]
    fn test_annotations_and_flags() {
        let mut flags = FlagRegistry::default();
        let id = flags.add_flag(Arc::new(|text: &str| text.ends_with("ing")));
        let t = test_of(TokenSpec::flag(id, true));
        assert!(t.matches(&Token::new("matching", false), &flags));
        assert!(!t.matches(&Token::new("match", false), &flags));

        let t = test_of(TokenSpec::new().with(Attr::Pos, "NOUN"));
        assert!(t.matches(&Token::new("cat", false).with_pos("NOUN"), &flags));
        assert!(!t.matches(&Token::new("cat", false), &flags));
    }

    #[test]
    fn test_wildcard() {
        let flags = FlagRegistry::default();
        let t = test_of(TokenSpec::new());
        assert!(t.matches(&Token::new("anything", false), &flags));
        assert_eq!(t.to_string(), "{}");
    }
}
