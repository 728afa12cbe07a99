//! Module with the token specifier types and their methods.
//!
//! A [TokenSpec] describes which tokens may occur at one position of a pattern. It maps
//! attributes to predicates, all of which must hold for a token, and carries a [Quantifier]
//! that determines how many consecutive tokens the specifier consumes.
//!
//! Specifiers can be built in code or parsed from JSON values in the usual dictionary notation:
//! ```rust
//! use tokmatch::{Attr, Quantifier, TokenSpec};
//!
//! let spec = TokenSpec::from_json(&serde_json::json!({"LOWER": "hello", "OP": "+"})).unwrap();
//! assert_eq!(spec, TokenSpec::new().with(Attr::Lower, "hello").op(Quantifier::OneOrMore));
//! ```
use serde_json::Value as JsonValue;

use crate::{FlagId, MatcherError, MatcherErrorKind, Result};

macro_rules! invalid_pattern {
    ($($arg:tt)*) => {
        MatcherError::new(MatcherErrorKind::InvalidPattern(format!($($arg)*)))
    };
}

/// The value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    /// The attribute yields a string.
    Str,
    /// The attribute yields an integer.
    Int,
    /// The attribute yields a boolean.
    Bool,
}

/// A token attribute that can be queried by a token specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    /// The verbatim text.
    Orth,
    /// The lowercase text.
    Lower,
    /// The uppercase text.
    Upper,
    /// The orthographic shape, e.g. `Xxxx` or `dd`.
    Shape,
    /// The first character.
    Prefix,
    /// The last three characters.
    Suffix,
    /// The number of characters.
    Length,
    /// Alphabetic characters only.
    IsAlpha,
    /// ASCII characters only.
    IsAscii,
    /// Digits only.
    IsDigit,
    /// Lowercase text.
    IsLower,
    /// Uppercase text.
    IsUpper,
    /// Titlecased text.
    IsTitle,
    /// Punctuation characters only.
    IsPunct,
    /// Whitespace only.
    IsSpace,
    /// A bracket.
    IsBracket,
    /// A quotation mark.
    IsQuote,
    /// Resembles a number.
    LikeNum,
    /// Resembles a URL.
    LikeUrl,
    /// Resembles an email address.
    LikeEmail,
    /// The fine-grained tag assigned by the pipeline.
    Tag,
    /// The part-of-speech assigned by the pipeline.
    Pos,
    /// The lemma assigned by the pipeline.
    Lemma,
    /// The dependency label assigned by the pipeline.
    Dep,
    /// The entity type assigned by the pipeline.
    EntType,
    /// A flag registered with [crate::Matcher::add_flag].
    Flag(FlagId),
}

impl Attr {
    /// Resolve an attribute by its name. Names are case-insensitive.
    pub fn from_name(name: &str) -> Result<Attr> {
        let upper = name.to_uppercase();
        let attr = match upper.as_str() {
            "ORTH" | "TEXT" => Attr::Orth,
            "LOWER" => Attr::Lower,
            "UPPER" => Attr::Upper,
            "SHAPE" => Attr::Shape,
            "PREFIX" => Attr::Prefix,
            "SUFFIX" => Attr::Suffix,
            "LENGTH" => Attr::Length,
            "IS_ALPHA" => Attr::IsAlpha,
            "IS_ASCII" => Attr::IsAscii,
            "IS_DIGIT" => Attr::IsDigit,
            "IS_LOWER" => Attr::IsLower,
            "IS_UPPER" => Attr::IsUpper,
            "IS_TITLE" => Attr::IsTitle,
            "IS_PUNCT" => Attr::IsPunct,
            "IS_SPACE" => Attr::IsSpace,
            "IS_BRACKET" => Attr::IsBracket,
            "IS_QUOTE" => Attr::IsQuote,
            "LIKE_NUM" => Attr::LikeNum,
            "LIKE_URL" => Attr::LikeUrl,
            "LIKE_EMAIL" => Attr::LikeEmail,
            "TAG" => Attr::Tag,
            "POS" => Attr::Pos,
            "LEMMA" => Attr::Lemma,
            "DEP" => Attr::Dep,
            "ENT_TYPE" => Attr::EntType,
            _ => match upper
                .strip_prefix("FLAG")
                .filter(|n| is_flag_number(n))
                .map(str::parse::<u32>)
            {
                Some(Ok(n)) => Attr::Flag(FlagId::new(n)),
                _ => {
                    return Err(MatcherError::new(MatcherErrorKind::UnknownAttribute(
                        name.to_string(),
                    )))
                }
            },
        };
        Ok(attr)
    }

    /// The value type the attribute yields.
    pub fn kind(&self) -> AttrKind {
        match self {
            Attr::Orth
            | Attr::Lower
            | Attr::Upper
            | Attr::Shape
            | Attr::Prefix
            | Attr::Suffix
            | Attr::Tag
            | Attr::Pos
            | Attr::Lemma
            | Attr::Dep
            | Attr::EntType => AttrKind::Str,
            Attr::Length => AttrKind::Int,
            _ => AttrKind::Bool,
        }
    }
}

/// The number in `FLAG<n>`: ASCII digits without leading zeros.
fn is_flag_number(n: &str) -> bool {
    !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) && (n == "0" || !n.starts_with('0'))
}

impl std::fmt::Display for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Attr::Orth => "ORTH",
            Attr::Lower => "LOWER",
            Attr::Upper => "UPPER",
            Attr::Shape => "SHAPE",
            Attr::Prefix => "PREFIX",
            Attr::Suffix => "SUFFIX",
            Attr::Length => "LENGTH",
            Attr::IsAlpha => "IS_ALPHA",
            Attr::IsAscii => "IS_ASCII",
            Attr::IsDigit => "IS_DIGIT",
            Attr::IsLower => "IS_LOWER",
            Attr::IsUpper => "IS_UPPER",
            Attr::IsTitle => "IS_TITLE",
            Attr::IsPunct => "IS_PUNCT",
            Attr::IsSpace => "IS_SPACE",
            Attr::IsBracket => "IS_BRACKET",
            Attr::IsQuote => "IS_QUOTE",
            Attr::LikeNum => "LIKE_NUM",
            Attr::LikeUrl => "LIKE_URL",
            Attr::LikeEmail => "LIKE_EMAIL",
            Attr::Tag => "TAG",
            Attr::Pos => "POS",
            Attr::Lemma => "LEMMA",
            Attr::Dep => "DEP",
            Attr::EntType => "ENT_TYPE",
            Attr::Flag(id) => return write!(f, "{}", id),
        };
        write!(f, "{}", name)
    }
}

/// A value an attribute is compared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// The kind of the value.
    pub fn kind(&self) -> AttrKind {
        match self {
            Value::Str(_) => AttrKind::Str,
            Value::Int(_) => AttrKind::Int,
            Value::Bool(_) => AttrKind::Bool,
        }
    }

    fn from_json(value: &JsonValue) -> Result<Value> {
        match value {
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .ok_or_else(|| invalid_pattern!("Only integer numbers are supported: {}", n)),
            _ => Err(invalid_pattern!("Unsupported value {}", value)),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// A numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl CmpOp {
    fn from_symbol(symbol: &str) -> Option<CmpOp> {
        match symbol {
            "==" => Some(CmpOp::Eq),
            "!=" => Some(CmpOp::Ne),
            ">=" => Some(CmpOp::Ge),
            "<=" => Some(CmpOp::Le),
            ">" => Some(CmpOp::Gt),
            "<" => Some(CmpOp::Lt),
            _ => None,
        }
    }

    /// Apply the operator to `lhs` and `rhs`.
    #[inline]
    pub fn apply(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Lt => lhs < rhs,
        }
    }
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
        };
        write!(f, "{}", symbol)
    }
}

/// A condition on a single attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// The attribute equals the value.
    Eq(Value),
    /// The attribute equals one of the values.
    In(Vec<Value>),
    /// The attribute equals none of the values.
    NotIn(Vec<Value>),
    /// The string attribute matches the regular expression.
    Regex(String),
    /// The integer attribute compares successfully with the value.
    Cmp(CmpOp, i64),
}

impl Predicate {
    fn from_json(value: &JsonValue) -> Result<Predicate> {
        let JsonValue::Object(map) = value else {
            return Ok(Predicate::Eq(Value::from_json(value)?));
        };
        if map.len() != 1 {
            return Err(invalid_pattern!(
                "A predicate object needs exactly one operator: {}",
                value
            ));
        }
        let (op, operand) = map.iter().next().ok_or_else(|| invalid_pattern!("{}", value))?;
        let list = |operand: &JsonValue| -> Result<Vec<Value>> {
            operand
                .as_array()
                .ok_or_else(|| invalid_pattern!("Operator '{}' expects a list", op))?
                .iter()
                .map(Value::from_json)
                .collect()
        };
        match op.to_uppercase().as_str() {
            "IN" => Ok(Predicate::In(list(operand)?)),
            "NOT_IN" => Ok(Predicate::NotIn(list(operand)?)),
            "REGEX" => operand
                .as_str()
                .map(|s| Predicate::Regex(s.to_string()))
                .ok_or_else(|| invalid_pattern!("Operator 'REGEX' expects a string")),
            symbol => {
                let cmp = CmpOp::from_symbol(symbol)
                    .ok_or_else(|| invalid_pattern!("Unknown predicate operator '{}'", op))?;
                operand
                    .as_i64()
                    .map(|n| Predicate::Cmp(cmp, n))
                    .ok_or_else(|| invalid_pattern!("Operator '{}' expects an integer", op))
            }
        }
    }

    /// Check that the predicate can be applied to an attribute of the given kind.
    pub(crate) fn check_kind(&self, attr: Attr) -> Result<()> {
        let kind = attr.kind();
        let ok = match self {
            Predicate::Eq(v) => v.kind() == kind,
            Predicate::In(vs) | Predicate::NotIn(vs) => vs.iter().all(|v| v.kind() == kind),
            Predicate::Regex(_) => kind == AttrKind::Str,
            Predicate::Cmp(..) => kind == AttrKind::Int,
        };
        if ok {
            Ok(())
        } else {
            Err(invalid_pattern!(
                "Predicate {} does not apply to attribute {} of kind {:?}",
                self,
                attr,
                kind
            ))
        }
    }
}

impl From<Value> for Predicate {
    fn from(value: Value) -> Self {
        Predicate::Eq(value)
    }
}

macro_rules! impl_eq_predicate {
    ($($tp:ty),*) => {
        $(
            impl From<$tp> for Predicate {
                fn from(value: $tp) -> Self {
                    Predicate::Eq(value.into())
                }
            }
        )*
    };
}

impl_eq_predicate!(&str, String, i64, bool);

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |vs: &[Value]| {
            vs.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Predicate::Eq(v) => write!(f, "== {}", v),
            Predicate::In(vs) => write!(f, "IN [{}]", join(vs)),
            Predicate::NotIn(vs) => write!(f, "NOT_IN [{}]", join(vs)),
            Predicate::Regex(rx) => write!(f, "REGEX {:?}", rx),
            Predicate::Cmp(op, n) => write!(f, "{} {}", op, n),
        }
    }
}

/// How many consecutive tokens a specifier consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Exactly one token that satisfies the specifier.
    #[default]
    One,
    /// Exactly one token that does not satisfy the specifier (`!`).
    Zero,
    /// Zero or more tokens (`*`).
    ZeroOrMore,
    /// One or more tokens (`+`).
    OneOrMore,
    /// Zero or one token (`?`).
    ZeroOrOne,
}

impl Quantifier {
    /// Parse a quantifier from its operator symbol.
    pub fn from_symbol(symbol: &str) -> Result<Quantifier> {
        match symbol {
            "1" => Ok(Quantifier::One),
            "!" => Ok(Quantifier::Zero),
            "*" => Ok(Quantifier::ZeroOrMore),
            "+" => Ok(Quantifier::OneOrMore),
            "?" => Ok(Quantifier::ZeroOrOne),
            _ => Err(invalid_pattern!("Unknown quantifier '{}'", symbol)),
        }
    }
}

impl std::fmt::Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Quantifier::One => "1",
            Quantifier::Zero => "!",
            Quantifier::ZeroOrMore => "*",
            Quantifier::OneOrMore => "+",
            Quantifier::ZeroOrOne => "?",
        };
        write!(f, "{}", symbol)
    }
}

/// The specification of one pattern position.
///
/// A specifier without any attribute conditions matches every token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenSpec {
    conditions: Vec<(Attr, Predicate)>,
    quantifier: Quantifier,
}

impl TokenSpec {
    /// Create a specifier that matches any single token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on an attribute.
    pub fn with<P: Into<Predicate>>(mut self, attr: Attr, predicate: P) -> Self {
        self.conditions.push((attr, predicate.into()));
        self
    }

    /// Set the quantifier.
    pub fn op(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    /// A specifier requiring the verbatim text.
    pub fn orth(text: &str) -> Self {
        Self::new().with(Attr::Orth, text)
    }

    /// A specifier requiring the lowercase text.
    pub fn lower(text: &str) -> Self {
        Self::new().with(Attr::Lower, text)
    }

    /// A specifier requiring the given value of the punctuation flag.
    pub fn is_punct(value: bool) -> Self {
        Self::new().with(Attr::IsPunct, value)
    }

    /// A specifier requiring the given value of a registered flag.
    pub fn flag(flag: FlagId, value: bool) -> Self {
        Self::new().with(Attr::Flag(flag), value)
    }

    /// The attribute conditions.
    #[inline]
    pub fn conditions(&self) -> &[(Attr, Predicate)] {
        &self.conditions
    }

    /// The quantifier.
    #[inline]
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Parse a specifier from its JSON object notation.
    ///
    /// The key `OP` holds the quantifier, all other keys are attribute names.
    pub fn from_json(value: &JsonValue) -> Result<TokenSpec> {
        let JsonValue::Object(map) = value else {
            return Err(invalid_pattern!(
                "A token specifier must be an object: {}",
                value
            ));
        };
        let mut spec = TokenSpec::new();
        for (key, value) in map {
            if key.eq_ignore_ascii_case("OP") {
                let symbol = value
                    .as_str()
                    .ok_or_else(|| invalid_pattern!("Quantifier must be a string: {}", value))?;
                spec.quantifier = Quantifier::from_symbol(symbol)?;
            } else {
                let attr = Attr::from_name(key)?;
                spec.conditions.push((attr, Predicate::from_json(value)?));
            }
        }
        Ok(spec)
    }

    /// Parse a whole pattern, i.e. a JSON array of specifier objects.
    pub fn pattern_from_json(value: &JsonValue) -> Result<Vec<TokenSpec>> {
        value
            .as_array()
            .ok_or_else(|| invalid_pattern!("A pattern must be an array: {}", value))?
            .iter()
            .map(TokenSpec::from_json)
            .collect()
    }

    /// Check that every predicate fits the kind of its attribute and that every referenced flag
    /// is one of the first `flag_count` registered flags.
    pub(crate) fn validate(&self, flag_count: usize) -> Result<()> {
        for (attr, predicate) in &self.conditions {
            if let Attr::Flag(id) = attr {
                if id.as_usize() >= flag_count {
                    return Err(MatcherError::new(MatcherErrorKind::UnknownAttribute(
                        id.to_string(),
                    )));
                }
            }
            predicate.check_kind(*attr)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for TokenSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (attr, predicate)) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", attr, predicate)?;
        }
        write!(f, "}}")?;
        if self.quantifier != Quantifier::One {
            write!(f, "{}", self.quantifier)?;
        }
        Ok(())
    }
}
