use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

/// The grammar slot a token occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Field name (word and dot characters)
    ///
    /// # Examples
    /// ```text
    /// agent.id
    /// rule.level
    /// ```
    Field,

    /// Comparison operator, one or two characters
    ///
    /// # Examples
    /// ```text
    /// =
    /// !=
    /// ~
    /// ```
    OperatorCompare,

    /// Value compared against the field
    ///
    /// # Examples
    /// ```text
    /// 001
    /// [a,b]
    /// ```
    Value,

    /// Clause separator (`;` and, `,` or)
    Conjunction,

    /// Group delimiter (`(` or `)`)
    OperatorGroup,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Field => "field",
            TokenKind::OperatorCompare => "operator_compare",
            TokenKind::Value => "value",
            TokenKind::Conjunction => "conjunction",
            TokenKind::OperatorGroup => "operator_group",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexical fragment of the input.
///
/// A token whose slot matched nothing keeps its kind with `value: None`, so
/// later stages still know which grammar position it stood for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: Some(value.into()),
        }
    }

    /// A token for a grammar slot that matched no text.
    pub fn empty(kind: TokenKind) -> Self {
        Token { kind, value: None }
    }

    /// The matched text, or `None` when the slot matched nothing.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn has_value(&self) -> bool {
        self.value().is_some()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }
}

/// Ordered tokens from a single tokenizer pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tokens(Vec<Token>);

impl Tokens {
    pub fn new() -> Self {
        Tokens(Vec::new())
    }

    pub fn push(&mut self, token: Token) {
        self.0.push(token);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    /// Tokens that carry text, in input order.
    pub fn meaningful(&self) -> impl Iterator<Item = &Token> {
        self.0.iter().filter(|t| t.has_value())
    }

    /// The last token carrying a non-empty value.
    pub fn last_with_value(&self) -> Option<&Token> {
        self.0.iter().rev().find(|t| t.has_value())
    }

    pub fn last_with_value_mut(&mut self) -> Option<&mut Token> {
        self.0.iter_mut().rev().find(|t| t.has_value())
    }

    /// Value of the last non-empty token of the given kind.
    pub fn last_value_of(&self, kind: TokenKind) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .filter(|t| t.kind == kind)
            .find_map(Token::value)
    }

    /// Serialize back to input text, skipping tokens without value.
    pub fn to_input(&self) -> String {
        self.meaningful().filter_map(Token::value).collect()
    }
}

impl From<Vec<Token>> for Tokens {
    fn from(tokens: Vec<Token>) -> Self {
        Tokens(tokens)
    }
}

impl FromIterator<Token> for Tokens {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Tokens(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Tokens {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Tokens {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[test]
fn test_last_with_value_skips_empty_slots() {
    let tokens = Tokens::from(vec![
        Token::new(TokenKind::Field, "agent.id"),
        Token::new(TokenKind::OperatorCompare, "="),
        Token::empty(TokenKind::Value),
        Token::new(TokenKind::OperatorGroup, ""),
    ]);
    let last = tokens.last_with_value().unwrap();
    assert_eq!(last.kind, TokenKind::OperatorCompare);
    assert_eq!(tokens.last_value_of(TokenKind::Field), Some("agent.id"));
    assert_eq!(tokens.last_value_of(TokenKind::Value), None);
}

#[test]
fn test_to_input_concatenates_values() {
    let tokens = Tokens::from(vec![
        Token::empty(TokenKind::OperatorGroup),
        Token::new(TokenKind::Field, "rule.level"),
        Token::new(TokenKind::OperatorCompare, ">"),
        Token::new(TokenKind::Value, "7"),
        Token::empty(TokenKind::OperatorGroup),
        Token::new(TokenKind::Conjunction, ";"),
    ]);
    assert_eq!(tokens.to_input(), "rule.level>7;");
}
