//! Permissive tokenizer for the API Query Language.
//!
//! One clause pattern is applied repeatedly over the input. Every slot of the
//! pattern is optional, so half-typed clauses (`agent.`, `rule.level>`,
//! `(agent.id=001;`) tokenize just like complete ones. A slot that matched no
//! text is still emitted as a [`Token`] with no value, keeping its position in
//! the grammar visible to later stages.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::ast::{Token, TokenKind, Tokens};

/// ASCII word characters; letters outside ASCII never start or extend a token.
const WORD_CHARS: &str = "A-Za-z0-9_";
/// Characters allowed in a plain value.
const VALUE_CHARS: &str = r#"\[\]A-Za-z0-9_ \-.:?\\/'"=@%<>{}"#;
/// Characters allowed inside a bracketed list value; same as plain plus `,`.
const LIST_CHARS: &str = r#"\[\]A-Za-z0-9_ \-.,:?\\/'"=@%<>{}"#;

/// Capture slots in match order, paired with the token kind each one yields.
pub(crate) const SLOTS: [(&str, TokenKind); 6] = [
    ("operator_group_open", TokenKind::OperatorGroup),
    ("field", TokenKind::Field),
    ("operator_compare", TokenKind::OperatorCompare),
    ("value", TokenKind::Value),
    ("operator_group_close", TokenKind::OperatorGroup),
    ("conjunction", TokenKind::Conjunction),
];

/// Build the clause pattern with every slot optional.
///
/// With `named` the slots are named after [`SLOTS`]; otherwise they are plain
/// positional groups 1 through 6 in the same order.
pub(crate) fn clause_pattern(named: bool) -> String {
    let list = format!(r"\[[{LIST_CHARS}]*\]");
    let paren = format!(r"\((?:{list}|[{VALUE_CHARS}]*)\)");
    let value = format!(r"(?:(?:{paren})*(?:{list}|[{VALUE_CHARS}]+)(?:{paren})*)+");

    let slots = [
        r"\(".to_string(),
        format!("[{WORD_CHARS}.]+"),
        r"[=!<>~]{1,2}".to_string(),
        value,
        r"\)".to_string(),
        r"[;,]".to_string(),
    ];

    SLOTS
        .iter()
        .zip(slots)
        .map(|((name, _), body)| {
            if named {
                format!("(?P<{name}>{body})?")
            } else {
                format!("({body})?")
            }
        })
        .collect()
}

static CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&clause_pattern(true)).expect("clause pattern compiles"));

pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    /// Tokenize the whole input.
    ///
    /// Never fails: text that fits no slot is dropped and missing slots come
    /// back as empty tokens. Matches that consume nothing are skipped, so an
    /// empty input yields an empty sequence.
    pub fn tokenize(&self) -> Tokens {
        let mut tokens = Tokens::new();

        for caps in CLAUSE.captures_iter(self.input) {
            if caps.get(0).is_none_or(|m| m.is_empty()) {
                continue;
            }
            push_clause(&mut tokens, &caps);
        }

        trace!(
            input = self.input,
            tokens = tokens.len(),
            meaningful = tokens.meaningful().count(),
            "tokenized input"
        );
        tokens
    }
}

fn push_clause(tokens: &mut Tokens, caps: &Captures<'_>) {
    for (name, kind) in SLOTS {
        let token = match caps.name(name) {
            Some(m) => Token::new(kind, m.as_str()),
            None => Token::empty(kind),
        };
        tokens.push(token);
    }
}

/// Shorthand for `Lexer::new(input).tokenize()`.
pub fn tokenize(input: &str) -> Tokens {
    Lexer::new(input).tokenize()
}

#[test]
fn test_clause_slots_in_order() {
    let tokens = tokenize("(agent.id=001)");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::OperatorGroup,
            TokenKind::Field,
            TokenKind::OperatorCompare,
            TokenKind::Value,
            TokenKind::OperatorGroup,
            TokenKind::Conjunction,
        ]
    );
    assert_eq!(tokens.as_slice()[5], Token::empty(TokenKind::Conjunction));
}

#[test]
fn test_positional_pattern_compiles() {
    let re = Regex::new(&clause_pattern(false)).unwrap();
    assert_eq!(re.captures_len(), 7);
}
