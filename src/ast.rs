//! # API Query Language - Token Model
//!
//! This module defines the shared vocabulary of the API Query Language (AQL):
//! the lexical kinds a fragment of input can occupy, the ordered token
//! sequence produced by one tokenizer pass, and the fixed literal tables of
//! the grammar.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Token kinds, tokens and token sequences
//! - **[operators]** - Literal tables for comparison operators, conjunctions and groups
//!
//! ## Quick Start
//!
//! ```text
//! (agent.id=001,agent.id=002);rule.level>7
//! ```
//!
//! Clauses are `field operator value` units joined by `;` (and) or `,` (or),
//! optionally wrapped in parentheses.
//!
//! ## Grammar
//!
//! ```text
//! query  ::= clause+
//! clause ::= "("? field operator value ")"? conjunction?
//! ```
//!
//! The tokenizer treats every element of a clause as optional so that any
//! prefix of a well-formed query can be tokenized while the user is typing.
//! Grouping is tracked as flat `(` / `)` tokens, never as a tree.

pub mod operators;
pub mod tokens;

pub use operators::{CompareOperator, Conjunction, GroupOperator};
pub use tokens::{Token, TokenKind, Tokens};
