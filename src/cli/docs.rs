//! Documentation content for aql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Grouping,
    Suggestions,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" | "conjunctions" => Some(Self::Operators),
            "grouping" | "groups" | "group" => Some(Self::Grouping),
            "suggestions" | "suggest" | "completion" => Some(Self::Suggestions),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"AQL DOCUMENTATION

The API Query Language (AQL) filters API results with clauses of the form
field, operator, value. Clauses are joined with ; (and) or , (or) and can be
grouped with parentheses.

DOCUMENTATION CATEGORIES

  syntax         Clauses, fields and values
  operators      Comparison operators and conjunctions
  grouping       Parenthesised sub-expressions
  suggestions    What the search bar proposes after each token

QUICK REFERENCE

  agent.id=001                   Equality
  rule.level>7;agent.id!=000     And
  (agent.id=001,agent.id=002)    Or, grouped

Run 'aql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Grouping) => Ok(GROUPING_DOC),
        Some(DocCategory::Suggestions) => Ok(SUGGESTIONS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Clauses

CLAUSE
  <field><operator><value>
    Compare a field against a value. No spaces are needed between parts.

    Example:
      agent.id=001

FIELD
  Letters, digits, underscores and dots.

    Examples:
      id
      rule.level
      os.platform

VALUE
  Letters, digits, spaces and - _ . : ? \ / ' " = @ % < > { } [ ].
  A bracketed list may also contain commas.

    Examples:
      001
      Windows 10
      [a,b]

IMPLICIT QUERY
  A search bar may be configured with a fixed prefix that is added before
  the typed input when the query runs.

    Example:
      Implicit query: id!=000;
      Input:          rule.level>7
      Runs:           id!=000;rule.level>7
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Comparison and Conjunctions

COMPARISON OPERATORS
  =     Equality
  !=    Not equality
  >     Bigger than
  <     Smaller than
  ~     Like as

  Examples:
    status=active
    rule.level>7
    name~web

CONJUNCTIONS
  ;     And
  ,     Or

  Examples:
    status=active;os.platform=ubuntu
    agent.id=001,agent.id=002
"#;

const GROUPING_DOC: &str = r#"GROUPING - Parenthesised Sub-expressions

  (<clause><conjunction><clause>)

    Example:
      (agent.id=001,agent.id=002);rule.level>7

  Constraints:
    - Groups are tracked as flat ( and ) tokens, not as a tree
    - A group opens before a field and closes after a value
"#;

const SUGGESTIONS_DOC: &str = r#"SUGGESTIONS - What Comes Next

The last token with text decides what is suggested:

  field          Fields extending the text; all operators once it is a known field
  operator       Operators extending the text; values once it is a complete operator
  value          Search, values refining the text, conjunctions, close group
  conjunction    Fields once it is a complete conjunction, open group
  (              Fields
  )              Conjunctions

  Example:
    aql suggest 'rule.level=7' --catalog catalog.json
"#;
