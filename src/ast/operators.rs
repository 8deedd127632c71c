//! Literal tables of the grammar. These are fixed for the life of the process.

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    /// Equality (`=`)
    Equality,
    /// Not equality (`!=`)
    NotEquality,
    /// Bigger than (`>`)
    Bigger,
    /// Smaller than (`<`)
    Smaller,
    /// Like as (`~`)
    Like,
}

impl CompareOperator {
    pub const ALL: [CompareOperator; 5] = [
        CompareOperator::Equality,
        CompareOperator::NotEquality,
        CompareOperator::Bigger,
        CompareOperator::Smaller,
        CompareOperator::Like,
    ];

    pub fn literal(&self) -> &'static str {
        match self {
            CompareOperator::Equality => "=",
            CompareOperator::NotEquality => "!=",
            CompareOperator::Bigger => ">",
            CompareOperator::Smaller => "<",
            CompareOperator::Like => "~",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CompareOperator::Equality => "equality",
            CompareOperator::NotEquality => "not equality",
            CompareOperator::Bigger => "bigger",
            CompareOperator::Smaller => "smaller",
            CompareOperator::Like => "like as",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.literal() == s)
    }
}

/// Clause separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conjunction {
    /// And (`;`)
    And,
    /// Or (`,`)
    Or,
}

impl Conjunction {
    pub const ALL: [Conjunction; 2] = [Conjunction::And, Conjunction::Or];

    pub fn literal(&self) -> &'static str {
        match self {
            Conjunction::And => ";",
            Conjunction::Or => ",",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.literal() == s)
    }
}

/// Group delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupOperator {
    /// Open group (`(`)
    Open,
    /// Close group (`)`)
    Close,
}

impl GroupOperator {
    pub const ALL: [GroupOperator; 2] = [GroupOperator::Open, GroupOperator::Close];

    pub fn literal(&self) -> &'static str {
        match self {
            GroupOperator::Open => "(",
            GroupOperator::Close => ")",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GroupOperator::Open => "open group",
            GroupOperator::Close => "close group",
        }
    }

    pub fn from_literal(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.literal() == s)
    }
}
