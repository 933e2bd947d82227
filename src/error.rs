//! Error types for parsing, evaluation and tableau construction.
//!
//! Every parse failure aborts the whole parse: no partial tree is ever returned.
//! Callers are expected to keep their last valid formula and surface the message.

use std::fmt::{Display, Formatter};

/// A syntax error produced by [`Parser`][crate::parser::Parser].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// The input (or a sub-formula between two operators) is empty.
    EmptyInput,
    /// The input contains only connectives and parentheses, no atoms.
    OperatorOnly,
    /// A bare literal or variable was wrapped in parentheses, e.g. `(p)`.
    ParenthesizedAtom,
    /// Extra `)` at the given character position, or a missing `)` when `position` is `None`.
    UnbalancedParen { position: Option<usize> },
    /// A negation appears somewhere other than the first top-level position.
    NegationSyntax,
    /// Two or more operators of the same precedence level at the top level.
    AmbiguousOperator { operator: char },
    /// No main connective could be found among the top-level tokens.
    UnrecognizedForm,
    /// The formula nests deeper than the configured limit.
    DepthLimitExceeded { limit: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "formula must contain one or more characters"),
            ParseError::OperatorOnly => write!(f, "formula contains only operators"),
            ParseError::ParenthesizedAtom => write!(f, "variables and literals cannot be parenthesized"),
            ParseError::UnbalancedParen { position: Some(pos) } => write!(f, "extra ')' at position {}", pos),
            ParseError::UnbalancedParen { position: None } => write!(f, "missing closing parenthesis"),
            ParseError::NegationSyntax => write!(f, "negation must precede its operand"),
            ParseError::AmbiguousOperator { operator } => write!(f, "ambiguous operator: {}", operator),
            ParseError::UnrecognizedForm => write!(f, "operator not found or doubled parentheses"),
            ParseError::DepthLimitExceeded { limit } => write!(f, "formula nests deeper than {} levels", limit),
        }
    }
}

impl std::error::Error for ParseError {}

/// A variable was evaluated with no matching entry in the environment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LookupError {
    pub name: String,
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown variable '{}'", self.name)
    }
}

impl std::error::Error for LookupError {}

/// The tableau builder was handed a formula outside negation-normal form.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TableauError {
    Unsupported { formula: String },
}

impl Display for TableauError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TableauError::Unsupported { formula } => {
                write!(f, "cannot build a tableau for '{}': not in negation-normal form", formula)
            }
        }
    }
}

impl std::error::Error for TableauError {}
