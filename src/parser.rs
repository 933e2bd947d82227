//! Precedence-driven recursive-descent parser.
//!
//! There is no grammar table and no separate lexer pass. At each level the input
//! is split into *top-level* tokens: single connectives at parenthesis depth 0,
//! the plain text between them, and whole parenthesized groups, which stay opaque
//! until the recursive call that parses them. The loosest-binding connective among
//! those tokens becomes the root; the text on either side is parsed recursively.
//!
//! Precedence, loosest first: `↔`, `→`, `∧`, `⋁`, `¬`. Operators that share a level
//! (`↔`/`→` and `∧`/`⋁`) do not associate: `p∧q∧r` is rejected and must be written
//! `(p∧q)∧r`.
//!
//! ```
//! use tableau_rs::parser::Parser;
//!
//! let parser = Parser::default();
//! let f = parser.parse("~(p ^ q) > r").unwrap();
//! assert_eq!(f.prettify(), "(¬(p∧q)→r)");
//! ```

use log::debug;

use crate::error::ParseError;
use crate::formula::{BinaryOp, Formula};
use crate::normalize::{
    is_operator, is_special, normalize, precedence_level, split_outer_parens, FALSE, LEFT_PAREN, NOT, OPERATORS,
    RIGHT_PAREN, TRUE,
};

/// Parser settings.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum recursion depth before the input is rejected (default: 256).
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    /// A connective at depth 0.
    Operator(char),
    /// Plain text or a complete parenthesized group.
    Text(String),
}

impl Token {
    fn push_to(&self, out: &mut String) {
        match self {
            Token::Operator(c) => out.push(*c),
            Token::Text(s) => out.push_str(s),
        }
    }
}

fn join(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.push_to(&mut out);
    }
    out
}

/// Split `input` into top-level tokens.
///
/// Positions in errors are character offsets into `input`.
fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth: i64 = 0;

    for (i, c) in input.chars().enumerate() {
        match c {
            LEFT_PAREN => {
                if depth == 0 && !current.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut current)));
                }
                depth += 1;
                current.push(c);
            }
            RIGHT_PAREN => {
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::UnbalancedParen { position: Some(i) });
                }
                current.push(c);
                if depth == 0 {
                    tokens.push(Token::Text(std::mem::take(&mut current)));
                }
            }
            c if depth == 0 && is_operator(c) => {
                if !current.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut current)));
                }
                tokens.push(Token::Operator(c));
            }
            c => current.push(c),
        }
    }

    if depth != 0 {
        return Err(ParseError::UnbalancedParen { position: None });
    }
    if !current.is_empty() {
        tokens.push(Token::Text(current));
    }

    Ok(tokens)
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `text`, accepting both shorthand (`~ > <> ^ V`) and canonical connectives.
    pub fn parse(&self, text: &str) -> Result<Formula, ParseError> {
        debug!("parse({:?})", text);
        self.parse_at(text, 0)
    }

    fn parse_at(&self, text: &str, depth: usize) -> Result<Formula, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        let input = normalize(text, true);
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // Atoms may not be parenthesized, so remember whether a layer was removed.
        let (input, had_parens) = split_outer_parens(&input);

        if input.chars().all(is_special) {
            return Err(ParseError::OperatorOnly);
        }

        if !input.chars().any(is_special) {
            if had_parens {
                return Err(ParseError::ParenthesizedAtom);
            }
            return Ok(if input == TRUE {
                Formula::Literal(true)
            } else if input == FALSE {
                Formula::Literal(false)
            } else {
                Formula::Variable(input)
            });
        }

        let tokens = tokenize(&input)?;

        for op in OPERATORS {
            let Some(position) = tokens.iter().position(|t| *t == Token::Operator(op)) else {
                continue;
            };
            debug!("parse: main connective {} at token {} of {:?}", op, position, input);

            if op == NOT {
                if position > 0 {
                    return Err(ParseError::NegationSyntax);
                }
                let operand = self.parse_at(&join(&tokens[1..]), depth + 1)?;
                return Ok(Formula::not(operand));
            }

            let level = precedence_level(op);
            let same_level = tokens
                .iter()
                .filter(|t| matches!(t, Token::Operator(c) if precedence_level(*c) == level))
                .count();
            if same_level > 1 {
                return Err(ParseError::AmbiguousOperator { operator: op });
            }

            let Some(kind) = BinaryOp::from_symbol(op) else {
                break;
            };
            let left = self.parse_at(&join(&tokens[..position]), depth + 1)?;
            let right = self.parse_at(&join(&tokens[position + 1..]), depth + 1)?;
            return Ok(Formula::binary(kind, left, right));
        }

        Err(ParseError::UnrecognizedForm)
    }
}

/// Parse with the default configuration.
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    Parser::default().parse(text)
}
