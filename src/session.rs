//! Engine state behind an interactive formula editor.
//!
//! A [`Session`] owns the variable environment and the last formula that
//! parsed successfully. A failed parse leaves both untouched, so the display
//! can keep showing the previous state next to the error message.

use log::debug;

use crate::error::{LookupError, ParseError, TableauError};
use crate::formula::{EvalNode, Formula};
use crate::parser::{Parser, ParserConfig};
use crate::symbols::SymbolTable;
use crate::tableau::Tableau;

/// Status line facts about the current formula.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Summary {
    pub main_connective: Option<char>,
    pub nodes: usize,
    pub binary_operators: usize,
}

#[derive(Debug, Default)]
pub struct Session {
    parser: Parser,
    symbols: SymbolTable,
    formula: Option<Formula>,
}

impl Session {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            parser: Parser::new(config),
            symbols: SymbolTable::new(),
            formula: None,
        }
    }

    pub fn formula(&self) -> Option<&Formula> {
        self.formula.as_ref()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// See [`SymbolTable::set`] for the accepted names.
    pub fn set_variable(&mut self, name: &str, value: bool) {
        self.symbols.set(name, value);
    }

    /// React to new editor text.
    ///
    /// Empty text resets the session, including every variable assignment.
    /// On a parse error the previous formula is kept.
    pub fn update(&mut self, text: &str) -> Result<Option<&Formula>, ParseError> {
        if text.is_empty() {
            debug!("update: empty input, resetting");
            self.formula = None;
            self.symbols.clear();
            return Ok(None);
        }

        let formula = self.parser.parse(text)?;
        self.symbols.register_formula(&formula);
        self.formula = Some(formula);
        Ok(self.formula.as_ref())
    }

    /// Truth value of the current formula, `None` when there is none.
    pub fn evaluate(&self) -> Result<Option<bool>, LookupError> {
        self.formula.as_ref().map(|f| f.evaluate(&self.symbols)).transpose()
    }

    pub fn evaluate_tree(&self) -> Result<Option<EvalNode>, LookupError> {
        self.formula.as_ref().map(|f| f.evaluate_tree(&self.symbols)).transpose()
    }

    /// Tableau of the current formula, after rewriting it to negation-normal form.
    pub fn tableau(&self) -> Result<Option<Tableau>, TableauError> {
        self.formula.as_ref().map(|f| Tableau::generate(&f.to_nnf())).transpose()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.formula.as_ref().map(|f| Summary {
            main_connective: f.main_connective(),
            nodes: f.count(|_| true),
            binary_operators: f.count(|n| matches!(n, Formula::Binary(..))),
        })
    }
}
