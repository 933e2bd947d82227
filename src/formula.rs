//! Propositional formula AST.
//!
//! A [`Formula`] is a closed sum type: every operation is an exhaustive `match`,
//! so adding a node kind is a compile error everywhere it is not handled.
//!
//! Trees are immutable once built. [`Formula::simplify`] and [`Formula::to_nnf`]
//! return fresh trees and never alias the input.
//!
//! ```
//! use tableau_rs::formula::Formula;
//! use tableau_rs::symbols::SymbolTable;
//!
//! let f = Formula::implies(Formula::var("p"), Formula::var("q"));
//! assert_eq!(f.prettify(), "(p→q)");
//!
//! let mut env = SymbolTable::new();
//! env.set("p", true);
//! env.set("q", false);
//! assert_eq!(f.evaluate(&env), Ok(false));
//! ```

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::LookupError;
use crate::normalize::{AND, BICONDITIONAL, CONDITIONAL, FALSE, NOT, OR, TRUE};
use crate::symbols::SymbolTable;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Conditional,
    Biconditional,
}

impl BinaryOp {
    /// Canonical connective symbol.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::And => AND,
            BinaryOp::Or => OR,
            BinaryOp::Conditional => CONDITIONAL,
            BinaryOp::Biconditional => BICONDITIONAL,
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            AND => Some(BinaryOp::And),
            OR => Some(BinaryOp::Or),
            CONDITIONAL => Some(BinaryOp::Conditional),
            BICONDITIONAL => Some(BinaryOp::Biconditional),
            _ => None,
        }
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinaryOp::And => left && right,
            BinaryOp::Or => left || right,
            BinaryOp::Conditional => !left || right,
            BinaryOp::Biconditional => !(left ^ right),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Formula {
    Literal(bool),
    Variable(String),
    Not(Box<Formula>),
    Binary(BinaryOp, Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn lit(value: bool) -> Self {
        Formula::Literal(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Formula::Variable(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Formula::Not(Box::new(value))
    }

    pub fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        Formula::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Formula::binary(BinaryOp::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Formula::binary(BinaryOp::Conditional, lhs, rhs)
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Formula::binary(BinaryOp::Biconditional, lhs, rhs)
    }
}

impl Formula {
    /// Literal or variable.
    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Literal(_) | Formula::Variable(_))
    }

    pub fn child_count(&self) -> usize {
        match self {
            Formula::Literal(_) | Formula::Variable(_) => 0,
            Formula::Not(_) => 1,
            Formula::Binary(..) => 2,
        }
    }

    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::Literal(_) | Formula::Variable(_) => vec![],
            Formula::Not(a) => vec![a.as_ref()],
            Formula::Binary(_, a, b) => vec![a.as_ref(), b.as_ref()],
        }
    }

    /// Symbol of the root connective, when the root is binary.
    pub fn main_connective(&self) -> Option<char> {
        match self {
            Formula::Binary(op, _, _) => Some(op.symbol()),
            _ => None,
        }
    }

    /// Number of nodes (including this one) satisfying `predicate`.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Formula) -> bool,
    {
        fn go<F: Fn(&Formula) -> bool>(node: &Formula, predicate: &F) -> usize {
            let here = predicate(node) as usize;
            here + node.children().into_iter().map(|c| go(c, predicate)).sum::<usize>()
        }
        go(self, &predicate)
    }

    /// Nesting depth; atoms have depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().into_iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Free variable names, left to right, each listed once.
    pub fn variables(&self) -> Vec<&str> {
        fn go<'a>(node: &'a Formula, acc: &mut Vec<&'a str>) {
            match node {
                Formula::Literal(_) => {}
                Formula::Variable(name) => {
                    if !acc.contains(&name.as_str()) {
                        acc.push(name);
                    }
                }
                Formula::Not(a) => go(a, acc),
                Formula::Binary(_, a, b) => {
                    go(a, acc);
                    go(b, acc);
                }
            }
        }
        let mut acc = Vec::new();
        go(self, &mut acc);
        acc
    }

    /// Only `∧`, `⋁`, and `¬` applied directly to atoms.
    pub fn is_nnf(&self) -> bool {
        match self {
            Formula::Literal(_) | Formula::Variable(_) => true,
            Formula::Not(a) => a.is_atom(),
            Formula::Binary(BinaryOp::And | BinaryOp::Or, a, b) => a.is_nnf() && b.is_nnf(),
            Formula::Binary(..) => false,
        }
    }
}

impl Formula {
    pub fn evaluate(&self, env: &SymbolTable) -> Result<bool, LookupError> {
        match self {
            Formula::Literal(value) => Ok(*value),
            Formula::Variable(name) => env.get(name),
            Formula::Not(a) => Ok(!a.evaluate(env)?),
            Formula::Binary(op, a, b) => Ok(op.apply(a.evaluate(env)?, b.evaluate(env)?)),
        }
    }

    /// Evaluate every subformula, producing a tree of `(text, value)` pairs.
    pub fn evaluate_tree(&self, env: &SymbolTable) -> Result<EvalNode, LookupError> {
        let children = self
            .children()
            .into_iter()
            .map(|c| c.evaluate_tree(env))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EvalNode {
            text: self.prettify(),
            value: self.evaluate(env)?,
            children,
        })
    }

    /// Canonical rendering. Binary nodes are always parenthesized, so a negated
    /// binary reads `¬(p∧q)` while a negated atom reads `¬p`.
    pub fn prettify(&self) -> String {
        match self {
            Formula::Literal(true) => TRUE.to_string(),
            Formula::Literal(false) => FALSE.to_string(),
            Formula::Variable(name) => name.clone(),
            Formula::Not(a) => format!("{}{}", NOT, a.prettify()),
            Formula::Binary(op, a, b) => format!("({}{}{})", a.prettify(), op.symbol(), b.prettify()),
        }
    }

    /// One rewrite step at the root of this formula.
    ///
    /// - `L→R` becomes `¬L⋁R`
    /// - `L↔R` becomes `(L∧R)⋁(¬L∧¬R)`
    /// - `¬¬x` becomes `x`
    /// - `¬x` simplifies `x` once, then pushes the negation through `∧`/`⋁` (De Morgan)
    ///
    /// Everything else is returned as is. Use [`Formula::to_nnf`] to rewrite a whole tree.
    pub fn simplify(&self) -> Formula {
        match self {
            Formula::Binary(BinaryOp::Conditional, a, b) => {
                debug!("simplify: conditional {}", self);
                Formula::or(Formula::not((**a).clone()), (**b).clone())
            }
            Formula::Binary(BinaryOp::Biconditional, a, b) => {
                debug!("simplify: biconditional {}", self);
                Formula::or(
                    Formula::and((**a).clone(), (**b).clone()),
                    Formula::and(Formula::not((**a).clone()), Formula::not((**b).clone())),
                )
            }
            Formula::Not(inner) => match &**inner {
                Formula::Not(x) => {
                    debug!("simplify: double negation {}", self);
                    (**x).clone()
                }
                _ => match inner.simplify() {
                    Formula::Binary(BinaryOp::And, a, b) => {
                        debug!("simplify: de morgan (and) {}", self);
                        Formula::or(Formula::Not(a), Formula::Not(b))
                    }
                    Formula::Binary(BinaryOp::Or, a, b) => {
                        debug!("simplify: de morgan (or) {}", self);
                        Formula::and(Formula::Not(a), Formula::Not(b))
                    }
                    Formula::Not(x) => *x,
                    _ => self.clone(),
                },
            },
            _ => self.clone(),
        }
    }

    /// Negation-normal form: [`Formula::simplify`] applied at every node, root first.
    ///
    /// The biconditional rewrite copies both operands, so a chain of `n` nested
    /// biconditionals grows to roughly `2^n` nodes.
    pub fn to_nnf(&self) -> Formula {
        match self.simplify() {
            Formula::Binary(op @ (BinaryOp::And | BinaryOp::Or), a, b) => Formula::binary(op, a.to_nnf(), b.to_nnf()),
            Formula::Not(a) if a.is_atom() => Formula::Not(a),
            atom @ (Formula::Literal(_) | Formula::Variable(_)) => atom,
            other => other.to_nnf(),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prettify())
    }
}

/// A subformula together with its truth value under some environment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EvalNode {
    pub text: String,
    pub value: bool,
    pub children: Vec<EvalNode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn env(values: &[(&str, bool)]) -> SymbolTable {
        let mut table = SymbolTable::new();
        table.set_values(values.iter().copied());
        table
    }

    #[test]
    fn test_binary_truth_tables() {
        let cases = [(false, false), (false, true), (true, false), (true, true)];
        for (l, r) in cases {
            assert_eq!(BinaryOp::And.apply(l, r), l && r);
            assert_eq!(BinaryOp::Or.apply(l, r), l || r);
            assert_eq!(BinaryOp::Conditional.apply(l, r), !(l && !r));
            assert_eq!(BinaryOp::Biconditional.apply(l, r), l == r);
        }
    }

    #[test]
    fn test_prettify() {
        let f = Formula::not(Formula::and(Formula::var("p"), Formula::lit(true)));
        assert_eq!(f.prettify(), "¬(p∧T)");
        let g = Formula::not(Formula::not(Formula::var("p")));
        assert_eq!(g.prettify(), "¬¬p");
        let h = Formula::iff(Formula::var("a"), Formula::or(Formula::var("b"), Formula::lit(false)));
        assert_eq!(h.to_string(), "(a↔(b⋁F))");
    }

    #[test]
    fn test_evaluate_missing_variable() {
        let f = Formula::and(Formula::var("p"), Formula::var("q"));
        let table = env(&[("p", true)]);
        assert_eq!(f.evaluate(&table), Err(LookupError { name: "q".to_string() }));
    }

    #[test]
    fn test_variables_first_seen_order() {
        let f = Formula::or(
            Formula::and(Formula::var("q"), Formula::var("p")),
            Formula::not(Formula::var("q")),
        );
        assert_eq!(f.variables(), vec!["q", "p"]);
    }

    #[test]
    fn test_counts() {
        let f = Formula::implies(Formula::not(Formula::var("p")), Formula::and(Formula::var("q"), Formula::var("r")));
        assert_eq!(f.count(|_| true), 6);
        assert_eq!(f.count(|n| matches!(n, Formula::Binary(..))), 2);
        assert_eq!(f.main_connective(), Some(CONDITIONAL));
        assert_eq!(Formula::var("p").main_connective(), None);
        assert_eq!(f.depth(), 3);
    }

    #[test]
    fn test_simplify_conditional() {
        let f = Formula::implies(Formula::var("p"), Formula::var("q"));
        assert_eq!(f.simplify(), Formula::or(Formula::not(Formula::var("p")), Formula::var("q")));
    }

    #[test]
    fn test_simplify_biconditional() {
        let f = Formula::iff(Formula::var("p"), Formula::var("q"));
        let expected = Formula::or(
            Formula::and(Formula::var("p"), Formula::var("q")),
            Formula::and(Formula::not(Formula::var("p")), Formula::not(Formula::var("q"))),
        );
        assert_eq!(f.simplify(), expected);
    }

    #[test]
    fn test_simplify_is_single_step() {
        // The children of the rewritten node are left untouched.
        let inner = Formula::implies(Formula::var("a"), Formula::var("b"));
        let f = Formula::implies(inner.clone(), Formula::var("c"));
        assert_eq!(f.simplify(), Formula::or(Formula::not(inner), Formula::var("c")));
    }

    #[test]
    fn test_simplify_de_morgan() {
        let f = Formula::not(Formula::and(Formula::var("a"), Formula::var("b")));
        assert_eq!(f.simplify(), Formula::or(Formula::not(Formula::var("a")), Formula::not(Formula::var("b"))));
        let g = Formula::not(Formula::or(Formula::var("a"), Formula::var("b")));
        assert_eq!(g.simplify(), Formula::and(Formula::not(Formula::var("a")), Formula::not(Formula::var("b"))));
    }

    #[test]
    fn test_simplify_not_of_conditional() {
        // ¬(p→q): the child is simplified first, then De Morgan applies.
        let f = Formula::not(Formula::implies(Formula::var("p"), Formula::var("q")));
        let expected = Formula::and(
            Formula::not(Formula::not(Formula::var("p"))),
            Formula::not(Formula::var("q")),
        );
        assert_eq!(f.simplify(), expected);
    }

    #[test]
    fn test_simplify_double_negation_is_structural() {
        let x = Formula::and(Formula::var("a"), Formula::implies(Formula::var("b"), Formula::var("c")));
        assert_eq!(Formula::not(Formula::not(x.clone())).simplify(), x);
    }

    #[test]
    fn test_simplify_identity_cases() {
        let atoms = [Formula::var("p"), Formula::lit(true), Formula::not(Formula::var("p"))];
        for atom in atoms {
            assert_eq!(atom.simplify(), atom);
        }
        let f = Formula::and(Formula::var("p"), Formula::var("q"));
        assert_eq!(f.simplify(), f);
    }

    #[test]
    fn test_to_nnf() {
        let f = Formula::not(Formula::iff(Formula::var("p"), Formula::not(Formula::var("q"))));
        let nnf = f.to_nnf();
        assert!(nnf.is_nnf(), "not in NNF: {}", nnf);
        assert!(!f.is_nnf());
    }

    #[test]
    fn test_to_nnf_nested_biconditionals_grow() {
        // a↔(b↔(c↔(d↔e)))
        let f = ["a", "b", "c", "d"]
            .iter()
            .rev()
            .fold(Formula::var("e"), |acc, &name| Formula::iff(Formula::var(name), acc));
        let nnf = f.to_nnf();
        assert!(nnf.is_nnf(), "not in NNF: {}", nnf);
        assert_eq!(f.count(|_| true), 9);
        assert!(nnf.count(|_| true) > 1 << 4);
        assert_eq!(nnf.variables().len(), 5);
    }

    #[test]
    fn test_evaluate_tree() {
        let f = Formula::and(Formula::var("p"), Formula::not(Formula::var("q")));
        let tree = f.evaluate_tree(&env(&[("p", true), ("q", true)])).unwrap();
        assert_eq!(tree.text, "(p∧¬q)");
        assert!(!tree.value);
        assert_eq!(tree.children.len(), 2);
        assert!(tree.children[0].value);
        assert!(!tree.children[1].value);
        assert!(tree.children[1].children[0].value);
    }
}
