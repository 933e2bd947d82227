//! # tableau-rs: Propositional formulas and semantic tableaux in Rust
//!
//! **`tableau-rs`** is the formula engine behind an interactive logic visualizer.
//! It parses propositional formulas typed as text, evaluates them under a variable
//! assignment, rewrites them toward negation-normal form, and builds semantic
//! tableaux that expose their satisfiability structure.
//!
//! ## Pipeline
//!
//! ```text
//! text -> normalize -> parse -> Formula -> { evaluate | simplify / to_nnf -> Tableau }
//! ```
//!
//! Users type ASCII shorthand which is canonicalized before parsing:
//!
//! | Input | Symbol | Meaning        |
//! |-------|--------|----------------|
//! | `~`   | `¬`    | negation       |
//! | `^`   | `∧`    | conjunction    |
//! | `V`   | `⋁`    | disjunction    |
//! | `>`   | `→`    | conditional    |
//! | `<>`  | `↔`    | biconditional  |
//! | `T`/`F` |      | literals       |
//!
//! ## Basic Usage
//!
//! ```rust
//! use tableau_rs::parser::parse;
//! use tableau_rs::symbols::SymbolTable;
//! use tableau_rs::tableau::Tableau;
//!
//! // 1. Parse (operators of equal precedence need explicit parentheses)
//! let f = parse("(p ^ q) > ~r").unwrap();
//! assert_eq!(f.prettify(), "((p∧q)→¬r)");
//!
//! // 2. Register the free variables and assign them
//! let mut env = SymbolTable::new();
//! env.register_formula(&f);
//! env.set("p", true);
//! env.set("q", true);
//! env.set("r", true);
//! assert_eq!(f.evaluate(&env), Ok(false));
//!
//! // 3. Build a tableau from the negation-normal form
//! let tableau = Tableau::generate(&f.to_nnf()).unwrap();
//! assert!(tableau.node(tableau.root()).is_disjunctive());
//! ```
//!
//! ## Core Components
//!
//! - **[`parser`]**: Precedence-driven recursive-descent parser.
//! - **[`formula`]**: The [`Formula`][crate::formula::Formula] AST with evaluation, pretty-printing and simplification.
//! - **[`tableau`]**: Arena-backed semantic tableau builder.
//! - **[`session`]**: State kept between edits by an interactive front end.
//! - **[`dot`]**: Graphviz rendering of formulas and tableaux.

pub mod dot;
pub mod error;
pub mod formula;
pub mod normalize;
pub mod parser;
pub mod session;
pub mod symbols;
pub mod tableau;
