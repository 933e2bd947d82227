//! Behavioral tests for the formula engine.
//!
//! Tests cover parsing, canonical printing, evaluation, simplification and tableaux.

use tableau_rs::error::ParseError;
use tableau_rs::formula::{BinaryOp, Formula};
use tableau_rs::parser::parse;
use tableau_rs::symbols::SymbolTable;
use tableau_rs::tableau::Tableau;

const SAMPLES: &[&str] = &[
    "p",
    "T",
    "~p",
    "~~p",
    "p^q",
    "pVq",
    "p>q",
    "p<>q",
    "~(p^q)",
    "~(pVq)",
    "(p>q)<>(~q>~p)",
    "~(p<>~q)",
    "((a^b)Vc)>~(d<>F)",
    "~~(p>(q^~r))",
    "(p^~p)V(qV~q)",
];

/// Every assignment of `vars`, as a fresh environment.
fn assignments(vars: &[&str]) -> Vec<SymbolTable> {
    (0..1u32 << vars.len())
        .map(|bits| {
            let mut env = SymbolTable::new();
            for (i, name) in vars.iter().enumerate() {
                env.set(name, bits & (1 << i) != 0);
            }
            env
        })
        .collect()
}

fn assert_equivalent(a: &Formula, b: &Formula) {
    let mut vars = a.variables();
    for v in b.variables() {
        if !vars.contains(&v) {
            vars.push(v);
        }
    }
    for env in assignments(&vars) {
        assert_eq!(a.evaluate(&env), b.evaluate(&env), "{} vs {} under {:?}", a, b, env);
    }
}

// ─── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn parse_shapes() {
    let p = Formula::var("p");
    let q = Formula::var("q");
    assert_eq!(parse("p^q").unwrap(), Formula::and(p.clone(), q.clone()));
    assert_eq!(parse("p>q").unwrap(), Formula::implies(p.clone(), q.clone()));
    assert_eq!(parse("p<>q").unwrap(), Formula::iff(p.clone(), q.clone()));
    assert_eq!(parse("~(p^q)").unwrap(), Formula::not(Formula::and(p, q)));
}

#[test]
fn parse_accepts_canonical_symbols() {
    assert_eq!(parse("p∧q").unwrap(), parse("p^q").unwrap());
    assert_eq!(parse("¬p⋁q").unwrap(), parse("~pVq").unwrap());
    assert_eq!(parse("p↔q").unwrap(), parse("p<>q").unwrap());
}

#[test]
fn parse_rejects_chains_without_parens() {
    assert_eq!(parse("p^q^r"), Err(ParseError::AmbiguousOperator { operator: '∧' }));
    assert!(parse("(p^q)^r").is_ok());
    assert!(parse("p^(q^r)").is_ok());
}

#[test]
fn parse_rejects_misplaced_negation() {
    assert_eq!(parse("p~q"), Err(ParseError::NegationSyntax));
}

#[test]
fn parse_errors_are_whole() {
    for bad in ["", "~", "(p)", "p^q)", "(p^q", "p>", "((p))"] {
        assert!(parse(bad).is_err(), "{:?} should not parse", bad);
    }
}

#[test]
fn canonicalization_is_idempotent() {
    for text in SAMPLES {
        let once = parse(text).unwrap().prettify();
        let twice = parse(&once).unwrap().prettify();
        assert_eq!(once, twice, "input {:?}", text);
    }
}

// ─── Evaluation ────────────────────────────────────────────────────────────────

#[test]
fn conditional_false_only_when_antecedent_holds() {
    let f = parse("p>q").unwrap();
    for env in assignments(&["p", "q"]) {
        let p = env.get("p").unwrap();
        let q = env.get("q").unwrap();
        assert_eq!(f.evaluate(&env).unwrap(), !(p && !q));
    }
}

#[test]
fn biconditional_true_when_equal() {
    let f = parse("p<>q").unwrap();
    for env in assignments(&["p", "q"]) {
        assert_eq!(f.evaluate(&env).unwrap(), env.get("p") == env.get("q"));
    }
}

#[test]
fn explicit_grouping_evaluates() {
    let f = parse("(p^q)^r").unwrap();
    for env in assignments(&["p", "q", "r"]) {
        let expected = env.iter().all(|(_, v)| v);
        assert_eq!(f.evaluate(&env).unwrap(), expected);
    }
}

#[test]
fn evaluation_is_deterministic() {
    let f = parse("((a^b)Vc)>~(d<>F)").unwrap();
    for env in assignments(&["a", "b", "c", "d"]) {
        assert_eq!(f.evaluate(&env), f.evaluate(&env));
    }
}

// ─── Simplification ────────────────────────────────────────────────────────────

#[test]
fn simplify_preserves_truth() {
    for text in SAMPLES {
        let f = parse(text).unwrap();
        assert_equivalent(&f, &f.simplify());
    }
}

#[test]
fn nnf_preserves_truth() {
    for text in SAMPLES {
        let f = parse(text).unwrap();
        let nnf = f.to_nnf();
        assert!(nnf.is_nnf(), "{} -> {}", f, nnf);
        assert_equivalent(&f, &nnf);
    }
}

#[test]
fn double_negation_elimination() {
    for text in SAMPLES {
        let x = parse(text).unwrap();
        assert_eq!(Formula::not(Formula::not(x.clone())).simplify(), x);
    }
}

#[test]
fn de_morgan() {
    let a = parse("p>q").unwrap();
    let b = parse("~r").unwrap();
    let simplified = Formula::not(Formula::and(a.clone(), b.clone())).simplify();
    let expected = Formula::or(Formula::not(a), Formula::not(b));
    assert_equivalent(&simplified, &expected);
}

#[test]
fn nnf_keeps_only_and_or() {
    let f = parse("(p>q)<>(~q>~p)").unwrap().to_nnf();
    let bad = f.count(|n| {
        matches!(
            n,
            Formula::Binary(BinaryOp::Conditional | BinaryOp::Biconditional, _, _)
        )
    });
    assert_eq!(bad, 0);
}

// ─── Tableau ───────────────────────────────────────────────────────────────────

#[test]
fn tableau_contradiction() {
    let f = parse("p^~p").unwrap().to_nnf();
    let tableau = Tableau::generate(&f).unwrap();
    let root = tableau.node(tableau.root());
    assert!(!root.is_disjunctive());
    let not_p = tableau.node(root.children()[1]);
    assert_eq!(not_p.text(), "¬p");
    assert_eq!(not_p.state(), Some(false));
    assert_eq!(not_p.closed(), Some(true));
}

#[test]
fn tableau_disjunction() {
    let f = parse("pVq").unwrap().to_nnf();
    let tableau = Tableau::generate(&f).unwrap();
    let root = tableau.node(tableau.root());
    assert!(root.is_disjunctive());
    assert_eq!(root.children().len(), 2);
    for &child in root.children() {
        assert_eq!(tableau.node(child).closed(), Some(false));
    }
}

#[test]
fn tableau_requires_nnf() {
    let f = parse("p>q").unwrap();
    assert!(Tableau::generate(&f).is_err());
    assert!(Tableau::generate(&f.to_nnf()).is_ok());
}

#[test]
fn tableau_of_every_sample() {
    for text in SAMPLES {
        let f = parse(text).unwrap().to_nnf();
        let tableau = Tableau::generate(&f).unwrap();
        assert!(!tableau.leaves().is_empty());
        for (id, node) in tableau.iter() {
            assert_eq!(node.is_leaf(), node.children().is_empty(), "{} in {}", id, text);
            assert_eq!(node.closed().is_some(), node.is_leaf());
        }
    }
}

// ─── Symbol table ──────────────────────────────────────────────────────────────

#[test]
fn registration_keeps_assignments() {
    let mut env = SymbolTable::new();
    env.register_formula(&parse("p").unwrap());
    env.set("p", true);
    env.register_formula(&parse("p^q").unwrap());

    assert_eq!(env.get("p"), Ok(true));
    assert_eq!(env.get("q"), Ok(false));
    let names: Vec<&str> = env.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["p", "q"]);
}
