//! Lexical normalization of user input.
//!
//! Users type ASCII shorthand; the parser only understands the canonical
//! connective symbols below. Normalization performs no validation.

use log::debug;

pub const BICONDITIONAL: char = '↔';
pub const CONDITIONAL: char = '→';
pub const AND: char = '∧';
pub const OR: char = '⋁';
pub const NOT: char = '¬';
pub const LEFT_PAREN: char = '(';
pub const RIGHT_PAREN: char = ')';

pub const TRUE: &str = "T";
pub const FALSE: &str = "F";

/// Connectives, ordered loosest to tightest.
pub const OPERATORS: [char; 5] = [BICONDITIONAL, CONDITIONAL, AND, OR, NOT];

/// Shorthand -> canonical symbol, longest pattern first so that `<>` is not
/// partially consumed by `>`.
const SUBSTITUTIONS: [(&str, char); 5] = [("<>", BICONDITIONAL), (">", CONDITIONAL), ("^", AND), ("V", OR), ("~", NOT)];

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Operator or parenthesis.
pub fn is_special(c: char) -> bool {
    is_operator(c) || c == LEFT_PAREN || c == RIGHT_PAREN
}

/// Precedence level of a character: 3 for `↔`/`→`, 2 for `∧`/`⋁`, 1 for `¬`, 0 otherwise.
pub fn precedence_level(c: char) -> u8 {
    match c {
        BICONDITIONAL | CONDITIONAL => 3,
        AND | OR => 2,
        NOT => 1,
        _ => 0,
    }
}

/// Rewrite shorthand into canonical connectives, optionally deleting all whitespace.
pub fn normalize(text: &str, strip_whitespace: bool) -> String {
    let mut output = text.to_string();
    for (pattern, symbol) in SUBSTITUTIONS {
        output = output.replace(pattern, symbol.encode_utf8(&mut [0; 4]));
    }
    if strip_whitespace {
        output.retain(|c| !c.is_whitespace());
    }
    output
}

/// Strip exactly one layer of parentheses when it spans the whole string.
///
/// Returns the (possibly unchanged) text and whether a layer was removed.
/// `(p)⋁(q)` is left alone: its first `(` closes before the end.
pub fn split_outer_parens(s: &str) -> (String, bool) {
    if s.trim().is_empty() || !s.starts_with(LEFT_PAREN) || !s.ends_with(RIGHT_PAREN) {
        return (s.to_string(), false);
    }

    let last = s.chars().count() - 1;
    let mut depth: i64 = 0;
    for (i, c) in s.chars().enumerate() {
        if c == LEFT_PAREN {
            depth += 1;
        } else if c == RIGHT_PAREN {
            depth -= 1;
            if depth == 0 && i != last {
                return (s.to_string(), false);
            }
        }
    }

    let inner = &s[LEFT_PAREN.len_utf8()..s.len() - RIGHT_PAREN.len_utf8()];
    debug!("split_outer_parens({}) -> {}", s, inner);
    (inner.to_string(), true)
}

/// Normalized text with one outer parenthesis layer removed, for display.
pub fn display_form(text: &str) -> String {
    let (inner, _) = split_outer_parens(&normalize(text, true));
    inner
}

/// Human-readable list of the accepted input shorthands.
pub fn shorthand_help() -> String {
    let mut help = String::from("Controls:\n");
    help += &format!("~ for {}\n", NOT);
    help += &format!("> for {}\n", CONDITIONAL);
    help += &format!("<> for {}\n", BICONDITIONAL);
    help += &format!("^ for {}\n", AND);
    help += &format!("V for {}\n", OR);
    help += &format!("{} for the true literal\n", TRUE);
    help += &format!("{} for the false literal\n", FALSE);
    help
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_normalize_shorthand() {
        assert_eq!(normalize("p <> q", true), "p↔q");
        assert_eq!(normalize("p > q", true), "p→q");
        assert_eq!(normalize("~p ^ q V r", true), "¬p∧q⋁r");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        assert_eq!(normalize("p ^ q", false), "p ∧ q");
    }

    #[test]
    fn test_normalize_is_stable() {
        let once = normalize("(p>q)<>~r", true);
        assert_eq!(normalize(&once, true), once);
    }

    #[test]
    fn test_split_outer_parens() {
        assert_eq!(split_outer_parens("(p∧q)"), ("p∧q".to_string(), true));
        assert_eq!(split_outer_parens("((p∧q))"), ("(p∧q)".to_string(), true));
        assert_eq!(split_outer_parens("(p)⋁(q)"), ("(p)⋁(q)".to_string(), false));
        assert_eq!(split_outer_parens("p∧q"), ("p∧q".to_string(), false));
        assert_eq!(split_outer_parens(""), (String::new(), false));
        assert_eq!(split_outer_parens("   "), ("   ".to_string(), false));
        assert_eq!(split_outer_parens("()"), (String::new(), true));
    }

    #[test]
    fn test_precedence_levels() {
        assert_eq!(precedence_level(BICONDITIONAL), precedence_level(CONDITIONAL));
        assert_eq!(precedence_level(AND), precedence_level(OR));
        assert!(precedence_level(CONDITIONAL) > precedence_level(AND));
        assert!(precedence_level(AND) > precedence_level(NOT));
        assert_eq!(precedence_level('p'), 0);
    }

    #[test]
    fn test_display_form() {
        assert_eq!(display_form("( p ^ q )"), "p∧q");
    }
}
