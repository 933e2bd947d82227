//! Formula and tableau to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! - **Formula trees** are drawn top-down, one node per subformula, labeled with
//!   the connective (or the atom itself for leaves).
//! - **Evaluation trees** additionally fill each node with the color of its truth value.
//! - **Tableaux**:
//!   - Branch nodes are boxes labeled with the subformula they expand
//!   - Disjunctive branches use dashed edges to their alternatives
//!   - Assertion leaves are ellipses labeled `p = T` / `p = F`
//!   - Closed leaves are filled and marked with `✗`
//!
//! # Examples
//!
//! ```
//! use tableau_rs::parser::parse;
//! use tableau_rs::tableau::Tableau;
//!
//! let f = parse("p V ~q").unwrap();
//! let tableau = Tableau::generate(&f).unwrap();
//!
//! let dot = tableau.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use crate::formula::{EvalNode, Formula};
use crate::normalize::NOT;
use crate::tableau::Tableau;

/// Configuration options for DOT output generation.
///
/// ```
/// use tableau_rs::dot::DotConfig;
/// use tableau_rs::formula::Formula;
///
/// let config = DotConfig {
///     node_shape: "circle",
///     ..DotConfig::default()
/// };
/// let dot = Formula::var("p").to_dot_with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for connective and branch nodes (default: "box")
    pub node_shape: &'static str,
    /// Shape for atoms and assertion leaves (default: "ellipse")
    pub leaf_shape: &'static str,
    /// Fill color for true subformulas (default: "palegreen")
    pub true_color: &'static str,
    /// Fill color for false subformulas (default: "lightpink")
    pub false_color: &'static str,
    /// Fill color for closed tableau leaves (default: "gray80")
    pub closed_color: &'static str,
    /// Style for edges from conjunctive branches (default: "solid")
    pub conjunctive_edge_style: &'static str,
    /// Style for edges from disjunctive branches (default: "dashed")
    pub disjunctive_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "box",
            leaf_shape: "ellipse",
            true_color: "palegreen",
            false_color: "lightpink",
            closed_color: "gray80",
            conjunctive_edge_style: "solid",
            disjunctive_edge_style: "dashed",
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_label(formula: &Formula) -> String {
    match formula {
        Formula::Not(_) => NOT.to_string(),
        Formula::Binary(op, _, _) => op.symbol().to_string(),
        atom => atom.prettify(),
    }
}

impl Formula {
    /// Converts the syntax tree of this formula to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        let mut next_id = 0;
        let mut stack = vec![(self, None::<usize>)];
        while let Some((node, parent)) = stack.pop() {
            let id = next_id;
            next_id += 1;
            if node.is_atom() {
                writeln!(dot, "{} [shape={}, label=\"{}\"];", id, config.leaf_shape, escape(&node_label(node)))?;
            } else {
                writeln!(dot, "{} [label=\"{}\"];", id, escape(&node_label(node)))?;
            }
            if let Some(parent) = parent {
                writeln!(dot, "{} -> {};", parent, id)?;
            }
            for child in node.children().into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl EvalNode {
    /// Converts an evaluated formula to DOT format, coloring nodes by truth value.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}, style=filled];", config.node_shape)?;

        let mut next_id = 0;
        let mut stack = vec![(self, None::<usize>)];
        while let Some((node, parent)) = stack.pop() {
            let id = next_id;
            next_id += 1;
            let color = if node.value { config.true_color } else { config.false_color };
            let shape = if node.children.is_empty() {
                config.leaf_shape
            } else {
                config.node_shape
            };
            writeln!(
                dot,
                "{} [shape={}, fillcolor={}, label=\"{} [{}]\"];",
                id,
                shape,
                color,
                escape(&node.text),
                if node.value { "T" } else { "F" }
            )?;
            if let Some(parent) = parent {
                writeln!(dot, "{} -> {};", parent, id)?;
            }
            for child in node.children.iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl Tableau {
    /// Converts the tableau to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        for (id, node) in self.iter() {
            match (node.state(), node.closed()) {
                (Some(state), closed) => {
                    let closed = closed == Some(true);
                    let label = format!(
                        "{} = {}{}",
                        escape(node.text().trim_start_matches(NOT)),
                        if state { "T" } else { "F" },
                        if closed { " ✗" } else { "" }
                    );
                    if closed {
                        writeln!(
                            dot,
                            "{} [shape={}, style=filled, fillcolor={}, label=\"{}\"];",
                            id.index(),
                            config.leaf_shape,
                            config.closed_color,
                            label
                        )?;
                    } else {
                        writeln!(dot, "{} [shape={}, label=\"{}\"];", id.index(), config.leaf_shape, label)?;
                    }
                }
                (None, _) => {
                    writeln!(dot, "{} [label=\"{}\"];", id.index(), escape(node.text()))?;
                }
            }
        }

        for (id, node) in self.iter() {
            let style = if node.is_disjunctive() {
                config.disjunctive_edge_style
            } else {
                config.conjunctive_edge_style
            };
            for child in node.children() {
                writeln!(dot, "{} -> {} [style={}];", id.index(), child.index(), style)?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
