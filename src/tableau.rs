//! Semantic tableau construction.
//!
//! A [`Tableau`] is built from a formula in negation-normal form (see
//! [`Formula::to_nnf`]). Conjunctions become a single branch node whose two
//! children hold on the same branch; disjunctions become a *disjunctive* branch
//! node whose children are alternatives. Atoms and negated atoms become
//! assertion leaves.
//!
//! Closure is decided once per leaf, when it is created: starting from the
//! leaf's parent and walking up to the root, the leaf is closed if any visited
//! node already has a child asserting the same variable with the opposite
//! value. Only nodes built *before* the leaf are visible to this scan, and no
//! further consistency check is made across disjunctive splits.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`].
//!
//! ```
//! use tableau_rs::parser::parse;
//! use tableau_rs::tableau::Tableau;
//!
//! let f = parse("p ^ ~p").unwrap().to_nnf();
//! let tableau = Tableau::generate(&f).unwrap();
//! let closed = tableau.closed_leaves();
//! assert_eq!(closed.len(), 1);
//! assert_eq!(tableau.node(closed[0]).text(), "¬p");
//! ```

use std::fmt::{Display, Formatter};

use log::debug;

use crate::error::TableauError;
use crate::formula::{BinaryOp, Formula};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The atom an assertion leaf talks about.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LeafAtom {
    Variable(String),
    Literal(bool),
}

#[derive(Debug, Clone)]
pub struct TableauNode {
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    disjunctive: bool,
    atom: Option<LeafAtom>,
    state: Option<bool>,
    closed: Option<bool>,
}

impl TableauNode {
    fn branch(text: String, parent: Option<NodeId>, disjunctive: bool) -> Self {
        Self {
            text,
            parent,
            children: Vec::with_capacity(2),
            disjunctive,
            atom: None,
            state: None,
            closed: None,
        }
    }

    /// Prettified subformula this node was built from.
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
    /// `true` only for nodes expanded from a disjunction.
    pub fn is_disjunctive(&self) -> bool {
        self.disjunctive
    }
    pub fn atom(&self) -> Option<&LeafAtom> {
        self.atom.as_ref()
    }
    /// Asserted truth value of the underlying atom; `None` for branch nodes.
    pub fn state(&self) -> Option<bool> {
        self.state
    }
    /// Closure mark; `None` for branch nodes.
    pub fn closed(&self) -> Option<bool> {
        self.closed
    }
    pub fn is_leaf(&self) -> bool {
        self.state.is_some()
    }

    fn asserts(&self, name: &str, state: bool) -> bool {
        matches!(&self.atom, Some(LeafAtom::Variable(v)) if v == name) && self.state == Some(state)
    }
}

#[derive(Debug, Clone)]
pub struct Tableau {
    nodes: Vec<TableauNode>,
    root: NodeId,
}

impl Tableau {
    /// Build the tableau for `formula`, which must be in negation-normal form.
    pub fn generate(formula: &Formula) -> Result<Self, TableauError> {
        let mut nodes = Vec::new();
        let root = Self::build(&mut nodes, formula, None)?;
        debug!("generate({}) -> {} nodes", formula, nodes.len());
        Ok(Self { nodes, root })
    }

    fn build(nodes: &mut Vec<TableauNode>, formula: &Formula, parent: Option<NodeId>) -> Result<NodeId, TableauError> {
        match formula {
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Variable(name) => Ok(Self::leaf(nodes, formula, parent, LeafAtom::Variable(name.clone()), false)),
                Formula::Literal(value) => Ok(Self::leaf(nodes, formula, parent, LeafAtom::Literal(*value), false)),
                _ => Err(Self::unsupported(formula)),
            },
            Formula::Variable(name) => Ok(Self::leaf(nodes, formula, parent, LeafAtom::Variable(name.clone()), true)),
            Formula::Literal(value) => Ok(Self::leaf(nodes, formula, parent, LeafAtom::Literal(*value), true)),
            Formula::Binary(op @ (BinaryOp::And | BinaryOp::Or), a, b) => {
                let id = NodeId(nodes.len());
                let disjunctive = *op == BinaryOp::Or;
                nodes.push(TableauNode::branch(formula.prettify(), parent, disjunctive));
                // A child is attached only once it is fully built.
                let left = Self::build(nodes, a, Some(id))?;
                nodes[id.0].children.push(left);
                let right = Self::build(nodes, b, Some(id))?;
                nodes[id.0].children.push(right);
                Ok(id)
            }
            Formula::Binary(..) => Err(Self::unsupported(formula)),
        }
    }

    fn leaf(
        nodes: &mut Vec<TableauNode>,
        formula: &Formula,
        parent: Option<NodeId>,
        atom: LeafAtom,
        state: bool,
    ) -> NodeId {
        let closed = match &atom {
            LeafAtom::Variable(name) => Self::contradicted(nodes, parent, name, state),
            LeafAtom::Literal(_) => false,
        };
        debug!("leaf {} (state = {}, closed = {})", formula, state, closed);

        let id = NodeId(nodes.len());
        nodes.push(TableauNode {
            text: formula.prettify(),
            parent,
            children: Vec::new(),
            disjunctive: false,
            atom: Some(atom),
            state: Some(state),
            closed: Some(closed),
        });
        id
    }

    /// Does any node from `start` up to the root have a child asserting `name = !state`?
    fn contradicted(nodes: &[TableauNode], start: Option<NodeId>, name: &str, state: bool) -> bool {
        let mut current = start;
        while let Some(id) = current {
            let node = &nodes[id.0];
            if node.children.iter().any(|c| nodes[c.0].asserts(name, !state)) {
                return true;
            }
            current = node.parent;
        }
        false
    }

    fn unsupported(formula: &Formula) -> TableauError {
        TableauError::Unsupported {
            formula: formula.prettify(),
        }
    }
}

impl Tableau {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TableauNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TableauNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            result.push(parent);
            current = self.node(parent).parent;
        }
        result
    }

    /// Assertion leaves, left to right.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.is_leaf() {
                result.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        result
    }

    pub fn open_leaves(&self) -> Vec<NodeId> {
        self.leaves()
            .into_iter()
            .filter(|&id| self.node(id).closed == Some(false))
            .collect()
    }

    pub fn closed_leaves(&self) -> Vec<NodeId> {
        self.leaves()
            .into_iter()
            .filter(|&id| self.node(id).closed == Some(true))
            .collect()
    }

    pub fn all_leaves_closed(&self) -> bool {
        self.leaves().into_iter().all(|id| self.node(id).closed == Some(true))
    }
}
