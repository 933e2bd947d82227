//! Command-line front end for the formula engine.
//!
//! Run with: `cargo run --example visualize -- "(p ^ q) > ~r" --set p=T --set q=T --tableau`

use clap::Parser;
use color_eyre::eyre::eyre;
use tableau_rs::formula::EvalNode;
use tableau_rs::normalize::{display_form, shorthand_help};
use tableau_rs::session::Session;
use tableau_rs::symbols::is_valid_name;
use tableau_rs::tableau::{NodeId, Tableau};

#[derive(Parser)]
#[command(name = "visualize")]
#[command(about = "Parse, evaluate and build tableaux for propositional formulas")]
struct Args {
    /// Formula, e.g. "(p ^ q) > ~r"
    formula: Option<String>,

    /// Variable assignment, e.g. `p=T` or `q=false`
    #[arg(short, long = "set", value_parser = parse_assignment)]
    assignments: Vec<(String, bool)>,

    /// Print the semantic tableau
    #[arg(short, long)]
    tableau: bool,

    /// Print DOT instead of text trees
    #[arg(short, long)]
    dot: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: simplelog::LevelFilter,
}

fn parse_assignment(s: &str) -> Result<(String, bool), String> {
    let (name, value) = s.split_once('=').ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    if !is_valid_name(name) {
        return Err(format!("invalid variable name '{}'", name));
    }
    let value = match value {
        "T" | "t" | "true" | "1" => true,
        "F" | "f" | "false" | "0" => false,
        _ => return Err(format!("invalid truth value '{}'", value)),
    };
    Ok((name.to_string(), value))
}

fn print_eval_tree(node: &EvalNode, indent: usize) {
    println!("{}{} [{}]", "  ".repeat(indent), node.text, if node.value { "T" } else { "F" });
    for child in &node.children {
        print_eval_tree(child, indent + 1);
    }
}

fn print_tableau(tableau: &Tableau, id: NodeId, indent: usize) {
    let node = tableau.node(id);
    let mark = match (node.state(), node.closed()) {
        (Some(_), Some(true)) => " ✗",
        (Some(_), _) => "",
        (None, _) if node.is_disjunctive() => " (or)",
        (None, _) => " (and)",
    };
    println!("{}{}{}", "  ".repeat(indent), node.text(), mark);
    for &child in node.children() {
        print_tableau(tableau, child, indent + 1);
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let Some(text) = args.formula else {
        print!("{}", shorthand_help());
        return Ok(());
    };

    let mut session = Session::default();
    session.update(&text)?;
    for (name, value) in &args.assignments {
        session.set_variable(name, *value);
    }

    let summary = session.summary().ok_or_else(|| eyre!("no formula"))?;
    println!("Formula: {}", display_form(&text));
    if let Some(op) = summary.main_connective {
        println!("Main connective: {}", op);
    }
    println!("Nodes: {}  Binary operators: {}", summary.nodes, summary.binary_operators);

    println!("Variables:");
    for (name, value) in session.symbols().iter() {
        println!("  {} = {}", name, if value { "T" } else { "F" });
    }

    let tree = session.evaluate_tree()?.ok_or_else(|| eyre!("no formula"))?;
    if args.dot {
        print!("{}", tree.to_dot()?);
    } else {
        print_eval_tree(&tree, 0);
    }

    if args.tableau {
        let tableau = session.tableau()?.ok_or_else(|| eyre!("no formula"))?;
        println!("Tableau:");
        if args.dot {
            print!("{}", tableau.to_dot()?);
        } else {
            print_tableau(&tableau, tableau.root(), 1);
        }
        println!("Open leaves: {}", tableau.open_leaves().len());
    }

    Ok(())
}
