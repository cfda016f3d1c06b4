//! Graph command - print the flight phase transition graph.

use clap::ValueEnum;
use flightphase::phase::{allowed_next, FlightPhase};

/// Output format for the graph command.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum GraphFormat {
    /// Adjacency table with phase descriptions
    #[default]
    Text,
    /// Graphviz DOT, for `dot -Tsvg`
    Dot,
}

/// Run the graph command.
pub fn run(format: GraphFormat) {
    let output = match format {
        GraphFormat::Text => render_text(),
        GraphFormat::Dot => render_dot(),
    };
    print!("{}", output);
}

fn render_text() -> String {
    let mut out = String::new();
    for phase in FlightPhase::ALL {
        let next: Vec<&str> = allowed_next(phase).iter().map(|p| p.name()).collect();
        out.push_str(&format!(
            "{:<16} -> {:<40} {}\n",
            phase.name(),
            next.join(" | "),
            phase.description()
        ));
    }
    out
}

fn render_dot() -> String {
    let mut out = String::from("digraph flight_phases {\n    rankdir=LR;\n");
    for phase in FlightPhase::ALL {
        for next in allowed_next(phase) {
            out.push_str(&format!("    {} -> {};\n", phase.name(), next.name()));
        }
    }
    out.push_str("}\n");
    out
}
