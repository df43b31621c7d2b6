//! Explicit weighted graphs.
//!
//! Graphs are written one directive per line, with `#` starting a comment:
//!
//! ```text
//! start <state>
//! goal <state>                       # repeatable
//! edge <from> <to> <action> <cost>
//! h <state> <estimate>               # heuristic table entry
//! ```
//!
//! Edges are offered as successors in the order they are listed.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::error::InvalidPathError;
use crate::problem::Heuristic;
use crate::problem::SearchProblem;
use crate::problem::replay_cost_of_actions;
use crate::space::Successor;

pub type GraphState = String;
pub type GraphAction = String;
/// Signed so that malformed graphs can be written down and rejected by the
/// searches instead of the parser.
pub type GraphCost = i64;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Edge {
    to: GraphState,
    action: GraphAction,
    cost: GraphCost,
}

#[derive(Clone, Default)]
pub struct GraphProblem {
    start: Option<GraphState>,
    goals: FxHashSet<GraphState>,
    edges: FxHashMap<GraphState, Vec<Edge>>,
    estimates: FxHashMap<GraphState, GraphCost>,
    states: FxHashSet<GraphState>,
}

impl GraphProblem {
    pub fn start(&self) -> &str {
        self.start.as_deref().unwrap_or_default()
    }

    pub fn goals(&self) -> impl Iterator<Item = &GraphState> {
        self.goals.iter()
    }

    /// Number of distinct states mentioned by the graph.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// The heuristic table entry for `s`, if any.
    pub fn estimate(&self, s: &str) -> Option<GraphCost> {
        self.estimates.get(s).copied()
    }

    fn add_edge(&mut self, from: GraphState, to: GraphState, action: GraphAction, cost: GraphCost) {
        self.states.insert(from.clone());
        self.states.insert(to.clone());
        self.edges
            .entry(from)
            .or_default()
            .push(Edge { to, action, cost });
    }

    /// Builds a random graph over states `n0..n{size}` going from the first
    /// one to the last one.
    ///
    /// Each state gets up to `branching` edges to random states, costing
    /// between 1 and `max_cost`. The goal may be unreachable.
    pub fn random<R: rand::Rng>(
        rng: &mut R,
        size: usize,
        branching: usize,
        max_cost: GraphCost,
    ) -> Self {
        debug_assert!(size > 0);
        debug_assert!(max_cost >= 1);

        let name = |i: usize| format!("n{i}");
        let mut graph = GraphProblem {
            start: Some(name(0)),
            goals: FxHashSet::from_iter([name(size - 1)]),
            ..Default::default()
        };
        graph.states.insert(name(0));
        graph.states.insert(name(size - 1));

        for from in 0..size {
            let mut targets = FxHashSet::default();
            for _ in 0..branching {
                let to = rng.random_range(0..size);
                // Actions are named after their target, which must be unique
                // per state for action sequences to be unambiguous.
                if to == from || !targets.insert(to) {
                    continue;
                }
                let cost = rng.random_range(1..=max_cost);
                graph.add_edge(name(from), name(to), format!("to_{to}"), cost);
            }
        }

        log::debug!("Generated {graph:?}");
        graph
    }
}

impl SearchProblem for GraphProblem {
    type State = GraphState;
    type Action = GraphAction;
    type Cost = GraphCost;

    fn start_state(&self) -> GraphState {
        self.start().to_string()
    }

    fn is_goal_state(&self, s: &GraphState) -> bool {
        self.goals.contains(s)
    }

    fn successors(&self, s: &GraphState) -> Vec<Successor<GraphState, GraphAction, GraphCost>> {
        match self.edges.get(s) {
            Some(edges) => edges
                .iter()
                .map(|e| Successor::new(e.to.clone(), e.action.clone(), e.cost))
                .collect(),
            None => vec![],
        }
    }

    fn cost_of_actions(&self, actions: &[GraphAction]) -> Result<GraphCost, InvalidPathError> {
        replay_cost_of_actions(self, actions)
    }
}

/// Reads estimates from the graph's `h` entries, defaulting to 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableHeuristic;

impl Heuristic<GraphProblem> for TableHeuristic {
    #[inline(always)]
    fn h(&self, s: &GraphState, p: &GraphProblem) -> GraphCost {
        p.estimate(s).unwrap_or(0)
    }
}

impl std::fmt::Debug for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph{{{} states, {} edges, {} goals}}",
            self.state_count(),
            self.edge_count(),
            self.goals.len()
        )
    }
}

/// Writes the graph back in its text format. Sections are sorted so the
/// output is stable, while edges keep their order within each state.
impl std::fmt::Display for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "start {}", self.start())?;
        for goal in self.goals.iter().collect::<BTreeSet<_>>() {
            writeln!(f, "goal {goal}")?;
        }
        for from in self.edges.keys().collect::<BTreeSet<_>>() {
            for e in &self.edges[from] {
                writeln!(f, "edge {from} {} {} {}", e.to, e.action, e.cost)?;
            }
        }
        for (s, h) in self.estimates.iter().collect::<BTreeSet<_>>() {
            writeln!(f, "h {s} {h}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("Line {line}: unknown directive {directive:?}")]
    UnknownDirective { line: usize, directive: String },
    #[error("Line {line}: `{directive}` takes {expected} arguments, found {found}")]
    WrongArity {
        line: usize,
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Line {line}: invalid cost {value:?}: {e}")]
    InvalidCost {
        line: usize,
        value: String,
        e: std::num::ParseIntError,
    },
    #[error("Line {line}: the start state was already set")]
    DuplicateStart { line: usize },
    #[error("Line {line}: {from:?} already has an edge labelled {action:?}")]
    DuplicateAction {
        line: usize,
        from: String,
        action: String,
    },
    #[error("Missing `start` directive")]
    MissingStart,
    #[error("Missing `goal` directive")]
    MissingGoals,
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
}

fn expect_args(
    line: usize,
    directive: &'static str,
    args: &[&str],
    expected: usize,
) -> Result<(), GraphParseError> {
    if args.len() != expected {
        return Err(GraphParseError::WrongArity {
            line,
            directive,
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

fn parse_cost(line: usize, value: &str) -> Result<GraphCost, GraphParseError> {
    value
        .parse::<GraphCost>()
        .map_err(|e| GraphParseError::InvalidCost {
            line,
            value: value.to_string(),
            e,
        })
}

impl std::convert::TryFrom<&str> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut graph = GraphProblem::default();

        for (i, raw) in s.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or_default();
            let mut words = content.split_whitespace();
            let Some(directive) = words.next() else {
                continue;
            };
            let args: Vec<&str> = words.collect();

            match directive {
                "start" => {
                    expect_args(line, "start", &args, 1)?;
                    if graph.start.is_some() {
                        return Err(GraphParseError::DuplicateStart { line });
                    }
                    graph.states.insert(args[0].to_string());
                    graph.start = Some(args[0].to_string());
                }
                "goal" => {
                    expect_args(line, "goal", &args, 1)?;
                    graph.states.insert(args[0].to_string());
                    graph.goals.insert(args[0].to_string());
                }
                "edge" => {
                    expect_args(line, "edge", &args, 4)?;
                    let cost = parse_cost(line, args[3])?;
                    // Paths are priced by action label, so labels must be
                    // unique per source state.
                    if graph
                        .edges
                        .get(args[0])
                        .is_some_and(|es| es.iter().any(|e| e.action == args[2]))
                    {
                        return Err(GraphParseError::DuplicateAction {
                            line,
                            from: args[0].to_string(),
                            action: args[2].to_string(),
                        });
                    }
                    graph.add_edge(
                        args[0].to_string(),
                        args[1].to_string(),
                        args[2].to_string(),
                        cost,
                    );
                }
                "h" => {
                    expect_args(line, "h", &args, 2)?;
                    let estimate = parse_cost(line, args[1])?;
                    graph.states.insert(args[0].to_string());
                    graph.estimates.insert(args[0].to_string(), estimate);
                }
                other => {
                    return Err(GraphParseError::UnknownDirective {
                        line,
                        directive: other.to_string(),
                    });
                }
            }
        }

        if graph.start.is_none() {
            return Err(GraphParseError::MissingStart);
        }
        if graph.goals.is_empty() {
            return Err(GraphParseError::MissingGoals);
        }

        log::debug!("Parsed {graph:?}");
        Ok(graph)
    }
}

impl std::convert::TryFrom<&std::path::Path> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| GraphParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        GraphProblem::try_from(s.as_str())
    }
}
