use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use indoc::indoc;
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use search::Algorithm;
use search::Budget;
use search::problems::graph::GraphCost;
use search::problems::graph::GraphParseError;
use search::problems::graph::GraphProblem;
use search::problems::graph::TableHeuristic;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const LONG_ABOUT: &str = indoc! {"
    Finds paths through a weighted graph.

    Graphs are read one directive per line, `#` starts a comment:

      start <state>
      goal <state>
      edge <from> <to> <action> <cost>
      h <state> <estimate>

    A* uses the `h` entries as its heuristic. Every other algorithm ignores them.
"};

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Args {
    /// Graph file to search.
    #[arg(required_unless_present = "random")]
    pub graph: Option<PathBuf>,

    /// Algorithms to run. Runs all of them when omitted.
    #[arg(short, long, value_enum, num_args = 1..)]
    pub algorithm: Vec<Algorithm>,

    #[arg(long, env = "SEARCH_MAX_EXPANSIONS")]
    pub max_expansions: Option<usize>,
    /// Time allowed for each algorithm.
    #[arg(long, env = "SEARCH_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Searches a random graph with this many states instead of a file.
    #[arg(long, conflicts_with = "graph")]
    pub random: Option<usize>,
    #[arg(long, default_value_t = 4usize)]
    pub branching: usize,
    #[arg(long, default_value_t = 20)]
    pub max_cost: GraphCost,
    #[arg(long, default_value_t = 0u64)]
    pub seed: u64,

    /// Prints the graph before searching it.
    #[arg(long)]
    pub print_graph: bool,
    /// Prints search statistics after each run.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] GraphParseError),
    #[error("Failed to write output: {0}")]
    IO(#[from] std::io::Error),
    #[error("A random graph needs at least one state")]
    EmptyRandomGraph,
    #[error("Either a graph file or --random is required")]
    MissingGraph,
}

impl Args {
    fn budget(&self) -> Budget {
        let mut budget = Budget::unlimited();
        if let Some(n) = self.max_expansions {
            budget = budget.with_max_expansions(n);
        }
        if let Some(ms) = self.timeout_ms {
            budget = budget.with_timeout(Duration::from_millis(ms));
        }
        budget
    }

    fn problem(&self) -> Result<GraphProblem, CliError> {
        match (&self.graph, self.random) {
            (_, Some(0)) => Err(CliError::EmptyRandomGraph),
            (_, Some(size)) => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                Ok(GraphProblem::random(
                    &mut rng,
                    size,
                    self.branching,
                    self.max_cost.max(1),
                ))
            }
            (Some(path), None) => Ok(GraphProblem::try_from(path.as_path())?),
            (None, None) => Err(CliError::MissingGraph),
        }
    }
}

/// Runs every requested algorithm, returning whether all of them found a path.
fn run(args: &Args) -> Result<bool, CliError> {
    let problem = args.problem()?;
    println!("Searching {}", format!("{problem:?}").bold());
    if args.print_graph {
        println!("{problem}");
    }

    let algorithms = if args.algorithm.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithm.clone()
    };

    let mut all_found = true;
    for algorithm in algorithms {
        // Deadlines start counting when each algorithm does.
        let budget = args.budget();

        let mut stopwatch = Stopwatch::new_started();
        let outcome = algorithm.search(&problem, TableHeuristic, budget);
        stopwatch.stop();
        let elapsed = stopwatch.elapsed();

        let name = format!("{:>5}", algorithm.to_string());
        match &outcome.result {
            Ok(path) => println!(
                "{} cost {} in {} actions [{}] ({})",
                name.green().bold(),
                path.cost.yellow(),
                path.len(),
                path.actions.join(" "),
                human_duration(&elapsed),
            ),
            Err(e) => {
                all_found = false;
                println!(
                    "{} {} ({})",
                    name.red().bold(),
                    e,
                    human_duration(&elapsed)
                );
            }
        }

        if args.stats {
            outcome.stats.write_report(anstream::stdout().lock())?;
        }
    }

    Ok(all_found)
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}
