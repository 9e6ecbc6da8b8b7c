use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use ordered_float::OrderedFloat;

use transit_paths::analysis::{run_trials, ReportFiles};
use transit_paths::graph::Graph;
use transit_paths::io::{adjacency, network};
use transit_paths::{Error, InstrumentedDijkstra, NodeId, Result, TransitGraph};

const NETWORK_FILE: &str = "network.csv";
const ADJACENCY_FILE: &str = "adjacency.csv";

type Weight = OrderedFloat<f64>;

fn main() -> ExitCode {
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("===== Transit Network Analyzer =====");
        println!();
        println!("1. Create adjacency list from network file");
        println!("2. Perform Dijkstra's algorithm");
        println!("3. Exit");

        let choice = match prompt(&mut input, "Enter your choice: ") {
            Ok(Some(choice)) => choice,
            Ok(None) => break,
            Err(err) => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
        };

        let outcome = match choice.trim() {
            "1" => build_adjacency(&mut input),
            "2" => perform_dijkstra(&mut input),
            "3" => {
                println!("Exiting program...");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(err) if err.is_fatal() => {
                eprintln!("error: {}", err);
                return ExitCode::FAILURE;
            }
            Err(err) => println!("{}", err),
        }
    }

    ExitCode::SUCCESS
}

/// Menu option 1: load the raw network export, write the adjacency list file,
/// and release the graph.
fn build_adjacency(input: &mut impl BufRead) -> Result<()> {
    let network_file = match prompt_with_default(input, "Network file", NETWORK_FILE)? {
        Some(file) => file,
        None => return Ok(()),
    };

    println!("\nLoading edges from network file...");
    let mut graph: TransitGraph<Weight> = TransitGraph::new();
    let summary = network::load_network(Path::new(&network_file), &mut graph)?;
    println!(
        "File loaded successfully: {} records ({} skipped).",
        summary.records, summary.skipped
    );

    println!("\nWriting adjacency list to file...");
    adjacency::write_adjacency(Path::new(ADJACENCY_FILE), &graph)?;
    println!("Adjacency list successfully written to '{}'", ADJACENCY_FILE);

    Ok(())
}

/// Menu option 2: rebuild the graph from the adjacency list file, then run
/// the requested number of trials from a start node.
fn perform_dijkstra(input: &mut impl BufRead) -> Result<()> {
    let mut graph: TransitGraph<Weight> = TransitGraph::new();
    adjacency::read_adjacency(Path::new(ADJACENCY_FILE), &mut graph)?;
    if graph.node_count() == 0 {
        return Err(Error::EmptyNetwork);
    }

    let start_node: NodeId = match prompt_parsed(input, "Enter start node: ")? {
        Some(node) => node,
        None => return Ok(()),
    };
    if !graph.has_node(start_node) {
        return Err(Error::SourceNotFound(start_node));
    }

    let trials: u32 = match prompt_parsed(input, "Enter number of trials: ")? {
        Some(trials) if trials > 0 => trials,
        Some(_) => {
            println!("Number of trials must be at least 1.");
            return Ok(());
        }
        None => return Ok(()),
    };

    let reports = ReportFiles::default();
    run_trials(&InstrumentedDijkstra::new(), &graph, start_node, trials, &reports)?;

    println!("Shortest paths have been saved to {}", reports.paths.display());
    println!(
        "Performance metrics have been saved to {}",
        reports.performance.display()
    );
    println!("Path details have been saved to {}", reports.details.display());

    Ok(())
}

/// Reads one line of input; `None` means end of input
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_with_default(
    input: &mut impl BufRead,
    message: &str,
    default: &str,
) -> Result<Option<String>> {
    let answer = prompt(input, &format!("{} [{}]: ", message, default))?;
    Ok(answer.map(|a| if a.is_empty() { default.to_string() } else { a }))
}

/// Prompts until the answer parses; `None` means end of input
fn prompt_parsed<T: std::str::FromStr>(
    input: &mut impl BufRead,
    message: &str,
) -> Result<Option<T>> {
    loop {
        match prompt(input, message)? {
            None => return Ok(None),
            Some(answer) => match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("Invalid input. Please enter a number."),
            },
        }
    }
}
