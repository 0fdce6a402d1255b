use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chainreach::chain::{concatenate, optimal, sparsify};
use chainreach::graph::edge_list;
use chainreach::{IndexingScheme, Reachability, Strategy};
use clap::Parser;
use serde::Serialize;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chainreach")]
#[command(about = "Chain decomposition and reachability indexing for DAG edge lists", long_about = None)]
struct Cli {
    /// Edge list: one `x,y` edge or lone `x` vertex per line
    file: PathBuf,

    /// Decomposition strategy
    #[arg(long, default_value_t = Strategy::Fast)]
    strategy: Strategy,

    /// Merge chains after decomposing
    #[arg(long, default_value_t = false)]
    concat: bool,

    /// Drop redundant edges before indexing
    #[arg(long, default_value_t = false)]
    sparsify: bool,

    /// Also compute the width with the optimal decomposition
    #[arg(long, default_value_t = false)]
    width: bool,

    /// Reachability query between two vertex ids, repeatable
    #[arg(long = "query", value_name = "SRC,DST", value_parser = parse_query)]
    queries: Vec<(u64, u64)>,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Diagnostics written to stderr at this level and above
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

#[derive(Serialize)]
struct Report {
    vertices: usize,
    edges: usize,
    strategy: Strategy,
    chains: Vec<Vec<u64>>,
    width: Option<usize>,
    merges: Option<usize>,
    transitive_edges: Vec<(u64, u64)>,
    queries: Vec<QueryAnswer>,
}

#[derive(Serialize)]
struct QueryAnswer {
    source: u64,
    target: u64,
    reachable: bool,
}

fn parse_query(s: &str) -> Result<(u64, u64), String> {
    let (source, target) = s
        .split_once(',')
        .ok_or_else(|| format!("expected SRC,DST, found `{s}`"))?;
    let id = |field: &str| {
        field
            .trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid vertex id `{field}`: {e}"))
    };
    Ok((id(source)?, id(target)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let list = edge_list::parse(&text)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;
    let mut dag = list.to_dag()?;
    let mut ranked = dag.ranked().context("the input graph must be acyclic")?;
    let edges = ranked.edge_count();

    let mut decomposition = cli.strategy.decompose(&ranked)?;
    let merges = cli
        .concat
        .then(|| concatenate(&ranked, &mut decomposition))
        .transpose()?;
    let width = match cli.strategy {
        Strategy::Optimal => Some(decomposition.len()),
        _ if cli.width => Some(optimal(&ranked)?.len()),
        _ => None,
    };
    if cli.sparsify {
        ranked = sparsify(&ranked, &decomposition)?;
    }

    let (index, transitive) = IndexingScheme::build_with_transitive_edges(&ranked, &decomposition)?;
    let id = |rank: usize| list.id(ranked.vertex(rank));

    let queries = cli
        .queries
        .iter()
        .map(|&(source, target)| {
            let rank = |v: u64| list.index(v).and_then(|d| ranked.rank(d));
            let reachable = match (rank(source), rank(target)) {
                (Some(s), Some(t)) => index.is_reachable(s, t),
                _ => false,
            };
            QueryAnswer {
                source,
                target,
                reachable,
            }
        })
        .collect();

    let report = Report {
        vertices: ranked.vertex_count(),
        edges,
        strategy: cli.strategy,
        chains: decomposition
            .iter()
            .map(|chain| chain.vertices().iter().map(|&r| id(r)).collect())
            .collect(),
        width,
        merges,
        transitive_edges: transitive.iter().map(|&(s, t)| (id(s), id(t))).collect(),
        queries,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, cli.sparsify.then_some(ranked.edge_count()));
    }
    Ok(())
}

fn print_report(report: &Report, sparse_edges: Option<usize>) {
    println!("vertices: {}", report.vertices);
    println!("edges: {}", report.edges);
    if let Some(sparse) = sparse_edges {
        println!("edges after sparsification: {sparse}");
    }
    println!("strategy: {}", report.strategy);
    println!("chains: {}", report.chains.len());
    if let Some(merges) = report.merges {
        println!("merged chains: {merges}");
    }
    if let Some(width) = report.width {
        println!("width: {width}");
    }
    println!("transitive edges: {}", report.transitive_edges.len());
    for (index, chain) in report.chains.iter().enumerate() {
        let ids: Vec<String> = chain.iter().map(u64::to_string).collect();
        println!("Chain {index}: {}", ids.join(" "));
    }
    for answer in &report.queries {
        println!(
            "reach {} -> {}: {}",
            answer.source, answer.target, answer.reachable
        );
    }
}
