use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use log::info;
use structopt::StructOpt;

use joints::input::read_edges;
use joints::{analyze, Config, Graph, Result, RootRule};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "joints",
    about = "Orients an undirected graph by DFS and reports its cut vertices"
)]
struct Opt {
    /// Edge list with one `a b` pair per line, ended by `done` or EOF.
    /// Read from stdin when omitted.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Treat the input file as GFA and use its links as edges
    #[structopt(long, requires = "input")]
    gfa: bool,

    /// Vertex to start the traversal from (default: lowest id)
    #[structopt(short, long)]
    root: Option<usize>,

    /// Also report the root when it has two or more tree children
    #[structopt(long)]
    classic_root: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();
}

fn load_graph(opt: &Opt) -> Result<Graph> {
    match (&opt.input, opt.gfa) {
        (Some(path), true) => Graph::from_gfa_file(path),
        (Some(path), false) => {
            let file = File::open(path)?;
            let input = read_edges(BufReader::new(file))?;
            Ok(input.graph)
        }
        (None, _) => {
            let stdin = io::stdin();
            let input = read_edges(stdin.lock())?;
            Ok(input.graph)
        }
    }
}

fn run(opt: Opt) -> Result<()> {
    let graph = load_graph(&opt)?;
    info!(
        "# vertices: {}, # edges: {}",
        graph.vertex_count(),
        graph.edge_count()
    );

    let mut config = Config::default();
    if let Some(root) = opt.root {
        config = config.with_root(root);
    }
    if opt.classic_root {
        config = config.with_root_rule(RootRule::Classic);
    }

    let analysis = analyze(&graph, &config)?;
    print!("{}", analysis);
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    init_logger(opt.verbose);

    if let Err(err) = run(opt) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
