use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use parity::{load_game, write_solution};
use spm::{solve, Output, OutputMode, SolverConfig, VertexId, VertexOrder};

#[derive(Parser)]
#[command(author, version, about = "Solve a parity game with small progress measures")]
struct Args {
    /// Parity game in PGSolver format.
    game: PathBuf,
    /// Order in which vertices are lifted.
    #[arg(long, value_enum, default_value_t = VertexOrder::Input)]
    order: VertexOrder,
    /// Print the winner of every vertex or only of the start vertex.
    #[arg(long, value_enum, default_value_t = Report::Partition)]
    output: Report,
    /// Vertex queried by `--output vertex`.
    #[arg(long, default_value_t = 0)]
    start: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Report {
    Partition,
    Vertex,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let now = Instant::now();

    let path = args.game.display();
    let file = std::fs::read_to_string(&args.game)
        .with_context(|| format!("failed to read parity game file {path}"))?;
    let game = load_game(&file).with_context(|| format!("failed to load {path}"))?;
    ensure!(args.start < game.vertex_count(), "start vertex {} is not in the game", args.start);

    let output = match args.output {
        Report::Partition => OutputMode::Partition,
        Report::Vertex => OutputMode::Vertex(VertexId(args.start)),
    };
    let config = SolverConfig { order: args.order, output };

    log::info!("preprocessing took {:?}", now.elapsed());

    let now = Instant::now();

    let output = solve(&game, &config);

    log::info!("solve took {:?} with {:?} order", now.elapsed(), config.order);

    match output {
        Output::Partition(even_wins) => {
            let mut out = BufWriter::new(io::stdout().lock());
            write_solution(&mut out, &even_wins)?;
            out.flush()?;
        }
        Output::Vertex(even_wins) => {
            println!("Winner: player {}", if even_wins { 0 } else { 1 });
        }
    }

    Ok(())
}
