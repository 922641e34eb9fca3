use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::{thread_rng, Rng};

/// Generates a random parity game in PGSolver format.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Output file.
    out: PathBuf,
    /// Number of vertices.
    vertices: usize,
    /// Highest priority a vertex can get.
    max_priority: usize,
    /// Successors per vertex, capped at the number of vertices.
    out_degree: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.vertices > 0, "the game needs at least one vertex");
    ensure!(args.out_degree > 0, "every vertex needs at least one successor");

    let out = File::create(&args.out)
        .with_context(|| format!("cannot create output file {}", args.out.display()))?;

    let mut rng = thread_rng();
    let out_degree = args.out_degree.min(args.vertices);

    let mut game = Vec::with_capacity(args.vertices);
    for _ in 0..args.vertices {
        let priority = rng.gen_range(0..=args.max_priority);
        let owner = rng.gen_range(0..2u8);

        let mut successors = BTreeSet::new();
        while successors.len() < out_degree {
            successors.insert(rng.gen_range(0..args.vertices));
        }
        game.push((priority, owner, successors));
    }

    write_output(out, game).context("failed to write output file")
}

fn write_output(out: File, game: Vec<(usize, u8, BTreeSet<usize>)>) -> Result<()> {
    let mut out = BufWriter::new(out);

    writeln!(out, "parity {};", game.len() - 1)?;

    for (vertex, (priority, owner, successors)) in game.into_iter().enumerate() {
        let successors = successors.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        writeln!(out, "{} {} {} {};", vertex, priority, owner, successors.join(","))?;
    }

    out.flush()?;
    Ok(())
}
