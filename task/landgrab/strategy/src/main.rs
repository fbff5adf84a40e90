#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use landgrab_strategy::{
    harness::Harness,
    invoker::Strategy,
    strategy::{Greedy, Pathfinder, RandomWalk},
};
use rand::{rngs::StdRng, SeedableRng};

use std::io::{stdin, stdout};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Builtin {
    Random,
    Greedy,
    Pathfinder,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Arguments {
    #[arg(short, long, value_enum, default_value_t = Builtin::Pathfinder)]
    strategy: Builtin,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t = 2)]
    log_level: usize,
}

fn serve(strategy: impl Strategy) -> anyhow::Result<()> {
    let mut harness = Harness::new(strategy);
    harness
        .run(stdin().lock(), stdout().lock())
        .context("failed to deliver action")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();

    stderrlog::new()
        .verbosity(args.log_level)
        .module(module_path!())
        .module("landgrab_strategy")
        .init()
        .context("failed to set up logging")?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match args.strategy {
        Builtin::Random => serve(RandomWalk::new(rng)),
        Builtin::Greedy => serve(Greedy::new(rng)),
        Builtin::Pathfinder => serve(Pathfinder::new(rng)),
    }
}
