//! Fills a set with pseudo-random keys and verifies it.

use anyhow::{Context, Result};
use avl::Set;
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// Doc comments on the fields are used to generate the `--help` message.
#[derive(Parser, Debug)]
#[command(name = "avl", about = "Inserts seeded pseudo-random keys into an AVL set and verifies it")]
struct CliOpts {
    /// Seed of the key generator; the same seed always yields the same keys
    #[arg(long, default_value_t = 20200705)]
    seed: u64,
    /// Number of keys to draw
    #[arg(long, default_value_t = 1000)]
    count: usize,
    /// Keys are drawn uniformly from `0..bound`
    #[arg(long, default_value_t = 10000, value_parser = clap::value_parser!(i32).range(1..))]
    bound: i32,
}

/// Initialize the logger, printing the level and the source location of each record.
///
/// The level defaults to `info` and can be changed through `RUST_LOG`.
fn initialize_logger() {
    use env_logger::{Builder, Env};
    use std::io::Write;

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}:{}] {}",
            record.level(),
            record.module_path().unwrap_or(""),
            record.line().map_or(String::new(), |line| line.to_string()),
            record.args()
        )
    });

    builder.init();
}

fn main() -> Result<()> {
    initialize_logger();
    let opts = CliOpts::parse();
    info!("drawing {} keys below {} with seed {}", opts.count, opts.bound, opts.seed);

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut set = Set::new();
    let mut duplicates = 0;

    for _ in 0..opts.count {
        if let Err(err) = set.insert(rng.gen_range(0..opts.bound)) {
            warn!("{}", err);
            duplicates += 1;
        }
    }

    set.verify().context("AVL invariants do not hold")?;

    info!("inserted {} keys, rejected {} duplicates", set.len(), duplicates);
    info!("height {}, fixups {}", set.height(), set.fixups());
    info!("verification passed");
    Ok(())
}
