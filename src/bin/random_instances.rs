use std::path::PathBuf;

use log::{info, LevelFilter};
use rand::{Rng, SeedableRng};
use structopt::StructOpt;
use tsp::{log::build_logger_for_verbosity, prelude::*};

#[derive(Debug, StructOpt)]
struct Opt {
    /// Number of instances per size
    #[structopt(short, long, default_value = "10")]
    repeats: u32,

    /// Instance sizes to generate
    #[structopt(short, long, default_value = "6,8,10", use_delimiter = true)]
    nodes: Vec<NumVertices>,

    /// Largest finite edge cost
    #[structopt(short, long, default_value = "100")]
    max_cost: Cost,

    /// Probability of replacing an edge by an infinite cost
    #[structopt(short = "p", long, default_value = "0.0")]
    inf_probability: f64,

    #[structopt(short, long, default_value = "1234")]
    seed: u64,

    /// Directory the .tsp files are written to
    #[structopt(short, long, default_value = "instances/random")]
    output: PathBuf,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn random_instance(rng: &mut impl Rng, n: NumVertices, opt: &Opt) -> CostMatrix {
    let mut matrix = CostMatrix::new(n);

    for u in matrix.vertices() {
        for v in matrix.vertices() {
            if u == v {
                continue;
            }

            let cost = if rng.gen_bool(opt.inf_probability) {
                INFINITE_COST
            } else {
                rng.gen_range(1..=opt.max_cost)
            };
            matrix.set_cost(u, v, cost);
        }
    }

    matrix
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_logger_for_verbosity(LevelFilter::Info, opt.verbose);

    std::fs::create_dir_all(&opt.output)?;

    let mut rng = rand_pcg::Pcg64::seed_from_u64(opt.seed);

    for &n in &opt.nodes {
        for i in 0..opt.repeats {
            let matrix = random_instance(&mut rng, n, &opt);

            let path = opt.output.join(format!("random_n{n:02}_{i:03}.tsp"));
            matrix.try_write_tsp_file(&path)?;

            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
