use std::{fs::File, path::PathBuf};

use log::{info, LevelFilter};
use structopt::StructOpt;
use tsp::{log::build_logger_for_verbosity, prelude::*};

#[derive(StructOpt)]
pub enum Algorithm {
    /// Subset dynamic program; exact in O(n^2 * 2^n)
    HeldKarp,
    /// Exhaustive permutation search; exact reference backend
    BruteForce,
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::HeldKarp
    }
}

#[derive(Default, StructOpt)]
struct Opts {
    #[structopt(short, long)]
    instance: Option<PathBuf>,

    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,

    #[structopt(subcommand)]
    cmd: Option<Algorithm>,
}

fn load_instance(path: &Option<PathBuf>) -> anyhow::Result<CostMatrix> {
    if let Some(path) = path {
        Ok(CostMatrix::try_read_tsp_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(CostMatrix::try_read_tsp(stdin)?)
    }
}

fn write_result(tour: &Tour, matrix: &CostMatrix, path: &Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = path {
        let file = File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        tour.write(matrix, writer)?;
    } else {
        let writer = std::io::stdout();
        tour.write(matrix, writer)?;
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let matrix = load_instance(&opts.instance)?;
    info!("Instance with {} vertices", matrix.number_of_vertices());

    let tour = match opts.cmd.unwrap_or_default() {
        Algorithm::HeldKarp => {
            info!("Start Held-Karp Solver");
            HeldKarp::new(&matrix)?.solve()
        }
        Algorithm::BruteForce => {
            info!("Start Brute Force Solver");
            brute_force_solver(&matrix)
        }
    };

    match tour {
        Some(tour) => {
            assert!(tour.is_valid(&matrix), "Produced tour is not valid");
            write_result(&tour, &matrix, &opts.output)?;
        }
        None => println!("No Hamiltonian Cycle"),
    }

    Ok(())
}
