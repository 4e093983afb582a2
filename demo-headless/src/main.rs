//! Headless forest fire experiment driver
//!
//! Runs one (density, wind) configuration to quiescence with per-step data
//! collection and CSV export, or sweeps a whole parameter lattice with
//! independent replicates in parallel. All simulation behavior lives in
//! `forest-fire-core`; this binary only drives it and records results.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use forest_fire_core::{CellState, ForestFire, SimError};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

/// Distinct replicate seeds derived from one base seed (Weyl increment).
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Forest fire simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Forest fire percolation simulation demo", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Probability that a cell holds a tree
    #[arg(short, long, default_value_t = 0.65)]
    density: f32,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 10.0)]
    wind: f32,

    /// RNG seed (a random seed is drawn if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cap on simulation ticks in single-run mode (0 = run to quiescence)
    #[arg(long, default_value_t = 0)]
    max_steps: u64,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 10)]
    report_interval: u64,

    /// Output CSV path (derived from the parameters if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sweep a (density x wind) lattice instead of running once
    #[arg(long)]
    sweep: bool,

    /// Sweep: lowest tree density
    #[arg(long, default_value_t = 0.1)]
    density_from: f32,

    /// Sweep: highest tree density
    #[arg(long, default_value_t = 1.0)]
    density_to: f32,

    /// Sweep: density increment
    #[arg(long, default_value_t = 0.1)]
    density_step: f32,

    /// Sweep: lowest wind speed in m/s
    #[arg(long, default_value_t = 0.0)]
    wind_from: f32,

    /// Sweep: highest wind speed in m/s
    #[arg(long, default_value_t = 50.0)]
    wind_to: f32,

    /// Sweep: wind increment in m/s
    #[arg(long, default_value_t = 10.0)]
    wind_step: f32,

    /// Sweep: independent replicates per configuration
    #[arg(long, default_value_t = 3)]
    replicates: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.sweep {
        run_sweep(&args)?;
    } else {
        run_single(&args)?;
    }
    Ok(())
}

/// One collected row of the per-step data series.
struct StepRecord {
    steps: u64,
    /// Populations in `CellState::TREE_STATES` order.
    populations: [usize; 4],
    clusters_fine: usize,
    clusters_put_out: usize,
}

fn collect(run: &ForestFire) -> StepRecord {
    StepRecord {
        steps: run.steps(),
        populations: CellState::TREE_STATES.map(|state| run.population(state)),
        clusters_fine: run.cluster_count(CellState::Fine),
        clusters_put_out: run.cluster_count(CellState::FirePutOut),
    }
}

fn report(record: &StepRecord) {
    println!(
        "{:5} | {:7} | {:7} | {:10} | {:12} | {:14}",
        record.steps,
        record.populations[0],
        record.populations[1],
        record.populations[2],
        record.populations[3],
        record.clusters_fine
    );
}

fn run_single(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut run = match args.seed {
        Some(seed) => {
            ForestFire::with_seed(args.width, args.height, args.density, args.wind, seed)?
        }
        None => ForestFire::new(args.width, args.height, args.density, args.wind)?,
    };

    println!("=== Forest Fire Simulation ===\n");
    println!(
        "{}x{} grid, density {:.2}, wind {:.1} m/s, seed {}",
        run.width(),
        run.height(),
        run.density(),
        run.wind(),
        run.seed()
    );
    println!();
    println!(" Step |    Fine | On Fire | Burned Out | Fire Put Out | Clusters(Fine)");
    println!("------|---------|---------|------------|--------------|---------------");

    // The initial state is collected too, before any tick runs
    let mut series = Vec::new();
    let initial = collect(&run);
    report(&initial);
    series.push(initial);

    let report_interval = args.report_interval.max(1);
    let mut ticks = 0;
    loop {
        let result = run.step();
        ticks += 1;

        let record = collect(&run);
        if result.is_terminal || record.steps % report_interval == 0 {
            report(&record);
        }
        series.push(record);

        if result.is_terminal {
            break;
        }
        if args.max_steps > 0 && ticks >= args.max_steps {
            println!("(stopped at the {ticks}-tick cap before quiescence)");
            break;
        }
    }

    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {ticks}");
    for state in CellState::TREE_STATES {
        println!("{}: {}", state.label(), run.population(state));
    }
    println!(
        "Clusters: {} (Fine), {} (Fire Put Out)",
        run.cluster_count(CellState::Fine),
        run.cluster_count(CellState::FirePutOut)
    );

    let path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "model_data_wind={}_density={}_seed={}.csv",
            run.wind(),
            run.density(),
            run.seed()
        ))
    });
    write_series(&path, &series)?;
    println!("Wrote {} rows to {}", series.len(), path.display());

    Ok(())
}

fn write_series(path: &Path, series: &[StepRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(
        out,
        "Fine,On Fire,Burned Out,Fire Put Out,Total steps of the fire forest,\
         Number of clusters (Fine),Number of clusters (Fire Put Out)"
    )?;
    for record in series {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            record.populations[0],
            record.populations[1],
            record.populations[2],
            record.populations[3],
            record.steps,
            record.clusters_fine,
            record.clusters_put_out
        )?;
    }
    out.flush()
}

/// Aggregate outcome of one sweep replicate run to quiescence.
struct SweepRecord {
    density: f32,
    wind: f32,
    replicate: u64,
    seed: u64,
    steps: u64,
    fine: usize,
    burned_out: usize,
    fire_put_out: usize,
    clusters_fine: usize,
    clusters_put_out: usize,
}

/// Inclusive arithmetic progression from `from` to `to`.
///
/// The element count is fixed up front so float accumulation can neither
/// drop the endpoint nor overshoot it.
fn axis(from: f32, to: f32, step: f32) -> Vec<f32> {
    if step <= 0.0 || to < from {
        return vec![from];
    }
    let count = ((to - from) / step + 1e-3).floor() as u64 + 1;
    (0..count).map(|i| (from + i as f32 * step).min(to)).collect()
}

fn run_sweep(args: &Args) -> Result<(), Box<dyn Error>> {
    let densities = axis(args.density_from, args.density_to, args.density_step);
    let winds = axis(args.wind_from, args.wind_to, args.wind_step);
    let base_seed = args.seed.unwrap_or(42);

    let mut configs = Vec::new();
    for &density in &densities {
        for &wind in &winds {
            for replicate in 0..args.replicates {
                let index = configs.len() as u64;
                let seed = base_seed.wrapping_add(index.wrapping_mul(SEED_STRIDE));
                configs.push((density, wind, replicate, seed));
            }
        }
    }

    println!("=== Forest Fire Parameter Sweep ===\n");
    println!(
        "{} densities x {} winds x {} replicates = {} runs on a {}x{} grid",
        densities.len(),
        winds.len(),
        args.replicates,
        configs.len(),
        args.width,
        args.height
    );

    let records: Vec<SweepRecord> = configs
        .par_iter()
        .map(|&(density, wind, replicate, seed)| -> Result<SweepRecord, SimError> {
            let mut run = ForestFire::with_seed(args.width, args.height, density, wind, seed)?;
            while !run.step().is_terminal {}

            Ok(SweepRecord {
                density,
                wind,
                replicate,
                seed,
                steps: run.steps(),
                fine: run.population(CellState::Fine),
                burned_out: run.population(CellState::BurnedOut),
                fire_put_out: run.population(CellState::FirePutOut),
                clusters_fine: run.cluster_count(CellState::Fine),
                clusters_put_out: run.cluster_count(CellState::FirePutOut),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("sweep_data.csv"));
    write_sweep(&path, &records)?;
    println!("Wrote {} rows to {}", records.len(), path.display());

    Ok(())
}

fn write_sweep(path: &Path, records: &[SweepRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(
        out,
        "density,wind,replicate,seed,Total steps of the fire forest,Fine,Burned Out,\
         Fire Put Out,Number of clusters (Fine),Number of clusters (Fire Put Out)"
    )?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            r.density,
            r.wind,
            r.replicate,
            r.seed,
            r.steps,
            r.fine,
            r.burned_out,
            r.fire_put_out,
            r.clusters_fine,
            r.clusters_put_out
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_hits_both_endpoints() {
        let densities = axis(0.1, 1.0, 0.1);
        assert_eq!(densities.len(), 10);
        assert!((densities[0] - 0.1).abs() < 1e-6);
        assert!((densities[9] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_axis_never_overshoots() {
        let winds = axis(0.0, 1.0, 0.4);
        assert_eq!(winds.len(), 3);
        assert!(winds.iter().all(|&w| w <= 1.0));
    }

    #[test]
    fn test_degenerate_axis_is_single_point() {
        assert_eq!(axis(0.5, 0.5, 0.1), vec![0.5]);
        assert_eq!(axis(0.5, 0.2, 0.1), vec![0.5]);
        assert_eq!(axis(0.5, 1.0, 0.0), vec![0.5]);
    }
}
