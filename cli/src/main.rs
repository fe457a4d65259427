#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Result;
use structopt::StructOpt;

use model::{TrajectoryRecord, TrajectoryStatistics};

#[derive(StructOpt)]
#[structopt(name = "trajectory-stats")]
struct Args {
    /// The path to a directory of trajectory JSON files
    input_folder: PathBuf,
}

/// Where the aggregate table lands.
const OUTPUT_PATH: &str = "all_stats.csv";

const HEADER: [&str; 5] = [
    "total_length",
    "duration",
    "average_speed",
    "median_heading_deviation",
    "sd_heading_deviation",
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();

    let mut rows: Vec<TrajectoryStatistics> = Vec::new();
    let mut failures = 0;
    for path in list_trajectory_files(&args.input_folder)? {
        info!("reading file {}", path.display());
        match analyze_file(&path) {
            Ok(stats) => rows.push(stats),
            Err(err) => {
                error!("{} didn't work: {}", path.display(), err);
                failures += 1;
            }
        }
    }

    write_table(Path::new(OUTPUT_PATH), &rows)?;
    info!("wrote {} rows to {}", rows.len(), OUTPUT_PATH);

    if failures > 0 {
        bail!("{} trajectories failed", failures);
    }
    Ok(())
}

fn list_trajectory_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|ext| ext == "json").unwrap_or(false) {
            paths.push(path);
        }
    }
    // Directory listing order is filesystem-dependent; sort for stable output
    paths.sort();
    Ok(paths)
}

fn analyze_file(path: &Path) -> Result<TrajectoryStatistics> {
    let file = fs_err::File::open(path)?;
    let record = TrajectoryRecord::from_reader(BufReader::new(file))?;
    record.to_trajectory()?.statistics()
}

/// Writes the header even when no trajectory succeeded, so downstream
/// tooling always sees a well-formed table.
fn write_table(path: &Path, rows: &[TrajectoryStatistics]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(fs_err::File::create(path)?);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
