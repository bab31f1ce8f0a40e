use std::{env, fs::{self, File}, io::BufWriter, path::Path, process};

mod config;
mod error;
mod replay;

use error::AppError;

static RESULTS_DIR: &str = "analysis";

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(AppError::Usage);
    }

    let config = config::load_config(args.get(2).map(Path::new))?;

    // Open the input CSV file.
    let in_path = Path::new(&args[1]);
    let samples = replay::read_samples(File::open(in_path)?, config.sample_period())?;
    log::info!("Read {} samples from {}", samples.len(), in_path.display());

    // Every input CSV file gets its own folder in the results directory.
    let name = in_path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| AppError::InvalidPath(in_path.to_path_buf()))?;
    let out_dir = Path::new(RESULTS_DIR).join(name);
    fs::create_dir_all(&out_dir)?;

    let signal_file = BufWriter::new(File::create(out_dir.join("signal.csv"))?);
    let steps_file = BufWriter::new(File::create(out_dir.join("steps.csv"))?);
    let summary = replay::replay(config, &samples, signal_file, steps_file)?;

    log::info!(
        "{} steps at {} bpm, {} of {} samples dropped, results in {}",
        summary.steps, summary.bpm, summary.dropped, summary.samples, out_dir.display()
    );
    Ok(())
}
