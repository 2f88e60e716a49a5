use std::error::Error;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use rota_core::{resolve_seed, RngHandle, SeedSource};
use rota_gen::{GenerationError, RunConfig, SequenceGenerator};
use rota_report::{grid_for_run, RunSummary};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// JSON configuration with names, rounds, window, tries, seed and start date.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,
    /// Destination of the CSV grid.
    #[arg(long, default_value = "assignments.csv")]
    pub out: PathBuf,
    /// Seed overriding `random_seed` from the configuration.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Also write a JSON run summary to this path.
    #[arg(long)]
    pub summary: Option<PathBuf>,
    /// On failure, write the completed days to `<out>.partial`.
    #[arg(long)]
    pub emit_partial: bool,
    /// Suppress the progress dots.
    #[arg(long)]
    pub quiet: bool,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = RunConfig::load(&args.config)?;
    let (seed, seed_source) = resolve_seed(config.random_seed, args.seed);
    if seed_source == SeedSource::Entropy {
        info!(seed, "no random_seed configured; pass --seed {seed} to replay this run");
    }

    let mut generator = SequenceGenerator::new(&config, RngHandle::from_seed(seed))?;
    info!(
        days = generator.num_days(),
        participants = generator.roster().len(),
        window = config.history_length,
        max_tries = config.max_tries,
        seed,
        "generating call rota"
    );

    let mut progress = Progress::new(args.quiet);
    progress.start()?;
    let outcome = loop {
        match generator.next_day() {
            Ok(Some(_)) => progress.tick()?,
            Ok(None) => break Ok(()),
            Err(err) => break Err(err),
        }
    };
    progress.finish()?;

    if let Some(path) = &args.summary {
        RunSummary::new(&config, seed, seed_source, generator.attempts())?.write(path)?;
    }

    match outcome {
        Ok(()) => {
            write_grid(&config, &generator, &args.out)?;
            println!("results written to : {}", args.out.display());
            Ok(())
        }
        Err(err) => {
            if let GenerationError::MaxTriesExceeded { day, max_tries } = &err {
                println!(
                    "[ERROR] max tries {max_tries} reached on day {day}, increase `max_tries` and run again."
                );
            }
            if args.emit_partial && !generator.history().is_empty() {
                let partial = partial_path(&args.out);
                write_grid(&config, &generator, &partial)?;
                warn!(
                    path = %partial.display(),
                    days = generator.history().len(),
                    "wrote completed days of the aborted run"
                );
            }
            Err(rota_core::RotaError::from(err).into())
        }
    }
}

fn write_grid(
    config: &RunConfig,
    generator: &SequenceGenerator,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let grid = grid_for_run(config, generator.roster(), generator.history())?;
    grid.write_csv_path(path)?;
    Ok(())
}

fn partial_path(out: &Path) -> PathBuf {
    let mut name = OsString::from(out.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

/// One dot per accepted day on stdout.
struct Progress {
    quiet: bool,
}

impl Progress {
    fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn start(&mut self) -> io::Result<()> {
        self.emit("generating")
    }

    fn tick(&mut self) -> io::Result<()> {
        self.emit(".")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.emit("\n")
    }

    fn emit(&mut self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}
