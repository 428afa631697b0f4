mod app;
mod cli;

use app::App;
use clap::Parser;
use cli::Cli;
use log::info;
use queens_core::{EngineError, HillClimber, Termination};
use std::io::{self, Write};
use std::process;

/// Errors that end the driver
#[derive(Debug)]
enum CliError {
    Engine(EngineError),
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Drive the engine on a fixed interval until it stops. Returns the exit code.
fn run(cli: &Cli) -> Result<i32, CliError> {
    let search = cli.search_config()?;
    let driver = cli.driver_config();
    let seed = cli.seed();
    info!(
        "N = {}, sideways_max = {}, seed = {}",
        search.board_size, search.sideways_max, seed
    );

    let engine = HillClimber::with_seed(search, seed)?;
    let mut app = App::new(engine, driver);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.render_initial(&mut out)?;

    if app.config().single_step {
        app.single_step(&mut out)?;
        out.flush()?;
        return Ok(0);
    }

    let termination = app.drive(&mut out, std::thread::sleep)?;
    out.flush()?;

    let report = app.engine().status();
    eprintln!(
        "{} after {} ticks (h = {}, moves = {})",
        termination,
        app.ticks(),
        report.cost,
        report.moves
    );
    info!("seed {} ended with {:?}", seed, termination);

    Ok(match termination {
        Termination::Solved => 0,
        Termination::Stuck | Termination::StepLimit => 2,
    })
}
