use clap::Parser;
use queens_core::{EngineError, Placement, SearchConfig, REFERENCE_PLACEMENT, SIDEWAYS_MAX};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default delay between two ticks
pub const DEFAULT_INTERVAL_MS: u64 = 200;
/// Default number of ticks before giving up
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Hill climbing with sideways moves on the N-Queens board
#[derive(Parser, Debug)]
#[command(name = "queens", version, about)]
pub struct Cli {
    /// Board size N
    #[arg(short = 'n', long, default_value_t = REFERENCE_PLACEMENT.len())]
    pub size: usize,

    /// Sideways moves allowed between improvements (0 = pure hill climbing)
    #[arg(short, long, default_value_t = SIDEWAYS_MAX)]
    pub sideways: usize,

    /// Starting rows, one per column, e.g. 0,5,1,3,2,4,7,6
    #[arg(short, long, value_name = "ROWS", conflicts_with = "random")]
    pub placement: Option<String>,

    /// Start from a random placement
    #[arg(short, long)]
    pub random: bool,

    /// Seed for tie-breaking and random placements
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between ticks in milliseconds
    #[arg(
        short,
        long,
        value_name = "MS",
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(20..=800)
    )]
    pub interval_ms: u64,

    /// Stop after this many ticks
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Perform a single tick and exit
    #[arg(long)]
    pub single_step: bool,

    /// Print the board after every tick
    #[arg(short, long)]
    pub board: bool,

    /// Emit one JSON object per tick instead of text
    #[arg(long)]
    pub json: bool,
}

/// How the driver paces and prints the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub interval: Duration,
    pub max_steps: usize,
    pub single_step: bool,
    pub show_board: bool,
    pub json: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            max_steps: DEFAULT_MAX_STEPS,
            single_step: false,
            show_board: false,
            json: false,
        }
    }
}

impl Cli {
    /// Engine configuration. Without `--placement` the 8x8 reference board is
    /// used, or a random one for other sizes or with `--random`.
    pub fn search_config(&self) -> Result<SearchConfig, EngineError> {
        let initial = match self.placement {
            Some(ref rows) => Some(Placement::parse(rows)?),
            None if self.random || self.size != REFERENCE_PLACEMENT.len() => None,
            None => Some(Placement::new(REFERENCE_PLACEMENT.to_vec())),
        };

        let config = SearchConfig {
            board_size: self.size,
            sideways_max: self.sideways,
            initial,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            interval: Duration::from_millis(self.interval_ms),
            max_steps: self.max_steps,
            single_step: self.single_step,
            show_board: self.board,
            json: self.json,
        }
    }

    /// The given seed, or a fresh one from the OS
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(random_seed)
    }
}

fn random_seed() -> u64 {
    let mut seed_bytes = [0u8; 8];
    if getrandom::getrandom(&mut seed_bytes).is_err() {
        // Fallback: clock-derived seed
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
        seed_bytes = nanos.to_le_bytes();
    }
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("queens").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_use_reference_board() {
        let cli = parse(&[]);
        let config = cli.search_config().unwrap();
        assert_eq!(config, SearchConfig::reference());
        assert_eq!(cli.driver_config(), DriverConfig::default());
    }

    #[test]
    fn test_explicit_placement() {
        let cli = parse(&["-n", "4", "--placement", "0,1,2,3", "--sideways", "0"]);
        let config = cli.search_config().unwrap();
        assert_eq!(config.board_size, 4);
        assert_eq!(config.sideways_max, 0);
        assert_eq!(config.initial, Some(Placement::new(vec![0, 1, 2, 3])));
    }

    #[test]
    fn test_other_sizes_start_random() {
        let cli = parse(&["--size", "12"]);
        assert_eq!(cli.search_config().unwrap().initial, None);

        let cli = parse(&["--random"]);
        assert_eq!(cli.search_config().unwrap().initial, None);
    }

    #[test]
    fn test_placement_length_must_match_size() {
        let cli = parse(&["-n", "5", "-p", "0,1,2,3"]);
        assert!(matches!(
            cli.search_config(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_bad_placement_text() {
        let cli = parse(&["-n", "4", "-p", "0,a,2,3"]);
        assert!(matches!(
            cli.search_config(),
            Err(EngineError::InvalidPlacement(_))
        ));
    }

    #[test]
    fn test_degenerate_size_rejected() {
        let cli = parse(&["-n", "1"]);
        assert!(cli.search_config().is_err());
    }

    #[test]
    fn test_interval_range() {
        assert!(Cli::try_parse_from(["queens", "--interval-ms", "10"]).is_err());
        assert!(Cli::try_parse_from(["queens", "--interval-ms", "900"]).is_err());
        let cli = parse(&["--interval-ms", "20"]);
        assert_eq!(cli.driver_config().interval, Duration::from_millis(20));
    }

    #[test]
    fn test_placement_conflicts_with_random() {
        assert!(Cli::try_parse_from(["queens", "--random", "-p", "0,1"]).is_err());
    }

    #[test]
    fn test_seed() {
        assert_eq!(parse(&["--seed", "7"]).seed(), 7);
    }
}
