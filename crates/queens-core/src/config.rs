use crate::{EngineError, EngineResult, Placement};

/// Default number of consecutive sideways moves. Zero gives pure hill climbing.
pub const SIDEWAYS_MAX: usize = 3;

/// Starting board of the reference 8x8 configuration
pub const REFERENCE_PLACEMENT: [usize; 8] = [0, 5, 1, 3, 2, 4, 7, 6];

/// Configuration for a search engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Board size N (N columns, N rows)
    pub board_size: usize,
    /// Sideways moves allowed between two improving moves
    pub sideways_max: usize,
    /// Starting placement; `None` draws one from the engine's random source
    pub initial: Option<Placement>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::reference()
    }
}

impl SearchConfig {
    /// 8x8 board, three sideways moves, fixed starting placement
    pub fn reference() -> Self {
        Self {
            board_size: REFERENCE_PLACEMENT.len(),
            sideways_max: SIDEWAYS_MAX,
            initial: Some(Placement::new(REFERENCE_PLACEMENT.to_vec())),
        }
    }

    /// Reference board with sideways moves disabled
    pub fn pure_hill_climbing() -> Self {
        Self {
            sideways_max: 0,
            ..Self::reference()
        }
    }

    /// `n`x`n` board starting from a random placement
    pub fn with_size(n: usize) -> Self {
        Self {
            board_size: n,
            sideways_max: SIDEWAYS_MAX,
            initial: None,
        }
    }

    /// Check the board size and the starting placement
    pub fn validate(&self) -> EngineResult<()> {
        if self.board_size <= 1 {
            return Err(EngineError::InvalidConfiguration(format!(
                "board size must be at least 2, got {}",
                self.board_size
            )));
        }

        if let Some(ref initial) = self.initial {
            if initial.len() != self.board_size {
                return Err(EngineError::InvalidConfiguration(format!(
                    "placement has {} columns, board has {}",
                    initial.len(),
                    self.board_size
                )));
            }
            if let Some((column, &row)) = initial
                .rows()
                .iter()
                .enumerate()
                .find(|&(_, &row)| row >= self.board_size)
            {
                return Err(EngineError::InvalidConfiguration(format!(
                    "row {} in column {} is outside 0..{}",
                    row, column, self.board_size
                )));
            }
        }

        Ok(())
    }
}
