//! Hill-climbing local search for the N-Queens problem.
//!
//! The board holds exactly one queen per column, so a state is a
//! [`Placement`]: one row index per column. The search minimises the number
//! of attacking pairs ([`conflict_count`]) by relocating a single queen at a
//! time, taking the best improving move when one exists and a bounded number
//! of sideways (equal cost) moves otherwise.
//!
//! [`HillClimber`] owns the search state. A driver calls
//! [`HillClimber::step`] once per tick and decides when to stop:
//!
//! ```
//! use queens_core::{HillClimber, Placement, SearchConfig, StepKind};
//!
//! let config = SearchConfig {
//!     board_size: 4,
//!     sideways_max: 3,
//!     initial: Some(Placement::new(vec![0, 1, 2, 3])),
//! };
//! let mut engine = HillClimber::with_seed(config, 42).unwrap();
//! assert_eq!(engine.cost(), 6);
//!
//! let result = engine.step();
//! assert!(result.moved);
//! assert!(matches!(result.kind, StepKind::Improved | StepKind::Sideways));
//! assert!(engine.cost() <= 6);
//! ```

mod config;
mod engine;
mod error;
mod neighborhood;
mod placement;

pub use config::{SearchConfig, REFERENCE_PLACEMENT, SIDEWAYS_MAX};
pub use engine::{HillClimber, SearchReport, SearchStatus, StepKind, StepResult, Termination};
pub use error::{EngineError, EngineResult};
pub use neighborhood::{neighbor_costs, neighbors, Neighbor};
pub use placement::{attacks_on, conflict_count, Move, Placement};
