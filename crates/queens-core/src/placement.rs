use crate::{EngineError, EngineResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Queen rows indexed by column: `rows[c]` is the row of the queen in column `c`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Placement(Vec<usize>);

impl Placement {
    /// Wrap a row-per-column vector. Ranges are checked by [`crate::SearchConfig::validate`].
    pub fn new(rows: Vec<usize>) -> Self {
        Self(rows)
    }

    /// Draw a uniformly random placement for an `n`x`n` board
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        Self((0..n).map(|_| rng.gen_range(0..n)).collect())
    }

    /// Parse rows separated by commas and/or whitespace, e.g. `"0,5,1,3,2,4,7,6"`
    pub fn parse(s: &str) -> EngineResult<Self> {
        let rows = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| EngineError::InvalidPlacement(format!("'{}' is not a row index", token)))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        if rows.is_empty() {
            return Err(EngineError::InvalidPlacement("no rows given".to_string()));
        }
        Ok(Self(rows))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> &[usize] {
        &self.0
    }

    /// Row of the queen in `column`
    pub fn row(&self, column: usize) -> Option<usize> {
        self.0.get(column).copied()
    }

    pub(crate) fn set(&mut self, column: usize, row: usize) {
        self.0[column] = row;
    }

    /// Copy of this placement with `mv` applied
    pub fn with_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.set(mv.column, mv.to);
        next
    }

    /// Number of attacking pairs
    pub fn conflicts(&self) -> usize {
        conflict_count(&self.0)
    }

    /// Compact form accepted by [`Placement::parse`]
    pub fn to_string_compact(&self) -> String {
        self.0
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::str::FromStr for Placement {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<usize>> for Placement {
    fn from(rows: Vec<usize>) -> Self {
        Self(rows)
    }
}

/// Board view with the highest row on top and row 0 at the bottom
impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.0.len();
        for row in (0..n).rev() {
            let line: Vec<&str> = self
                .0
                .iter()
                .map(|&r| if r == row { "Q" } else { "." })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Relocation of one queen within its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(column: usize, from: usize, to: usize) -> Self {
        Self { column, from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "column {}: row {} -> {}", self.column, self.from, self.to)
    }
}

/// Count the pairs of queens sharing a row or a diagonal.
///
/// Columns never conflict since each holds exactly one queen. Zero means the
/// placement solves the puzzle.
pub fn conflict_count(rows: &[usize]) -> usize {
    let mut h = 0;
    for (c1, &r1) in rows.iter().enumerate() {
        for (offset, &r2) in rows[c1 + 1..].iter().enumerate() {
            let dc = offset + 1;
            if r1 == r2 || r1.abs_diff(r2) == dc {
                h += 1;
            }
        }
    }
    h
}

/// Count the queens outside `column` that attack square (`column`, `row`).
///
/// The queen currently standing in `column` is ignored, so the cost of moving
/// it to `row` is `conflict_count - attacks_on(old) + attacks_on(row)`.
pub fn attacks_on(rows: &[usize], column: usize, row: usize) -> usize {
    rows.iter()
        .enumerate()
        .filter(|&(c, &r)| c != column && (r == row || r.abs_diff(row) == c.abs_diff(column)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_conflict_count_diagonal() {
        // Every pair sits on the main diagonal
        assert_eq!(conflict_count(&[0, 1, 2, 3]), 6);
    }

    #[test]
    fn test_conflict_count_same_row() {
        assert_eq!(conflict_count(&[0, 0, 0, 0]), 6);
        assert_eq!(conflict_count(&[2, 2]), 1);
    }

    #[test]
    fn test_conflict_count_solutions() {
        assert_eq!(conflict_count(&[1, 3, 0, 2]), 0);
        assert_eq!(conflict_count(&[0, 4, 7, 5, 2, 6, 1, 3]), 0);
    }

    #[test]
    fn test_conflict_count_reference_board() {
        assert_eq!(conflict_count(&[0, 5, 1, 3, 2, 4, 7, 6]), 8);
    }

    #[test]
    fn test_conflict_count_every_two_column_board_conflicts() {
        for a in 0..2 {
            for b in 0..2 {
                assert_eq!(conflict_count(&[a, b]), 1);
            }
        }
    }

    #[test]
    fn test_conflict_count_invariant_under_mirroring() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 2..10 {
            for _ in 0..20 {
                let p = Placement::random(n, &mut rng);
                let h = p.conflicts();

                // Reverse column order
                let mut mirrored: Vec<usize> = p.rows().to_vec();
                mirrored.reverse();
                assert_eq!(conflict_count(&mirrored), h);

                // Flip rows upside down
                let flipped: Vec<usize> = p.rows().iter().map(|&r| n - 1 - r).collect();
                assert_eq!(conflict_count(&flipped), h);
            }
        }
    }

    #[test]
    fn test_attacks_on_matches_full_recount() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 2..9 {
            let p = Placement::random(n, &mut rng);
            let h = p.conflicts();
            for column in 0..n {
                let old = p.rows()[column];
                for row in 0..n {
                    let moved = p.with_move(Move::new(column, old, row));
                    let delta = h - attacks_on(p.rows(), column, old) + attacks_on(p.rows(), column, row);
                    assert_eq!(moved.conflicts(), delta, "{:?} col {} -> {}", p, column, row);
                }
            }
        }
    }

    #[test]
    fn test_parse() {
        let p = Placement::parse("0,5,1,3,2,4,7,6").unwrap();
        assert_eq!(p.rows(), &[0, 5, 1, 3, 2, 4, 7, 6]);

        let p: Placement = "1 3  0,2".parse().unwrap();
        assert_eq!(p.rows(), &[1, 3, 0, 2]);
        assert_eq!(p.to_string_compact(), "1,3,0,2");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Placement::parse("0,x,2"),
            Err(EngineError::InvalidPlacement(_))
        ));
        assert!(matches!(
            Placement::parse(" , "),
            Err(EngineError::InvalidPlacement(_))
        ));
        assert!(Placement::parse("-1,2").is_err());
    }

    #[test]
    fn test_display_puts_row_zero_at_bottom() {
        let p = Placement::new(vec![1, 3, 0, 2]);
        let text = p.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], ". Q . .");
        assert_eq!(lines[3], ". . Q .");
    }

    #[test]
    fn test_random_stays_on_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = Placement::random(12, &mut rng);
        assert_eq!(p.len(), 12);
        assert!(p.rows().iter().all(|&r| r < 12));
    }

    #[test]
    fn test_serde_transparent() {
        let p = Placement::new(vec![1, 3, 0, 2]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1,3,0,2]");
    }
}
