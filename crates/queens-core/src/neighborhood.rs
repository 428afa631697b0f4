//! Single-queen relocation neighborhood.
//!
//! A neighbor moves one queen to a different row of its own column, so every
//! placement on an `n`x`n` board has exactly `n * (n - 1)` neighbors. Costs are
//! derived from the current conflict count by removing the attacks on the old
//! square and adding the attacks on the new one, which is `O(n)` per candidate
//! instead of a full `O(n^2)` recount.

use crate::placement::{attacks_on, conflict_count, Move, Placement};

/// A candidate placement together with the move that produced it and its cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    pub placement: Placement,
    pub mv: Move,
    pub cost: usize,
}

/// Enumerate every neighbor of `placement`, column by column and row by row.
///
/// Rows must lie on the board; see [`neighbor_costs`].
pub fn neighbors(placement: &Placement) -> Vec<Neighbor> {
    neighbor_costs(placement)
        .into_iter()
        .map(|(mv, cost)| Neighbor {
            placement: placement.with_move(mv),
            mv,
            cost,
        })
        .collect()
}

/// Score every neighbor without building the candidate placements.
///
/// Same order as [`neighbors`]. Every row of `placement` must be below its
/// length, which [`crate::SearchConfig::validate`] guarantees for engine boards.
pub fn neighbor_costs(placement: &Placement) -> Vec<(Move, usize)> {
    let rows = placement.rows();
    let n = rows.len();
    let current = conflict_count(rows);
    let mut scored = Vec::with_capacity(n * n.saturating_sub(1));

    for (column, &from) in rows.iter().enumerate() {
        debug_assert!(from < n, "row {} in column {} is outside 0..{}", from, column, n);
        let base = current - attacks_on(rows, column, from);
        for to in (0..n).filter(|&to| to != from) {
            scored.push((Move::new(column, from, to), base + attacks_on(rows, column, to)));
        }
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_neighborhood_size() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in 2..10 {
            let p = Placement::random(n, &mut rng);
            assert_eq!(neighbors(&p).len(), n * (n - 1));
        }
    }

    #[test]
    fn test_neighbors_differ_in_one_column() {
        let p = Placement::new(vec![0, 5, 1, 3, 2, 4, 7, 6]);
        for nb in neighbors(&p) {
            assert_ne!(nb.placement, p);
            let changed: Vec<usize> = (0..p.len())
                .filter(|&c| nb.placement.rows()[c] != p.rows()[c])
                .collect();
            assert_eq!(changed, vec![nb.mv.column]);
            assert_eq!(nb.mv.from, p.rows()[nb.mv.column]);
            assert_eq!(nb.placement.rows()[nb.mv.column], nb.mv.to);
        }
    }

    #[test]
    fn test_incremental_costs_match_recount() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 2..12 {
            let p = Placement::random(n, &mut rng);
            for nb in neighbors(&p) {
                assert_eq!(nb.cost, nb.placement.conflicts());
            }
        }
    }

    #[test]
    fn test_no_neighbor_beats_a_solution() {
        let p = Placement::new(vec![1, 3, 0, 2]);
        assert_eq!(p.conflicts(), 0);
        assert!(neighbor_costs(&p).iter().all(|&(_, cost)| cost > 0));
    }

    #[test]
    fn test_costs_follow_neighbor_order() {
        let p = Placement::new(vec![0, 1, 2, 3]);
        let full = neighbors(&p);
        let scored = neighbor_costs(&p);
        assert_eq!(full.len(), scored.len());
        for (nb, (mv, cost)) in full.iter().zip(scored) {
            assert_eq!(nb.mv, mv);
            assert_eq!(nb.cost, cost);
        }
        assert_eq!(full[0].mv, Move::new(0, 0, 1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "row 9 in column 1 is outside 0..3")]
    fn test_rows_off_board_are_rejected() {
        neighbors(&Placement::new(vec![0, 9, 1]));
    }
}
