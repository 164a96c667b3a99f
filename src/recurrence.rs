//! The single recurrence step shared by both aligners.
//!
//! For a cell `(i, j)` with `i, j >= 1`:
//!
//! ```text
//! cost[i][j] = min( sub(X[i-1], Y[j-1]) + cost[i-1][j-1],   // Diagonal
//!                   gap + cost[i-1][j],                      // Above: X[i-1] unmatched
//!                   gap + cost[i][j-1] )                     // Left:  Y[j-1] unmatched
//! ```
//!
//! Ties resolve to the earliest candidate in the order Diagonal, Above, Left.
//! This order decides which of several equal-cost alignments is reconstructed.

/// Predecessor that produced a cell's optimal cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// From `(i-1, j-1)`: `X[i-1]` aligned with `Y[j-1]`.
    Diagonal,
    /// From `(i-1, j)`: `X[i-1]` aligned with a gap.
    Above,
    /// From `(i, j-1)`: `Y[j-1]` aligned with a gap.
    Left,
}

/// Evaluate the three candidates for one cell.
///
/// `diagonal`, `above` and `left` are the neighbouring prefix costs, not yet
/// charged. Returns the cell value and the chosen predecessor.
#[inline]
pub fn step(substitution: f64, gap: f64, diagonal: f64, above: f64, left: f64) -> (f64, Origin) {
    let mut best = (substitution + diagonal, Origin::Diagonal);
    let from_above = gap + above;
    if from_above < best.0 {
        best = (from_above, Origin::Above);
    }
    let from_left = gap + left;
    if from_left < best.0 {
        best = (from_left, Origin::Left);
    }
    best
}

/// Costs of aligning `0, 1, 2, ...` symbols against the empty prefix.
///
/// Each value is the previous one plus `gap`, never `k * gap`, so it is
/// bit-identical to summing the gap columns of a witness left to right.
pub fn gap_run(gap: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(0.0), move |&prev| Some(prev + gap))
}
