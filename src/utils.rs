//! Helper for building cost matrices.

/// Square `n x n` matrix with `diagonal` on the diagonal and `off_diagonal`
/// everywhere else.
///
/// This is the usual starting point for an alphabet without a hand-tuned
/// substitution table, e.g. `uniform_matrix(4, 0.0, 1.0)` for unit-cost edits.
pub fn uniform_matrix(n: usize, diagonal: f64, off_diagonal: f64) -> Vec<Vec<f64>> {
    (0..n)
        .map(|a| {
            (0..n)
                .map(|b| if a == b { diagonal } else { off_diagonal })
                .collect()
        })
        .collect()
}
