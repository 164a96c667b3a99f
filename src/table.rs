//! Full-table global alignment with backtracking.
//!
//! [`AlignmentTable`] keeps the whole `(|X|+1) x (|Y|+1)` prefix-cost table
//! together with one [`Origin`] per cell, which is what makes reconstruction
//! of a witness alignment possible. Use
//! [`LinearSpaceAligner`](crate::linear::LinearSpaceAligner) when only the
//! cost is needed.
//!
//! Row `i` corresponds to the prefix `X[0..i]`, column `j` to `Y[0..j]`.
//! Both tables are stored row-major in flat vectors.

use crate::alignment::{Alignment, EditOp};
use crate::cost_model::CostModel;
use crate::error::{AlignError, Result};
use crate::recurrence::{gap_run, step, Origin};
use crate::traits::OptimalCost;

/// Prefix-cost table plus backtracking pointers for one pair of sequences.
///
/// ```
/// use dp_align::{AlignmentTable, AlphabetIndex, CostModel};
///
/// let alphabet = AlphabetIndex::new("stop".chars()).unwrap();
/// let model = CostModel::uniform(alphabet, 0.0, 1.0, 0.5).unwrap();
///
/// let mut table = AlignmentTable::new("stop", "top");
/// table.compute_alignment(&model).unwrap();
/// assert_eq!(table.optimal_cost().unwrap(), 0.5);
///
/// let (x, y) = table.reconstruct_alignment().unwrap().aligned_strings();
/// assert_eq!((x.as_str(), y.as_str()), ("stop", "-top"));
/// ```
#[derive(Clone, Debug)]
pub struct AlignmentTable {
    x: Vec<char>,
    y: Vec<char>,
    rows: usize,
    cols: usize,
    cost: Vec<f64>,
    origin: Vec<Origin>,
    computed: bool,
}

impl AlignmentTable {
    /// Allocate both tables for aligning `x` against `y`.
    ///
    /// Empty sequences are accepted: aligning two empty sequences costs `0`
    /// and reconstructs to an empty alignment.
    pub fn new(x: &str, y: &str) -> Self {
        let x: Vec<char> = x.chars().collect();
        let y: Vec<char> = y.chars().collect();
        let rows = x.len() + 1;
        let cols = y.len() + 1;
        Self {
            x,
            y,
            rows,
            cols,
            cost: vec![0.0; rows * cols],
            origin: vec![Origin::Diagonal; rows * cols],
            computed: false,
        }
    }

    /// `|X| + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `|Y| + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_computed(&self) -> bool {
        self.computed
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }

    /// Fill every cell under `model`.
    ///
    /// Both sequences are encoded before any cell is written, so an
    /// [`AlignError::UnknownSymbol`] leaves the table untouched apart from
    /// clearing a previous result. Calling this again with another model
    /// refills the table.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "debug",
            name = "alignment_table",
            skip(self, model),
            fields(rows = self.rows, cols = self.cols)
        )
    )]
    pub fn compute_alignment(&mut self, model: &CostModel) -> Result<()> {
        self.computed = false;
        let xs = model.alphabet().encode(self.x.iter().copied())?;
        let ys = model.alphabet().encode(self.y.iter().copied())?;
        let gap = model.gap_cost();

        for (j, value) in gap_run(gap).take(self.cols).enumerate() {
            let idx = self.at(0, j);
            self.cost[idx] = value;
            self.origin[idx] = Origin::Left;
        }
        for (i, value) in gap_run(gap).take(self.rows).enumerate().skip(1) {
            let idx = self.at(i, 0);
            self.cost[idx] = value;
            self.origin[idx] = Origin::Above;
        }

        for i in 1..self.rows {
            let xi = xs[i - 1];
            let row = i * self.cols;
            let prev_row = row - self.cols;
            for j in 1..self.cols {
                let (value, origin) = step(
                    model.cost_by_index(xi, ys[j - 1]),
                    gap,
                    self.cost[prev_row + j - 1],
                    self.cost[prev_row + j],
                    self.cost[row + j - 1],
                );
                self.cost[row + j] = value;
                self.origin[row + j] = origin;
            }
        }

        self.computed = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(cost = self.cost[self.rows * self.cols - 1], "table filled");
        Ok(())
    }

    /// Minimum cost of aligning all of `X` with all of `Y`.
    pub fn optimal_cost(&self) -> Result<f64> {
        self.prefix_cost(self.rows - 1, self.cols - 1)
    }

    /// Minimum cost of aligning `X[0..i]` with `Y[0..j]`.
    pub fn prefix_cost(&self, i: usize, j: usize) -> Result<f64> {
        if !self.computed {
            return Err(AlignError::NotComputed);
        }
        if i >= self.rows || j >= self.cols {
            return Err(AlignError::IndexOutOfRange {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cost[self.at(i, j)])
    }

    /// Backtracking pointer of cell `(i, j)`, `None` for `(0, 0)`.
    pub fn origin(&self, i: usize, j: usize) -> Result<Option<Origin>> {
        self.prefix_cost(i, j)?;
        if i == 0 && j == 0 {
            return Ok(None);
        }
        Ok(Some(self.origin[self.at(i, j)]))
    }

    /// Walk the backtracking pointers from `(|X|, |Y|)` to `(0, 0)`.
    ///
    /// The returned alignment is in left-to-right order and its summed column
    /// costs equal [`optimal_cost`](Self::optimal_cost).
    pub fn reconstruct_alignment(&self) -> Result<Alignment> {
        if !self.computed {
            return Err(AlignError::NotComputed);
        }

        let mut i = self.rows - 1;
        let mut j = self.cols - 1;
        let mut ops = Vec::with_capacity(i + j);
        while i > 0 || j > 0 {
            match self.origin[self.at(i, j)] {
                Origin::Diagonal => {
                    ops.push(EditOp::Substitute(self.x[i - 1], self.y[j - 1]));
                    i -= 1;
                    j -= 1;
                }
                Origin::Above => {
                    ops.push(EditOp::DeleteFromX(self.x[i - 1]));
                    i -= 1;
                }
                Origin::Left => {
                    ops.push(EditOp::InsertIntoY(self.y[j - 1]));
                    j -= 1;
                }
            }
        }
        ops.reverse();
        Ok(Alignment::new(ops))
    }
}

impl OptimalCost for AlignmentTable {
    fn optimal_cost(&self) -> Result<f64> {
        AlignmentTable::optimal_cost(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost_model::AlphabetIndex;

    fn unit_model(symbols: &str, gap: f64) -> CostModel {
        let alphabet = AlphabetIndex::new(symbols.chars()).unwrap();
        CostModel::uniform(alphabet, 0.0, 1.0, gap).unwrap()
    }

    #[test]
    fn accessors_fail_before_compute() {
        let table = AlignmentTable::new("ab", "ba");
        assert_eq!(table.optimal_cost(), Err(AlignError::NotComputed));
        assert_eq!(table.reconstruct_alignment(), Err(AlignError::NotComputed));
        assert_eq!(table.prefix_cost(0, 0), Err(AlignError::NotComputed));
        assert!(!table.is_computed());
    }

    #[test]
    fn dimensions_include_empty_prefix() {
        let table = AlignmentTable::new("stop", "top");
        assert_eq!(table.rows(), 5);
        assert_eq!(table.cols(), 4);
    }

    #[test]
    fn base_cases_are_gap_multiples() {
        let model = unit_model("stop", 0.5);
        let mut table = AlignmentTable::new("stop", "top");
        table.compute_alignment(&model).unwrap();
        for i in 0..table.rows() {
            assert_eq!(table.prefix_cost(i, 0).unwrap(), i as f64 * 0.5);
        }
        for j in 0..table.cols() {
            assert_eq!(table.prefix_cost(0, j).unwrap(), j as f64 * 0.5);
        }
        assert_eq!(table.origin(0, 0).unwrap(), None);
        assert_eq!(table.origin(0, 2).unwrap(), Some(Origin::Left));
        assert_eq!(table.origin(3, 0).unwrap(), Some(Origin::Above));
    }

    #[test]
    fn leading_gaps_resum_exactly() {
        let model = unit_model("ab", 0.1);
        for k in 1..40 {
            let x = "a".repeat(k);
            let mut table = AlignmentTable::new(&x, "");
            table.compute_alignment(&model).unwrap();
            let witness = table.reconstruct_alignment().unwrap();
            assert_eq!(
                witness.cost(&model).unwrap(),
                table.optimal_cost().unwrap(),
                "k = {k}"
            );
        }

        let mut table = AlignmentTable::new("aaaaaa", "");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 0.6);

        // A run of gaps followed by matches.
        let mut table = AlignmentTable::new("ab", "bbbbbbbab");
        table.compute_alignment(&model).unwrap();
        let witness = table.reconstruct_alignment().unwrap();
        assert_eq!(witness.gaps(), 7);
        assert_eq!(witness.cost(&model).unwrap(), table.optimal_cost().unwrap());
    }

    #[test]
    fn prefix_cost_out_of_range() {
        let model = unit_model("ab", 1.0);
        let mut table = AlignmentTable::new("a", "b");
        table.compute_alignment(&model).unwrap();
        assert_eq!(
            table.prefix_cost(2, 0),
            Err(AlignError::IndexOutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn both_empty_is_zero_and_empty_alignment() {
        let model = unit_model("ab", 3.0);
        let mut table = AlignmentTable::new("", "");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 0.0);
        assert!(table.reconstruct_alignment().unwrap().is_empty());
    }

    #[test]
    fn one_side_empty_is_all_gaps() {
        let model = unit_model("ab", 1.5);
        let mut table = AlignmentTable::new("abba", "");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 6.0);
        let aln = table.reconstruct_alignment().unwrap();
        assert_eq!(aln.aligned_strings(), ("abba".to_string(), "----".to_string()));

        let mut table = AlignmentTable::new("", "ab");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 3.0);
        assert_eq!(
            table.reconstruct_alignment().unwrap().ops(),
            &[EditOp::InsertIntoY('a'), EditOp::InsertIntoY('b')]
        );
    }

    #[test]
    fn unknown_symbol_aborts_without_result() {
        let model = unit_model("ab", 1.0);
        let mut table = AlignmentTable::new("ab", "ab");
        table.compute_alignment(&model).unwrap();
        assert!(table.is_computed());

        let mut bad = AlignmentTable::new("ab", "axb");
        assert_eq!(
            bad.compute_alignment(&model),
            Err(AlignError::UnknownSymbol {
                symbol: 'x',
                position: Some(1)
            })
        );
        assert_eq!(bad.optimal_cost(), Err(AlignError::NotComputed));
    }

    #[test]
    fn recompute_with_another_model() {
        let mut table = AlignmentTable::new("ab", "b");
        table.compute_alignment(&unit_model("ab", 1.0)).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 1.0);
        table.compute_alignment(&unit_model("ab", 0.25)).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 0.25);
    }

    #[test]
    fn diagonal_wins_tie_against_gaps() {
        // sub = 2 == gap + gap, the single substitution column is kept.
        let model = CostModel::uniform(AlphabetIndex::new("ab".chars()).unwrap(), 0.0, 2.0, 1.0)
            .unwrap();
        let mut table = AlignmentTable::new("a", "b");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 2.0);
        assert_eq!(
            table.reconstruct_alignment().unwrap().ops(),
            &[EditOp::Substitute('a', 'b')]
        );
    }

    #[test]
    fn above_wins_tie_against_left() {
        // "-ab"/"ba-" and "ab-"/"-ba" both cost 2; the deletion of X's last
        // symbol is taken first when walking back.
        let model = CostModel::uniform(AlphabetIndex::new("ab".chars()).unwrap(), 0.0, 2.0, 1.0)
            .unwrap();
        let mut table = AlignmentTable::new("ab", "ba");
        table.compute_alignment(&model).unwrap();
        assert_eq!(table.optimal_cost().unwrap(), 2.0);
        assert_eq!(table.origin(2, 2).unwrap(), Some(Origin::Above));
        let (x, y) = table.reconstruct_alignment().unwrap().aligned_strings();
        assert_eq!(x, "-ab");
        assert_eq!(y, "ba-");
    }
}
