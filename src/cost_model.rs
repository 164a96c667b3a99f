//! Alphabet indexing and substitution/gap costs.
//!
//! A [`CostModel`] is a pure lookup structure: it maps each alphabet symbol to
//! a dense index and answers `substitution_cost(a, b)` and `gap_cost()`. It is
//! immutable once built and can be shared by reference between any number of
//! aligners.
//!
//! The diagonal of the substitution matrix is taken at face value. Nothing in
//! this module or in the recurrence assumes `cost(a, a) == 0`.

use std::collections::HashMap;

use crate::error::{AlignError, Result};
use crate::utils::uniform_matrix;

/// Bijection between alphabet symbols and indices `0..len`.
///
/// The order of `symbols` given to [`AlphabetIndex::new`] defines the index of
/// each symbol and therefore the row/column layout of the cost matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphabetIndex {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl AlphabetIndex {
    /// Assign index `i` to `symbols[i]`.
    ///
    /// Fails with [`AlignError::DuplicateSymbol`] if a symbol repeats.
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &symbol) in symbols.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(AlignError::DuplicateSymbol { symbol });
            }
        }
        Ok(Self { symbols, index })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Dense index of `symbol`.
    ///
    /// A miss reports [`AlignError::UnknownSymbol`] with no position.
    pub fn index_of(&self, symbol: char) -> Result<usize> {
        self.index
            .get(&symbol)
            .copied()
            .ok_or(AlignError::UnknownSymbol {
                symbol,
                position: None,
            })
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    /// Map every symbol of `sequence` to its index.
    ///
    /// The first symbol outside the alphabet aborts with
    /// [`AlignError::UnknownSymbol`] carrying its position.
    pub fn encode<I>(&self, sequence: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = char>,
    {
        sequence
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| {
                self.index
                    .get(&symbol)
                    .copied()
                    .ok_or(AlignError::UnknownSymbol {
                        symbol,
                        position: Some(position),
                    })
            })
            .collect()
    }
}

/// Substitution matrix plus gap cost over a fixed alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct CostModel {
    alphabet: AlphabetIndex,
    /// Row-major `len x len`.
    matrix: Vec<f64>,
    gap_cost: f64,
}

impl CostModel {
    /// Store `matrix` and `gap_cost` for `alphabet`.
    ///
    /// `matrix[a][b]` is the cost of aligning symbol index `a` (from the first
    /// sequence) with symbol index `b` (from the second). The matrix must be
    /// square with side `alphabet.len()`, otherwise
    /// [`AlignError::DimensionMismatch`]. All costs must be finite.
    ///
    /// A negative gap cost is accepted; it makes the recurrence reward gaps and
    /// is the caller's responsibility.
    pub fn new<R>(alphabet: AlphabetIndex, matrix: &[R], gap_cost: f64) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let n = alphabet.len();
        if matrix.len() != n {
            return Err(AlignError::DimensionMismatch {
                expected: n,
                found: matrix.len(),
                row: None,
            });
        }

        let mut flat = Vec::with_capacity(n * n);
        for (r, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(AlignError::DimensionMismatch {
                    expected: n,
                    found: row.len(),
                    row: Some(r),
                });
            }
            for &value in row {
                ensure_finite(value)?;
            }
            flat.extend_from_slice(row);
        }
        ensure_finite(gap_cost)?;

        Ok(Self {
            alphabet,
            matrix: flat,
            gap_cost,
        })
    }

    /// Model with `match_cost` on the diagonal and `mismatch_cost` everywhere else.
    pub fn uniform(
        alphabet: AlphabetIndex,
        match_cost: f64,
        mismatch_cost: f64,
        gap_cost: f64,
    ) -> Result<Self> {
        let matrix = uniform_matrix(alphabet.len(), match_cost, mismatch_cost);
        Self::new(alphabet, &matrix, gap_cost)
    }

    pub fn alphabet(&self) -> &AlphabetIndex {
        &self.alphabet
    }

    #[inline]
    pub fn gap_cost(&self) -> f64 {
        self.gap_cost
    }

    /// Cost of aligning symbol `a` against symbol `b`.
    pub fn substitution_cost(&self, a: char, b: char) -> Result<f64> {
        let ia = self.alphabet.index_of(a)?;
        let ib = self.alphabet.index_of(b)?;
        Ok(self.cost_by_index(ia, ib))
    }

    /// Cost lookup on already-encoded symbols.
    ///
    /// # Panics
    /// Panics if either index is not below `alphabet().len()`.
    #[inline]
    pub fn cost_by_index(&self, a: usize, b: usize) -> f64 {
        self.matrix[a * self.alphabet.len() + b]
    }

    /// Encode `sequence` through the alphabet.
    pub fn encode(&self, sequence: &str) -> Result<Vec<usize>> {
        self.alphabet.encode(sequence.chars())
    }

    /// True if `cost(a, b) == cost(b, a)` for every pair of symbols.
    pub fn is_symmetric(&self) -> bool {
        let n = self.alphabet.len();
        (0..n).all(|a| (a + 1..n).all(|b| self.cost_by_index(a, b) == self.cost_by_index(b, a)))
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AlignError::NonFiniteCost { value })
    }
}
