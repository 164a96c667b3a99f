use crate::cost_model::{AlphabetIndex, CostModel};
use crate::error::{AlignError, Result};
use crate::utils::uniform_matrix;

enum Substitution {
    Matrix(Vec<Vec<f64>>),
    Uniform { match_cost: f64, mismatch_cost: f64 },
}

/// Step-by-step construction of a [`CostModel`].
///
/// ```
/// use dp_align::CostModelBuilder;
///
/// let model = CostModelBuilder::new()
///     .with_alphabet("ACGT".chars())
///     .with_uniform_costs(0.0, 1.0)
///     .with_gap_cost(2.0)
///     .build()
///     .unwrap();
/// assert_eq!(model.substitution_cost('A', 'G').unwrap(), 1.0);
/// ```
#[derive(Default)]
pub struct CostModelBuilder {
    alphabet: Option<Vec<char>>,
    substitution: Option<Substitution>,
    gap_cost: Option<f64>,
}

impl CostModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alphabet<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.alphabet = Some(symbols.into_iter().collect());
        self
    }

    pub fn with_matrix(mut self, matrix: Vec<Vec<f64>>) -> Self {
        self.substitution = Some(Substitution::Matrix(matrix));
        self
    }

    pub fn with_uniform_costs(mut self, match_cost: f64, mismatch_cost: f64) -> Self {
        self.substitution = Some(Substitution::Uniform {
            match_cost,
            mismatch_cost,
        });
        self
    }

    pub fn with_gap_cost(mut self, gap_cost: f64) -> Self {
        self.gap_cost = Some(gap_cost);
        self
    }

    pub fn build(self) -> Result<CostModel> {
        let symbols = self
            .alphabet
            .ok_or(AlignError::IncompleteCostModel { missing: "alphabet" })?;
        let substitution = self.substitution.ok_or(AlignError::IncompleteCostModel {
            missing: "substitution matrix",
        })?;
        let gap_cost = self
            .gap_cost
            .ok_or(AlignError::IncompleteCostModel { missing: "gap cost" })?;

        let alphabet = AlphabetIndex::new(symbols)?;
        let matrix = match substitution {
            Substitution::Matrix(m) => m,
            Substitution::Uniform {
                match_cost,
                mismatch_cost,
            } => uniform_matrix(alphabet.len(), match_cost, mismatch_cost),
        };
        CostModel::new(alphabet, &matrix, gap_cost)
    }
}
