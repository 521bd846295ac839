use linfit_core::{LinfitError, LinfitResult};
use std::collections::BTreeSet;

use crate::value::Value;

/// Check that every row has the same width and return that width.
fn table_width(rows: &[Vec<Value>]) -> LinfitResult<usize> {
    let first = rows.first().ok_or(LinfitError::EmptyTensor)?;
    let cols = first.len();
    if let Some(i) = rows.iter().position(|r| r.len() != cols) {
        return Err(LinfitError::InvalidOperation(format!(
            "row {} has {} columns, expected {}",
            i,
            rows[i].len(),
            cols
        )));
    }
    Ok(cols)
}

/// Replace categorical columns by binary indicator columns.
///
/// Each categorical column with `k` distinct values becomes `k` indicator
/// columns (`k − 1` with `drop_first`), ordered by the sorted category
/// values and spliced in at the position of the original column.
pub struct OneHotEncoder {
    /// Columns to encode, de-duplicated and sorted descending.
    pub categorical_indices: Vec<usize>,
    pub drop_first: bool,
    /// Sorted categories per entry of `categorical_indices`, set by `fit`.
    pub categories: Option<Vec<Vec<Value>>>,
    n_features: usize,
}

impl OneHotEncoder {
    pub fn new(categorical_indices: &[usize], drop_first: bool) -> Self {
        let mut indices = categorical_indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();
        OneHotEncoder {
            categorical_indices: indices,
            drop_first,
            categories: None,
            n_features: 0,
        }
    }

    /// Learn the sorted distinct values of every categorical column.
    pub fn fit(&mut self, rows: &[Vec<Value>]) -> LinfitResult<()> {
        let cols = table_width(rows)?;
        let mut categories = Vec::with_capacity(self.categorical_indices.len());
        for &index in &self.categorical_indices {
            if index >= cols {
                return Err(LinfitError::IndexOutOfBounds {
                    index,
                    axis: 1,
                    size: cols,
                });
            }
            let distinct: BTreeSet<&Value> = rows.iter().map(|r| &r[index]).collect();
            categories.push(distinct.into_iter().cloned().collect());
        }
        self.categories = Some(categories);
        self.n_features = cols;
        Ok(())
    }

    /// Encode `rows` with the categories learned by `fit`. The input is not
    /// modified.
    ///
    /// Columns are processed from the highest index down, so splicing the
    /// indicators of one column never shifts a column still to be processed.
    pub fn transform(&self, rows: &[Vec<Value>]) -> LinfitResult<Vec<Vec<Value>>> {
        let categories = self.categories.as_ref().ok_or(LinfitError::NotFitted)?;
        let cols = table_width(rows)?;
        if cols != self.n_features {
            return Err(LinfitError::DimensionMismatch(format!(
                "encoder was fitted on {} columns, got {}",
                self.n_features, cols
            )));
        }

        let mut out = rows.to_vec();
        for (&index, cats) in self.categorical_indices.iter().zip(categories) {
            for row in out.iter_mut() {
                let value = row.remove(index);
                let position = cats.binary_search(&value).map_err(|_| {
                    LinfitError::InvalidArgument(format!(
                        "column {}: unknown category {}",
                        index, value
                    ))
                })?;
                let start = usize::from(self.drop_first);
                let indicators =
                    (start..cats.len()).map(|j| Value::Int(i64::from(j == position)));
                row.splice(index..index, indicators);
            }
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, rows: &[Vec<Value>]) -> LinfitResult<Vec<Vec<Value>>> {
        self.fit(rows)?;
        self.transform(rows)
    }

    /// Number of columns `transform` produces.
    pub fn n_output_features(&self) -> LinfitResult<usize> {
        let categories = self.categories.as_ref().ok_or(LinfitError::NotFitted)?;
        let dropped = usize::from(self.drop_first);
        let added: usize = categories
            .iter()
            .map(|c| c.len().saturating_sub(dropped))
            .sum();
        Ok(self.n_features - categories.len() + added)
    }
}

/// One-hot encode the columns at `categorical_indices` of `rows`.
///
/// Shorthand for `OneHotEncoder::new(categorical_indices, drop_first).fit_transform(rows)`.
pub fn one_hot_encode(
    rows: &[Vec<Value>],
    categorical_indices: &[usize],
    drop_first: bool,
) -> LinfitResult<Vec<Vec<Value>>> {
    OneHotEncoder::new(categorical_indices, drop_first).fit_transform(rows)
}
