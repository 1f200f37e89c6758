//! Shared upfront validation for the evaluator facades.

use std::collections::HashSet;

use crate::domain::foundation::{DataMatrix, ValidationError};

/// Validates identifiers and matrix shapes, returning owned matrices.
///
/// Runs before any solve so shape problems never surface mid-pipeline.
pub fn validate_inputs<S: AsRef<str>>(
    dmu_ids: &[S],
    inputs: Vec<Vec<f64>>,
    outputs: Vec<Vec<f64>>,
) -> Result<(Vec<String>, DataMatrix, DataMatrix), ValidationError> {
    if dmu_ids.is_empty() {
        return Err(ValidationError::NoDmus);
    }

    let mut seen = HashSet::with_capacity(dmu_ids.len());
    let ids: Vec<String> = dmu_ids.iter().map(|id| id.as_ref().to_string()).collect();
    for id in &ids {
        if !seen.insert(id.clone()) {
            return Err(ValidationError::DuplicateId { id: id.clone() });
        }
    }

    if inputs.len() != ids.len() {
        return Err(ValidationError::RowCountMismatch {
            matrix: "input",
            expected: ids.len(),
            actual: inputs.len(),
        });
    }
    if outputs.len() != ids.len() {
        return Err(ValidationError::RowCountMismatch {
            matrix: "output",
            expected: ids.len(),
            actual: outputs.len(),
        });
    }

    let input_matrix = DataMatrix::try_new("input", inputs)?;
    let output_matrix = DataMatrix::try_new("output", outputs)?;
    Ok((ids, input_matrix, output_matrix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_consistent_shapes() {
        let result = validate_inputs(
            &["a", "b"],
            vec![vec![1.0], vec![2.0]],
            vec![vec![3.0], vec![4.0]],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let result = validate_inputs(
            &["a", "a"],
            vec![vec![1.0], vec![2.0]],
            vec![vec![3.0], vec![4.0]],
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DuplicateId { id: "a".into() }
        );
    }

    #[test]
    fn rejects_row_count_mismatch() {
        let result = validate_inputs(&["a", "b"], vec![vec![1.0]], vec![vec![3.0], vec![4.0]]);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::RowCountMismatch {
                matrix: "input",
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_cohort() {
        let ids: [&str; 0] = [];
        assert_eq!(
            validate_inputs(&ids, vec![], vec![]).unwrap_err(),
            ValidationError::NoDmus
        );
    }
}
