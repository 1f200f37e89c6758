//! Column-max normalization for the Choquet evaluation path.

use crate::domain::foundation::DataMatrix;

/// Column maxima below this are treated as zero to avoid blow-up.
pub const NEAR_ZERO_GUARD: f64 = 1e-10;

/// Scales every column into [0, 1] by its maximum; (near-)zero columns
/// pass through unchanged.
pub fn normalize_columns(matrix: &DataMatrix) -> DataMatrix {
    let mut scales = Vec::with_capacity(matrix.cols());
    for col in 0..matrix.cols() {
        let max = matrix
            .column(col)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        scales.push(if max < NEAR_ZERO_GUARD { 1.0 } else { max });
    }
    let rows: Vec<Vec<f64>> = (0..matrix.rows())
        .map(|r| {
            matrix
                .row(r)
                .iter()
                .zip(&scales)
                .map(|(value, scale)| value / scale)
                .collect()
        })
        .collect();
    // Shape is inherited from an already-validated matrix.
    DataMatrix::try_new("normalized", rows).unwrap_or_else(|_| matrix.clone())
}
