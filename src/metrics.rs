use crate::error::{ensure_len, Error, Result};
use crate::{Matrix, Vector};

fn check_pair(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.is_empty() {
        return Err(Error::EmptyInput("y_true"));
    }
    ensure_len("y_pred length", y_true.len(), y_pred.len())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / y_true.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / y_true.len() as f64)
}

/// Coefficient of determination, `1 − MSE / Var(y_true)`.
///
/// A constant `y_true` scores 1 when every prediction hits it and 0 otherwise.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    let mse = mean_squared_error(y_true, y_pred)?;
    let variance = y_true.var(0.0);
    if variance == 0.0 {
        return Ok(if mse == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - mse / variance)
}

/// Fraction of exactly matching labels.
pub fn accuracy_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_pair(y_true, y_pred)?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| (*actual - *pred).abs() < 1e-10)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Binary confusion matrix `[[TN, FP], [FN, TP]]` with respect to `positive`.
pub fn confusion_matrix(y_true: &Vector, y_pred: &Vector, positive: f64) -> Result<Matrix> {
    check_pair(y_true, y_pred)?;

    let mut matrix = Matrix::zeros((2, 2));
    for (&actual, &pred) in y_true.iter().zip(y_pred.iter()) {
        let row = usize::from(actual == positive);
        let col = usize::from(pred == positive);
        matrix[(row, col)] += 1.0;
    }
    Ok(matrix)
}

/// `TP / (TP + FP)`; 0 when nothing was predicted positive.
pub fn precision_score(y_true: &Vector, y_pred: &Vector, positive: f64) -> Result<f64> {
    let cm = confusion_matrix(y_true, y_pred, positive)?;
    let predicted_positive = cm[(1, 1)] + cm[(0, 1)];
    Ok(if predicted_positive > 0.0 { cm[(1, 1)] / predicted_positive } else { 0.0 })
}

/// `TP / (TP + FN)`; 0 when there are no actual positives.
pub fn recall_score(y_true: &Vector, y_pred: &Vector, positive: f64) -> Result<f64> {
    let cm = confusion_matrix(y_true, y_pred, positive)?;
    let actual_positive = cm[(1, 1)] + cm[(1, 0)];
    Ok(if actual_positive > 0.0 { cm[(1, 1)] / actual_positive } else { 0.0 })
}

pub fn f1_score(y_true: &Vector, y_pred: &Vector, positive: f64) -> Result<f64> {
    let precision = precision_score(y_true, y_pred, positive)?;
    let recall = recall_score(y_true, y_pred, positive)?;
    if precision + recall == 0.0 {
        return Ok(0.0);
    }
    Ok(2.0 * precision * recall / (precision + recall))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 5.0];

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert_abs_diff_eq!(mse, 4.0 / 3.0);
        assert_abs_diff_eq!(mean_absolute_error(&y_true, &y_pred).unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_r2_score() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.0, 2.0, 3.0, 4.0];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert_abs_diff_eq!(r2, 1.0);
    }

    #[test]
    fn test_classification_metrics() {
        let y_true = array![1.0, 1.0, 1.0, -1.0, -1.0];
        let y_pred = array![1.0, -1.0, 1.0, 1.0, -1.0];

        assert_abs_diff_eq!(accuracy_score(&y_true, &y_pred).unwrap(), 0.6);
        assert_eq!(confusion_matrix(&y_true, &y_pred, 1.0).unwrap(), array![[1.0, 1.0], [1.0, 2.0]]);
        assert_abs_diff_eq!(precision_score(&y_true, &y_pred, 1.0).unwrap(), 2.0 / 3.0);
        assert_abs_diff_eq!(recall_score(&y_true, &y_pred, 1.0).unwrap(), 2.0 / 3.0);
        assert_abs_diff_eq!(f1_score(&y_true, &y_pred, 1.0).unwrap(), 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_predicted_positives() {
        let y_true = array![1.0, 0.0];
        let y_pred = array![0.0, 0.0];
        assert_eq!(precision_score(&y_true, &y_pred, 1.0).unwrap(), 0.0);
        assert_eq!(f1_score(&y_true, &y_pred, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_r2_constant_targets() {
        let y_true = array![3.0, 3.0, 3.0];
        assert_eq!(r2_score(&y_true, &y_true).unwrap(), 1.0);
        assert_eq!(r2_score(&y_true, &array![3.0, 2.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_r2_mean_predictor_scores_zero() {
        let y_true = array![1.0, 2.0, 3.0, 6.0];
        let y_pred = array![3.0, 3.0, 3.0, 3.0];
        assert_abs_diff_eq!(r2_score(&y_true, &y_pred).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_mismatch() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0];
        assert!(mean_squared_error(&y_true, &y_pred).is_err());
        assert!(accuracy_score(&y_true, &y_pred).is_err());
    }
}
