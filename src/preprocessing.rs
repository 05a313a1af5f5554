use ndarray::{s, Axis};

use crate::error::{ensure_len, Error, Result};
use crate::{Matrix, Vector};

/// Rescales every feature column into `[0, 1]` using the column minimum and
/// maximum seen during `fit`. Constant columns map to 0.
#[derive(Clone, Debug, Default)]
pub struct MinMaxScaler {
    min: Option<Vector>,
    range: Option<Vector>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            min: None,
            range: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(Error::EmptyInput("scaler input"));
        }

        let min = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| acc.min(v));
        let max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| acc.max(v));

        self.range = Some(&max - &min);
        self.min = Some(min);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (min, range) = match (self.min.as_ref(), self.range.as_ref()) {
            (Some(min), Some(range)) => (min, range),
            _ => return Err(Error::NotFitted),
        };
        ensure_len("scaler columns", min.len(), data.ncols())?;

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            for ((value, &lo), &width) in row.iter_mut().zip(min.iter()).zip(range.iter()) {
                *value = if width > 0.0 { (*value - lo) / width } else { 0.0 };
            }
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }
}

/// Prepends a column of ones so the first weight acts as the intercept.
pub fn add_intercept(x: &Matrix) -> Matrix {
    let mut with_intercept = Matrix::ones((x.nrows(), x.ncols() + 1));
    with_intercept.slice_mut(s![.., 1..]).assign(x);
    with_intercept
}

/// Encodes class indices `0..n_classes` as one-hot rows.
pub fn one_hot(labels: &Vector, n_classes: usize) -> Result<Matrix> {
    let mut encoded = Matrix::zeros((labels.len(), n_classes));
    for (i, &label) in labels.iter().enumerate() {
        let class = class_index(label, n_classes)?;
        encoded[(i, class)] = 1.0;
    }
    Ok(encoded)
}

/// Column index of the largest entry of every row, as `f64`. Ties go to the first column.
pub fn argmax_rows(scores: &Matrix) -> Vector {
    scores
        .rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            for (k, &v) in row.iter().enumerate() {
                if v > row[best] {
                    best = k;
                }
            }
            best as f64
        })
        .collect()
}

pub(crate) fn class_index(label: f64, n_classes: usize) -> Result<usize> {
    if label < 0.0 || label.fract() != 0.0 || label >= n_classes as f64 {
        return Err(Error::InvalidLabels(format!(
            "expected a class index in 0..{n_classes}, got {label}"
        )));
    }
    Ok(label as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_min_max_scaler() {
        let data = array![[1.0, 10.0, 5.0], [3.0, 20.0, 5.0], [5.0, 30.0, 5.0]];
        let mut scaler = MinMaxScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());
        assert_eq!(scaled.column(0), array![0.0, 0.5, 1.0]);
        assert_eq!(scaled.column(1), array![0.0, 0.5, 1.0]);
        assert_eq!(scaled.column(2), array![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scaler_uses_training_range() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&array![[0.0], [10.0]]).unwrap();
        let scaled = scaler.transform(&array![[5.0], [20.0]]).unwrap();
        assert_eq!(scaled, array![[0.5], [2.0]]);
    }

    #[test]
    fn test_scaler_errors() {
        let scaler = MinMaxScaler::new();
        assert!(matches!(scaler.transform(&array![[1.0]]), Err(Error::NotFitted)));

        let mut scaler = MinMaxScaler::new();
        scaler.fit(&array![[1.0, 2.0]]).unwrap();
        assert!(scaler.transform(&array![[1.0]]).is_err());
    }

    #[test]
    fn test_add_intercept() {
        let x = array![[2.0, 3.0], [4.0, 5.0]];
        assert_eq!(add_intercept(&x), array![[1.0, 2.0, 3.0], [1.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_argmax_rows() {
        let scores = array![[0.1, 0.7, 0.2], [0.5, 0.5, 0.0], [-3.0, -2.0, -1.0]];
        assert_eq!(argmax_rows(&scores), array![1.0, 0.0, 2.0]);
        assert_eq!(argmax_rows(&one_hot(&array![2.0, 0.0], 3).unwrap()), array![2.0, 0.0]);
    }

    #[test]
    fn test_one_hot() {
        let labels = array![0.0, 2.0, 1.0];
        let encoded = one_hot(&labels, 3).unwrap();
        assert_eq!(encoded, array![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);

        assert!(one_hot(&array![3.0], 3).is_err());
        assert!(one_hot(&array![0.5], 3).is_err());
        assert!(one_hot(&array![-1.0], 3).is_err());
    }
}
