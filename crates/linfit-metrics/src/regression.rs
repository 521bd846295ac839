use linfit_core::{Float, Tensor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

fn residuals<'a, T: Float>(
    y_true: &'a Tensor<T>,
    y_pred: &'a Tensor<T>,
) -> impl Iterator<Item = f64> + 'a {
    assert_eq!(
        y_true.numel(),
        y_pred.numel(),
        "y_true and y_pred must have the same length"
    );
    y_true
        .data()
        .iter()
        .zip(y_pred.data().iter())
        .map(|(&t, &p)| t.to_f64() - p.to_f64())
}

/// Mean Squared Error.
pub fn mse<T: Float>(y_true: &Tensor<T>, y_pred: &Tensor<T>) -> f64 {
    let n = y_true.numel() as f64;
    residuals(y_true, y_pred).map(|d| d * d).sum::<f64>() / n
}

/// Root Mean Squared Error.
pub fn rmse<T: Float>(y_true: &Tensor<T>, y_pred: &Tensor<T>) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Mean Absolute Error.
pub fn mae<T: Float>(y_true: &Tensor<T>, y_pred: &Tensor<T>) -> f64 {
    let n = y_true.numel() as f64;
    residuals(y_true, y_pred).map(f64::abs).sum::<f64>() / n
}

/// R² (coefficient of determination): `1 − RSS/TSS`.
///
/// Not guarded against a constant `y_true`: TSS is then zero and the result
/// is NaN (perfect predictions) or −∞.
pub fn r2_score<T: Float>(y_true: &Tensor<T>, y_pred: &Tensor<T>) -> f64 {
    let n = y_true.numel() as f64;
    let mean_true: f64 = y_true.data().iter().map(|v| v.to_f64()).sum::<f64>() / n;

    let ss_res: f64 = residuals(y_true, y_pred).map(|d| d * d).sum();
    let ss_tot: f64 = y_true
        .data()
        .iter()
        .map(|&t| {
            let d = t.to_f64() - mean_true;
            d * d
        })
        .sum();

    1.0 - ss_res / ss_tot
}

/// Scores of one set of predictions against the true values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionReport {
    #[serde(rename = "R2")]
    pub r2: f64,
    #[serde(rename = "RMSE")]
    pub rmse: f64,
    #[serde(rename = "MAE")]
    pub mae: f64,
}

impl RegressionReport {
    /// The report keyed by metric name: `"R2"`, `"RMSE"`, `"MAE"`.
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([("R2", self.r2), ("RMSE", self.rmse), ("MAE", self.mae)])
    }
}

impl fmt::Display for RegressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R2 = {:.6}, RMSE = {:.6}, MAE = {:.6}", self.r2, self.rmse, self.mae)
    }
}

/// Compute R², RMSE and MAE in one call.
///
/// Panics if the two tensors differ in length.
pub fn evaluate_regression<T: Float>(y_true: &Tensor<T>, y_pred: &Tensor<T>) -> RegressionReport {
    RegressionReport {
        r2: r2_score(y_true, y_pred),
        rmse: rmse(y_true, y_pred),
        mae: mae(y_true, y_pred),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_perfect_predictions() {
        let y: Tensor<f64> = Tensor::from_slice(&[1.0, 2.0, 3.0]);
        let report = evaluate_regression(&y, &y);
        assert_eq!(report, RegressionReport { r2: 1.0, rmse: 0.0, mae: 0.0 });
    }

    #[test]
    fn test_known_values() {
        let y_true: Tensor<f64> = Tensor::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let y_pred: Tensor<f64> = Tensor::from_slice(&[1.5, 2.5, 2.5, 4.5]);
        // residuals ±0.5, RSS = 1.0, TSS = 5.0
        assert_abs_diff_eq!(mse(&y_true, &y_pred), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(rmse(&y_true, &y_pred), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mae(&y_true, &y_pred), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r2_score(&y_true, &y_pred), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_target_is_not_finite() {
        let y_true: Tensor<f64> = Tensor::from_slice(&[2.0, 2.0, 2.0]);
        assert!(r2_score(&y_true, &y_true).is_nan());

        let y_pred: Tensor<f64> = Tensor::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(r2_score(&y_true, &y_pred), f64::NEG_INFINITY);
    }

    #[test]
    fn test_f32_inputs() {
        let y_true: Tensor<f32> = Tensor::from_slice(&[1.0, 3.0]);
        let y_pred: Tensor<f32> = Tensor::from_slice(&[2.0, 2.0]);
        assert_abs_diff_eq!(mae(&y_true, &y_pred), 1.0, epsilon = 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        let y_true: Tensor<f64> = Tensor::from_slice(&[1.0, 2.0]);
        let y_pred: Tensor<f64> = Tensor::from_slice(&[1.0]);
        evaluate_regression(&y_true, &y_pred);
    }

    #[test]
    fn test_report_keys() {
        let report = RegressionReport { r2: 0.5, rmse: 1.0, mae: 0.75 };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["R2"], 0.5);
        assert_eq!(json["RMSE"], 1.0);
        assert_eq!(json["MAE"], 0.75);

        let map = report.as_map();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["MAE", "R2", "RMSE"]);
    }
}
