use linfit_core::{Float, LinfitError, LinfitResult, Tensor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One cell of a mixed-type table.
///
/// Values are totally ordered so a categorical column can be sorted:
/// numbers come before text and compare by numeric value, so `Int(1)` equals
/// `Float(1.0)` and `0.0` equals `-0.0`. NaN sorts after every number and
/// equals itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the cell; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) => None,
        }
    }
}

fn numeric_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => numeric_cmp(*a, *b),
            (Int(a), Float(b)) => numeric_cmp(*a as f64, *b),
            (Float(a), Int(b)) => numeric_cmp(*a, *b as f64),
            (Text(a), Text(b)) => a.cmp(b),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Convert an all-numeric table into a design matrix.
///
/// Fails on ragged rows or on any text cell left in the table.
pub fn to_tensor<T: Float>(rows: &[Vec<Value>]) -> LinfitResult<Tensor<T>> {
    let numeric = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, cell)| {
                    cell.as_f64().map(T::from_f64).ok_or_else(|| {
                        LinfitError::InvalidArgument(format!(
                            "cell ({}, {}) is not numeric: {}",
                            i, j, cell
                        ))
                    })
                })
                .collect::<LinfitResult<Vec<T>>>()
        })
        .collect::<LinfitResult<Vec<Vec<T>>>>()?;
    Tensor::from_vec2d(&numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2.5),
            Value::from("a"),
            Value::from(3),
            Value::from(-1),
            Value::from(f64::NAN),
            Value::from(2.5),
        ];
        values.sort();
        assert!(matches!(values[0], Value::Int(-1)));
        assert!(matches!(values[1], Value::Float(v) if v == 2.5));
        assert!(matches!(values[2], Value::Float(v) if v == 2.5));
        assert!(matches!(values[3], Value::Int(3)));
        assert!(matches!(values[4], Value::Float(v) if v.is_nan()));
        assert_eq!(&values[5..], &[Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_equal_numbers_compare_equal() {
        assert_eq!(Value::Int(2), Value::Float(2.0));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Int(2) < Value::Float(2.5));
        assert!(Value::Float(1e300) < Value::from(""));
    }

    #[test]
    fn test_to_tensor() {
        let rows = vec![
            vec![Value::Int(1), Value::Float(0.5)],
            vec![Value::Int(0), Value::Float(1.5)],
        ];
        let t: Tensor<f64> = to_tensor(&rows).unwrap();
        assert_eq!(t.shape_vec(), vec![2, 2]);
        assert_eq!(t.data(), &[1.0, 0.5, 0.0, 1.5]);

        let bad = vec![vec![Value::Int(1), Value::from("x")]];
        assert!(matches!(
            to_tensor::<f64>(&bad),
            Err(LinfitError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_deserialize_untagged() {
        let rows: Vec<Vec<Value>> = serde_json::from_str(r#"[["a", 1, 2.5]]"#).unwrap();
        assert_eq!(rows[0], vec![Value::from("a"), Value::Int(1), Value::Float(2.5)]);
    }
}
