use serde::{Serialize, Serializer};

/// Pairwise Pearson correlation between numeric columns.
///
/// Each pair uses only the rows where both cells are present. A pair with
/// fewer than two such rows, or with a constant side, is `NaN` and
/// serializes as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    #[serde(serialize_with = "serialize_matrix")]
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn compute(columns: Vec<String>, series: &[Vec<Option<f64>>]) -> Self {
        let size = series.len();
        let mut values = vec![vec![f64::NAN; size]; size];

        for i in 0..size {
            values[i][i] = if has_variance(&series[i]) {
                1.0
            } else {
                f64::NAN
            };
            for j in (i + 1)..size {
                let r = pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self { columns, values }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// Bitwise comparison so that two NaN cells compare equal
impl PartialEq for CorrelationMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
            && self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            })
    }
}

fn serialize_matrix<S: Serializer>(values: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
    let rows: Vec<Vec<Option<f64>>> = values
        .iter()
        .map(|row| row.iter().map(|v| (!v.is_nan()).then_some(*v)).collect())
        .collect();
    rows.serialize(serializer)
}

fn has_variance(x: &[Option<f64>]) -> bool {
    let mut present = x.iter().flatten();
    match present.next() {
        Some(first) => present.any(|v| v != first),
        None => false,
    }
}

/// Pearson coefficient over pairwise-complete observations
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().map(|v| Some(*v)).collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let r = pearson(&series(&[1.0, 2.0, 3.0]), &series(&[2.0, 4.0, 6.0]));
        assert!((r - 1.0).abs() < 1e-12);

        let r = pearson(&series(&[1.0, 2.0, 3.0]), &series(&[3.0, 2.0, 1.0]));
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_complete() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let y = vec![Some(1.0), Some(2.0), Some(100.0), Some(3.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_or_short_is_nan() {
        assert!(pearson(&series(&[1.0, 1.0]), &series(&[1.0, 2.0])).is_nan());
        assert!(pearson(&series(&[1.0]), &series(&[1.0])).is_nan());
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let m = CorrelationMatrix::compute(
            vec!["a".into(), "b".into(), "c".into()],
            &[
                series(&[1.0, 2.0, 3.0, 4.0]),
                series(&[2.0, 1.0, 4.0, 3.0]),
                series(&[5.0, 5.0, 5.0, 5.0]),
            ],
        );

        assert_eq!(m.get("a", "a"), Some(1.0));
        assert_eq!(m.get("a", "b"), m.get("b", "a"));
        assert!(m.get("c", "c").unwrap().is_nan());
        assert!(m.get("a", "c").unwrap().is_nan());
        assert_eq!(m.get("a", "z"), None);
        assert_eq!(m, m.clone());
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let m = CorrelationMatrix::compute(
            vec!["a".into(), "b".into()],
            &[series(&[1.0, 2.0]), series(&[3.0, 3.0])],
        );
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["values"][0][0], 1.0);
        assert!(json["values"][0][1].is_null());
    }
}
