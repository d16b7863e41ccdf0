use crate::data::dataset::TabularDataset;
use crate::error::{AppError, Result};

/// Numeric view of a text column: parsed values plus the number of cells that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedColumn {
    pub values: Vec<f64>,
    pub missing: usize,
}

/// Parse every cell of `column` as `f64`. Failed parses (and NaN) count as missing.
pub fn coerce_numeric(dataset: &TabularDataset, column: &str) -> Result<CoercedColumn> {
    let cells = dataset.column_values(column)?;
    let mut values = Vec::with_capacity(cells.len());
    let mut missing = 0usize;
    for cell in cells {
        match cell.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() => values.push(v),
            _ => missing += 1,
        }
    }
    Ok(CoercedColumn { values, missing })
}

pub fn is_numeric_column(coerced: &CoercedColumn) -> bool {
    !coerced.values.is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Mean,
    Min,
    Max,
}

impl Aggregate {
    pub const ALL: [Aggregate; 3] = [Aggregate::Mean, Aggregate::Min, Aggregate::Max];

    pub fn button_label(&self) -> &'static str {
        match self {
            Aggregate::Mean => "Mean",
            Aggregate::Min => "Minimum",
            Aggregate::Max => "Maximum",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Aggregate::Mean => "Mean value",
            Aggregate::Min => "Minimum value",
            Aggregate::Max => "Maximum value",
        }
    }

    fn reduce(&self, values: &[f64]) -> f64 {
        match self {
            Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Min => values.iter().copied().min_by(f64::total_cmp).unwrap_or(f64::NAN),
            Aggregate::Max => values.iter().copied().max_by(f64::total_cmp).unwrap_or(f64::NAN),
        }
    }

    /// Coerce `column` and reduce its numeric values.
    pub fn compute(&self, dataset: &TabularDataset, column: &str) -> Result<AggregateResult> {
        let coerced = coerce_numeric(dataset, column)?;
        if !is_numeric_column(&coerced) {
            return Err(AppError::NotNumeric { column: column.to_string() });
        }
        Ok(AggregateResult {
            kind: *self,
            column: column.to_string(),
            value: self.reduce(&coerced.values),
            count: coerced.values.len(),
            skipped: coerced.missing,
        })
    }
}

/// A computed value and where it came from. Shown once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub kind: Aggregate,
    pub column: String,
    pub value: f64,
    pub count: usize,
    pub skipped: usize,
}

impl AggregateResult {
    pub fn report(&self) -> String {
        format!(
            "{} of column {}: {}\n({} numeric values, {} skipped)",
            self.kind.button_label(),
            self.column,
            self.value,
            self.count,
            self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(kind: Aggregate, ds: &TabularDataset) -> Result<f64> {
        kind.compute(ds, "v").map(|r| r.value)
    }

    fn single_column(values: &[&str]) -> TabularDataset {
        TabularDataset::new(
            vec!["v".into()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
    }

    #[test]
    fn mixed_column_skips_non_numeric_cells() {
        let ds = single_column(&["3", "x", "5"]);
        let coerced = coerce_numeric(&ds, "v").unwrap();
        assert_eq!(coerced.values, vec![3.0, 5.0]);
        assert_eq!(coerced.missing, 1);
        assert!(is_numeric_column(&coerced));

        assert_eq!(value(Aggregate::Mean, &ds).unwrap(), 4.0);
        assert_eq!(value(Aggregate::Min, &ds).unwrap(), 3.0);
        assert_eq!(value(Aggregate::Max, &ds).unwrap(), 5.0);
    }

    #[test]
    fn text_column_is_not_numeric() {
        let ds = single_column(&["x", "y", "z"]);
        let coerced = coerce_numeric(&ds, "v").unwrap();
        assert!(!is_numeric_column(&coerced));

        let expected = Err(AppError::NotNumeric { column: "v".into() });
        assert_eq!(value(Aggregate::Mean, &ds), expected);
        assert_eq!(value(Aggregate::Min, &ds), expected);
        assert_eq!(value(Aggregate::Max, &ds), expected);
    }

    #[test]
    fn nan_text_counts_as_missing() {
        let ds = single_column(&["NaN", "-2.5", " 7 ", ""]);
        let coerced = coerce_numeric(&ds, "v").unwrap();
        assert_eq!(coerced.values, vec![-2.5, 7.0]);
        assert_eq!(coerced.missing, 2);
        assert_eq!(value(Aggregate::Min, &ds).unwrap(), -2.5);
    }

    #[test]
    fn empty_table_is_not_numeric() {
        let ds = single_column(&[]);
        assert!(matches!(value(Aggregate::Mean, &ds), Err(AppError::NotNumeric { .. })));
    }

    #[test]
    fn unknown_column_propagates() {
        let ds = single_column(&["1"]);
        assert!(matches!(
            coerce_numeric(&ds, "nope"),
            Err(AppError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn report_names_column_and_counts() {
        let ds = single_column(&["1", "2", "n/a"]);
        let result = Aggregate::Max.compute(&ds, "v").unwrap();
        assert_eq!(result.report(), "Maximum of column v: 2\n(2 numeric values, 1 skipped)");
    }
}
