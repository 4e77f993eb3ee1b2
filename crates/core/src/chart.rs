//! Table to chart conversion.

use crate::types::{ChartData, ChartSeries, TableData};
use serde::{Deserialize, Serialize};

/// A category chart ready for a rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlan {
    pub data: ChartData,

    /// Whether the chart shows a legend.
    pub has_legend: bool,
}

impl ChartPlan {
    /// Plan a chart from explicit chart data.
    pub fn from_data(data: ChartData) -> Self {
        let has_legend = data.series.len() > 1;
        Self { data, has_legend }
    }

    /// Convert a table into a clustered category chart.
    ///
    /// The first column gives the categories and each further header names a
    /// numeric series. Returns `None` when the table has fewer than two
    /// columns or no rows; the caller then renders it as a table.
    pub fn from_table(table: &TableData) -> Option<Self> {
        if table.headers.len() < 2 || table.rows.is_empty() {
            return None;
        }

        let categories = table
            .rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or_default())
            .collect();

        let series = table
            .headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, name)| ChartSeries {
                name: name.clone(),
                values: table
                    .rows
                    .iter()
                    .map(|row| row.get(col).map_or(0.0, |cell| parse_number(cell)))
                    .collect(),
            })
            .collect();

        Some(Self {
            data: ChartData { categories, series },
            has_legend: table.headers.len() > 2,
        })
    }
}

/// Parse a numeric cell, dropping thousands separators. Anything that does
/// not parse counts as zero.
fn parse_number(cell: &str) -> f64 {
    cell.trim().replace(',', "").parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> TableData {
        TableData {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_table_to_chart() {
        let t = table(
            &["Quarter", "Sales", "Costs"],
            &[&["Q1", "1,200", "800"], &["Q2", "n/a", "950.5"]],
        );
        let plan = ChartPlan::from_table(&t).unwrap();

        assert_eq!(plan.data.categories, vec!["Q1", "Q2"]);
        assert_eq!(plan.data.series.len(), 2);
        assert_eq!(plan.data.series[0].name, "Sales");
        assert_eq!(plan.data.series[0].values, vec![1200.0, 0.0]);
        assert_eq!(plan.data.series[1].values, vec![800.0, 950.5]);
        assert!(plan.has_legend);
    }

    #[test]
    fn test_short_rows_fill_with_zero() {
        let t = table(&["Item", "Value"], &[&["A"]]);
        let plan = ChartPlan::from_table(&t).unwrap();

        assert_eq!(plan.data.series[0].values, vec![0.0]);
        assert!(!plan.has_legend);
    }

    #[test]
    fn test_unconvertible_tables() {
        assert_eq!(ChartPlan::from_table(&table(&["Only"], &[&["1"]])), None);
        assert_eq!(ChartPlan::from_table(&table(&["A", "B"], &[])), None);
    }
}
