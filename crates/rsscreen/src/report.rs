//! Screening output.

use polars::prelude::*;
use rsscreen_core::Rejection;
use rsscreen_screen::RankedRow;
use serde::Serialize;

/// Ordered result rows plus the context needed to render them.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    /// Window labels in catalog order.
    pub windows: Vec<String>,
    /// Trend flag names in configuration order.
    pub flag_names: Vec<String>,
    /// Rows that passed the filters, sorted and truncated.
    pub rows: Vec<RankedRow>,
    /// Number of instruments that were ranked.
    pub universe_size: usize,
    /// Series excluded during ingestion.
    pub rejected: Vec<Rejection>,
}

impl ScreeningReport {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no row passed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Symbols in report order.
    pub fn symbols(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }

    /// Converts the rows to a DataFrame.
    ///
    /// Columns follow the field names used by filters: `Symbol`, `Close`,
    /// `History`, `YTD`, `Perf_<label>`, `RS_<label>` and one boolean column
    /// per flag. Missing values are nulls.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be assembled.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![
            Column::new(
                "Symbol".into(),
                self.rows.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
            ),
            Column::new("Close".into(), self.rows.iter().map(|r| r.close).collect::<Vec<_>>()),
            Column::new(
                "History".into(),
                self.rows.iter().map(|r| r.history as u64).collect::<Vec<_>>(),
            ),
            Column::new("YTD".into(), self.rows.iter().map(|r| r.ytd).collect::<Vec<_>>()),
        ];

        for (i, label) in self.windows.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|r| r.windows.get(i).and_then(|w| w.performance))
                .collect();
            columns.push(Column::new(format!("Perf_{label}").into(), values));
        }
        for (i, label) in self.windows.iter().enumerate() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|r| r.windows.get(i).and_then(|w| w.rating))
                .collect();
            columns.push(Column::new(format!("RS_{label}").into(), values));
        }
        for (i, name) in self.flag_names.iter().enumerate() {
            let values: Vec<Option<bool>> = self
                .rows
                .iter()
                .map(|r| r.flags.get(i).and_then(|f| f.value))
                .collect();
            columns.push(Column::new(name.as_str().into(), values));
        }

        DataFrame::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsscreen_core::DataError;
    use rsscreen_metrics::TrendFlag;
    use rsscreen_screen::WindowFigures;

    fn report() -> ScreeningReport {
        let row = |symbol: &str, rating: Option<f64>, flag: Option<bool>| RankedRow {
            symbol: symbol.to_string(),
            close: 100.0,
            history: 260,
            ytd: Some(3.5),
            windows: vec![WindowFigures {
                window: "1M".to_string(),
                performance: rating.map(|r| r / 10.0),
                rating,
            }],
            flags: vec![TrendFlag {
                name: "Above200MA".to_string(),
                value: flag,
            }],
        };

        ScreeningReport {
            windows: vec!["1M".to_string()],
            flag_names: vec!["Above200MA".to_string()],
            rows: vec![row("QQQ", Some(99.0), Some(true)), row("TLT", None, None)],
            universe_size: 3,
            rejected: vec![Rejection {
                symbol: "BAD".to_string(),
                error: DataError::EmptySeries("BAD".to_string()),
            }],
        }
    }

    #[test]
    fn test_to_dataframe() {
        let df = report().to_dataframe().unwrap();
        assert_eq!(df.height(), 2);

        let names: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Symbol", "Close", "History", "YTD", "Perf_1M", "RS_1M", "Above200MA"]);

        let rs = df.column("RS_1M").unwrap().as_materialized_series().f64().unwrap();
        assert_eq!(rs.get(0), Some(99.0));
        assert_eq!(rs.get(1), None);

        let flags = df.column("Above200MA").unwrap().as_materialized_series().bool().unwrap();
        assert_eq!(flags.get(0), Some(true));
        assert_eq!(flags.get(1), None);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["universe_size"], 3);
        assert_eq!(json["rows"][0]["symbol"], "QQQ");
        assert!(json["rows"][1]["windows"][0]["rating"].is_null());
        assert_eq!(json["rejected"][0]["symbol"], "BAD");
        assert_eq!(json["rejected"][0]["error"], "Empty price series for BAD");
    }

    #[test]
    fn test_serialize_repeated_rejections() {
        let mut report = report();
        report.rejected = vec![
            Rejection {
                symbol: "X".to_string(),
                error: DataError::EmptySeries("X".to_string()),
            },
            Rejection {
                symbol: "X".to_string(),
                error: DataError::DuplicateSymbol("X".to_string()),
            },
        ];

        let json = serde_json::to_value(&report).unwrap();
        let rejected = json["rejected"].as_array().unwrap();
        assert_eq!(rejected.len(), report.rejected.len());
        assert_eq!(rejected[0]["error"], "Empty price series for X");
        assert_eq!(rejected[1]["error"], "Duplicate symbol: X");
    }

    #[test]
    fn test_symbols() {
        let report = report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.symbols(), vec!["QQQ", "TLT"]);
    }
}
