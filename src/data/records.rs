//! Record types shared by the loader, merger and dashboard.

use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};

/// Name of the derived calendar-day column
pub const DATE_COLUMN: &str = "date";
/// Name of the sentiment label column
pub const CLASSIFICATION_COLUMN: &str = "classification";
/// Name of the derived profitable flag column
pub const PROFIT_COLUMN: &str = "Profit";

/// One day of the fear/greed index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentRecord {
    pub date: NaiveDate,
    pub classification: String,
}

/// One executed trade from the trade log
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    pub coin: String,
    pub side: String,
    pub closed_pnl: f64,
    /// Raw cells of the trade file, in file column order
    pub fields: Vec<String>,
}

/// Trade log as read from disk: header row plus typed records
#[derive(Debug, Clone, Default)]
pub struct TradeTable {
    pub columns: Vec<String>,
    pub pnl_index: usize,
    pub records: Vec<TradeRecord>,
}

/// A trade annotated with the sentiment of its trade date
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTradeRecord {
    pub trade: TradeRecord,
    pub classification: String,
    pub profitable: bool,
}

impl MergedTradeRecord {
    pub fn date(&self) -> NaiveDate {
        self.trade.date
    }

    pub fn coin(&self) -> &str {
        &self.trade.coin
    }

    pub fn side(&self) -> &str {
        &self.trade.side
    }

    pub fn closed_pnl(&self) -> f64 {
        self.trade.closed_pnl
    }
}

/// A trade is profitable only when its realized PnL is strictly positive
pub fn is_profitable(closed_pnl: f64) -> bool {
    closed_pnl > 0.0
}

/// Where a merged column's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnSource {
    Passthrough(usize),
    Pnl,
    Date,
    Classification,
    Profit,
}

/// The joined working dataset, built once at startup and never mutated
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    columns: Vec<String>,
    sources: Vec<ColumnSource>,
    records: Vec<MergedTradeRecord>,
}

impl MergedTable {
    /// Build the merged column layout from the trade file header.
    ///
    /// Trade columns keep their file order; a trade column named `date` is
    /// shadowed in place by the derived day, otherwise `date` is appended.
    pub fn new(trade_columns: &[String], pnl_index: usize, records: Vec<MergedTradeRecord>) -> Self {
        let mut columns = Vec::with_capacity(trade_columns.len() + 3);
        let mut sources = Vec::with_capacity(trade_columns.len() + 3);

        // Trade columns named like a derived column are replaced in place
        for (idx, name) in trade_columns.iter().enumerate() {
            let source = match name.as_str() {
                DATE_COLUMN => ColumnSource::Date,
                CLASSIFICATION_COLUMN => ColumnSource::Classification,
                PROFIT_COLUMN => ColumnSource::Profit,
                _ if idx == pnl_index => ColumnSource::Pnl,
                _ => ColumnSource::Passthrough(idx),
            };
            columns.push(name.clone());
            sources.push(source);
        }

        let derived = [
            (DATE_COLUMN, ColumnSource::Date),
            (CLASSIFICATION_COLUMN, ColumnSource::Classification),
            (PROFIT_COLUMN, ColumnSource::Profit),
        ];
        for (name, source) in derived {
            if !sources.contains(&source) {
                columns.push(name.to_string());
                sources.push(source);
            }
        }

        Self {
            columns,
            sources,
            records,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[MergedTradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest trade date, `None` for an empty table
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(MergedTradeRecord::date).min()?;
        let max = self.records.iter().map(MergedTradeRecord::date).max()?;
        Some((min, max))
    }

    /// Distinct coins, sorted
    pub fn coins(&self) -> Vec<String> {
        let mut coins: Vec<String> = self.records.iter().map(|r| r.coin().to_string()).collect();
        coins.sort();
        coins.dedup();
        coins
    }

    /// Distinct sides in the order they first appear
    pub fn sides(&self) -> Vec<String> {
        let mut sides: Vec<String> = Vec::new();
        for record in &self.records {
            if !sides.iter().any(|s| s == record.side()) {
                sides.push(record.side().to_string());
            }
        }
        sides
    }

    /// Borrowed JSON view of one record in merged column order
    pub fn row<'a>(&'a self, record: &'a MergedTradeRecord) -> RowView<'a> {
        RowView {
            table: self,
            record,
        }
    }
}

/// Serializes a merged record as a JSON object keyed by column name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a MergedTable,
    record: &'a MergedTradeRecord,
}

impl Serialize for RowView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.columns.len()))?;
        for (name, source) in self.table.columns.iter().zip(&self.table.sources) {
            match *source {
                ColumnSource::Passthrough(idx) => {
                    let raw = self.record.trade.fields.get(idx).map(String::as_str).unwrap_or("");
                    map.serialize_entry(name, &cell_value(raw))?;
                }
                ColumnSource::Pnl => map.serialize_entry(name, &self.record.closed_pnl())?,
                ColumnSource::Date => {
                    map.serialize_entry(name, &self.record.date().format("%Y-%m-%d").to_string())?
                }
                ColumnSource::Classification => {
                    map.serialize_entry(name, &self.record.classification)?
                }
                ColumnSource::Profit => map.serialize_entry(name, &self.record.profitable)?,
            }
        }
        map.end()
    }
}

/// Numeric-looking passthrough cells become JSON numbers, the rest stay text
pub fn cell_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    match raw.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(number) => Value::Number(number),
        None => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(date: &str, pnl: f64) -> TradeRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        TradeRecord {
            timestamp: date.and_hms_opt(9, 30, 0).unwrap(),
            date,
            coin: "BTC".to_string(),
            side: "BUY".to_string(),
            closed_pnl: pnl,
            fields: vec!["BTC".to_string(), pnl.to_string(), "x1".to_string()],
        }
    }

    #[test]
    fn test_profitable_is_strict() {
        assert!(is_profitable(0.01));
        assert!(!is_profitable(0.0));
        assert!(!is_profitable(-3.0));
    }

    #[test]
    fn test_merged_columns_append_derived() {
        let columns = vec!["Coin".to_string(), "Closed PnL".to_string(), "Note".to_string()];
        let table = MergedTable::new(&columns, 1, vec![]);
        assert_eq!(
            table.columns(),
            &["Coin", "Closed PnL", "Note", "date", "classification", "Profit"]
        );
        assert!(table.date_bounds().is_none());
    }

    #[test]
    fn test_existing_date_column_is_shadowed() {
        let columns = vec!["date".to_string(), "Closed PnL".to_string(), "Coin".to_string()];
        let record = MergedTradeRecord {
            trade: TradeRecord {
                fields: vec!["garbage".to_string(), "4".to_string(), "ETH".to_string()],
                ..trade("2024-02-03", 4.0)
            },
            classification: "Greed".to_string(),
            profitable: true,
        };
        let table = MergedTable::new(&columns, 1, vec![record]);
        assert_eq!(table.columns(), &["date", "Closed PnL", "Coin", "classification", "Profit"]);

        let row = serde_json::to_value(table.row(&table.records()[0])).unwrap();
        assert_eq!(row["date"], "2024-02-03");
        assert_eq!(row["Closed PnL"], 4.0);
        assert_eq!(row["Coin"], "ETH");
        assert_eq!(row["Profit"], true);
    }

    #[test]
    fn test_existing_derived_columns_are_not_duplicated() {
        let columns = vec![
            "Coin".to_string(),
            "Closed PnL".to_string(),
            "classification".to_string(),
            "Profit".to_string(),
        ];
        let record = MergedTradeRecord {
            trade: trade("2024-01-01", -2.5),
            classification: "Fear".to_string(),
            profitable: false,
        };
        let table = MergedTable::new(&columns, 1, vec![record]);
        assert_eq!(table.columns(), &["Coin", "Closed PnL", "classification", "Profit", "date"]);

        let json = serde_json::to_string(&table.row(&table.records()[0])).unwrap();
        assert_eq!(
            json,
            r#"{"Coin":"BTC","Closed PnL":-2.5,"classification":"Fear","Profit":false,"date":"2024-01-01"}"#
        );
    }

    #[test]
    fn test_row_keeps_column_order() {
        let columns = vec!["Coin".to_string(), "Closed PnL".to_string(), "Note".to_string()];
        let record = MergedTradeRecord {
            trade: trade("2024-01-01", -2.5),
            classification: "Fear".to_string(),
            profitable: false,
        };
        let table = MergedTable::new(&columns, 1, vec![record]);
        let json = serde_json::to_string(&table.row(&table.records()[0])).unwrap();
        assert_eq!(
            json,
            r#"{"Coin":"BTC","Closed PnL":-2.5,"Note":"x1","date":"2024-01-01","classification":"Fear","Profit":false}"#
        );
    }

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value("42"), Value::from(42));
        assert_eq!(cell_value("0.5"), Value::from(0.5));
        assert_eq!(cell_value("BUY"), Value::from("BUY"));
        assert_eq!(cell_value(""), Value::from(""));
        assert_eq!(cell_value("NaN"), Value::from("NaN"));
    }
}
