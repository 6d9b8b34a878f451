//! CSV loading for the sentiment index and the trade log

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

use super::records::{SentimentRecord, TradeRecord, TradeTable};
use crate::error::LoadError;

pub const SENTIMENT_DATE_COLUMN: &str = "date";
pub const SENTIMENT_CLASS_COLUMN: &str = "classification";

pub const TRADE_TIMESTAMP_COLUMN: &str = "Timestamp IST";
pub const TRADE_COIN_COLUMN: &str = "Coin";
pub const TRADE_SIDE_COLUMN: &str = "Side";
pub const TRADE_PNL_COLUMN: &str = "Closed PnL";

/// Trade log timestamps look like "02-12-2024 22:50"
pub const TRADE_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Numeric day-first forms are not accepted: "07-03-2024" is July 3rd
const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m-%d-%Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a calendar day, discarding any time of day
pub fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Load the fear/greed index from a CSV file
pub fn load_sentiment(path: &Path) -> Result<Vec<SentimentRecord>, LoadError> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        file: name.clone(),
        source,
    })?;
    let records = read_sentiment(BufReader::new(file), &name)?;
    info!("Loaded {} sentiment days from {}", records.len(), name);
    Ok(records)
}

/// Load the trade log from a CSV file
pub fn load_trades(path: &Path) -> Result<TradeTable, LoadError> {
    let name = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        file: name.clone(),
        source,
    })?;
    let table = read_trades(BufReader::new(file), &name)?;
    info!(
        "Loaded {} trades ({} columns) from {}",
        table.records.len(),
        table.columns.len(),
        name
    );
    if let Some((first, last)) = timestamp_span(&table.records) {
        info!("Trades span {} to {}", first, last);
    }
    Ok(table)
}

/// Earliest and latest trade timestamps
pub fn timestamp_span(records: &[TradeRecord]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    records.iter().fold(None, |span, trade| {
        let ts = trade.timestamp;
        Some(match span {
            None => (ts, ts),
            Some((first, last)) => (first.min(ts), last.max(ts)),
        })
    })
}

/// Parse sentiment rows from any reader.
///
/// Keeps the first classification seen for each day. Rows with a blank
/// classification are skipped and do not claim their day.
pub fn read_sentiment<R: Read>(reader: R, name: &str) -> Result<Vec<SentimentRecord>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = read_headers(&mut csv_reader, name)?;
    let date_idx = column_index(&headers, SENTIMENT_DATE_COLUMN, name)?;
    let class_idx = column_index(&headers, SENTIMENT_CLASS_COLUMN, name)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let mut unlabeled = 0usize;

    for result in csv_reader.records() {
        let row = result.map_err(|source| csv_error(name, source))?;
        let line = line_of(&row);

        let raw_date = row.get(date_idx).unwrap_or("");
        let date = parse_calendar_day(raw_date)
            .ok_or_else(|| invalid(name, line, SENTIMENT_DATE_COLUMN, raw_date))?;

        let classification = row.get(class_idx).unwrap_or("").trim();
        if classification.is_empty() {
            unlabeled += 1;
            continue;
        }

        if !seen.insert(date) {
            duplicates += 1;
            continue;
        }

        records.push(SentimentRecord {
            date,
            classification: classification.to_string(),
        });
    }

    if unlabeled > 0 {
        warn!("{}: ignored {} rows without a classification", name, unlabeled);
    }
    if duplicates > 0 {
        warn!("{}: ignored {} duplicate sentiment days", name, duplicates);
    }

    Ok(records)
}

/// Parse trade rows from any reader, keeping every cell as read.
///
/// Only the timestamp and PnL cells are trimmed before parsing.
pub fn read_trades<R: Read>(reader: R, name: &str) -> Result<TradeTable, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);
    let headers = read_headers(&mut csv_reader, name)?;
    let ts_idx = column_index(&headers, TRADE_TIMESTAMP_COLUMN, name)?;
    let coin_idx = column_index(&headers, TRADE_COIN_COLUMN, name)?;
    let side_idx = column_index(&headers, TRADE_SIDE_COLUMN, name)?;
    let pnl_idx = column_index(&headers, TRADE_PNL_COLUMN, name)?;

    let mut records = Vec::new();

    for result in csv_reader.records() {
        let row = result.map_err(|source| csv_error(name, source))?;
        let line = line_of(&row);

        let raw_ts = row.get(ts_idx).unwrap_or("");
        let timestamp = NaiveDateTime::parse_from_str(raw_ts.trim(), TRADE_TIMESTAMP_FORMAT)
            .map_err(|_| invalid(name, line, TRADE_TIMESTAMP_COLUMN, raw_ts))?;

        let raw_pnl = row.get(pnl_idx).unwrap_or("");
        let closed_pnl = raw_pnl
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|pnl| pnl.is_finite())
            .ok_or_else(|| invalid(name, line, TRADE_PNL_COLUMN, raw_pnl))?;

        records.push(TradeRecord {
            timestamp,
            date: timestamp.date(),
            coin: row.get(coin_idx).unwrap_or("").to_string(),
            side: row.get(side_idx).unwrap_or("").to_string(),
            closed_pnl,
            fields: row.iter().map(str::to_string).collect(),
        });
    }

    Ok(TradeTable {
        columns: headers.iter().map(str::to_string).collect(),
        pnl_index: pnl_idx,
        records,
    })
}

fn read_headers<R: Read>(
    csv_reader: &mut csv::Reader<R>,
    name: &str,
) -> Result<StringRecord, LoadError> {
    csv_reader
        .headers()
        .cloned()
        .map_err(|source| csv_error(name, source))
}

fn column_index(headers: &StringRecord, column: &str, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            file: name.to_string(),
            column: column.to_string(),
        })
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map_or(0, |pos| pos.line())
}

fn csv_error(name: &str, source: csv::Error) -> LoadError {
    LoadError::Csv {
        file: name.to_string(),
        source,
    }
}

fn invalid(name: &str, line: u64, column: &str, value: &str) -> LoadError {
    LoadError::InvalidValue {
        file: name.to_string(),
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}
