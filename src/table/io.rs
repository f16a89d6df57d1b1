//! Tableの入出力（CSV / JSON）

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};

use super::core::Table;
use crate::column::{Column, ColumnType, Value};
use crate::error::{Error, Result};

/// JSON layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonOrient {
    /// `[{"col": value, ...}, ...]`; column order is not preserved
    Records,
    /// `{"columns": [...], "data": [[...], ...]}`
    Split,
}

#[derive(Serialize, Deserialize)]
struct SplitLayout {
    columns: Vec<String>,
    data: Vec<Vec<Value>>,
}

impl Table {
    /// CSVファイルからテーブルを読み込む
    pub fn read_csv<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Table> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file, has_header)
    }

    /// Reads CSV from any reader. Column types are inferred: Int64, then
    /// Float64, then Boolean, falling back to String. Empty fields are null.
    pub fn from_csv_reader<R: Read>(reader: R, has_header: bool) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut headers: Vec<String> = if has_header {
            rdr.headers()?.iter().map(|h| h.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        let mut rows = 0usize;
        for record in rdr.records() {
            let record = record?;
            // ヘッダーがない場合は"column_0", "column_1"などとする
            while headers.len() < record.len() {
                headers.push(format!("column_{}", headers.len()));
                raw.push(vec![String::new(); rows]);
            }
            for (i, values) in raw.iter_mut().enumerate() {
                values.push(record.get(i).unwrap_or("").to_string());
            }
            rows += 1;
        }

        let mut table = Table::with_row_count(rows);
        for (name, values) in headers.into_iter().zip(raw) {
            table.add_column(name, infer_column(&values))?;
        }
        log::debug!("read CSV table with shape {:?}", table.shape());
        Ok(table)
    }

    /// テーブルをCSVファイルに書き込む
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv_to(file)
    }

    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = Writer::from_writer(writer);
        wtr.write_record(&self.column_names)?;

        for row in 0..self.row_count {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|c| match c.value(row) {
                    Value::Null => String::new(),
                    Value::Float64(v) if v.is_nan() => String::new(),
                    other => other.to_string(),
                })
                .collect();
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    pub fn to_json(&self, orient: JsonOrient) -> Result<String> {
        let rows: Vec<Vec<Value>> = (0..self.row_count)
            .map(|row| self.columns.iter().map(|c| c.value(row)).collect())
            .collect();

        let text = match orient {
            JsonOrient::Records => {
                let records: Vec<BTreeMap<&str, Value>> = rows
                    .into_iter()
                    .map(|row| {
                        self.column_names
                            .iter()
                            .map(String::as_str)
                            .zip(row)
                            .collect()
                    })
                    .collect();
                serde_json::to_string(&records)?
            }
            JsonOrient::Split => serde_json::to_string(&SplitLayout {
                columns: self.column_names.clone(),
                data: rows,
            })?,
        };
        Ok(text)
    }

    /// Parses JSON produced by [`Table::to_json`]. Records input yields
    /// columns in name order; keys missing from a record are null.
    pub fn from_json(text: &str, orient: JsonOrient) -> Result<Table> {
        let (columns, data) = match orient {
            JsonOrient::Records => {
                let records: Vec<BTreeMap<String, Value>> = serde_json::from_str(text)?;
                let columns: Vec<String> = records
                    .iter()
                    .flat_map(|r| r.keys().cloned())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let data = records
                    .into_iter()
                    .map(|mut r| {
                        columns
                            .iter()
                            .map(|c| r.remove(c).unwrap_or(Value::Null))
                            .collect()
                    })
                    .collect();
                (columns, data)
            }
            JsonOrient::Split => {
                let layout: SplitLayout = serde_json::from_str(text)?;
                (layout.columns, layout.data)
            }
        };

        let mut table = Table::with_row_count(data.len());
        for (i, name) in columns.iter().enumerate() {
            let mut values = Vec::with_capacity(data.len());
            for row in &data {
                let value = row.get(i).cloned().ok_or_else(|| {
                    Error::InvalidInput(format!("row is missing a value for column '{}'", name))
                })?;
                values.push(value);
            }
            table.add_column(name.clone(), Column::collect_values(name, &values)?)?;
        }
        Ok(table)
    }
}

/// Picks the narrowest type every non-empty field parses as
fn infer_column(raw: &[String]) -> Column {
    let present = || raw.iter().filter(|s| !s.is_empty());
    let to_value = |ty: ColumnType, s: &str| -> Value {
        if s.is_empty() {
            return Value::Null;
        }
        match ty {
            ColumnType::Int64 => s.parse::<i64>().map(Value::Int64).unwrap_or(Value::Null),
            ColumnType::Float64 => s.parse::<f64>().map(Value::Float64).unwrap_or(Value::Null),
            ColumnType::Boolean => parse_bool(s).map(Value::Boolean).unwrap_or(Value::Null),
            ColumnType::String => Value::String(s.to_string()),
        }
    };

    let column_type = if present().all(|s| s.parse::<i64>().is_ok()) && present().next().is_some() {
        ColumnType::Int64
    } else if present().all(|s| s.parse::<f64>().is_ok()) && present().next().is_some() {
        ColumnType::Float64
    } else if present().all(|s| parse_bool(s).is_some()) && present().next().is_some() {
        ColumnType::Boolean
    } else if present().next().is_none() {
        ColumnType::Float64
    } else {
        ColumnType::String
    };

    let values: Vec<Value> = raw.iter().map(|s| to_value(column_type, s)).collect();
    // every value was produced for `column_type`, so this cannot mismatch
    Column::from_values_typed("<csv>", column_type, &values)
        .unwrap_or_else(|_| Column::new_null(column_type, raw.len()))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
