//! agg: one output row per group (or one row overall)

use super::functions::Aggregations;
use super::Frame;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::table::{Partition, Table};

impl Frame {
    /// Reduces the frame with the given reducers.
    ///
    /// Ungrouped, the result has a single row. Grouped, it has one row per
    /// distinct key in ascending key order, with the group columns first and
    /// the reducer columns after them in insertion order. The result is never
    /// grouped.
    pub fn agg(&self, aggregations: Aggregations) -> Result<Frame> {
        let table = if self.groups.is_empty() {
            log::debug!("ungrouped agg: {:?}", aggregations);
            let mut table = Table::new();
            for (name, f) in aggregations.iter() {
                let value = f.reduce(&self.table)?;
                table.add_column(name, Column::collect_values(name, &[value])?)?;
            }
            table
        } else {
            GroupedAggregateEngine::new(&self.table, &self.groups)?.run(&aggregations)?
        };
        Ok(Frame::from_table(table))
    }
}

/// Runs reducers per partition and lays the results out one row per key
pub(crate) struct GroupedAggregateEngine<'a> {
    table: &'a Table,
    keys: Vec<&'a str>,
    partitions: Vec<Partition>,
}

impl<'a> GroupedAggregateEngine<'a> {
    pub(crate) fn new(table: &'a Table, groups: &'a [String]) -> Result<Self> {
        let partitions = table.partition_by(groups)?;

        // a repeated group column is emitted once
        let mut keys: Vec<&str> = Vec::with_capacity(groups.len());
        for name in groups {
            if !keys.contains(&name.as_str()) {
                keys.push(name);
            }
        }

        Ok(Self {
            table,
            keys,
            partitions,
        })
    }

    pub(crate) fn run(&self, aggregations: &Aggregations) -> Result<Table> {
        if let Some(name) = aggregations.names().find(|n| self.keys.contains(n)) {
            return Err(Error::DuplicateColumnName(name.to_string()));
        }
        log::debug!(
            "grouped agg over {:?}: {} partitions, {:?}",
            self.keys,
            self.partitions.len(),
            aggregations
        );

        // key values are identical within a partition, so its first row stands in
        let first_rows: Vec<usize> = self.partitions.iter().map(|p| p.rows[0]).collect();
        let mut result = Table::new();
        for &key in &self.keys {
            result.add_column(key, self.table.column(key)?.take(&first_rows)?)?;
        }

        let pieces = self
            .partitions
            .iter()
            .map(|p| self.table.take(&p.rows))
            .collect::<Result<Vec<_>>>()?;

        for (name, f) in aggregations.iter() {
            let mut values = Vec::with_capacity(pieces.len());
            for (partition, piece) in self.partitions.iter().zip(&pieces) {
                log::trace!("agg '{}' on partition {:?}", name, partition.key.values());
                values.push(f.reduce(piece)?);
            }
            result.add_column(name, Column::collect_values(name, &values)?)?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::{ColumnType, Value};
    use crate::ops;

    fn sales() -> Table {
        Table::from_columns(vec![
            ("region", Column::from(vec!["west", "east", "west", "east", "north"])),
            ("units", Column::from(vec![3i64, 5, 7, 1, 4])),
        ])
        .unwrap()
    }

    #[test]
    fn test_grouped_agg_sorted_keys() {
        let out = Frame::from_table(sales())
            .group_by(&["region"])
            .unwrap()
            .agg(
                Aggregations::new()
                    .add("total", |t: &Table| ops::sum(t.column("units")?))
                    .add("mean", |t: &Table| ops::mean(t.column("units")?)),
            )
            .unwrap();

        assert!(out.groups().is_empty());
        assert_eq!(out.columns(), &["region", "total", "mean"]);
        let regions = out.table().column("region").unwrap().to_values();
        assert_eq!(
            regions,
            vec![Value::from("east"), Value::from("north"), Value::from("west")]
        );
        assert_eq!(out.table().value(2, "total").unwrap(), Value::Int64(10));
        assert_eq!(out.table().value(0, "mean").unwrap(), Value::Float64(3.0));
    }

    #[test]
    fn test_ungrouped_agg_single_row() {
        let out = Frame::from_table(sales())
            .agg(Aggregations::new().add("n", |t: &Table| Ok(t.row_count())))
            .unwrap();
        assert_eq!(out.shape(), (1, 1));
        assert_eq!(out.table().value(0, "n").unwrap(), Value::Int64(5));
    }

    #[test]
    fn test_reducer_named_like_key() {
        let result = Frame::from_table(sales())
            .group_by(&["region"])
            .unwrap()
            .agg(Aggregations::new().add("region", |t: &Table| Ok(t.row_count())));
        assert!(matches!(result, Err(Error::DuplicateColumnName(_))));
    }

    #[test]
    fn test_repeated_group_column_emitted_once() {
        let out = Frame::from_table(sales())
            .group_by(&["region", "region"])
            .unwrap()
            .agg(Aggregations::new().add("n", |t: &Table| Ok(t.row_count())))
            .unwrap();
        assert_eq!(out.columns(), &["region", "n"]);
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let out = Frame::from_table(sales().head(0))
            .group_by(&["region"])
            .unwrap()
            .agg(Aggregations::new().add("total", |t: &Table| ops::sum(t.column("units")?)))
            .unwrap();
        assert_eq!(out.shape(), (0, 2));
        assert_eq!(
            out.table().column("region").unwrap().column_type(),
            ColumnType::String
        );
        assert_eq!(
            out.table().column("total").unwrap().column_type(),
            ColumnType::Float64
        );
    }
}
