//! mutate: ungrouped path and the grouped engine

use super::functions::{ColumnFn, Mutations};
use super::Frame;
use crate::column::Column;
use crate::error::Result;
use crate::table::{Partition, Table};

impl Frame {
    /// Adds or replaces columns.
    ///
    /// Ungrouped, the functions run in insertion order on the evolving
    /// table, so a function sees the columns added before it. Grouped,
    /// each function runs once per partition of the input table and never
    /// sees its siblings' output; results are written back to the rows they
    /// came from, and rows with a null group key get null.
    pub fn mutate(&self, mutations: Mutations) -> Result<Frame> {
        if self.groups.is_empty() {
            log::debug!("ungrouped mutate: {:?}", mutations);
            let mut table = self.table.clone();
            for (name, f) in mutations.iter() {
                let column = f.apply(&table)?.into_column(name, table.row_count())?;
                table.set_column(name, column)?;
            }
            return Ok(self.derive(table));
        }

        let engine = GroupedMutateEngine::new(&self.table, &self.groups)?;
        log::debug!(
            "grouped mutate over {:?}: {} partitions, {:?}",
            self.groups,
            engine.partitions.len(),
            mutations
        );

        // every function reads the input table, so evaluate before assigning
        let mut outputs = Vec::with_capacity(mutations.len());
        for (name, f) in mutations.iter() {
            outputs.push((name, engine.evaluate(name, f)?));
        }

        let mut table = self.table.clone();
        for (name, column) in outputs {
            table.set_column(name, column)?;
        }
        Ok(self.derive(table))
    }
}

/// Runs column functions per partition and restores the input row order
pub(crate) struct GroupedMutateEngine<'a> {
    table: &'a Table,
    partitions: Vec<Partition>,
    // one sub-table per partition, in partition order
    pieces: Vec<Table>,
    // for each input row, its position in the concatenated partition output
    slots: Vec<Option<usize>>,
}

impl<'a> GroupedMutateEngine<'a> {
    pub(crate) fn new<S: AsRef<str>>(table: &'a Table, groups: &[S]) -> Result<Self> {
        let partitions = table.partition_by(groups)?;
        let pieces = partitions
            .iter()
            .map(|p| table.take(&p.rows))
            .collect::<Result<Vec<_>>>()?;

        let mut slots = vec![None; table.row_count()];
        let concatenated = partitions.iter().flat_map(|p| p.rows.iter().copied());
        for (position, row) in concatenated.enumerate() {
            slots[row] = Some(position);
        }

        Ok(Self {
            table,
            partitions,
            pieces,
            slots,
        })
    }

    pub(crate) fn evaluate(&self, name: &str, f: &dyn ColumnFn) -> Result<Column> {
        if self.partitions.is_empty() {
            // no partition to run on: probe the empty table for the type
            let probe = f.apply(&self.table.take(&[])?)?.into_column(name, 0)?;
            return Ok(Column::new_null(
                probe.column_type(),
                self.table.row_count(),
            ));
        }

        let mut outputs = Vec::with_capacity(self.partitions.len());
        for (partition, piece) in self.partitions.iter().zip(&self.pieces) {
            log::trace!(
                "mutate '{}' on partition {:?} ({} rows)",
                name,
                partition.key.values(),
                partition.len()
            );
            outputs.push(f.apply(piece)?.into_column(name, partition.len())?);
        }

        Column::concat(name, &outputs)?.take_opt(&self.slots)
    }
}
