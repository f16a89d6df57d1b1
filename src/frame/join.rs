//! Frame joins over [`Table::merge`]

use super::Frame;
use crate::error::{Error, Result};
use crate::table::JoinType;

impl Frame {
    /// 左結合
    ///
    /// Joins on `by`, or on every column the two tables share when `by` is
    /// `None`. Keeps this frame's groups.
    pub fn left_join(&self, other: &Frame, by: Option<&[&str]>) -> Result<Frame> {
        self.join(other, by, JoinType::Left)
    }

    /// 内部結合
    pub fn inner_join(&self, other: &Frame, by: Option<&[&str]>) -> Result<Frame> {
        self.join(other, by, JoinType::Inner)
    }

    fn join(&self, other: &Frame, by: Option<&[&str]>, how: JoinType) -> Result<Frame> {
        let keys: Vec<String> = match by {
            Some(by) => by.iter().map(|s| s.to_string()).collect(),
            None => {
                let common = self.table.common_columns(&other.table);
                if common.is_empty() {
                    return Err(Error::JoinColumn(format!(
                        "no common columns between {:?} and {:?}",
                        self.table.column_names(),
                        other.table.column_names()
                    )));
                }
                log::debug!("joining on common columns {:?}", common);
                common
            }
        };

        let table = self.table.merge(&other.table, &keys, how)?;
        Ok(self.derive(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::table::Table;

    fn people() -> Frame {
        Frame::from_table(
            Table::from_columns(vec![
                ("name", Column::from(vec!["vincent", "tim", "anna"])),
                ("age", Column::from(vec![28i64, 30, 25])),
            ])
            .unwrap(),
        )
    }

    fn heights() -> Frame {
        Frame::from_table(
            Table::from_columns(vec![
                ("name", Column::from(vec!["vincent", "tim"])),
                ("length", Column::from(vec![188i64, 172])),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_auto_detected_keys() {
        assert_eq!(people().inner_join(&heights(), None).unwrap().row_count(), 2);
        assert_eq!(people().left_join(&heights(), None).unwrap().row_count(), 3);
        assert_eq!(heights().left_join(&people(), None).unwrap().row_count(), 2);
    }

    #[test]
    fn test_join_keeps_left_groups() {
        let grouped = people().group_by(&["name"]).unwrap();
        let joined = grouped.left_join(&heights(), Some(&["name"])).unwrap();
        assert_eq!(joined.groups(), &["name"]);
    }

    #[test]
    fn test_join_column_errors() {
        let other = Frame::from_table(
            Table::from_columns(vec![("city", Column::from(vec!["x"]))]).unwrap(),
        );
        assert!(matches!(
            people().inner_join(&other, None),
            Err(Error::JoinColumn(_))
        ));
        assert!(matches!(
            people().left_join(&heights(), Some(&["age"])),
            Err(Error::JoinColumn(_))
        ));
    }
}
