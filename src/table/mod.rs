//! In-memory columnar table: storage and the relational operations `Frame`
//! builds on

// コアモジュール
pub mod core;

// 列の選択・名前変更
pub mod select;

// 行操作
pub mod row_ops;

// 並べ替え
pub mod sort;

// グループ化
pub mod group;

// 結合操作
pub mod join;

// 入出力
pub mod io;

// 再エクスポート
pub use self::core::Table;
pub use group::{GroupKey, Partition};
pub use io::JsonOrient;
pub use join::JoinType;
pub use sort::SortKey;
