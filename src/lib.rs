// 特定の警告を無効化
#![allow(clippy::new_without_default)]
#![allow(clippy::len_without_is_empty)]

//! kadro: grouped data manipulation verbs over an in-memory columnar table
//!
//! ```ignore
//! use kadro::{ops, Aggregations, Frame, Mutations, Table};
//!
//! let table = Table::read_csv("scores.csv", true)?;
//! let summary = Frame::from_table(table)
//!     .group_by(&["team"])?
//!     .mutate(Mutations::new().add("rank", |t: &Table| ops::rank(t.column("score")?)))?
//!     .agg(Aggregations::new().add("best", |t: &Table| ops::max(t.column("score")?)))?;
//! println!("{}", summary);
//! ```

pub mod column;
pub mod config;
pub mod error;
pub mod frame;
pub mod ops;
pub mod table;

// Re-export commonly used types
pub use column::{Column, ColumnType, Value};
pub use config::DisplayConfig;
pub use error::{Error, KadroError, Result};
pub use frame::{predicate, Aggregations, ColumnOutput, Frame, Mutations};
pub use table::{JoinType, JsonOrient, SortKey, Table};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
