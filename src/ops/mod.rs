//! Column helpers for `mutate` and `agg` closures
//!
//! ```ignore
//! let frame = frame.group_by(&["team"])?.agg(
//!     Aggregations::new()
//!         .add("mean_score", |t: &Table| ops::mean(t.column("score")?))
//!         .add("n", |t: &Table| Ok(ops::count(t.column("score")?))),
//! )?;
//! ```

// 集約関数
pub mod reduce;

// ウィンドウ関数
pub mod window;

pub use reduce::{count, cov, first, last, max, mean, median, min, std, sum, var};
pub use window::{center, cumsum, rank, rolling_mean, shift};
