//! Table transformations for the survey join pipeline.
//!
//! Every operation borrows its inputs and returns a new [`cebu_model::Table`]:
//!
//! - [`project`]: keep an ordered subset of columns
//! - [`filter_equals`]: keep rows whose column equals a literal
//! - [`join_on`] / [`join_all`]: inner join on a composite key
//! - [`to_dataframe`] / [`write_delimited`]: hand the result to Polars

pub mod error;
pub mod filter;
pub mod frame;
pub mod join;
pub mod project;

pub use error::{Result, TransformError};
pub use filter::filter_equals;
pub use frame::{to_dataframe, write_delimited};
pub use join::{JoinOptions, join_all, join_on, join_on_with};
pub use project::project;
