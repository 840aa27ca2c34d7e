#![warn(missing_docs)]
//! kidsmotion Data Management
//!
//! Loads the phenotypic table and narrows it down to the participants an
//! analysis should see:
//! - `load` reads a delimited table and validates the core columns
//! - `clean` applies the study inclusion rules and derives `AGE_YRS`
//! - `filter` applies a motion threshold and an inclusive age window
//! - `sample` draws a random subset from a caller-supplied RNG

mod dataset;
mod error;
mod filter;
mod load;
mod sample;
mod schema;

pub use dataset::{Dataset, Subject};
pub use error::{DataError, Result};
pub use filter::{FilterCriteria, clean, filter};
pub use load::{from_reader, load, load_with};
pub use sample::sample;
pub use schema::{AGE_YEARS_COLUMN, MotionMeasure, Schema, SchemaConfig};
