// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Query engine over the sharded workout catalog: point lookup by id, direct
//! page reads, and filtered pages assembled from a full scan.

mod engine;
mod filters;
mod limits;
mod query_error;
mod request;
mod scan;

pub use engine::QueryEngine;
pub use filters::WorkoutFilter;
pub use limits::QueryLimits;
pub use query_error::{QueryError, QueryErrorCode};
pub use request::{QueryMode, QueryOutcome, WorkoutPage, WorkoutQuery};

pub const CRATE_NAME: &str = "workout-finder-query";
