//! Shared test harness modules for the tablescout CLI.
#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_arithmetic,
    reason = "Tests fail fast on unexpected CLI outcomes and inspect output directly"
)]

use super::*;

mod commands;
mod helpers;
