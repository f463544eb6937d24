//! epistat-core: 2x2 table calculators, distributions, and validation.
//!
//! This crate defines the contingency-table data model, the closed-form
//! calculators (chi-square, odds ratio, risk ratio, combined epi toolkit),
//! the distribution utilities they consume, and the batch/report types the
//! rest of epistat builds on.

pub mod batch;
pub mod calculators;
pub mod distribution;
pub mod error;
pub mod format;
pub mod formulas;
pub mod rcode;
pub mod registry;
pub mod report;
pub mod results;
pub mod table;
pub mod validation;
