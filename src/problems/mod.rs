//! Implementation of search problems.
//!
//! These expose the generic [`crate::problem::SearchProblem`] API so the
//! algorithms can do path-finding against concrete domains.

pub mod graph;
