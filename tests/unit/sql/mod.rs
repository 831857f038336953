//! SQL evaluation core tests

pub mod execution;
