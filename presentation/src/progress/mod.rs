//! Progress reporting for the diagnostic pipeline

pub mod reporter;
