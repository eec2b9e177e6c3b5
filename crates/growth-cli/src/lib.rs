//! Library side of the `growth` binary: logging setup, measurement reports
//! and batch CSV handling.

pub mod batch;
pub mod logging;
pub mod report;
