//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently trace
//! id propagation and per-request logging.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
