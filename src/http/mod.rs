//! HTTP protocol layer module
//!
//! Response assembly, decoupled from routing and connection handling.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_canned_response,
    build_options_response,
};
