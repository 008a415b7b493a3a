//! Routing module
//!
//! Provides the immutable route table: path -> canned reply, exact match.

mod table;

pub use table::{CannedReply, RouteTable};
