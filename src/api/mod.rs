//! API clients for external services
//!
//! - Feed: published spreadsheet backing the programs list

pub mod feed;

pub use feed::{FeedClient, FeedError};
