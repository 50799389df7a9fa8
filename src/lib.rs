//! errdigest - Daily digest RSS feed of an application error log
//!
//! Reads a newest-first error log page by page, groups errors by UTC
//! calendar day and serves one RSS item per day.
//!
//! - [`error_log`]: paginated error log stores
//! - [`digest`]: page streaming and day grouping
//! - [`feed`]: RSS assembly and the complete render
//! - [`http_server`]: axum routes serving the feed
//! - [`cli`]: `serve`, `render` and `log` commands

pub mod cli;
pub mod digest;
pub mod error_log;
pub mod feed;
pub mod http_server;
pub mod markup;
pub mod observability;
