//! # Built-in listeners
//!
//! - [`LogWriter`]: logs processed events (demo/debug).

mod log;

pub use log::LogWriter;
