//! Payment event adapters.
//!
//! - `LoggingEventHandler` - Records payment outcomes via `tracing`

mod logging_handler;

pub use logging_handler::LoggingEventHandler;
