//! Logging abstractions
//!
//! The library never prints on its own; callers hand a [`Logger`] to the
//! components that want to report what they are doing.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{Logger, LogLevel, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{MemoryLogger, LogRecord};
