pub mod config;
pub mod error;
pub mod organizer;
pub mod platform;
pub mod progress;
pub mod scanner;

pub use config::AppConfig;
pub use error::Error;
pub use organizer::{FileEntry, Organizer, Outcome, RunReport};
pub use platform::TimestampSource;
pub use progress::{ProgressReporter, SilentReporter};
