pub mod console;
pub mod progress;

pub use console::ConsoleReporter;
pub use progress::ProgressReporter;
