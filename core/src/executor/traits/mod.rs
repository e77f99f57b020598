pub mod observer;
pub mod runner;

pub use observer::*;
pub use runner::*;
