//! Command implementations.

mod discover;
mod interfaces;

pub use discover::run_discover;
pub use interfaces::run_interfaces;
