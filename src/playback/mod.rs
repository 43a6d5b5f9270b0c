pub mod engine;
pub mod signal;
