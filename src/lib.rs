mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::{load_dataset, run, run_with, RunOutcome, SharedLLMClient};
