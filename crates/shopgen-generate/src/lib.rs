//! Seeded e-commerce dataset generation for shopgen.
//!
//! A single `ChaCha8Rng` stream drives all five entity sets so a seed fully
//! determines the dataset. Output is written as one CSV file per table.

pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use config::GenerateConfig;
pub use engine::{DatasetGenerator, GenerationEngine, GenerationResult, generate_dataset};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, TableReport};
