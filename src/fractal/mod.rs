pub mod engine;
pub mod grid;
pub mod types;

pub use engine::{generate, generate_cancellable};
pub use types::{FractalField, FractalKind, GeneratingFn, GenerationConfig};
