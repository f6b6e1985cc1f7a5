pub mod math;
pub mod activation;
pub mod loss;
pub mod trace;
pub mod engine;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::Activation;
pub use loss::half_mse::HalfMse;
pub use trace::step::{Step, EdgeTerm, DeltaTerm, TrainOutcome, BackwardOutcome};
pub use engine::config::EngineConfig;
pub use engine::engine::TrainingEngine;
pub use engine::snapshot::DisplaySnapshot;
pub use error::{Error, Result};
