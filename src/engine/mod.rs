pub mod config;
pub mod engine;
pub mod forward;
pub mod backward;
pub mod snapshot;

pub use config::EngineConfig;
pub use engine::TrainingEngine;
pub use snapshot::DisplaySnapshot;
