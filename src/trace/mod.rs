pub mod step;

pub use step::{Step, EdgeTerm, DeltaTerm, TrainOutcome, BackwardOutcome};
