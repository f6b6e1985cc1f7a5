use std::sync::{Arc, Mutex};

use traceprop::{EngineConfig, Step, TrainingEngine};

/// Most recent training call, kept for the playback stream and the result
/// panel. The steps are a fully materialized copy — the engine guarantees
/// the trace is complete before `train_on_example` returns, so the SSE
/// playback thread only ever reads finished data.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub steps: Vec<Step>,
    pub output: f64,
    pub loss: f64,
    pub error: f64,
    /// Inter-step delay for SSE playback, in milliseconds.
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

pub struct StudioState {
    pub config: EngineConfig,
    pub engine: TrainingEngine,
    pub playback: Option<PlaybackState>,
    pub flash: Option<FlashMessage>,
}

pub type SharedState = Arc<Mutex<StudioState>>;

impl StudioState {
    pub fn new() -> StudioState {
        let config = EngineConfig::default();
        // Default config is always valid.
        let engine = TrainingEngine::new(config.clone()).expect("default config must be valid");
        StudioState { config, engine, playback: None, flash: None }
    }

    /// Rebuilds the engine for a new configuration; drops any playback.
    pub fn rebuild(&mut self, config: EngineConfig) -> traceprop::Result<()> {
        self.engine = TrainingEngine::new(config.clone())?;
        self.config = config;
        self.playback = None;
        Ok(())
    }

    pub fn flash_success(&mut self, text: impl Into<String>) {
        self.flash = Some(FlashMessage { kind: FlashKind::Success, text: text.into() });
    }

    pub fn flash_error(&mut self, text: impl Into<String>) {
        self.flash = Some(FlashMessage { kind: FlashKind::Error, text: text.into() });
    }

    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}
