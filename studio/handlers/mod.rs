pub mod network;
pub mod train;
pub mod snapshot;
pub mod playback_sse;
