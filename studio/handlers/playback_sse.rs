use std::thread;
use std::time::Duration;
use tiny_http::Request;

use crate::state::SharedState;
use crate::util::sse::{format_sse_event, format_sse_keepalive, sse_response_head, write_sse};

/// `GET /playback/events` — Server-Sent Events playback of the most recent
/// step trace.
///
/// This handler consumes `request` (takes ownership so we can call
/// `into_writer`) and:
/// 1. Writes the SSE response head directly to the TCP stream.
/// 2. Copies the recorded steps out of shared state (they are immutable and
///    fully materialized, so the lock is held only for the clone).
/// 3. Emits one `event: step` frame per step, paced by the recorded
///    inter-step delay, with a keep-alive comment every 25 frames.
/// 4. Emits a final `event: done` frame and closes.
///
/// The engine itself knows nothing of this pacing — playback delay is purely
/// a presentation concern.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();

    if !write_sse(&mut writer, sse_response_head()) {
        return;
    }

    let playback = {
        let st = state.lock().unwrap();
        st.playback.clone()
    };

    let playback = match playback {
        Some(p) => p,
        None => {
            let _ = write_sse(&mut writer, &format_sse_event("done", "{\"steps\":0}"));
            return;
        }
    };

    let delay = Duration::from_millis(playback.step_delay_ms);
    let total = playback.steps.len();

    for (index, step) in playback.steps.iter().enumerate() {
        let json = match serde_json::to_string(step) {
            Ok(j) => j,
            Err(e) => {
                log::warn!("step serialization failed: {e}");
                return;
            }
        };
        let frame = format!(
            "event: step\ndata: {{\"index\":{index},\"total\":{total},\"step\":{json}}}\n\n"
        );
        if !write_sse(&mut writer, &frame) {
            // Client went away; playback simply stops.
            return;
        }
        if index % 25 == 24 && !write_sse(&mut writer, format_sse_keepalive()) {
            return;
        }
        thread::sleep(delay);
    }

    let summary = serde_json::json!({
        "steps": total,
        "output": playback.output,
        "loss": playback.loss,
        "error": playback.error,
    });
    let _ = write_sse(&mut writer, &format_sse_event("done", &summary.to_string()));
}
