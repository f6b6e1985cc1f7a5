use std::io::Cursor;
use tiny_http::Response;

use crate::state::SharedState;

/// `GET /api/snapshot` — the engine's full displayable state as JSON:
/// topology, parameters, previous weights, and the last forward/backward
/// traces. Everything is deep-copied by the engine, so serializing outside
/// the lock would also be safe; we keep it simple and serialize inline.
pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = state.lock().unwrap();
    let snapshot = st.engine.snapshot();
    drop(st);

    match serde_json::to_string(&snapshot) {
        Ok(json) => crate::routes::json_response(json),
        Err(e) => crate::routes::json_error(500, &e.to_string()),
    }
}

/// `GET /api/steps` — the most recent step trace without re-training,
/// for a renderer that reconnects after the training call completed.
pub fn handle_steps(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let st = state.lock().unwrap();
    let steps = st.engine.steps().to_vec();
    drop(st);

    match serde_json::to_string(&steps) {
        Ok(json) => crate::routes::json_response(json),
        Err(e) => crate::routes::json_error(500, &e.to_string()),
    }
}
