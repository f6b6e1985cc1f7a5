use std::io::Cursor;
use tiny_http::{Request, Response};

use crate::state::{PlaybackState, SharedState};
use crate::util::form::{form_get, parse_form};

/// `POST /api/train` — runs one full training iteration and returns the
/// `TrainOutcome` (output, loss, error, and the complete step trace) as
/// JSON. The steps are also stored for the SSE playback stream.
///
/// Body (urlencoded): `input` as comma-separated floats, `target` as a
/// float, optional `step_delay_ms` for the playback pace.
pub fn handle(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let input_s = form_get(&pairs, "input").unwrap_or("");
    let input: Vec<f64> = match input_s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
    {
        Ok(v) => v,
        Err(_) => return crate::routes::json_error(400, "input must be comma-separated numbers"),
    };

    let target: f64 = match form_get(&pairs, "target").and_then(|s| s.trim().parse().ok()) {
        Some(v) => v,
        None => return crate::routes::json_error(400, "target must be a number"),
    };

    let step_delay_ms: u64 = form_get(&pairs, "step_delay_ms")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(150);

    let mut st = state.lock().unwrap();
    match st.engine.train_on_example(&input, target) {
        Ok(outcome) => {
            log::info!(
                "train: {} steps, loss {:.6}, output {:.6}",
                outcome.steps.len(),
                outcome.loss,
                outcome.output
            );
            st.playback = Some(PlaybackState {
                steps: outcome.steps.clone(),
                output: outcome.output,
                loss: outcome.loss,
                error: outcome.error,
                step_delay_ms,
            });
            drop(st);

            match serde_json::to_string(&outcome) {
                Ok(json) => crate::routes::json_response(json),
                Err(e) => crate::routes::json_error(500, &e.to_string()),
            }
        }
        Err(e) => {
            log::warn!("train rejected: {e}");
            crate::routes::json_error(400, &e.to_string())
        }
    }
}
