use std::io::Cursor;
use tiny_http::{Request, Response};

use traceprop::{Activation, EngineConfig};

use crate::render::render_page;
use crate::state::SharedState;
use crate::util::form::{form_get, parse_form};

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let config = st.config.clone();
    let has_playback = st.playback.is_some();
    drop(st);

    crate::routes::html_response(render_page(&config, flash, has_playback))
}

// ---------------------------------------------------------------------------
// POST /network — rebuild the engine from the form
// ---------------------------------------------------------------------------

pub fn handle_post(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let input_size_s = form_get(&pairs, "input_size").unwrap_or("2");
    let hidden_s = form_get(&pairs, "hidden_layers").unwrap_or("1");
    let neurons_s = form_get(&pairs, "neurons_per_layer").unwrap_or("4");
    let activation_s = form_get(&pairs, "activation").unwrap_or("sigmoid");
    let lr_s = form_get(&pairs, "learning_rate").unwrap_or("0.5");

    let show_err = |err: String, state: &SharedState| -> Response<Cursor<Vec<u8>>> {
        let mut st = state.lock().unwrap();
        st.flash_error(err);
        drop(st);
        crate::routes::redirect("/")
    };

    let input_size: usize = match input_size_s.trim().parse() {
        Ok(v) => v,
        Err(_) => return show_err("Input size must be a positive integer.".into(), &state),
    };
    let hidden_layers: usize = match hidden_s.trim().parse() {
        Ok(v) => v,
        Err(_) => return show_err("Hidden layer count must be a non-negative integer.".into(), &state),
    };
    let neurons_per_layer: usize = match neurons_s.trim().parse() {
        Ok(v) => v,
        Err(_) => return show_err("Neurons per layer must be a positive integer.".into(), &state),
    };
    let learning_rate: f64 = match lr_s.trim().parse() {
        Ok(v) => v,
        Err(_) => return show_err("Learning rate must be a number.".into(), &state),
    };
    let activation = parse_activation(activation_s);

    let config = EngineConfig {
        input_size,
        hidden_layers,
        neurons_per_layer,
        activation,
        learning_rate,
    };

    let mut st = state.lock().unwrap();
    match st.rebuild(config) {
        Ok(()) => {
            let layers = st.engine.layer_sizes().to_vec();
            st.flash_success(format!("Network rebuilt: {layers:?}."));
            log::info!("network rebuilt: {layers:?}");
        }
        Err(e) => {
            log::warn!("network rebuild rejected: {e}");
            st.flash_error(e.to_string());
        }
    }
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /network/reinitialize
// ---------------------------------------------------------------------------

pub fn handle_reinitialize(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.engine.reinitialize();
    st.playback = None;
    st.flash_success("Weights re-randomized.");
    drop(st);

    crate::routes::redirect("/")
}

// ---------------------------------------------------------------------------
// POST /network/learning-rate — live update, no reconstruction
// ---------------------------------------------------------------------------

pub fn handle_learning_rate(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let lr: f64 = match form_get(&pairs, "learning_rate").and_then(|s| s.trim().parse().ok()) {
        Some(v) => v,
        None => return crate::routes::json_error(400, "learning_rate must be a number"),
    };

    let mut st = state.lock().unwrap();
    match st.engine.set_learning_rate(lr) {
        Ok(()) => {
            st.config.learning_rate = lr;
            crate::routes::json_response(serde_json::json!({ "learning_rate": lr }).to_string())
        }
        Err(e) => crate::routes::json_error(400, &e.to_string()),
    }
}

fn parse_activation(s: &str) -> Activation {
    match s {
        "relu" => Activation::ReLU,
        "tanh" => Activation::Tanh,
        _ => Activation::Sigmoid,
    }
}
