/// traceprop Studio
///
/// A browser-based visualization of one neural network training step at a
/// time: watch activations flow forward and deltas/weight updates flow
/// backward, one micro-operation per animation frame. Served by a
/// synchronous tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use state::StudioState;

fn main() {
    env_logger::init();

    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    let shared_state = Arc::new(Mutex::new(StudioState::new()));

    log::info!("listening on http://{addr}");
    println!("╔══════════════════════════════════════════════╗");
    println!("║          traceprop Studio                    ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Configure a network, train one example,     ║");
    println!("║  then replay the step trace.                 ║");
    println!("╚══════════════════════════════════════════════╝");

    // Each request is dispatched on its own thread so the SSE playback
    // handler (which sleeps between frames for the whole replay) does not
    // stall regular page loads and form submissions.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
