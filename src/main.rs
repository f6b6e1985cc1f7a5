// This binary crate is intentionally minimal.
// All engine logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
//   cargo run --example trace
fn main() {
    println!("traceprop: a step-traced neural network training engine.");
    println!("Run `cargo run --bin studio` for the browser visualization,");
    println!("or `cargo run --example xor` for a terminal demo.");
}
