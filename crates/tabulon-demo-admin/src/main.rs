#![forbid(unsafe_code)]

//! Demo admin dashboard entry point.
//!
//! Logs go to `tabulon-demo-admin.log` (filtered by `RUST_LOG`) so tracing
//! output never corrupts the alternate screen.

mod app;
mod data;
mod term;

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

fn init_logging() {
    let Ok(file) = File::create("tabulon-demo-admin.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let app = app::App::new(data::members());
    if let Err(err) = app.run() {
        eprintln!("terminal error: {err}");
        std::process::exit(1);
    }
}
