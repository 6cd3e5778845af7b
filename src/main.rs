//! Gap Runner entry point
//!
//! Native builds run a headless session on a simulated clock with the
//! autopilot at the controls. The browser build starts from the library's
//! wasm-bindgen entry instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use gap_runner::{Settings, run_headless};
    use std::process::ExitCode;

    env_logger::init();
    log::info!("Gap Runner (native) starting...");

    let loaded = match std::env::args_os().nth(1) {
        Some(path) => Settings::load_from_path(path),
        None => Settings::load(),
    };
    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let seed = settings.seed.unwrap_or_else(rand::random);
    let summaries = run_headless(&settings, seed);

    println!("seed {seed}");
    for s in &summaries {
        let ending = match s.cause {
            Some(cause) => format!("{cause:?}"),
            None => "frame cap".to_string(),
        };
        println!(
            "session {:>2}: score {:>3} in {:>5} frames ({})",
            s.session, s.score, s.frames, ending
        );
    }
    let best = summaries.iter().map(|s| s.score).max().unwrap_or(0);
    println!("best {best}");

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
