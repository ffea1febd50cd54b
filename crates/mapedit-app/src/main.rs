//! Replay entry point (native).
//!
//! Usage: `mapedit-replay <script.json> [config.json]`
//!
//! Prints the resulting scene as JSON on stdout.

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    use mapedit_app::{ReplayError, ReplayScript};
    use mapedit_core::EditorConfig;
    use std::process::ExitCode;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(script_path) = args.next() else {
        eprintln!("usage: mapedit-replay <script.json> [config.json]");
        return ExitCode::from(2);
    };
    let config_path = args.next();

    let result = (|| -> Result<String, ReplayError> {
        let mut script = ReplayScript::load(&script_path)?;
        if let Some(path) = &config_path {
            script.config = EditorConfig::load(path)?;
        }
        log::info!("Replaying {} steps from {}", script.steps.len(), script_path);
        let scene = mapedit_app::run(&script)?;
        Ok(scene.to_json()?)
    })();

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
