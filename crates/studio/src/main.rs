use std::io::{self, BufRead, Write};

use mockup_studio_lib::command::{execute_json, CommandResponse};
use mockup_studio_lib::harness::StudioHarness;
use mockup_studio_lib::state::StudioSettings;

struct Args {
    scene: Option<String>,
    script: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mockup_studio=info".into()),
        )
        .init();

    let args = parse_args();
    let mut harness = StudioHarness::with_settings(StudioSettings::load());

    if let Some(scene) = args.scene.as_deref().and_then(load_scene) {
        if let Err(e) = harness.load_scene(scene) {
            tracing::error!("Scene not loaded: {e}");
        }
    }

    let input: Box<dyn BufRead> = match args.script.as_deref() {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(io::BufReader::new(file)),
            Err(e) => {
                tracing::error!("Failed to open script {path}: {e}");
                return;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read command: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let response = execute_json(&mut harness, line).unwrap_or_else(|e| CommandResponse {
            success: false,
            error: Some(e),
            data: None,
        });
        match serde_json::to_string(&response) {
            Ok(json) => {
                if writeln!(out, "{json}").is_err() {
                    break;
                }
            }
            Err(e) => tracing::error!("Failed to encode response: {e}"),
        }
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        scene: None,
        script: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" if i + 1 < args.len() => {
                parsed.scene = Some(args[i + 1].clone());
                i += 1;
            }
            "--script" if i + 1 < args.len() => {
                parsed.script = Some(args[i + 1].clone());
                i += 1;
            }
            other => tracing::warn!("Ignoring argument {other}"),
        }
        i += 1;
    }
    parsed
}

fn load_scene(path: &str) -> Option<shared::ViewRegistry> {
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str::<shared::ViewRegistry>(&json) {
            Ok(scene) => {
                tracing::info!(
                    "Loaded scene from {path} ({} objects)",
                    scene.object_count()
                );
                Some(scene)
            }
            Err(e) => {
                tracing::error!("Failed to parse scene JSON from {path}: {e}");
                None
            }
        },
        Err(e) => {
            tracing::error!("Failed to read scene file {path}: {e}");
            None
        }
    }
}
