use bevy::prelude::*;
use bevy::log::LogPlugin;
use bevy::window::WindowResolution;

use hunter_ai::game::{DemoPlugin, HunterGamePlugin};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_DIR: &str = "logs";
const LOG_PREFIX: &str = "hunter_ai";
const LOGS_KEPT: usize = 25;
const DEFAULT_FILTER: &str = "wgpu=error,bevy_render=info,bevy_ecs=info,hunter_ai=info";

/// Installs a stdout layer plus a per-run log file under `logs/`.
/// Falls back to stdout only when the directory cannot be created.
fn init_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stdout_layer = fmt::layer().with_writer(io::stdout).with_target(false);

    let log_dir = PathBuf::from(LOG_DIR);
    if let Err(err) = fs::create_dir_all(&log_dir) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stdout).with_target(false))
            .init();
        warn!("[LOG] Could not create {}: {}; logging to stdout only", log_dir.display(), err);
        return None;
    }
    prune_old_logs(&log_dir, LOGS_KEPT);

    let file_name = format!("{}_{}.log", LOG_PREFIX, chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let file_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::NEVER, &log_dir, &file_name))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Some(log_dir.join(file_name))
}

/// Deletes the oldest run logs so at most `keep` remain.
fn prune_old_logs(log_dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(log_dir) else { return };
    let mut logs: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(LOG_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    if logs.len() <= keep {
        return;
    }

    logs.sort_by_key(|e| e.metadata().ok().and_then(|m| m.modified().ok()));
    for stale in &logs[..logs.len() - keep] {
        let _ = fs::remove_file(stale.path());
    }
}

fn main() {
    match init_logging() {
        Some(path) => info!("[LOG] Writing log to {}", path.display()),
        None => info!("[LOG] File logging disabled"),
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Hunter AI".into(),
                        resolution: WindowResolution::new(960, 540),
                        ..default()
                    }),
                    ..default()
                })
                .build()
                // The subscriber above owns logging.
                .disable::<LogPlugin>(),
        )
        .add_plugins((HunterGamePlugin, DemoPlugin))
        .run();
}
