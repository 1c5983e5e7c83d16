//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging position
//! and transition issues.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=transition=debug,message=debug` - scoped filtering
//! - `RUST_LOG=reveal::update=trace` - module-level filtering, includes ticks
//!
//! # Log Files
//!
//! Logs are written to `~/.config/reveal/logs/reveal.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::position::FrontViewPosition;
use crate::model::RevealModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`. File logging
/// writes to `~/.config/reveal/logs/reveal.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        ::tracing::debug!("Keeping existing subscriber: {}", e);
    }
}

/// Lightweight snapshot of transition state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSnapshot {
    pub position: FrontViewPosition,
    pub offset: f32,
    pub dragging: bool,
    pub animating: bool,
    pub queued: usize,
    pub front_attached: bool,
}

impl TransitionSnapshot {
    pub fn from_model(model: &RevealModel) -> Self {
        let transition = &model.transition;
        Self {
            position: transition.current_position,
            offset: transition.current_offset,
            dragging: transition.is_dragging(),
            animating: transition.is_animating(),
            queued: transition.pending.len(),
            front_attached: model.front_attached(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &TransitionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.position != other.position {
            changes.push(format!("position: {} → {}", self.position, other.position));
        }
        if (self.offset - other.offset).abs() > f32::EPSILON {
            changes.push(format!("offset: {:.1} → {:.1}", self.offset, other.offset));
        }
        if self.dragging != other.dragging {
            changes.push(format!(
                "drag {}",
                if other.dragging { "started" } else { "ended" }
            ));
        }
        if self.animating != other.animating {
            changes.push(format!(
                "animation {}",
                if other.animating { "started" } else { "stopped" }
            ));
        }
        if self.queued != other.queued {
            changes.push(format!("queue: {} → {}", self.queued, other.queued));
        }
        if self.front_attached != other.front_attached {
            changes.push(format!(
                "front {}",
                if other.front_attached {
                    "attached"
                } else {
                    "detached"
                }
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
