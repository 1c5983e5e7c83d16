//! Command-line interface and scenario runner
//!
//! `reveal <SCENARIO.yaml>` builds a headless container with recording panels,
//! replays the scenario's steps against it and reports what the delegate and
//! the panels saw after every step.
//!
//! ```yaml
//! panels: { rear: true, right: true }
//! steps:
//!   - toggle: {}
//!   - wait
//!   - pan: [{ phase: began }, { phase: changed, dx: -40 }, { phase: ended, dx: -40, vx: 0 }]
//!   - wait
//!   - set-position: { position: right-most-removed, duration: 0.4 }
//!   - tick: 5
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::config::{animation_duration, RevealConfig};
use crate::controller::RevealController;
use crate::delegate::{EventLog, RecordingDelegate, RevealEvent};
use crate::gesture::{PanPhase, PanSample, Vec2};
use crate::model::{FrontViewPosition, Size};
use crate::panel::{AppearanceEvent, LifecycleLog, PanelController, PanelSlot, RecordingPanel};

/// Frames `wait` may take before the runner gives up on an animation
const MAX_WAIT_FRAMES: usize = 10_000;

/// Replay reveal container scenarios headlessly
#[derive(Parser, Debug)]
#[command(
    name = "reveal",
    version,
    about = "Replay reveal container scenarios headlessly"
)]
pub struct CliArgs {
    /// Scenario file to replay
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Configuration file to use instead of ~/.config/reveal/config.yaml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Frames per second used by `tick` and `wait` steps
    #[arg(long, value_name = "N", default_value_t = 60)]
    pub fps: u32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the effective configuration to FILE, or to
    /// ~/.config/reveal/config.yaml when no file is given
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub save_config: Option<Option<PathBuf>>,
}

impl CliArgs {
    /// Length of one frame
    pub fn frame(&self) -> Result<Duration, String> {
        if self.fps == 0 {
            return Err("--fps must be at least 1".to_string());
        }
        Ok(Duration::from_secs_f64(1.0 / f64::from(self.fps)))
    }

    /// The explicit `--config` file, or the user's config with defaults
    pub fn load_config(&self) -> Result<RevealConfig> {
        match &self.config {
            Some(path) => RevealConfig::load_from(path).map_err(anyhow::Error::msg),
            None => Ok(RevealConfig::load()),
        }
    }

    /// Persist `config` if `--save-config` was given, returning where it went
    pub fn save_config(&self, config: &RevealConfig) -> Result<Option<PathBuf>> {
        let path = match &self.save_config {
            None => return Ok(None),
            Some(Some(path)) => path.clone(),
            Some(None) => crate::config_paths::config_file()
                .context("No config directory available")?,
        };
        config.save_to(&path).map_err(anyhow::Error::msg)?;
        Ok(Some(path))
    }
}

fn animated_by_default() -> bool {
    true
}

/// Which slots get a recording panel at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSetup {
    pub rear: bool,
    pub front: bool,
    pub right: bool,
}

impl Default for PanelSetup {
    fn default() -> Self {
        Self {
            rear: true,
            front: true,
            right: false,
        }
    }
}

/// One pan sample in scenario form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PanStep {
    pub phase: PanPhase,
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub vx: f32,
}

impl From<PanStep> for PanSample {
    fn from(step: PanStep) -> Self {
        PanSample {
            phase: step.phase,
            translation: Vec2::horizontal(step.dx),
            velocity: Vec2::horizontal(step.vx),
        }
    }
}

/// A scenario step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Toggle {
        #[serde(default = "animated_by_default")]
        animated: bool,
    },
    RightToggle {
        #[serde(default = "animated_by_default")]
        animated: bool,
    },
    SetPosition {
        position: FrontViewPosition,
        #[serde(default = "animated_by_default")]
        animated: bool,
        /// Seconds; overrides the configured duration
        #[serde(default)]
        duration: Option<f64>,
    },
    /// Install a new recording panel as the front controller
    ReplaceFront {
        name: String,
        #[serde(default = "animated_by_default")]
        animated: bool,
    },
    /// Install (or with no name, clear) the rear controller
    SetRear {
        #[serde(default)]
        name: Option<String>,
    },
    /// Install (or with no name, clear) the right controller
    SetRight {
        #[serde(default)]
        name: Option<String>,
    },
    /// Pan samples sent through the gesture handle
    Pan(Vec<PanStep>),
    /// Advance this many frames
    Tick(u32),
    /// Tick until nothing is animating
    Wait,
    Resize(Size),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let how = |animated: &bool| if *animated { "animated" } else { "instant" };
        match self {
            Step::Toggle { animated } => write!(f, "toggle ({})", how(animated)),
            Step::RightToggle { animated } => write!(f, "right-toggle ({})", how(animated)),
            Step::SetPosition {
                position,
                animated,
                duration,
            } => match duration {
                Some(secs) => write!(f, "set-position {} over {}s", position, secs),
                None => write!(f, "set-position {} ({})", position, how(animated)),
            },
            Step::ReplaceFront { name, animated } => {
                write!(f, "replace-front '{}' ({})", name, how(animated))
            }
            Step::SetRear { name } => write!(f, "set-rear {:?}", name),
            Step::SetRight { name } => write!(f, "set-right {:?}", name),
            Step::Pan(samples) => write!(f, "pan ({} samples)", samples.len()),
            Step::Tick(frames) => write!(f, "tick {}", frames),
            Step::Wait => f.write_str("wait"),
            Step::Resize(size) => write!(f, "resize {}x{}", size.width, size.height),
        }
    }
}

/// A scripted session against a headless container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Replaces the loaded configuration entirely when present
    #[serde(default)]
    pub config: Option<RevealConfig>,
    #[serde(default)]
    pub bounds: Option<Size>,
    #[serde(default)]
    pub panels: PanelSetup,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario at {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// State after one step and everything observed during it
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: String,
    pub position: FrontViewPosition,
    pub offset: f32,
    pub animating: bool,
    /// Placed views, bottom-most first
    pub placed: Vec<PanelSlot>,
    pub delegate: Vec<RevealEvent>,
    pub panels: Vec<AppearanceEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// Every delegate event in delivery order
    pub fn delegate_events(&self) -> impl Iterator<Item = &RevealEvent> {
        self.steps.iter().flat_map(|s| s.delegate.iter())
    }

    /// Every panel callback in call order
    pub fn panel_events(&self) -> impl Iterator<Item = &AppearanceEvent> {
        self.steps.iter().flat_map(|s| s.panels.iter())
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.steps {
            writeln!(
                f,
                "#{:<3} {:<40} → {} @ {:.1}{}",
                report.index,
                report.step,
                report.position,
                report.offset,
                if report.animating { " (animating)" } else { "" }
            )?;
            for event in &report.delegate {
                writeln!(f, "       delegate {:?}", event)?;
            }
            for event in &report.panels {
                writeln!(f, "       panel    {:?}", event)?;
            }
        }
        Ok(())
    }
}

fn recording_panel(name: &str, log: &LifecycleLog) -> Rc<dyn PanelController> {
    Rc::new(RecordingPanel::new(name, log))
}

fn record(
    reveal: &RevealController,
    index: usize,
    step: String,
    events: &EventLog,
    panels: &LifecycleLog,
) -> StepReport {
    StepReport {
        index,
        step,
        position: reveal.front_view_position(),
        offset: reveal.front_offset(),
        animating: reveal.transition().is_animating(),
        placed: reveal.hierarchy().slots(),
        delegate: events.take(),
        panels: panels.take(),
    }
}

/// Replay `scenario` and collect a report entry per step (entry 0 is setup)
pub fn run_scenario(scenario: &Scenario, config: RevealConfig, frame: Duration) -> ScenarioReport {
    let events = EventLog::default();
    let panels = LifecycleLog::default();
    let setup = scenario.panels;

    let config = scenario.config.clone().unwrap_or(config);
    let rear = setup.rear.then(|| recording_panel("rear", &panels));
    let front = setup.front.then(|| recording_panel("front", &panels));
    let mut reveal = RevealController::with_config(config, rear, front);
    reveal.set_delegate(Box::new(RecordingDelegate::new(&events)));
    if setup.right {
        reveal.set_right_view_controller(Some(recording_panel("right", &panels)));
    }
    if let Some(bounds) = scenario.bounds {
        reveal.set_bounds(bounds);
    }

    let gesture = reveal.pan_gesture_recognizer();
    let mut reports = vec![record(&reveal, 0, "setup".to_string(), &events, &panels)];

    for (i, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {}: {}", i + 1, step);
        match step {
            Step::Toggle { animated } => {
                reveal.reveal_toggle(*animated);
            }
            Step::RightToggle { animated } => {
                reveal.right_reveal_toggle(*animated);
            }
            Step::SetPosition {
                position,
                animated,
                duration,
            } => {
                match duration.filter(|_| *animated) {
                    Some(secs) => reveal.set_front_view_position_with_duration(
                        *position,
                        animation_duration(secs),
                    ),
                    None => reveal.set_front_view_position(*position, *animated),
                };
            }
            Step::ReplaceFront { name, animated } => {
                reveal.set_front_view_controller(recording_panel(name, &panels), *animated);
            }
            Step::SetRear { name } => {
                let panel = name.as_deref().map(|n| recording_panel(n, &panels));
                reveal.set_rear_view_controller(panel);
            }
            Step::SetRight { name } => {
                let panel = name.as_deref().map(|n| recording_panel(n, &panels));
                reveal.set_right_view_controller(panel);
            }
            Step::Pan(samples) => {
                for sample in samples {
                    gesture.send(PanSample::from(*sample));
                    reveal.process();
                }
            }
            Step::Tick(frames) => {
                for _ in 0..*frames {
                    reveal.tick(frame);
                }
            }
            Step::Wait => {
                if reveal.run_until_idle(frame, MAX_WAIT_FRAMES).is_none() {
                    tracing::warn!(
                        "Step {}: still animating after {} frames",
                        i + 1,
                        MAX_WAIT_FRAMES
                    );
                }
            }
            Step::Resize(size) => {
                reveal.set_bounds(*size);
            }
        }
        reports.push(record(&reveal, i + 1, step.to_string(), &events, &panels));
    }

    ScenarioReport { steps: reports }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_frame_from_fps() {
        let args = CliArgs {
            scenario: PathBuf::from("s.yaml"),
            config: None,
            fps: 50,
            json: false,
            save_config: None,
        };
        assert_eq!(args.frame(), Ok(Duration::from_millis(20)));

        let args = CliArgs { fps: 0, ..args };
        assert!(args.frame().is_err());
    }

    #[test]
    fn test_save_config_flag() {
        let args = CliArgs::try_parse_from(["reveal", "s.yaml"]).unwrap();
        assert_eq!(args.save_config, None);
        assert_eq!(args.save_config(&RevealConfig::default()).unwrap(), None);

        let args = CliArgs::try_parse_from(["reveal", "--save-config", "--", "s.yaml"]).unwrap();
        assert_eq!(args.save_config, Some(None));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.yaml");
        let argv: [std::ffi::OsString; 4] = [
            "reveal".into(),
            "--save-config".into(),
            path.clone().into_os_string(),
            "s.yaml".into(),
        ];
        let args = CliArgs::try_parse_from(argv).unwrap();
        let config = RevealConfig {
            rear_view_reveal_width: 180.0,
            ..RevealConfig::default()
        };
        assert_eq!(args.save_config(&config).unwrap(), Some(path.clone()));
        assert_eq!(RevealConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(
            r#"
panels: { right: true }
steps:
  - toggle: {}
  - set-position: { position: right-most-removed, duration: 0.4 }
  - pan: [{ phase: began }, { phase: ended, dx: 10, vx: -400 }]
  - tick: 3
  - wait
"#,
        )
        .unwrap();

        assert!(scenario.panels.rear && scenario.panels.right);
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[1],
            Step::SetPosition {
                position: FrontViewPosition::RightMostRemoved,
                animated: true,
                duration: Some(_)
            }
        ));
        assert!(matches!(scenario.steps[4], Step::Wait));
    }

    #[test]
    fn test_huge_step_duration_is_clamped() {
        let scenario = Scenario::parse(
            "steps: [ { set-position: { position: right, duration: 1.0e30 } }, { tick: 2 } ]",
        )
        .unwrap();
        let report = run_scenario(&scenario, RevealConfig::default(), FRAME);
        let last = &report.steps[2];
        assert!(last.animating);
        assert_eq!(last.position, FrontViewPosition::Left);
    }

    #[test]
    fn test_unknown_step_is_rejected() {
        assert!(Scenario::parse("steps: [ { jump: 3 } ]").is_err());
    }

    #[test]
    fn test_run_toggle_scenario() {
        let scenario = Scenario::parse("steps: [ { toggle: {} }, wait ]").unwrap();
        let report = run_scenario(&scenario, RevealConfig::default(), FRAME);

        assert_eq!(report.steps.len(), 3);
        let last = &report.steps[2];
        assert_eq!(last.position, FrontViewPosition::Right);
        assert_eq!(last.offset, 260.0);
        assert!(!last.animating);
        assert_eq!(last.placed, vec![PanelSlot::Rear, PanelSlot::Front]);

        let delegate: Vec<_> = report.delegate_events().copied().collect();
        assert_eq!(
            delegate.first(),
            Some(&RevealEvent::WillMoveToPosition(FrontViewPosition::Right))
        );
        assert_eq!(
            delegate.last(),
            Some(&RevealEvent::DidMoveToPosition(FrontViewPosition::Right))
        );
        assert!(report.to_string().contains("→ right @ 260.0"));
    }
}
