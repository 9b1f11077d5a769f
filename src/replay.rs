// SPDX-License-Identifier: GPL-3.0-only

//! Scripted replay of widget sessions.
//!
//! A script is a JSON array of steps run against a [`RecordingHost`]:
//!
//! ```json
//! [
//!   {"step": "initialize", "config": {"appId": "app-1"}},
//!   {"step": "open", "modalPosition": "left"},
//!   {"step": "frameMessage", "origin": "https://remitly.com", "data": {"topic": "exitCE"}},
//!   {"step": "flushTimers"}
//! ]
//! ```
//!
//! Timers never fire on their own; `flushTimers` runs every pending
//! schedule in delay order. `frameMessage`, `frameLoaded` and `viewport`
//! model listener deliveries and have no effect while the widget holds no
//! listeners.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::app_settings::REPLAY_VIEWPORT_WIDTH;
use crate::callbacks::Callbacks;
use crate::config::WidgetConfig;
use crate::effect::{DeferredTask, Effect, TransitionToken};
use crate::geometry::Bounds;
use crate::host::RecordingHost;
use crate::responsive;
use crate::sdk::Sdk;
use crate::state::ModalPosition;
use crate::widget::WidgetEvent;

/// One scripted action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    /// Initialize the widget, optionally on a page with a trigger button.
    Initialize {
        config: WidgetConfig,
        #[serde(default)]
        button: Option<Bounds>,
    },
    #[serde(rename_all = "camelCase")]
    Open {
        #[serde(default)]
        modal_position: Option<ModalPosition>,
    },
    Close,
    ButtonClick,
    /// A message posted by the frame. `data` may be a string or any JSON value.
    FrameMessage {
        origin: String,
        data: serde_json::Value,
    },
    FrameLoaded,
    /// Resize the viewport and report the breakpoint to the widget.
    Viewport { width: f64 },
    FlushTimers,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "camelCase")]
pub enum ReplayRecord {
    Effect { step: usize, effect: Effect },
    Callback {
        step: usize,
        name: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

/// Errors raised while loading a script.
#[derive(Debug)]
pub enum ReplayError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Io { path, source } => {
                write!(f, "failed to read script '{}': {}", path.display(), source)
            }
            ReplayError::Json(e) => write!(f, "invalid script: {}", e),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Io { source, .. } => Some(source),
            ReplayError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(e: serde_json::Error) -> Self {
        ReplayError::Json(e)
    }
}

/// Parses a script from JSON text.
pub fn parse_script(json: &str) -> Result<Vec<Step>, ReplayError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json)
}

type CallbackLog = Arc<Mutex<Vec<(&'static str, Option<String>)>>>;

fn recording_callbacks(log: &CallbackLog) -> Callbacks {
    let (load, message, state) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
    Callbacks::new()
        .on_load(move || push(&load, "onLoad", None))
        .on_message(move |event| push(&message, "onMessage", Some(event.to_string())))
        .on_state_change(move |status| push(&state, "onStateChange", Some(status.to_string())))
}

fn push(log: &CallbackLog, name: &'static str, value: Option<String>) {
    log.lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push((name, value));
}

/// A widget session driven by script steps.
#[derive(Debug)]
pub struct Replay {
    sdk: Sdk<RecordingHost>,
    log: CallbackLog,
    pending: Vec<(TransitionToken, u64, DeferredTask)>,
    records: Vec<ReplayRecord>,
}

impl Default for Replay {
    fn default() -> Self {
        Self::new()
    }
}

impl Replay {
    pub fn new() -> Self {
        Self {
            sdk: Sdk::new(RecordingHost::new(REPLAY_VIEWPORT_WIDTH)),
            log: Arc::new(Mutex::new(Vec::new())),
            pending: Vec::new(),
            records: Vec::new(),
        }
    }

    pub fn sdk(&self) -> &Sdk<RecordingHost> {
        &self.sdk
    }

    /// Runs one step; `index` labels the records it produces.
    pub fn step(&mut self, index: usize, step: Step) {
        tracing::debug!("Replay step {}: {:?}", index, step);

        match step {
            Step::Initialize { config, button } => {
                self.sdk.host_mut().button = button;
                let callbacks = recording_callbacks(&self.log);
                self.sdk.initialize(config, callbacks);
            }
            Step::Open { modal_position } => self.sdk.open(modal_position),
            Step::Close => self.sdk.close(),
            Step::ButtonClick => self.sdk.dispatch(WidgetEvent::ButtonClicked),
            Step::FrameMessage { origin, data } => {
                let data = match data {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                };
                self.sdk.dispatch(WidgetEvent::FrameMessage { origin, data });
            }
            Step::FrameLoaded => self.sdk.dispatch(WidgetEvent::FrameLoaded),
            Step::Viewport { width } => {
                self.sdk.host_mut().viewport_width = width;
                let is_mobile = responsive::is_mobile_width(width);
                self.sdk.dispatch(WidgetEvent::BreakpointChanged { is_mobile });
            }
            Step::FlushTimers => self.flush_timers(index),
        }

        self.collect(index);
    }

    /// Fires pending timers in delay order, including ones scheduled meanwhile.
    fn flush_timers(&mut self, index: usize) {
        while !self.pending.is_empty() {
            let mut due = std::mem::take(&mut self.pending);
            due.sort_by_key(|&(_, delay_ms, _)| delay_ms);

            for (token, _, task) in due {
                self.sdk.dispatch(WidgetEvent::TimerElapsed { token, task });
                self.collect(index);
            }
        }
    }

    /// Moves callback invocations and applied effects into the records.
    fn collect(&mut self, index: usize) {
        let calls = std::mem::take(
            &mut *self
                .log
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        self.records
            .extend(calls.into_iter().map(|(name, value)| ReplayRecord::Callback {
                step: index,
                name,
                value,
            }));

        for effect in self.sdk.host_mut().take_effects() {
            if let Effect::Schedule {
                token,
                delay_ms,
                task,
            } = effect
            {
                self.pending.push((token, delay_ms, task));
            }
            self.records.push(ReplayRecord::Effect {
                step: index,
                effect,
            });
        }
    }

    pub fn into_records(self) -> Vec<ReplayRecord> {
        self.records
    }
}

/// Runs a whole script and returns what it produced.
pub fn run_script(steps: Vec<Step>) -> Vec<ReplayRecord> {
    let mut replay = Replay::new();
    for (index, step) in steps.into_iter().enumerate() {
        replay.step(index, step);
    }
    replay.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Element;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn callbacks(records: &[ReplayRecord]) -> Vec<(&'static str, Option<String>)> {
        records
            .iter()
            .filter_map(|record| match record {
                ReplayRecord::Callback { name, value, .. } => Some((*name, value.clone())),
                ReplayRecord::Effect { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_parse_script() {
        let steps = parse_script(
            r#"[
                {"step": "initialize", "config": {"appId": "app-1"}},
                {"step": "open", "modalPosition": "right"},
                {"step": "viewport", "width": 390},
                {"step": "flushTimers"}
            ]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 4);
        assert!(matches!(
            steps[1],
            Step::Open {
                modal_position: Some(ModalPosition::Right)
            }
        ));
        assert!(matches!(steps[2], Step::Viewport { width } if width == 390.0));
    }

    #[test]
    fn test_parse_rejects_unknown_step() {
        let result = parse_script(r#"[{"step": "explode"}]"#);
        assert!(matches!(result, Err(ReplayError::Json(_))));
    }

    #[test]
    fn test_load_script_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"step": "initialize", "config": {{"appId": "app-1"}}}}, {{"step": "close"}}]"#
        )
        .unwrap();

        let steps = load_script(file.path()).unwrap();

        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[1], Step::Close));
    }

    #[test]
    fn test_load_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let result = load_script(&path);

        match result {
            Err(ReplayError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_api_session_replay() {
        let steps = parse_script(
            r#"[
                {"step": "initialize", "config": {"appId": "app-1", "defaultReceiveCountry": "mexico"}},
                {"step": "open", "modalPosition": "left"},
                {"step": "frameLoaded"},
                {"step": "frameMessage", "origin": "https://remitly.com",
                 "data": {"topic": "event", "payload": {"eventType": "quote_viewed"}}},
                {"step": "frameMessage", "origin": "https://remitly.com", "data": "{\"topic\":\"exitCE\"}"},
                {"step": "flushTimers"}
            ]"#,
        )
        .unwrap();

        let records = run_script(steps);

        assert_eq!(
            callbacks(&records),
            vec![
                ("onStateChange", Some("open".to_string())),
                ("onLoad", None),
                ("onMessage", Some("quote_viewed".to_string())),
                ("onStateChange", Some("hidden".to_string())),
            ]
        );
        assert_eq!(
            records.last(),
            Some(&ReplayRecord::Effect {
                step: 5,
                effect: Effect::SetContainerVisible { visible: false },
            })
        );
    }

    #[test]
    fn test_button_session_replay() {
        let steps = parse_script(
            r#"[
                {"step": "initialize", "config": {"appId": "app-1"},
                 "button": {"top": 400, "left": 32, "width": 180, "height": 80}},
                {"step": "buttonClick"},
                {"step": "flushTimers"}
            ]"#,
        )
        .unwrap();

        let records = run_script(steps);

        let revealed = records.iter().any(|record| {
            matches!(
                record,
                ReplayRecord::Effect {
                    step: 2,
                    effect: Effect::SetContainerVisible { visible: true },
                }
            )
        });
        assert!(revealed);
        let label_faded = records.iter().any(|record| {
            matches!(
                record,
                ReplayRecord::Effect {
                    effect: Effect::Fade {
                        element: Element::ButtonLabel,
                        ..
                    },
                    ..
                }
            )
        });
        assert!(label_faded);
    }

    #[test]
    fn test_viewport_before_open_is_silent() {
        let steps = parse_script(
            r#"[
                {"step": "initialize", "config": {"appId": "app-1"}},
                {"step": "viewport", "width": 390}
            ]"#,
        )
        .unwrap();

        let records = run_script(steps);

        assert!(records.is_empty());
    }

    #[test]
    fn test_frame_messages_need_a_listener() {
        let steps = parse_script(
            r#"[
                {"step": "initialize", "config": {"appId": "app-1"}},
                {"step": "frameMessage", "origin": "https://remitly.com", "data": {"topic": "exitCE"}},
                {"step": "open"},
                {"step": "close"},
                {"step": "frameMessage", "origin": "https://remitly.com", "data": {"topic": "exitCE"}},
                {"step": "frameLoaded"}
            ]"#,
        )
        .unwrap();

        let records = run_script(steps);

        assert_eq!(
            callbacks(&records),
            vec![
                ("onStateChange", Some("open".to_string())),
                ("onStateChange", Some("hidden".to_string())),
            ]
        );
        assert!(!records.iter().any(|record| matches!(
            record,
            ReplayRecord::Effect { step: 1, .. } | ReplayRecord::Effect { step: 4, .. }
        )));
    }

    #[test]
    fn test_record_json() {
        let record = ReplayRecord::Callback {
            step: 3,
            name: "onLoad",
            value: None,
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["record"], "callback");
        assert_eq!(json["step"], 3);
        assert!(json.get("value").is_none());
    }
}
