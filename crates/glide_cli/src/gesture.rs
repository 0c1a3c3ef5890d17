//! Scripted pointer gestures.

use std::fs;
use std::path::{Path, PathBuf};

use glide::PointerEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Release;

/// Errors raised while loading a gesture.
#[derive(Debug, Error)]
pub enum GestureError {
    /// The gesture file could not be read.
    #[error("failed to read gesture file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gesture file is not a valid gesture document.
    #[error("invalid gesture file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The gesture contains no events.
    #[error("gesture has no events")]
    Empty,

    /// Timestamps go backwards.
    #[error("event {index} at t={t}ms is earlier than the event before it")]
    OutOfOrder { index: usize, t: f64 },
}

/// An ordered list of pointer events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Gesture {
    pub events: Vec<PointerEvent>,
}

impl Gesture {
    /// A straight drag from `from` to `to` with `steps` evenly spaced moves
    /// over `duration_ms`, ended by `release`.
    pub fn linear(from: f64, to: f64, steps: u32, duration_ms: f64, release: Release) -> Self {
        let mut events = Vec::with_capacity(steps as usize + 2);
        events.push(PointerEvent::Down { x: from, t: 0.0 });

        for i in 1..=steps {
            let progress = f64::from(i) / f64::from(steps);
            events.push(PointerEvent::Move {
                x: (to - from).mul_add(progress, from),
                t: duration_ms * progress,
            });
        }

        let end = if steps == 0 { from } else { to };
        events.push(match release {
            Release::Up => PointerEvent::Up { x: end, t: duration_ms },
            Release::Leave => PointerEvent::Leave { x: end, t: duration_ms },
        });

        Self { events }
    }

    /// Parses a gesture document: `{"events": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads and checks a gesture file.
    pub fn from_path(path: &Path) -> Result<Self, GestureError> {
        let source = fs::read_to_string(path).map_err(|source| GestureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let gesture = Self::from_json_str(&source).map_err(|source| GestureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        gesture.validate()?;
        Ok(gesture)
    }

    /// Rejects empty gestures and timestamps that go backwards.
    pub fn validate(&self) -> Result<(), GestureError> {
        if self.events.is_empty() {
            return Err(GestureError::Empty);
        }
        for (index, pair) in self.events.windows(2).enumerate() {
            let t = pair[1].timestamp();
            if t < pair[0].timestamp() {
                return Err(GestureError::OutOfOrder { index: index + 1, t });
            }
        }
        Ok(())
    }

    /// Timestamp of the last event.
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, PointerEvent::timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_drag_is_evenly_spaced() {
        let gesture = Gesture::linear(400.0, 300.0, 4, 64.0, Release::Up);

        assert_eq!(
            gesture.events,
            vec![
                PointerEvent::Down { x: 400.0, t: 0.0 },
                PointerEvent::Move { x: 375.0, t: 16.0 },
                PointerEvent::Move { x: 350.0, t: 32.0 },
                PointerEvent::Move { x: 325.0, t: 48.0 },
                PointerEvent::Move { x: 300.0, t: 64.0 },
                PointerEvent::Up { x: 300.0, t: 64.0 },
            ]
        );
    }

    #[test]
    fn linear_drag_can_end_with_leave() {
        let gesture = Gesture::linear(0.0, 50.0, 2, 20.0, Release::Leave);
        assert_eq!(
            gesture.events.last(),
            Some(&PointerEvent::Leave { x: 50.0, t: 20.0 })
        );
    }

    #[test]
    fn zero_steps_is_a_tap() {
        let gesture = Gesture::linear(10.0, 90.0, 0, 30.0, Release::Up);
        assert_eq!(gesture.events.len(), 2);
        assert_eq!(gesture.end_time(), 30.0);
    }

    #[test]
    fn parses_event_documents() {
        let gesture = Gesture::from_json_str(
            r#"{"events": [
                {"type": "down", "x": 100, "t": 0},
                {"type": "move", "x": 90, "t": 16},
                {"type": "up"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(gesture.events.len(), 3);
        assert_eq!(gesture.events[1], PointerEvent::Move { x: 90.0, t: 16.0 });
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Gesture::from_json_str(r#"{"events": [], "speed": 3}"#).is_err());
    }

    #[test]
    fn validate_rejects_empty() {
        let gesture = Gesture { events: Vec::new() };
        assert!(matches!(gesture.validate(), Err(GestureError::Empty)));
    }

    #[test]
    fn validate_rejects_backwards_time() {
        let gesture = Gesture {
            events: vec![
                PointerEvent::Down { x: 0.0, t: 10.0 },
                PointerEvent::Move { x: 5.0, t: 20.0 },
                PointerEvent::Move { x: 9.0, t: 15.0 },
            ],
        };

        match gesture.validate() {
            Err(GestureError::OutOfOrder { index, t }) => {
                assert_eq!(index, 2);
                assert_eq!(t, 15.0);
            }
            other => panic!("expected OutOfOrder, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Gesture::from_path(Path::new("/no/such/gesture.json")).unwrap_err();
        assert!(err.to_string().contains("/no/such/gesture.json"));
    }
}
