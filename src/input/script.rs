//! Recorded gestures, replayed frame by frame against a chain.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use kurbo::Point;

use crate::chain::orchestrator::{ChainEvent, CompletionSink, GuideChain};
use crate::foundation::error::{TraceError, TraceResult};
use crate::input::pointer::{FrameInput, PointerEvent};

fn default_dt() -> f64 {
    1.0 / 60.0
}

/// A fixed-step pointer recording.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GestureScript {
    /// Frame time in seconds.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Pointer events per frame; an empty list is an idle frame.
    pub frames: Vec<Vec<PointerEvent>>,
    /// Idle frames appended after the recording so timers can run out.
    #[serde(default)]
    pub trailing_idle_frames: usize,
}

/// One chain event tagged with the frame that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReplayedEvent {
    /// 0-based frame index.
    pub frame: usize,
    /// What happened.
    #[serde(flatten)]
    pub event: ChainEvent,
}

impl GestureScript {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TraceResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| TraceError::serde(format!("parse gesture script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TraceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraceError::config(format!("open gesture script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Press on the first point, drag through the rest one per frame, release on the last.
    pub fn stroke(dt: f64, points: &[Point]) -> Self {
        let mut frames = Vec::with_capacity(points.len() + 1);
        if let Some((first, rest)) = points.split_first() {
            frames.push(vec![PointerEvent::Down(*first)]);
            frames.extend(rest.iter().map(|p| vec![PointerEvent::Move(*p)]));
            let last = rest.last().unwrap_or(first);
            frames.push(vec![PointerEvent::Up(*last)]);
        }
        Self {
            dt,
            frames,
            trailing_idle_frames: 0,
        }
    }

    /// Append another script's frames (its `dt` is ignored).
    pub fn then(mut self, other: GestureScript) -> Self {
        self.frames.extend(other.frames);
        self.trailing_idle_frames += other.trailing_idle_frames;
        self
    }

    /// Add `count` idle frames at the end.
    pub fn idle(mut self, count: usize) -> Self {
        self.trailing_idle_frames += count;
        self
    }

    /// Total number of frames, idle tail included.
    pub fn frame_count(&self) -> usize {
        self.frames.len() + self.trailing_idle_frames
    }

    /// Frame inputs in order.
    pub fn inputs(&self) -> impl Iterator<Item = FrameInput> + '_ {
        let dt = self.dt;
        let idle = std::iter::repeat_with(Vec::new).take(self.trailing_idle_frames);
        self.frames
            .iter()
            .cloned()
            .chain(idle)
            .map(move |events| FrameInput { dt, events })
    }

    /// Feed every frame to `chain`, collecting the events it reports.
    pub fn replay(
        &self,
        chain: &mut GuideChain,
        sink: &mut dyn CompletionSink,
    ) -> Vec<ReplayedEvent> {
        let mut out = Vec::new();
        for (frame, input) in self.inputs().enumerate() {
            out.extend(
                chain
                    .frame(&input, sink)
                    .into_iter()
                    .map(|event| ReplayedEvent { frame, event }),
            );
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/script.rs"]
mod tests;
