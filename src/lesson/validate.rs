//! Authoring checks for lessons.
//!
//! Structural problems that make a chain impossible to build are errors. Everything else is a
//! [`ConfigWarning`]: the guide still runs, with the offending piece degraded to its permissive
//! behaviour.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::foundation::error::{TraceError, TraceResult};
use crate::lesson::model::{GuideDef, LessonDef, RegionDef};
use crate::path::builder::build_polyline;

/// Category of a non-fatal lesson problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// No start region; any press may begin tracing.
    MissingStart,
    /// No end region; the stroke completes on release.
    MissingEnd,
    /// Corridor enforcement is on but no corridor is declared.
    MissingCorridor,
    /// A region cannot answer hit tests and is ignored.
    InvalidRegion,
    /// Checkpoint indices are not exactly `1..=n`.
    CheckpointOrder,
    /// `next` names a guide that does not exist; the chain ends there.
    UnknownNext,
    /// No guide is marked as starter; the token is never claimed, so no hint ever shows.
    NoStarter,
    /// More than one starter; only the first claims the hint.
    MultipleStarters,
    /// The hint path cannot produce a polyline; the hint never shows.
    UnusableHintPath,
    /// The hint speed is not positive; the hint never shows.
    NonPositiveSpeed,
}

/// A misconfigured guide (or lesson) that still runs in degraded form.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ConfigWarning {
    /// Guide id, when the problem belongs to one guide.
    pub guide: Option<String>,
    /// What is wrong.
    pub kind: WarningKind,
    /// Human-readable detail for the content author.
    pub message: String,
}

impl ConfigWarning {
    fn guide(id: &str, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            guide: Some(id.to_owned()),
            kind,
            message: message.into(),
        }
    }

    fn lesson(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            guide: None,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.guide {
            Some(id) => write!(f, "guide '{id}': {}", self.message),
            None => write!(f, "lesson: {}", self.message),
        }
    }
}

pub(crate) fn validate_lesson(def: &LessonDef) -> TraceResult<Vec<ConfigWarning>> {
    if def.guides.is_empty() {
        return Err(TraceError::validation("lesson has no guides"));
    }

    let mut index = HashMap::new();
    for (i, g) in def.guides.iter().enumerate() {
        if index.insert(g.id.as_str(), i).is_some() {
            return Err(TraceError::validation(format!(
                "duplicate guide id '{}'",
                g.id
            )));
        }
    }

    for g in &def.guides {
        let mut seen = HashSet::from([g.id.as_str()]);
        let mut at = g;
        while let Some(next) = at.next.as_deref() {
            let Some(&i) = index.get(next) else {
                break;
            };
            if !seen.insert(next) {
                return Err(TraceError::validation(format!(
                    "guide '{}' is part of a next-cycle through '{next}'",
                    g.id
                )));
            }
            at = &def.guides[i];
        }
    }

    let mut warnings = Vec::new();
    for g in &def.guides {
        check_guide(g, &index, &mut warnings);
    }

    let starters: Vec<&str> = def
        .guides
        .iter()
        .filter(|g| g.settings.starter)
        .map(|g| g.id.as_str())
        .collect();
    match starters.as_slice() {
        [] => warnings.push(ConfigWarning::lesson(
            WarningKind::NoStarter,
            "no guide is marked as starter; no hint will show in this lesson",
        )),
        [_] => {}
        [first, ..] => warnings.push(ConfigWarning::lesson(
            WarningKind::MultipleStarters,
            format!(
                "{} starter guides; '{first}' starts the chain",
                starters.len()
            ),
        )),
    }

    Ok(warnings)
}

fn check_guide(g: &GuideDef, index: &HashMap<&str, usize>, out: &mut Vec<ConfigWarning>) {
    let id = g.id.as_str();

    match &g.start {
        None => out.push(ConfigWarning::guide(
            id,
            WarningKind::MissingStart,
            "no start region; tracing may begin anywhere",
        )),
        Some(r) => check_region(id, "start", r, out),
    }
    match &g.end {
        None => out.push(ConfigWarning::guide(
            id,
            WarningKind::MissingEnd,
            "no end region; the stroke completes on release",
        )),
        Some(r) => check_region(id, "end", r, out),
    }
    match &g.corridor {
        None if g.rules.enforce_corridor => out.push(ConfigWarning::guide(
            id,
            WarningKind::MissingCorridor,
            "corridor enforcement is on but no corridor is declared",
        )),
        None => {}
        Some(r) => check_region(id, "corridor", r, out),
    }

    let mut indices: Vec<u32> = g.checkpoints.iter().map(|c| c.index).collect();
    indices.sort_unstable();
    if indices.iter().zip(1..).any(|(&have, want)| have != want) {
        out.push(ConfigWarning::guide(
            id,
            WarningKind::CheckpointOrder,
            format!("checkpoint indices {indices:?} are not 1..={}", indices.len()),
        ));
    }
    for c in &g.checkpoints {
        check_region(id, &format!("checkpoint {}", c.index), &c.region, out);
    }

    if let Some(next) = &g.next {
        if !index.contains_key(next.as_str()) {
            out.push(ConfigWarning::guide(
                id,
                WarningKind::UnknownNext,
                format!("next guide '{next}' does not exist; the chain ends here"),
            ));
        }
    }

    if let Some(hint) = &g.hint {
        let speed = hint.motion.speed;
        if speed.is_nan() || speed <= 0.0 {
            out.push(ConfigWarning::guide(
                id,
                WarningKind::NonPositiveSpeed,
                format!("hint speed must be > 0, got {speed}"),
            ));
        }
        let built = hint
            .path
            .to_spec()
            .and_then(|spec| build_polyline(&spec).map_err(TraceError::from));
        if let Err(e) = built {
            out.push(ConfigWarning::guide(
                id,
                WarningKind::UnusableHintPath,
                format!("hint path unusable: {e}"),
            ));
        }
    }
}

fn check_region(id: &str, what: &str, region: &RegionDef, out: &mut Vec<ConfigWarning>) {
    if let Err(msg) = region.to_shape().validate() {
        out.push(ConfigWarning::guide(
            id,
            WarningKind::InvalidRegion,
            format!("{what} region ignored: {msg}"),
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lesson/validate.rs"]
mod tests;
