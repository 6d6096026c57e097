use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::chain::guide::Guide;
use crate::chain::orchestrator::GuideChain;
use crate::foundation::core::GuideId;
use crate::foundation::error::{TraceError, TraceResult};
use crate::hint::follower::PathFollower;
use crate::lesson::model::{GuideDef, LessonDef, RegionDef};
use crate::lesson::validate::{ConfigWarning, validate_lesson};
use crate::path::builder::{PathSpec, build_polyline};
use crate::path::polyline::Polyline;
use crate::stroke::region::{GuideRegions, RegionShape};
use crate::stroke::validator::StrokeValidator;

/// Lesson boundary object.
///
/// The JSON-facing description of one letter or shape: its guides, their regions, rules, hint
/// paths and successor links. Guides are addressed by string id in JSON and by [`GuideId`] at
/// runtime; ids are assigned in declaration order starting at 0.
#[derive(Debug, Clone)]
pub struct Lesson {
    def: LessonDef,
}

impl Lesson {
    /// Parse a lesson from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> TraceResult<Self> {
        let def: LessonDef = serde_json::from_reader(r)
            .map_err(|e| TraceError::serde(format!("parse lesson JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a lesson from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> TraceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TraceError::config(format!("open lesson JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Number of guides.
    pub fn guide_count(&self) -> usize {
        self.def.guides.len()
    }

    /// Runtime id of the guide declared as `name`.
    pub fn guide_id(&self, name: &str) -> Option<GuideId> {
        self.def
            .guides
            .iter()
            .position(|g| g.id == name)
            .map(runtime_id)
    }

    /// Declared name of a runtime id.
    pub fn guide_name(&self, id: GuideId) -> Option<&str> {
        let i = usize::try_from(id.0).ok()?;
        self.def.guides.get(i).map(|g| g.id.as_str())
    }

    /// Check the lesson. Structural problems are errors; degraded guides come back as warnings.
    pub fn validate(&self) -> TraceResult<Vec<ConfigWarning>> {
        validate_lesson(&self.def)
    }

    /// Hint path description of guide `name`.
    pub fn hint_spec(&self, name: &str) -> TraceResult<PathSpec> {
        let g = self.find(name)?;
        let hint = g
            .hint
            .as_ref()
            .ok_or_else(|| TraceError::config(format!("guide '{name}' has no hint")))?;
        hint.path.to_spec()
    }

    /// Build the hint polyline of guide `name`.
    pub fn hint_polyline(&self, name: &str) -> TraceResult<Polyline> {
        let spec = self.hint_spec(name)?;
        Ok(build_polyline(&spec)?)
    }

    /// Validate, log every warning and assemble a ready-to-run chain.
    ///
    /// The chain starts at the first starter guide, or the first guide when none is marked.
    pub fn build_chain(&self) -> TraceResult<GuideChain> {
        let warnings = self.validate()?;
        for w in &warnings {
            tracing::warn!(kind = ?w.kind, "{w}");
        }

        let mut entries = Vec::with_capacity(self.def.guides.len());
        for (i, g) in self.def.guides.iter().enumerate() {
            let next = g.next.as_deref().and_then(|n| self.guide_id(n));
            entries.push((self.build_guide(runtime_id(i), g), next));
        }
        let start = self
            .def
            .guides
            .iter()
            .position(|g| g.settings.starter)
            .map_or(GuideId(0), runtime_id);

        tracing::info!(
            lesson = %self.def.name,
            guides = entries.len(),
            warnings = warnings.len(),
            "lesson loaded"
        );
        GuideChain::new(entries, start)
    }

    fn find(&self, name: &str) -> TraceResult<&GuideDef> {
        self.def
            .guides
            .iter()
            .find(|g| g.id == name)
            .ok_or_else(|| TraceError::config(format!("unknown guide '{name}'")))
    }

    fn build_guide(&self, id: GuideId, g: &GuideDef) -> Guide {
        let mut regions = GuideRegions::new();
        if let Some(r) = usable(g.start.as_ref()) {
            regions = regions.with_start(r);
        }
        if let Some(r) = usable(g.end.as_ref()) {
            regions = regions.with_end(r);
        }
        if let Some(r) = usable(g.corridor.as_ref()) {
            regions = regions.with_corridor(r);
        }
        let mut checkpoint_total = 0;
        for c in &g.checkpoints {
            let shape = c.region.to_shape();
            if shape.validate().is_ok() {
                regions = regions.with_checkpoint(c.index, shape);
                checkpoint_total += 1;
            }
        }

        let validator = StrokeValidator::new(g.rules, regions, checkpoint_total);
        let mut guide = Guide::new(id, validator).with_config(g.settings);
        if let Some(hint) = &g.hint {
            match hint.path.to_spec() {
                Ok(spec) => guide = guide.with_hint(PathFollower::new(spec, hint.motion)),
                Err(err) => tracing::warn!(guide = %g.id, %err, "hint dropped"),
            }
        }
        guide
    }
}

fn runtime_id(index: usize) -> GuideId {
    GuideId(u32::try_from(index).unwrap_or(u32::MAX))
}

fn usable(def: Option<&RegionDef>) -> Option<RegionShape> {
    def.map(RegionDef::to_shape)
        .filter(|shape| shape.validate().is_ok())
}

#[cfg(test)]
#[path = "../../tests/unit/lesson/document.rs"]
mod tests;
