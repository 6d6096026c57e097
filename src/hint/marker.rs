use kurbo::Point;

/// Render-facing state of a movable marker (the hint hand, a fill sprite, ...).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Marker {
    /// World-space position.
    pub position: Point,
    /// Rotation around Z in radians.
    pub rotation_rad: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether the marker is drawn at all.
    pub visible: bool,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            rotation_rad: 0.0,
            opacity: 1.0,
            visible: false,
        }
    }
}

impl Marker {
    /// Push this state into an external rendering object.
    pub fn apply_to(&self, handle: &mut dyn VisualHandle) {
        handle.set_visible(self.visible);
        if self.visible {
            handle.set_position(self.position);
            handle.set_rotation(self.rotation_rad);
            handle.set_opacity(self.opacity);
        }
    }
}

/// External rendering object driven by the engine.
///
/// The engine never creates or destroys these; it only requests updates.
pub trait VisualHandle {
    /// Move the visual.
    fn set_position(&mut self, position: Point);
    /// Rotate the visual around Z.
    fn set_rotation(&mut self, rotation_rad: f64);
    /// Change opacity.
    fn set_opacity(&mut self, opacity: f64);
    /// Toggle visibility.
    fn set_visible(&mut self, visible: bool);
}

impl VisualHandle for Marker {
    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation_rad: f64) {
        self.rotation_rad = rotation_rad;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
