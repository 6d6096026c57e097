use kurbo::Point;

/// One pointer sample in world space. Screen-to-world projection happens upstream.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    /// Press.
    Down(Point),
    /// Drag while pressed.
    Move(Point),
    /// Release (or capture lost at the last known position).
    Up(Point),
}

impl PointerEvent {
    /// Sample position.
    pub fn point(&self) -> Point {
        match *self {
            Self::Down(p) | Self::Move(p) | Self::Up(p) => p,
        }
    }
}

/// Everything the engine consumes for one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f64,
    /// Pointer samples of this frame, in arrival order.
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

impl FrameInput {
    /// A frame without pointer input.
    pub fn idle(dt: f64) -> Self {
        Self {
            dt,
            events: Vec::new(),
        }
    }

    /// A frame carrying `events`.
    pub fn with_events(dt: f64, events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            dt,
            events: events.into_iter().collect(),
        }
    }
}
