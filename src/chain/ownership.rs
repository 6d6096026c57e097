use crate::foundation::core::GuideId;

/// The single "idle hint" token shared by every guide of a chain.
///
/// At most one guide holds it. Only a guide's own activate/deactivate hooks and the chain's
/// handoff mutate it, so the mutators are crate-private.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HintOwnership {
    holder: Option<GuideId>,
}

impl HintOwnership {
    /// Nobody holds the token.
    pub fn vacant() -> Self {
        Self::default()
    }

    /// Current holder, if any.
    pub fn holder(&self) -> Option<GuideId> {
        self.holder
    }

    /// Whether `id` currently holds the token.
    pub fn is_held_by(&self, id: GuideId) -> bool {
        self.holder == Some(id)
    }

    /// Take the token for `id` if nobody holds it.
    pub(crate) fn claim_if_vacant(&mut self, id: GuideId) -> bool {
        if self.holder.is_some() {
            return false;
        }
        tracing::debug!(guide = %id, "hint token claimed");
        self.holder = Some(id);
        true
    }

    /// Give the token up if `id` holds it.
    pub(crate) fn release(&mut self, id: GuideId) -> bool {
        if !self.is_held_by(id) {
            return false;
        }
        tracing::debug!(guide = %id, "hint token released");
        self.holder = None;
        true
    }

    /// Hand the token to `id` unconditionally.
    pub(crate) fn assign(&mut self, id: GuideId) {
        tracing::debug!(from = ?self.holder, to = %id, "hint token transferred");
        self.holder = Some(id);
    }
}
