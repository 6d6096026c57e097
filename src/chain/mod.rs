pub(crate) mod guide;
pub(crate) mod orchestrator;
pub(crate) mod ownership;
