pub(crate) mod follower;
pub(crate) mod marker;
