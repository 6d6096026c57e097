pub(crate) mod checkpoint;
pub(crate) mod region;
pub(crate) mod trail;
pub(crate) mod validator;
