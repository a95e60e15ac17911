//! JSON descriptions of a stage and of request scenarios replayed against it.

pub(crate) mod model;
pub(crate) mod scenario;
