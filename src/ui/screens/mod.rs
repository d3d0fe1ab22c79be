pub(crate) mod actions;
pub(crate) mod dashboard;
pub(crate) mod goals;
