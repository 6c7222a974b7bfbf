pub(crate) mod bootstrap;
pub(crate) mod loop_runner;
pub(crate) mod sandbox;
pub(crate) mod scenario;
