pub mod action;
pub mod dependency;
pub mod step;
pub mod workflow;
