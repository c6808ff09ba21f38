//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod action_repo;
pub mod dependency_repo;
pub mod group_repo;
pub mod route_repo;
pub mod step_dependency_repo;
pub mod step_repo;
pub mod workflow_repo;

pub use action_repo::ActionRepo;
pub use dependency_repo::DependencyRepo;
pub use group_repo::GroupRepo;
pub use route_repo::RouteRepo;
pub use step_dependency_repo::StepDependencyRepo;
pub use step_repo::StepRepo;
pub use workflow_repo::WorkflowRepo;
