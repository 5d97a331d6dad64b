/// Event entity module
pub mod event;
/// Experiment entity module
pub mod experiment;
/// Tenant entity module
pub mod tenant;
/// User assignment entity module
pub mod user_assignment;

pub use event::Entity as Event;
pub use experiment::Entity as Experiment;
pub use tenant::Entity as Tenant;
pub use user_assignment::Entity as UserAssignment;
