//! Domain layer: pure session-coordination types and helpers.

pub mod clock;
pub mod errors;
pub mod roles;
pub mod state;

#[cfg(test)]
mod tests_clock;
#[cfg(test)]
mod tests_props_roles;
#[cfg(test)]
mod tests_roles;

// Re-exports for ergonomics
pub use clock::{ClockState, TickOutcome};
pub use errors::DomainError;
pub use roles::RoleRegistry;
pub use state::{GameOutcome, OutcomeCause, Role, SessionPhase, Side};
