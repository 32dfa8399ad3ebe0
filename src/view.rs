//! Client view model
//!
//! Pure state transitions for the client: load once, then replace slices
//! verbatim as pushes arrive. Rendering is a separate pure function.

mod chart;
pub mod event;
mod render;
pub mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use chart::{PolicyChart, POLICY_IMPACT};
pub use event::ViewEvent;
pub use render::render;
pub use state::{Snapshot, ViewState};
pub use transition::{transition, FEEDBACK_ACCEPTED};
