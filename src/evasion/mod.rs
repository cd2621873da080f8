//! Runaway button engine
//!
//! The movable button dodges the pointer while staying inside the viewport
//! and clear of the accept button. All state lives in `EvasionState`, owned
//! by one `EvasionController`; the page is reached only through `Stage`.

pub mod engine;
pub mod input;
pub mod stage;
pub mod state;

pub use engine::EvasionController;
pub use input::{EvasionEvent, MoveReason, Outcome, PointerKind};
pub use stage::{SimulatedStage, Stage};
pub use state::{Bounds, EvasionState, Placement};
