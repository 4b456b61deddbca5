//! Interaction module
//!
//! Pointer gestures, multi-select mode and the dashboard session that
//! routes card events to them.

pub mod gesture;
pub mod selection;
pub mod session;

pub use gesture::{DragOutcome, LongPress, SwipeToDelete};
pub use selection::{
    move_destinations, MoveDestination, SelectionController, SelectionEffect, SelectionEvent,
    SelectionState,
};
pub use session::{CardRef, DashboardSession};
