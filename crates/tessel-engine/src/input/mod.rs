//! Input subsystem.
//!
//! Platform-agnostic: the runtime translates windowing events into calls on
//! these types, and nothing here mentions winit.

mod drag;

pub use drag::DragTracker;
