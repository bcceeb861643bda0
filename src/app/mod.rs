//! Application core: pure power-sequencing logic, zero I/O.
//!
//! The arm/disarm policy lives in [`coordinator`].  All interaction with
//! the panel, the rails and the button happens through **port traits**
//! defined in [`ports`], keeping this layer testable without a board.

pub mod coordinator;
pub mod events;
pub mod ports;
