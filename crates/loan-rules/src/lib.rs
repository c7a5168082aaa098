//! Ordered auto-loan parameter rules and the drag-and-drop reordering engine
//! that keeps them in the order the lending desk configured.

pub mod config;
pub mod error;
pub mod rules;
pub mod telemetry;
