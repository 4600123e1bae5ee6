//! Generator model.
//!
//! Immutable description of the units being dispatched: quadratic cost
//! curves, output bounds, prohibited operating zones and the total demand.
//! Everything else in the crate reads these types and never mutates them.

mod generator;
mod system;

pub use generator::{Generator, ProhibitedZone};
pub use system::DispatchSystem;
