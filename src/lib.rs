//! Economic dispatch with prohibited operating zones.
//!
//! Allocates a fixed total demand across thermal generating units with
//! quadratic fuel-cost curves, output bounds and forbidden output intervals,
//! minimizing total fuel cost. Prohibited zones split each unit's feasible
//! range into disjoint pieces, so the problem is solved with Differential
//! Evolution instead of gradient methods.
//!
//! - **Model** ([`model`]): units, prohibited zones and the system table.
//! - **Fitness** ([`fitness`]): fuel cost plus a soft demand penalty.
//! - **Repair** ([`repair`]): bounds, zone push-out and demand rebalancing.
//! - **Initialization** ([`init`]): zone-avoiding rejection sampling with a
//!   bounded retry budget.
//! - **Differential Evolution** ([`de`]): a problem-agnostic DE/rand/1/bin
//!   engine with repair hooks.
//! - **Dispatch** ([`dispatch`]): the pieces above wired together.
//!
//! # Example
//!
//! ```
//! use u_dispatch::de::DeConfig;
//! use u_dispatch::dispatch::solve;
//! use u_dispatch::model::DispatchSystem;
//!
//! let system = DispatchSystem::six_unit_reference();
//! let config = DeConfig::default().with_seed(42);
//! let solution = solve(&system, &config).unwrap();
//!
//! for (unit, p) in solution.outputs.iter().enumerate() {
//!     let g = &system.generators()[unit];
//!     assert!(g.p_min <= *p && *p <= g.p_max);
//! }
//! ```
//!
//! # Logging
//!
//! Progress is emitted through [`tracing`]. The crate installs no
//! subscriber.

pub mod de;
pub mod dispatch;
pub mod error;
pub mod fitness;
pub mod init;
pub mod model;
pub mod random;
pub mod repair;
pub mod tolerance;

pub use error::{DispatchError, Result};
