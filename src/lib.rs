//! Discrete-event simulation of a tire curing line.
//!
//! Tires are built at randomized intervals, wait in a gantry for one of a
//! fixed number of curing cavities, cure for a randomized time and leave
//! through a short inspection. The host owns a `SimulationEngine`, steps its
//! virtual clock and reads `LineSnapshot`s.

pub mod core;

// Re-export commonly used types
pub use crate::core::errors::{SimError, SimResult};
pub use crate::core::execution::{LineConfig, RunStatus, SimulationEngine};
pub use crate::core::layout::FloorLayout;
pub use crate::core::lifecycle::Transition;
pub use crate::core::observer::SimulationObserver;
pub use crate::core::snapshot::{LineSnapshot, UnitView};
pub use crate::core::timing::TimingWindow;
pub use crate::core::types::{Position, SimTime, Stage, TireColor, UnitId};
