pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::LineConfig;
pub use simulation_engine::{RunStatus, SimulationEngine};
