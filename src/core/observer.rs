use super::lifecycle::Transition;
use super::types::SimTime;

/// Observer trait for simulation events
///
/// All methods default to no-ops so observers only implement what they need.
pub trait SimulationObserver {
    /// Called when the virtual clock moves forward
    fn on_clock_advance(&mut self, _old_time: SimTime, _new_time: SimTime) {}

    /// Called after a tire changes stage
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called when a step completes
    fn on_step_complete(&mut self, _time: SimTime, _events_processed: usize) {}
}
