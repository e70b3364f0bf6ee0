use super::errors::SimResult;
use super::event_scheduler::EventScheduler;
use super::lifecycle::LineEvent;
use super::timing::TimingWindow;
use super::types::{SimTime, UnitId};
use super::unit::Unit;
use log::debug;
use rand::Rng;

/// Tire building machine feeding the line at randomized intervals
///
/// Each spawn re-arms the next one, so the chain never ends on its own.
#[derive(Debug, Clone)]
pub struct ProductionSource {
    build: TimingWindow,
    next_sequence: u64,
}

impl ProductionSource {
    pub fn new(build: TimingWindow) -> Self {
        Self {
            build,
            next_sequence: 1,
        }
    }

    /// Arm the next spawn after a freshly drawn build interval
    pub fn schedule_next<R: Rng + ?Sized>(
        &self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
    ) -> SimResult<()> {
        let interval = self.build.sample(rng);
        debug!(
            "next tire T{} due in {:.2}s (t={:.2})",
            self.next_sequence,
            interval,
            scheduler.now() + interval
        );
        scheduler.schedule_after(interval, LineEvent::Spawn)
    }

    /// Build the next tire with a fresh sequence id
    pub fn build_unit(&mut self, now: SimTime) -> Unit {
        let id = UnitId::new(self.next_sequence);
        self.next_sequence += 1;
        Unit::new(id, now)
    }

    /// Number of tires built so far
    pub fn spawned(&self) -> u64 {
        self.next_sequence - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SimError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ids_are_monotonic() {
        let mut source = ProductionSource::new(TimingWindow::fixed(10.0).unwrap());
        let ids: Vec<u64> = (0..4)
            .map(|n| source.build_unit(n as f64).id().sequence())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(source.spawned(), 4);
    }

    #[test]
    fn test_schedules_spawn_inside_build_window() {
        let source = ProductionSource::new(TimingWindow::new(30.0, 3.0).unwrap());
        let mut scheduler = EventScheduler::new();
        let mut rng = StdRng::seed_from_u64(3);

        source.schedule_next(&mut scheduler, &mut rng).unwrap();

        let due = scheduler.peek_next_deadline().unwrap();
        assert!((27.0..=33.0).contains(&due));
        let fired = scheduler
            .advance::<_, SimError>(due, |_, event| {
                assert_eq!(event, LineEvent::Spawn);
                Ok(())
            })
            .unwrap();
        assert_eq!(fired, 1);
    }
}
