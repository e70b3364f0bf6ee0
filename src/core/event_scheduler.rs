use super::errors::SimError;
use super::types::SimTime;
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent<E> {
    pub deadline: SimTime,
    pub sequence_num: u64,
    pub event: E,
}

impl<E> PartialEq for ScheduledEvent<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for ScheduledEvent<E> {}

impl<E> PartialOrd for ScheduledEvent<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for ScheduledEvent<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .deadline
            .total_cmp(&self.deadline)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Virtual clock plus the ordered queue of pending events
///
/// Events with equal deadlines are dispatched in the order they were
/// scheduled.
#[derive(Debug)]
pub struct EventScheduler<E> {
    event_queue: BinaryHeap<ScheduledEvent<E>>,
    sequence_counter: u64,
    now: SimTime,
}

impl<E> EventScheduler<E> {
    /// Create a new EventScheduler at time zero
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
            now: 0.0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Schedule an event to fire `delay` seconds from now
    pub fn schedule_after(&mut self, delay: SimTime, event: E) -> Result<(), SimError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(SimError::InvalidDuration { duration: delay });
        }

        let scheduled_event = ScheduledEvent {
            deadline: self.now + delay,
            sequence_num: self.sequence_counter,
            event,
        };

        self.event_queue.push(scheduled_event);
        self.sequence_counter += 1;
        Ok(())
    }

    /// Dispatch every event due at or before `target`, then move the clock to `target`
    ///
    /// The clock reads each event's own deadline while it is dispatched.
    /// Events scheduled by `dispatch` are honored in the same call when they
    /// fall due before `target`. Returns the number of dispatched events.
    pub fn advance<F, Err>(&mut self, target: SimTime, mut dispatch: F) -> Result<usize, Err>
    where
        F: FnMut(&mut Self, E) -> Result<(), Err>,
        Err: From<SimError>,
    {
        if !target.is_finite() || target < self.now {
            return Err(SimError::InvalidDuration {
                duration: target - self.now,
            }
            .into());
        }

        let mut dispatched = 0;
        while self
            .peek_next_deadline()
            .map_or(false, |deadline| deadline <= target)
        {
            let Some(scheduled_event) = self.event_queue.pop() else {
                break;
            };
            self.now = scheduled_event.deadline;
            trace!(
                "dispatching event #{} at t={}",
                scheduled_event.sequence_num,
                self.now
            );
            dispatch(self, scheduled_event.event)?;
            dispatched += 1;
        }

        self.now = target;
        Ok(dispatched)
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.event_queue.len()
    }

    /// Deadline of the earliest pending event
    pub fn peek_next_deadline(&self) -> Option<SimTime> {
        self.event_queue.peek().map(|event| event.deadline)
    }
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(
        scheduler: &mut EventScheduler<&'static str>,
        target: SimTime,
    ) -> Vec<(SimTime, &'static str)> {
        let mut fired = Vec::new();
        scheduler
            .advance::<_, SimError>(target, |sched, event| {
                fired.push((sched.now(), event));
                Ok(())
            })
            .unwrap();
        fired
    }

    #[test]
    fn test_events_fire_in_deadline_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_after(5.0, "late").unwrap();
        scheduler.schedule_after(1.0, "early").unwrap();
        scheduler.schedule_after(3.0, "middle").unwrap();

        let fired = collect(&mut scheduler, 10.0);
        assert_eq!(fired, vec![(1.0, "early"), (3.0, "middle"), (5.0, "late")]);
        assert_eq!(scheduler.now(), 10.0);
    }

    #[test]
    fn test_equal_deadlines_keep_scheduling_order() {
        let mut scheduler = EventScheduler::new();
        for name in ["a", "b", "c", "d"] {
            scheduler.schedule_after(2.0, name).unwrap();
        }

        let names: Vec<_> = collect(&mut scheduler, 2.0)
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_events_after_target_stay_pending() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule_after(4.0, "inside").unwrap();
        scheduler.schedule_after(4.5, "outside").unwrap();

        let fired = collect(&mut scheduler, 4.0);
        assert_eq!(fired, vec![(4.0, "inside")]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.peek_next_deadline(), Some(4.5));
        assert_eq!(scheduler.now(), 4.0);
    }

    #[test]
    fn test_reentrant_scheduling_within_one_advance() {
        let mut scheduler: EventScheduler<u32> = EventScheduler::new();
        scheduler.schedule_after(1.0, 0).unwrap();

        let mut seen = Vec::new();
        scheduler
            .advance::<_, SimError>(10.0, |sched, hop| {
                seen.push((sched.now(), hop));
                if hop < 5 {
                    sched.schedule_after(2.0, hop + 1)?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(
            seen,
            vec![(1.0, 0), (3.0, 1), (5.0, 2), (7.0, 3), (9.0, 4)]
        );
        // hop 5 is due at 11.0
        assert_eq!(scheduler.peek_next_deadline(), Some(11.0));
    }

    #[test]
    fn test_zero_delay_runs_after_already_due_events() {
        let mut scheduler: EventScheduler<&'static str> = EventScheduler::new();
        scheduler.schedule_after(1.0, "first").unwrap();
        scheduler.schedule_after(1.0, "second").unwrap();

        let mut seen = Vec::new();
        scheduler
            .advance::<_, SimError>(1.0, |sched, event| {
                seen.push(event);
                if event == "first" {
                    sched.schedule_after(0.0, "spawned")?;
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["first", "second", "spawned"]);
    }

    #[test]
    fn test_negative_delay_is_rejected() {
        let mut scheduler: EventScheduler<()> = EventScheduler::new();
        assert_eq!(
            scheduler.schedule_after(-1.0, ()),
            Err(SimError::InvalidDuration { duration: -1.0 })
        );
        assert!(scheduler.schedule_after(f64::NAN, ()).is_err());
        assert!(!scheduler.has_events());
    }

    #[test]
    fn test_backwards_target_is_rejected() {
        let mut scheduler: EventScheduler<()> = EventScheduler::new();
        collect_unit(&mut scheduler, 5.0).unwrap();

        let result = collect_unit(&mut scheduler, 4.0);
        assert!(matches!(result, Err(SimError::InvalidDuration { .. })));
        assert_eq!(scheduler.now(), 5.0);
    }

    #[test]
    fn test_clock_never_passes_target() {
        let mut scheduler: EventScheduler<()> = EventScheduler::new();
        scheduler.schedule_after(3.0, ()).unwrap();

        let mut last = scheduler.now();
        for target in [0.5, 1.0, 2.9, 3.0, 3.0, 7.25] {
            collect_unit(&mut scheduler, target).unwrap();
            assert!(scheduler.now() >= last);
            assert!(scheduler.now() <= target);
            last = scheduler.now();
        }
    }

    fn collect_unit(
        scheduler: &mut EventScheduler<()>,
        target: SimTime,
    ) -> Result<usize, SimError> {
        scheduler.advance(target, |_, _| Ok::<(), SimError>(()))
    }
}
