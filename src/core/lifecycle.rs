use super::errors::{SimError, SimResult};
use super::event_scheduler::EventScheduler;
use super::execution::config::LineConfig;
use super::production::ProductionSource;
use super::resource_pool::{Acquisition, ResourcePool};
use super::timing::TimingWindow;
use super::types::{Position, SimTime, Stage, UnitId};
use super::unit::Unit;
use log::{debug, info};
use rand::Rng;
use std::collections::BTreeMap;

/// Timed events driving the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// The building machine finished a tire
    Spawn,
    /// A tire's cure time elapsed
    CureComplete(UnitId),
    /// A tire's inspection finished
    InspectionComplete(UnitId),
}

/// A stage change, reported to observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub unit: UnitId,
    pub from: Stage,
    pub to: Stage,
    pub time: SimTime,
}

/// Every tire on the line plus the cavity pool and the building machine
#[derive(Debug, Clone)]
pub struct ProductionLine {
    units: BTreeMap<UnitId, Unit>,
    /// Tires in the gantry, arrival order
    gantry: Vec<UnitId>,
    pool: ResourcePool,
    source: ProductionSource,
    cure: TimingWindow,
    inspection_duration: SimTime,
    completed: u64,
    transitions: Vec<Transition>,
}

impl ProductionLine {
    pub fn new(config: &LineConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            units: BTreeMap::new(),
            gantry: Vec::new(),
            pool: ResourcePool::new(config.pool_capacity),
            source: ProductionSource::new(config.build),
            cure: config.cure,
            inspection_duration: config.inspection_duration,
            completed: 0,
            transitions: Vec::new(),
        })
    }

    /// Arm the first spawn
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
    ) -> SimResult<()> {
        self.source.schedule_next(scheduler, rng)
    }

    /// React to one due event
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
        event: LineEvent,
    ) -> SimResult<()> {
        debug!("t={:.2} handling {:?}", scheduler.now(), event);
        match event {
            LineEvent::Spawn => self.spawn(scheduler, rng),
            LineEvent::CureComplete(id) => self.finish_curing(scheduler, rng, id),
            LineEvent::InspectionComplete(id) => self.retire(scheduler.now(), id),
        }
    }

    fn spawn<R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
    ) -> SimResult<()> {
        let now = scheduler.now();
        let unit = self.source.build_unit(now);
        let id = unit.id();
        debug!("{} built at t={:.2}", id, now);
        self.units.insert(id, unit);

        self.source.schedule_next(scheduler, rng)?;

        // Building -> Queued happens on the spot
        let level = self.gantry.len();
        self.move_unit(id, Stage::Queued, Position::Gantry { level }, now)?;
        self.gantry.push(id);

        match self.pool.acquire(id)? {
            Acquisition::Granted { slot } => self.begin_curing(scheduler, rng, id, slot),
            Acquisition::Waiting { position } => {
                debug!("{} waits for a cavity at position {}", id, position);
                Ok(())
            }
        }
    }

    fn begin_curing<R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
        id: UnitId,
        slot: usize,
    ) -> SimResult<()> {
        let now = scheduler.now();
        self.gantry.retain(|queued| *queued != id);
        for (level, queued) in self.gantry.iter().enumerate() {
            if let Some(unit) = self.units.get_mut(queued) {
                unit.restack(level);
            }
        }
        self.move_unit(id, Stage::Processing, Position::Cavity { slot }, now)?;

        let cure_time = self.cure.sample(rng);
        debug!("{} curing in cavity {} for {:.2}s", id, slot, cure_time);
        scheduler.schedule_after(cure_time, LineEvent::CureComplete(id))
    }

    fn finish_curing<R: Rng + ?Sized>(
        &mut self,
        scheduler: &mut EventScheduler<LineEvent>,
        rng: &mut R,
        id: UnitId,
    ) -> SimResult<()> {
        let now = scheduler.now();
        let handoff = self.pool.release(id)?;
        self.move_unit(id, Stage::Finishing, Position::Finishing, now)?;
        scheduler.schedule_after(self.inspection_duration, LineEvent::InspectionComplete(id))?;

        if let Some(grant) = handoff {
            debug!("cavity {} handed from {} to {}", grant.slot, id, grant.unit);
            self.begin_curing(scheduler, rng, grant.unit, grant.slot)?;
        }
        Ok(())
    }

    fn retire(&mut self, now: SimTime, id: UnitId) -> SimResult<()> {
        self.move_unit(id, Stage::Done, Position::Finishing, now)?;
        self.units.remove(&id);
        self.completed += 1;
        info!("{} finished at t={:.2} ({} total)", id, now, self.completed);
        Ok(())
    }

    fn move_unit(
        &mut self,
        id: UnitId,
        stage: Stage,
        position: Position,
        now: SimTime,
    ) -> SimResult<()> {
        let unit = self
            .units
            .get_mut(&id)
            .ok_or_else(|| SimError::PreconditionViolation(format!("{} is not on the line", id)))?;
        let from = unit.transition(stage, position, now)?;
        self.transitions.push(Transition {
            unit: id,
            from,
            to: stage,
            time: now,
        });
        Ok(())
    }

    /// Take the stage changes recorded since the last drain
    pub fn drain_transitions(&mut self) -> std::vec::Drain<'_, Transition> {
        self.transitions.drain(..)
    }

    /// Active tires ordered by id
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Tires waiting in the gantry, counted from their stage
    pub fn queue_depth(&self) -> usize {
        self.units
            .values()
            .filter(|unit| unit.stage() == Stage::Queued)
            .count()
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn spawned(&self) -> u64 {
        self.source.spawned()
    }
}
