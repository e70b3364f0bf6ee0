use super::execution::simulation_engine::RunStatus;
use super::lifecycle::ProductionLine;
use super::types::{Position, SimTime, Stage, TireColor, UnitId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read-only view of one active tire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub stage: Stage,
    pub position: Position,
    pub created_at: SimTime,
    pub color: TireColor,
}

/// Everything a dashboard or renderer may read about a running line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub run_id: Uuid,
    pub time: SimTime,
    pub status: RunStatus,
    /// Active tires ordered by id
    pub units: Vec<UnitView>,
    /// Tires waiting in the gantry
    pub queue_depth: usize,
    /// Cavities in use
    pub occupancy: usize,
    pub capacity: usize,
    pub completed: u64,
    pub spawned: u64,
}

impl LineSnapshot {
    pub(crate) fn capture(
        run_id: Uuid,
        time: SimTime,
        status: RunStatus,
        line: &ProductionLine,
    ) -> Self {
        let units = line
            .units()
            .map(|unit| UnitView {
                id: unit.id(),
                stage: unit.stage(),
                position: unit.position(),
                created_at: unit.created_at(),
                color: unit.stage().color(),
            })
            .collect();

        Self {
            run_id,
            time,
            status,
            units,
            queue_depth: line.queue_depth(),
            occupancy: line.pool().occupancy(),
            capacity: line.pool().capacity(),
            completed: line.completed(),
            spawned: line.spawned(),
        }
    }

    /// Cavity utilization in percent
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupancy as f64 / self.capacity as f64 * 100.0
    }

    /// Number of active tires in `stage`
    pub fn count_in(&self, stage: Stage) -> usize {
        self.units.iter().filter(|unit| unit.stage == stage).count()
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.iter().find(|unit| unit.id == id)
    }
}
