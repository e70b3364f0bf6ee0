use super::errors::SimError;
use super::types::{Position, SimTime, Stage, UnitId};
use serde::{Deserialize, Serialize};

/// One tire moving through the curing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    id: UnitId,
    stage: Stage,
    position: Position,
    created_at: SimTime,
    /// Every stage entered so far with its entry time
    history: Vec<(Stage, SimTime)>,
}

impl Unit {
    /// A freshly built tire sitting on the machine
    pub fn new(id: UnitId, created_at: SimTime) -> Self {
        Self {
            id,
            stage: Stage::Building,
            position: Position::Machine,
            created_at,
            history: vec![(Stage::Building, created_at)],
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn created_at(&self) -> SimTime {
        self.created_at
    }

    pub fn history(&self) -> &[(Stage, SimTime)] {
        &self.history
    }

    /// Shift down the gantry stack without changing stage
    pub(crate) fn restack(&mut self, level: usize) {
        if let Position::Gantry { .. } = self.position {
            self.position = Position::Gantry { level };
        }
    }

    /// Move to `stage`, which must be the direct successor of the current one
    pub fn transition(
        &mut self,
        stage: Stage,
        position: Position,
        now: SimTime,
    ) -> Result<Stage, SimError> {
        let from = self.stage;
        if from.next() != Some(stage) {
            return Err(SimError::PreconditionViolation(format!(
                "{} cannot move from {:?} to {:?}",
                self.id, from, stage
            )));
        }
        self.stage = stage;
        self.position = position;
        self.history.push((stage, now));
        Ok(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_are_recorded() {
        let mut unit = Unit::new(UnitId::new(1), 10.0);
        unit.transition(Stage::Queued, Position::Gantry { level: 0 }, 10.0)
            .unwrap();
        unit.transition(Stage::Processing, Position::Cavity { slot: 3 }, 12.0)
            .unwrap();

        assert_eq!(unit.stage(), Stage::Processing);
        assert_eq!(unit.position(), Position::Cavity { slot: 3 });
        assert_eq!(
            unit.history(),
            &[
                (Stage::Building, 10.0),
                (Stage::Queued, 10.0),
                (Stage::Processing, 12.0)
            ]
        );
    }

    #[test]
    fn test_skips_and_repeats_are_rejected() {
        let mut unit = Unit::new(UnitId::new(1), 0.0);
        assert!(unit
            .transition(Stage::Processing, Position::Cavity { slot: 0 }, 1.0)
            .is_err());
        assert!(unit
            .transition(Stage::Building, Position::Machine, 1.0)
            .is_err());
        assert_eq!(unit.stage(), Stage::Building);
        assert_eq!(unit.history().len(), 1);
    }
}
