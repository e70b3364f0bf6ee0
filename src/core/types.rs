use serde::{Deserialize, Serialize};

/// Virtual simulation time in seconds
pub type SimTime = f64;

/// Monotonic identifier of a tire, displayed as `T<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub(crate) u64);

impl UnitId {
    /// Create a unit identifier from its sequence number
    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Get the raw sequence number
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Lifecycle stage of a tire on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    /// Being built on the tire building machine
    Building,
    /// Waiting in the gantry for a free curing cavity
    Queued,
    /// Curing inside a cavity
    Processing,
    /// Inspection in the finishing area
    Finishing,
    /// Retired from the line
    Done,
}

impl Stage {
    /// The stage that must follow this one, `None` for `Done`
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Building => Some(Stage::Queued),
            Stage::Queued => Some(Stage::Processing),
            Stage::Processing => Some(Stage::Finishing),
            Stage::Finishing => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    /// Whether the tire has left the cavity
    pub fn is_cured(self) -> bool {
        matches!(self, Stage::Finishing | Stage::Done)
    }

    pub fn color(self) -> TireColor {
        if self.is_cured() {
            TireColor::Black
        } else {
            TireColor::Green
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Building => "Building",
            Stage::Queued => "In Gantry",
            Stage::Processing => "Curing",
            Stage::Finishing => "Finished",
            Stage::Done => "Done",
        };
        write!(f, "{}", name)
    }
}

/// Green tires are uncured, black tires have come out of a cavity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TireColor {
    Green,
    Black,
}

/// Display position hint attached to a tire's current stage
///
/// Positions are logical. `FloorLayout` turns them into map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Position {
    /// On the building machine
    Machine,
    /// Stacked in the gantry at the given level
    Gantry { level: usize },
    /// Inside the cavity with the given pool slot index
    Cavity { slot: usize },
    /// In the finishing area
    Finishing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_strictly_forward() {
        let mut stage = Stage::Building;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            assert!(next > stage);
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                Stage::Building,
                Stage::Queued,
                Stage::Processing,
                Stage::Finishing,
                Stage::Done
            ]
        );
    }

    #[test]
    fn test_color_turns_black_after_curing() {
        assert_eq!(Stage::Queued.color(), TireColor::Green);
        assert_eq!(Stage::Processing.color(), TireColor::Green);
        assert_eq!(Stage::Finishing.color(), TireColor::Black);
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId::new(7).to_string(), "T7");
    }
}
