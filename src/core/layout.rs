//! Floor map of the plant for renderers.
//!
//! Turns the logical position hints carried by snapshots into 2D map
//! coordinates: the building machine on the left, the gantry stack next to
//! it, a grid of curing cavities in the middle and the finishing area on the
//! right.

use super::snapshot::LineSnapshot;
use super::types::{Position, TireColor};
use serde::{Deserialize, Serialize};

pub type Point = (f64, f64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorLayout {
    pub machine: Point,
    pub gantry: Point,
    /// Vertical offset between two stacked tires in the gantry
    pub gantry_stack_step: f64,
    /// Position of cavity 0
    pub cavity_origin: Point,
    pub cavity_columns: usize,
    pub column_pitch: f64,
    pub row_pitch: f64,
    pub finishing: Point,
}

/// Text annotation for one plant area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLabel {
    pub text: String,
    pub at: Point,
}

/// One tire as drawn on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub label: String,
    pub at: Point,
    pub color: TireColor,
    pub status: String,
}

impl Default for FloorLayout {
    fn default() -> Self {
        Self {
            machine: (0.0, 5.0),
            gantry: (2.0, 5.0),
            gantry_stack_step: 0.2,
            cavity_origin: (5.0, 3.0),
            cavity_columns: 8,
            column_pitch: 1.0,
            row_pitch: 2.0,
            finishing: (15.0, 5.0),
        }
    }
}

impl FloorLayout {
    /// Map coordinates of a position hint
    pub fn coordinates(&self, position: &Position) -> Point {
        match *position {
            Position::Machine => self.machine,
            Position::Gantry { level } => (
                self.gantry.0,
                self.gantry.1 + level as f64 * self.gantry_stack_step,
            ),
            Position::Cavity { slot } => self.cavity_coordinates(slot),
            Position::Finishing => self.finishing,
        }
    }

    /// Cavities fill the grid row by row
    pub fn cavity_coordinates(&self, slot: usize) -> Point {
        let columns = self.cavity_columns.max(1);
        let row = slot / columns;
        let column = slot % columns;
        (
            self.cavity_origin.0 + column as f64 * self.column_pitch,
            self.cavity_origin.1 + row as f64 * self.row_pitch,
        )
    }

    /// Rows needed to draw `capacity` cavities
    pub fn cavity_rows(&self, capacity: usize) -> usize {
        let columns = self.cavity_columns.max(1);
        (capacity + columns - 1) / columns
    }

    /// Area annotations for a plant with `capacity` cavities
    pub fn area_labels(&self, capacity: usize) -> Vec<AreaLabel> {
        let rows = self.cavity_rows(capacity).max(1);
        let columns = self.cavity_columns.min(capacity.max(1));
        let grid_center =
            self.cavity_origin.0 + columns.saturating_sub(1) as f64 * self.column_pitch / 2.0;
        let grid_top = self.cavity_origin.1 + (rows - 1) as f64 * self.row_pitch + 1.0;

        vec![
            AreaLabel {
                text: "Building Machine".to_string(),
                at: (self.machine.0, self.machine.1 + 1.0),
            },
            AreaLabel {
                text: "Gantry".to_string(),
                at: (self.gantry.0, self.gantry.1 + 3.0),
            },
            AreaLabel {
                text: format!("Curing Cavities (n={})", capacity),
                at: (grid_center, grid_top),
            },
            AreaLabel {
                text: "Finishing Area".to_string(),
                at: (self.finishing.0, self.finishing.1 + 1.0),
            },
        ]
    }

    /// Markers for every active tire in a snapshot
    pub fn place(&self, snapshot: &LineSnapshot) -> Vec<MapMarker> {
        snapshot
            .units
            .iter()
            .map(|unit| MapMarker {
                label: unit.id.to_string(),
                at: self.coordinates(&unit.position),
                color: unit.color,
                status: unit.stage.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_matches_plant() {
        let layout = FloorLayout::default();
        assert_eq!(layout.cavity_coordinates(0), (5.0, 3.0));
        assert_eq!(layout.cavity_coordinates(7), (12.0, 3.0));
        assert_eq!(layout.cavity_coordinates(8), (5.0, 5.0));
        assert_eq!(layout.cavity_coordinates(23), (12.0, 7.0));
        assert_eq!(layout.cavity_rows(24), 3);
    }

    #[test]
    fn test_gantry_stacks_upwards() {
        let layout = FloorLayout::default();
        let (x, y) = layout.coordinates(&Position::Gantry { level: 3 });
        assert_eq!(x, 2.0);
        assert!((y - 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_area_labels() {
        let labels = FloorLayout::default().area_labels(24);
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[2].text, "Curing Cavities (n=24)");
        assert_eq!(labels[2].at, (8.5, 8.0));
        assert_eq!(labels[3].at, (15.0, 6.0));
    }
}
