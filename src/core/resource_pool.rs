use super::errors::SimError;
use super::types::UnitId;
use std::collections::{HashMap, VecDeque};

/// Outcome of an acquire request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// A slot was free and now belongs to the requester
    Granted { slot: usize },
    /// Pool saturated; the requester waits at this 0-based position
    Waiting { position: usize },
}

/// A slot handed to a waiter as part of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub unit: UnitId,
    pub slot: usize,
}

/// Fixed-capacity pool of interchangeable curing cavities with FIFO waiting
///
/// Free slots live in an explicit free list so acquire and release are O(1).
#[derive(Debug, Clone)]
pub struct ResourcePool {
    capacity: usize,
    free_slots: Vec<usize>,
    holders: HashMap<UnitId, usize>,
    wait_list: VecDeque<UnitId>,
}

impl ResourcePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            // Reversed so that pop() hands out the lowest index first
            free_slots: (0..capacity).rev().collect(),
            holders: HashMap::with_capacity(capacity),
            wait_list: VecDeque::new(),
        }
    }

    /// Request a slot for `unit`, granting immediately when one is free
    pub fn acquire(&mut self, unit: UnitId) -> Result<Acquisition, SimError> {
        if self.holders.contains_key(&unit) {
            return Err(SimError::PreconditionViolation(format!(
                "{} already holds a slot",
                unit
            )));
        }
        if self.wait_list.contains(&unit) {
            return Err(SimError::PreconditionViolation(format!(
                "{} is already waiting for a slot",
                unit
            )));
        }

        match self.free_slots.pop() {
            Some(slot) => {
                self.holders.insert(unit, slot);
                Ok(Acquisition::Granted { slot })
            }
            None => {
                self.wait_list.push_back(unit);
                Ok(Acquisition::Waiting {
                    position: self.wait_list.len() - 1,
                })
            }
        }
    }

    /// Give back the slot held by `unit`
    ///
    /// When someone is waiting, the freed slot goes straight to the head of
    /// the wait list and the grant is returned. Releasing without holding a
    /// slot is a precondition violation.
    pub fn release(&mut self, unit: UnitId) -> Result<Option<Grant>, SimError> {
        let slot = self.holders.remove(&unit).ok_or_else(|| {
            SimError::PreconditionViolation(format!("{} released a slot it does not hold", unit))
        })?;

        match self.wait_list.pop_front() {
            Some(next) => {
                self.holders.insert(next, slot);
                Ok(Some(Grant { unit: next, slot }))
            }
            None => {
                self.free_slots.push(slot);
                Ok(None)
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held
    pub fn occupancy(&self) -> usize {
        self.holders.len()
    }

    pub fn waiting(&self) -> usize {
        self.wait_list.len()
    }

    /// Waiting units, head first
    pub fn wait_list(&self) -> impl Iterator<Item = &UnitId> {
        self.wait_list.iter()
    }

    /// Slot held by `unit`, if any
    pub fn slot_of(&self, unit: UnitId) -> Option<usize> {
        self.holders.get(&unit).copied()
    }

    /// Occupancy as a percentage of capacity
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupancy() as f64 / self.capacity as f64 * 100.0
    }
}
