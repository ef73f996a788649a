//! Resource inventory.
//!
//! Per-location unit counts by resource type (fire trucks, ambulances,
//! police cars, ...). The allocator takes one unit at a time and a count
//! never drops below zero.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, Result};
use crate::graph::WeightedGraph;

/// Fire engine.
pub const FIRE_TRUCK: &str = "Fire Truck";
/// Ambulance.
pub const AMBULANCE: &str = "Ambulance";
/// Police patrol car.
pub const POLICE_CAR: &str = "Police Car";

/// The three standard unit types.
pub const STANDARD_UNITS: [&str; 3] = [FIRE_TRUCK, AMBULANCE, POLICE_CAR];

/// Units stationed at each location, by resource type.
///
/// # Example
///
/// ```
/// use u_dispatch::models::{ResourceInventory, AMBULANCE, FIRE_TRUCK};
///
/// let mut inv = ResourceInventory::new()
///     .with_units("HQ", FIRE_TRUCK, 2)
///     .with_units("A", AMBULANCE, 1);
///
/// inv.take("HQ", FIRE_TRUCK).unwrap();
/// assert_eq!(inv.available("HQ", FIRE_TRUCK), 1);
/// assert!(inv.take("B", AMBULANCE).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInventory {
    stock: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ResourceInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stations `count` units of `resource_type` at `location`.
    pub fn with_units(
        mut self,
        location: impl Into<String>,
        resource_type: impl Into<String>,
        count: u32,
    ) -> Self {
        self.set(location, resource_type, count);
        self
    }

    /// Random fleet: every location gets `0..=max_per_type` units of each
    /// type. The same seed always yields the same fleet.
    pub fn seeded(graph: &WeightedGraph, resource_types: &[&str], max_per_type: u32, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut inventory = Self::new();
        for location in graph.all_vertices() {
            for &resource_type in resource_types {
                let count = rng.random_range(0..=max_per_type);
                inventory.set(location.clone(), resource_type, count);
            }
        }
        inventory
    }

    /// Overwrites the count for one slot.
    pub fn set(&mut self, location: impl Into<String>, resource_type: impl Into<String>, count: u32) {
        self.stock
            .entry(location.into())
            .or_default()
            .insert(resource_type.into(), count);
    }

    /// Units of `resource_type` at `location` (0 if none recorded).
    pub fn available(&self, location: &str, resource_type: &str) -> u32 {
        self.stock
            .get(location)
            .and_then(|slots| slots.get(resource_type))
            .copied()
            .unwrap_or(0)
    }

    /// Whether at least one unit is stationed there.
    pub fn has_available(&self, location: &str, resource_type: &str) -> bool {
        self.available(location, resource_type) > 0
    }

    /// Removes one unit. Fails without changing anything if the slot is empty.
    pub fn take(&mut self, location: &str, resource_type: &str) -> Result<()> {
        match self
            .stock
            .get_mut(location)
            .and_then(|slots| slots.get_mut(resource_type))
        {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(DispatchError::Unavailable {
                location: location.to_string(),
                resource_type: resource_type.to_string(),
            }),
        }
    }

    /// Units of `resource_type` across all locations.
    pub fn total(&self, resource_type: &str) -> u32 {
        self.stock
            .values()
            .filter_map(|slots| slots.get(resource_type))
            .sum()
    }

    /// Locations with at least one recorded slot.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.stock.keys().map(String::as_str)
    }

    /// Every resource type mentioned anywhere.
    pub fn resource_types(&self) -> BTreeSet<&str> {
        self.stock
            .values()
            .flat_map(|slots| slots.keys().map(String::as_str))
            .collect()
    }
}
