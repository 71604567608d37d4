//! Fixed-resolution spatial grid over the latitude/longitude plane.
//!
//! # Data layout
//!
//! The plane is cut along meridians and parallels into a grid of
//! `div_lat × div_long` cells; each occupied cell maps to the identifiers of
//! the entities whose bounding zone overlaps it.  An entity spanning several
//! cells is recorded in **every** one of them, never split, so a zone query
//! is the union of the cells covering the query zone's index range — a
//! conservative superset of the exact answer.  Callers re-check exact
//! containment or distance when it matters.
//!
//! Cell lookup is O(1) through an `FxHashMap`, independent of how many
//! entities the grid holds overall.

use std::f64::consts::{FRAC_PI_2, PI};

use rustc_hash::{FxHashMap, FxHashSet};

use carto_core::{Latitude, Longitude, Zone, EARTH_RADIUS_M};

/// Spatial hash grid keyed by `(latitude index, longitude index)` cells.
#[derive(Debug)]
pub struct SpatialGrid<I> {
    /// Number of cells along a meridian.
    div_lat: i64,
    /// Number of cells along a parallel.
    div_long: i64,
    cells: FxHashMap<(i64, i64), Vec<I>>,
}

impl<I: Copy + Eq + std::hash::Hash> SpatialGrid<I> {
    /// Grid with an explicit resolution.
    pub fn new(div_lat: u32, div_long: u32) -> Self {
        Self {
            div_lat: i64::from(div_lat.max(1)),
            div_long: i64::from(div_long.max(1)),
            cells: FxHashMap::default(),
        }
    }

    /// Grid whose cells are roughly `cell_size_m` metres on a side at the
    /// equator.
    pub fn with_cell_size(cell_size_m: f64) -> Self {
        Self::new(
            (2.0 * PI * EARTH_RADIUS_M / cell_size_m) as u32,
            (PI * EARTH_RADIUS_M / cell_size_m) as u32,
        )
    }

    fn lat_index(&self, latitude: Latitude) -> i64 {
        (latitude.radians() * self.div_lat as f64 / FRAC_PI_2).floor() as i64
    }

    fn long_index(&self, longitude: Longitude) -> i64 {
        (longitude.radians() * self.div_long as f64 / PI).floor() as i64
    }

    /// Record `id` in every cell overlapped by `zone` (inclusive ranges).
    pub fn insert(&mut self, id: I, zone: &Zone) {
        for i in self.lat_index(zone.lat_min())..=self.lat_index(zone.lat_max()) {
            for j in self.long_index(zone.lon_min())..=self.long_index(zone.lon_max()) {
                self.cells.entry((i, j)).or_default().push(id);
            }
        }
    }

    /// All identifiers whose zone overlaps a cell overlapped by `zone`.
    ///
    /// Superset semantics: the result may contain entities outside `zone`
    /// that merely share a cell with it, and is deduplicated across cells.
    pub fn query(&self, zone: &Zone) -> FxHashSet<I> {
        let mut found = FxHashSet::default();
        for i in self.lat_index(zone.lat_min())..=self.lat_index(zone.lat_max()) {
            for j in self.long_index(zone.lon_min())..=self.long_index(zone.lon_max()) {
                if let Some(ids) = self.cells.get(&(i, j)) {
                    found.extend(ids.iter().copied());
                }
            }
        }
        found
    }

    /// Number of occupied cells (diagnostics only).
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
