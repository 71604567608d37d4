//! Entity container composing the identifier index and the spatial grid.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use carto_core::{Coordinates, Position, Zone};

use crate::grid::SpatialGrid;

/// Initial radius and per-round increment of the growing-radius search, in
/// metres.
const RADIUS_STEP_M: f64 = 1_000.0;

/// Capability of carrying a unique identifier.
pub trait Identified {
    type Id: Copy + Eq + Ord + Hash;

    fn id(&self) -> Self::Id;
}

/// Capability of occupying a region of the latitude/longitude plane.
pub trait Localized {
    /// The smallest zone containing this entity.
    fn bounding_zone(&self) -> Zone;
}

/// Container for entities that are both identified and localized.
///
/// Entities are indexed twice: by identifier for O(1) lookup and by grid
/// cell for bounded-region queries.  The container is append-only; entities
/// live as long as the network itself.  Each identifier must be registered
/// at most once.
#[derive(Debug)]
pub struct EntityStore<T: Identified + Localized> {
    by_id: FxHashMap<T::Id, T>,
    grid: SpatialGrid<T::Id>,
}

impl<T: Identified + Localized> EntityStore<T> {
    /// Empty store whose grid cells are `cell_size_m` metres on a side at
    /// the equator.
    pub fn with_cell_size(cell_size_m: f64) -> Self {
        Self {
            by_id: FxHashMap::default(),
            grid: SpatialGrid::with_cell_size(cell_size_m),
        }
    }

    /// Register an entity under its own identifier and in every grid cell
    /// its bounding zone overlaps.
    pub fn insert(&mut self, entity: T) {
        let id = entity.id();
        debug_assert!(!self.by_id.contains_key(&id), "duplicate identifier");
        self.grid.insert(id, &entity.bounding_zone());
        self.by_id.insert(id, entity);
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.by_id.get(&id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.by_id.get_mut(&id)
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Entities whose bounding zone overlaps a grid cell overlapped by
    /// `zone` — a superset of those actually inside `zone`.
    pub fn in_zone(&self, zone: &Zone) -> Vec<&T> {
        self.grid
            .query(zone)
            .into_iter()
            .filter_map(|id| self.by_id.get(&id))
            .collect()
    }

    /// Entities near the disk of `radius_m` metres around `center`
    /// (superset: the disk degrades to its bounding-box zone).
    pub fn within(&self, center: Coordinates, radius_m: f64) -> Vec<&T> {
        self.in_zone(&Zone::around(&center, radius_m))
    }

    /// The entity minimizing `distance` from `center`, found by growing a
    /// search disk in `RADIUS_STEP_M` increments.
    ///
    /// The search stops the first round where the best candidate's exact
    /// distance is within the current radius: since the grid returns a
    /// superset of everything inside the disk, no closer entity can remain
    /// outside it.  Returns `None` on an empty store (a fixed-increment
    /// search over nothing would otherwise never terminate).
    pub fn nearest_where<F>(&self, center: Coordinates, mut distance: F) -> Option<(&T, f64)>
    where
        F: FnMut(&T) -> f64,
    {
        if self.is_empty() {
            return None;
        }

        let mut best: Option<(&T, f64)> = None;
        let mut radius = RADIUS_STEP_M;
        loop {
            for entity in self.within(center, radius) {
                let d = distance(entity);
                if best.map_or(true, |(_, bd)| d < bd) {
                    best = Some((entity, d));
                }
            }
            if let Some((_, bd)) = best {
                if bd <= radius {
                    return best;
                }
            }
            radius += RADIUS_STEP_M;
        }
    }
}
