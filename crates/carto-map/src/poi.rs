//! Points of interest anchored to arcs.

use std::collections::BTreeSet;

use carto_core::{ArcId, Coordinates, Latitude, Longitude, PoiId, Position, Zone};
use carto_index::{Identified, Localized};

/// Concrete kind of a point of interest, carrying only the fields that kind
/// needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoiKind {
    /// A car park with live occupancy.
    Parking {
        name: String,
        capacity: u16,
        free_spaces: u16,
    },
    /// A fuel station run by the named operator.
    FuelStation { operator: String },
}

/// A point of interest: always located *on* an arc, at a relative offset of
/// that arc's length, possibly serving several associated arcs.
///
/// The coordinate is resolved from the host arc when the poi is registered.
/// Occupancy is the only state that changes after load, and only through
/// the update methods below.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poi {
    id: PoiId,
    arc: ArcId,
    /// Relative offset in [0, 1] along the host arc.
    offset: f64,
    position: Coordinates,
    associated: BTreeSet<ArcId>,
    kind: PoiKind,
}

impl Poi {
    pub(crate) fn new(
        id: PoiId,
        arc: ArcId,
        offset: f64,
        position: Coordinates,
        associated: BTreeSet<ArcId>,
        kind: PoiKind,
    ) -> Self {
        Self { id, arc, offset, position, associated, kind }
    }

    pub fn arc(&self) -> ArcId {
        self.arc
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    pub fn associated_arcs(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.associated.iter().copied()
    }

    pub fn kind(&self) -> &PoiKind {
        &self.kind
    }

    // ── Occupancy (parking only) ──────────────────────────────────────────

    /// `Some(true)` if a parking has no free space; `None` for kinds
    /// without occupancy.
    pub fn is_full(&self) -> Option<bool> {
        match &self.kind {
            PoiKind::Parking { free_spaces, .. } => Some(*free_spaces == 0),
            PoiKind::FuelStation { .. } => None,
        }
    }

    /// Overwrite the live free-space count, clamped to the capacity.
    /// No-op for kinds without occupancy.
    pub fn set_free_spaces(&mut self, free: u16) {
        if let PoiKind::Parking { capacity, free_spaces, .. } = &mut self.kind {
            *free_spaces = free.min(*capacity);
        }
    }

    /// A vehicle entered: one fewer free space (saturating at 0).
    pub fn record_vehicle_entry(&mut self) {
        if let PoiKind::Parking { free_spaces, .. } = &mut self.kind {
            *free_spaces = free_spaces.saturating_sub(1);
        }
    }

    /// A vehicle left: one more free space (clamped to the capacity).
    pub fn record_vehicle_exit(&mut self) {
        if let PoiKind::Parking { capacity, free_spaces, .. } = &mut self.kind {
            *free_spaces = (*free_spaces + 1).min(*capacity);
        }
    }
}

impl Position for Poi {
    fn latitude(&self) -> Latitude {
        self.position.latitude
    }

    fn longitude(&self) -> Longitude {
        self.position.longitude
    }
}

impl Identified for Poi {
    type Id = PoiId;

    fn id(&self) -> PoiId {
        self.id
    }
}

impl Localized for Poi {
    fn bounding_zone(&self) -> Zone {
        Zone::of_point(self.position)
    }
}
