//! Strongly typed identifier wrappers.
//!
//! Identifiers are opaque `u64` keys assigned by whatever loaded the network
//! (they are not dense indices), so the wrappers only provide what hash-map
//! keys need: `Copy + Eq + Ord + Hash` plus `Display` for error messages.

use std::fmt;

/// Generate a typed ID wrapper around a `u64` key.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identifier of a road-network node.
    pub struct NodeId;
}

typed_id! {
    /// Identifier of a directed road arc.
    pub struct ArcId;
}

typed_id! {
    /// Identifier of a named route (one or two complementary arcs).
    pub struct RouteId;
}

typed_id! {
    /// Identifier of a point of interest.
    pub struct PoiId;
}
