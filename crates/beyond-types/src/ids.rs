//! Type-safe identifier wrappers.
//!
//! Runtime entities (explorers, players, journal entries, inventory
//! instances, discovery records) use UUID v7 wrappers generated by
//! [`define_id!`]. Static reference data (regions, items, secrets,
//! specialties, personalities, keepsakes) is keyed by human-readable slugs
//! such as `"the_summit"`, wrapped by [`define_slug!`] so that a region id
//! can never be passed where an item id is expected.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Generates a newtype wrapper around a static-data slug.
macro_rules! define_slug {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from its slug.
            pub fn new(slug: impl Into<String>) -> Self {
                Self(slug.into())
            }

            /// Return the slug as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(slug: &str) -> Self {
                Self(slug.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(slug: String) -> Self {
                Self(slug)
            }
        }

        impl core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an explorer.
    ExplorerId
}

define_id! {
    /// Unique identifier for a player (the owner of explorers and items).
    UserId
}

define_id! {
    /// Unique identifier for a journal entry.
    JournalEntryId
}

define_id! {
    /// Unique identifier for an item instance in a player's inventory.
    PlayerItemId
}

define_id! {
    /// Unique identifier for a first-discoverer record.
    DiscoveryId
}

define_slug! {
    /// Slug of a region node in the world graph (e.g. `the_summit`).
    RegionId
}

define_slug! {
    /// Slug of an item definition in the catalog (e.g. `rope`).
    ItemId
}

define_slug! {
    /// Slug of a region-bound secret (e.g. `crystal_heart`).
    SecretId
}

define_slug! {
    /// Slug of a specialty definition (e.g. `scout`).
    SpecialtyId
}

define_slug! {
    /// Slug of a personality definition (e.g. `cautious`).
    PersonalityId
}

define_slug! {
    /// Slug of a keepsake definition (e.g. `letter`).
    KeepsakeId
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let explorer = ExplorerId::new();
        let user = UserId::new();
        assert_ne!(explorer.into_inner(), Uuid::nil());
        assert_ne!(user.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_display_matches_uuid() {
        let id = ExplorerId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }

    #[test]
    fn slug_serializes_as_plain_string() {
        let region = RegionId::new("the_summit");
        let json = serde_json::to_string(&region).ok();
        assert_eq!(json.as_deref(), Some("\"the_summit\""));
    }

    #[test]
    fn slug_keyed_maps_accept_str_lookups() {
        let mut danger = BTreeMap::new();
        danger.insert(RegionId::from("mistwood"), 3_u8);
        assert_eq!(danger.get("mistwood"), Some(&3));
        assert_eq!(danger.get("the_depths"), None);
    }
}
