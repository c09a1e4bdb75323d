//! Error types for the `beyond-world` crate.
//!
//! Reference data is validated once when it is assembled; every failure is
//! reported as a [`WorldError`].

use beyond_types::{ItemId, RegionId};

/// Errors raised while assembling or validating static reference data.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The same region id was defined twice.
    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    /// A region connects to a region that is not in the graph.
    #[error("region {region} connects to unknown region {target}")]
    UnknownConnection {
        /// The region declaring the connection.
        region: RegionId,
        /// The missing target.
        target: RegionId,
    },

    /// A region lists an obtainable item that is not in the catalog.
    #[error("region {region} lists unknown item {item}")]
    UnknownItem {
        /// The region listing the item.
        region: RegionId,
        /// The missing item.
        item: ItemId,
    },

    /// A required region (such as the starting gate) is absent.
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),

    /// A region's danger level or richness lies outside 1--10.
    #[error("region {region} has out-of-range {field}: {value}")]
    OutOfRange {
        /// The offending region.
        region: RegionId,
        /// Which attribute is out of range.
        field: &'static str,
        /// The offending value.
        value: u8,
    },
}
