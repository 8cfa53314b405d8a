//! Error types surfaced by descriptor binding and batch execution.

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while binding a descriptor or executing a batch call.
///
/// `Domain` surfaces at bind time and is user-visible (the caller should fix
/// the call, not retry it). `Input` surfaces at execute time when a row's
/// lanes violate the non-null contract. `Internal` indicates a codec
/// invariant was broken and should never actually occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested (kind, lane width, lane count, representation)
    /// combination is not admissible.
    #[error("{kind} codec has no admissible output width for {lane_count} lane(s) of width {lane_width} bits")]
    Domain {
        /// Codec kind named in the failing call (`"hilbert"` or `"morton"`).
        kind: &'static str,
        /// Lane width in bits that was requested.
        lane_width: u32,
        /// Lane count that was requested.
        lane_count: u32,
    },
    /// A float-decode was requested for a (width, lane count) combination
    /// outside the float-legal set.
    #[error(
        "float decode is not legal for {lane_count} lane(s) of width {lane_width} bits"
    )]
    DomainFloatDecode {
        /// Lane width in bits.
        lane_width: u32,
        /// Lane count.
        lane_count: u32,
    },
    /// `N·W` exceeds the 128-bit code word ceiling.
    #[error("tuple of {lane_count} lane(s) of width {lane_width} bits exceeds the 128-bit code word limit")]
    DomainTooWide {
        /// Lane width in bits.
        lane_width: u32,
        /// Lane count.
        lane_count: u32,
    },
    /// A tuple contained a null lane alongside non-null lanes.
    #[error("array cannot contain null values (row {row})")]
    Input {
        /// Index of the offending row within the batch.
        row: usize,
    },
    /// A codec invariant that should be unreachable was violated.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
