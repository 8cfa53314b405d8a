//! Dispatch and type algebra: bind a call shape to a validated [`Descriptor`]
//! before any lane is touched.
//!
//! Mirrors the teacher's pattern of validating a curve's shape ahead of
//! construction (`curve_from_name` → `registry::construct` →
//! `GridSpec::power_of_two`/`Hilbert::from_dimensions`): a `Descriptor` is
//! built once per call, from then on immutable, and the codecs never see an
//! unvalidated `(lane_width, lane_count)` pair.

use crate::bits::ElementRepr;
use crate::error::{Error, Result};

/// Which space-filling curve a [`Descriptor`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Hilbert,
    Morton,
}

impl CodecKind {
    fn name(self) -> &'static str {
        match self {
            CodecKind::Hilbert => "hilbert",
            CodecKind::Morton => "morton",
        }
    }
}

/// A bound, immutable description of one encode or decode call.
///
/// Reused across an entire batch: every row sees the same `lane_width`,
/// `lane_count`, `code_width` and `element_repr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub kind: CodecKind,
    pub lane_width: u32,
    pub lane_count: u32,
    pub code_width: u32,
    pub element_repr: ElementRepr,
}

/// Encode-bind table from §4.4: `(lane_width, lane_count) -> code_width`.
/// `None` means the combination has no admissible output width.
fn code_width_for(lane_width: u32, lane_count: u32) -> Option<u32> {
    if lane_count == 0 || lane_count > 16 {
        return None;
    }
    match lane_width {
        8 => Some(match lane_count {
            1 => 8,
            2 => 16,
            3..=4 => 32,
            5..=8 => 64,
            9..=16 => 128,
            _ => return None,
        }),
        16 => Some(match lane_count {
            1 => 16,
            2 => 32,
            3..=4 => 64,
            5..=8 => 128,
            _ => return None,
        }),
        32 => Some(match lane_count {
            1 => 32,
            2 => 64,
            3..=4 => 128,
            _ => return None,
        }),
        64 => Some(match lane_count {
            1 => 64,
            2 => 128,
            _ => return None,
        }),
        _ => None,
    }
}

/// The float-legal `(lane_width, lane_count)` pairs for decode bind.
const FLOAT_LEGAL: &[(u32, u32)] = &[(32, 1), (32, 2), (32, 3), (32, 4), (64, 1), (64, 2)];

impl Descriptor {
    /// Bind an encode call: validate `(lane_width, lane_count)` against the
    /// §4.4 table and derive the code-word width.
    pub fn encode(
        kind: CodecKind,
        element_repr: ElementRepr,
        lane_width: u32,
        lane_count: u32,
    ) -> Result<Descriptor> {
        if lane_width.saturating_mul(lane_count) > 128 {
            return Err(Error::DomainTooWide { lane_width, lane_count });
        }
        let code_width = code_width_for(lane_width, lane_count).ok_or(Error::Domain {
            kind: kind.name(),
            lane_width,
            lane_count,
        })?;
        Ok(Descriptor { kind, lane_width, lane_count, code_width, element_repr })
    }

    /// Bind a decode call: derive the lane width from the code-word width and
    /// lane count, then choose the element representation from
    /// `return_float`/`return_unsigned` per §4.4's decode-bind rules.
    pub fn decode(
        kind: CodecKind,
        code_width: u32,
        lane_count: u32,
        return_float: bool,
        return_unsigned: bool,
    ) -> Result<Descriptor> {
        if lane_count == 0 || lane_count > 16 {
            return Err(Error::Domain { kind: kind.name(), lane_width: 0, lane_count });
        }
        let lane_width = [8u32, 16, 32, 64]
            .into_iter()
            .find(|&w| code_width_for(w, lane_count) == Some(code_width))
            .ok_or(Error::Domain { kind: kind.name(), lane_width: 0, lane_count })?;

        if return_float {
            if !FLOAT_LEGAL.contains(&(lane_width, lane_count)) {
                return Err(Error::DomainFloatDecode { lane_width, lane_count });
            }
            Ok(Descriptor {
                kind,
                lane_width,
                lane_count,
                code_width,
                element_repr: ElementRepr::Float,
            })
        } else {
            let element_repr = if return_unsigned { ElementRepr::Uint } else { ElementRepr::Sint };
            Ok(Descriptor { kind, lane_width, lane_count, code_width, element_repr })
        }
    }
}
