//! Batch driver and typed entry points: the `encode`/`decode` surface named
//! in §6, standing in for the analytic database host's vectorized call path.
//!
//! The host itself (columnar vectors, scalar-function registration, SQL name
//! binding) is out of scope (§1); what's implemented here is the part of the
//! batch contract that belongs to the core: null handling, per-row lane
//! promotion, and writing results, operating on plain tuple-major slices
//! instead of the host's vector type.

use smallvec::SmallVec;

use crate::bits::{demote_from_unsigned, promote_to_unsigned, ElementRepr};
use crate::descriptor::{CodecKind, Descriptor};
use crate::error::{Error, Result};
use crate::lane::Lane;
use crate::{hilbert, morton};

/// Prepare one tuple's lanes for the inner codec.
///
/// Per this crate's resolution of the float-promotion open question (see
/// DESIGN.md), only [`ElementRepr::Sint`] lanes are actually promoted
/// (top-bit flip); [`ElementRepr::Uint`] and [`ElementRepr::Float`] lanes
/// pass through as their native bit pattern. `promote_to_unsigned` is still
/// the general-purpose primitive specified in §4.1 and is exercised in full
/// (including its `Float` branch) by `bits::tests`.
fn promote_lane(bits: u128, width: u32, repr: ElementRepr) -> u128 {
    match repr {
        ElementRepr::Sint => promote_to_unsigned(bits, width, repr),
        ElementRepr::Uint | ElementRepr::Float => bits,
    }
}

fn demote_lane(bits: u128, width: u32, repr: ElementRepr) -> u128 {
    match repr {
        ElementRepr::Sint => demote_from_unsigned(bits, width, repr),
        ElementRepr::Uint | ElementRepr::Float => bits,
    }
}

fn code_of(descriptor: &Descriptor, lanes: &[u128]) -> u128 {
    match descriptor.kind {
        CodecKind::Hilbert => hilbert::encode(descriptor.lane_count, descriptor.lane_width, lanes),
        CodecKind::Morton => morton::encode(lanes, descriptor.lane_width),
    }
}

fn lanes_of(descriptor: &Descriptor, code: u128) -> SmallVec<[u128; 16]> {
    match descriptor.kind {
        CodecKind::Hilbert => hilbert::decode(descriptor.lane_count, descriptor.lane_width, code),
        CodecKind::Morton => morton::decode(code, descriptor.lane_width, descriptor.lane_count),
    }
}

/// Encode a vectorized batch of tuples.
///
/// `tuples` and `lane_nulls` are tuple-major: both have length
/// `row_nulls.len() * descriptor.lane_count`. A `true` entry in `row_nulls`
/// marks that row's entire array as SQL `NULL`; the corresponding `out` slot
/// keeps its default and `out_nulls` is set, and `lane_nulls` for that row is
/// ignored. For a row whose array itself is not null, any `true` entry in
/// its `lane_nulls` slice is the `InputError` from §4.5 ("array cannot
/// contain null values"): per this crate's row-local batch error policy
/// (DESIGN.md — a whole-batch abort would make one bad row in a large vector
/// undebuggable and serves no caller in this crate's scope), that row is
/// skipped and its error recorded, but the rest of the batch still executes.
pub fn encode_batch<T: Lane>(
    descriptor: &Descriptor,
    tuples: &[T],
    lane_nulls: &[bool],
    row_nulls: &[bool],
    out: &mut [u128],
    out_nulls: &mut [bool],
) -> Vec<(usize, Error)> {
    let n = descriptor.lane_count as usize;
    debug_assert_eq!(tuples.len(), row_nulls.len() * n);
    debug_assert_eq!(lane_nulls.len(), tuples.len());
    debug_assert_eq!(out.len(), row_nulls.len());
    debug_assert_eq!(out_nulls.len(), row_nulls.len());

    let mut errors = Vec::new();
    for row in 0..row_nulls.len() {
        if row_nulls[row] {
            out_nulls[row] = true;
            continue;
        }
        if lane_nulls[row * n..row * n + n].iter().any(|&null| null) {
            errors.push((row, Error::Input { row }));
            continue;
        }
        let row_tuple = &tuples[row * n..row * n + n];
        let lanes: SmallVec<[u128; 16]> = row_tuple
            .iter()
            .map(|&v| promote_lane(v.to_wire(), descriptor.lane_width, descriptor.element_repr))
            .collect();
        out[row] = code_of(descriptor, &lanes);
        out_nulls[row] = false;
    }
    errors
}

/// Decode a vectorized batch of code words. Mirrors [`encode_batch`]'s null
/// and error-reporting conventions; code words have no inner lane structure,
/// so there is no per-lane null mask on this side, only `row_nulls`.
pub fn decode_batch<T: Lane>(
    descriptor: &Descriptor,
    codes: &[u128],
    row_nulls: &[bool],
    out: &mut [T],
    out_nulls: &mut [bool],
) -> Vec<(usize, Error)> {
    let n = descriptor.lane_count as usize;
    debug_assert_eq!(codes.len(), row_nulls.len());
    debug_assert_eq!(out.len(), row_nulls.len() * n);
    debug_assert_eq!(out_nulls.len(), row_nulls.len());

    let errors = Vec::new();
    for row in 0..row_nulls.len() {
        if row_nulls[row] {
            out_nulls[row] = true;
            continue;
        }
        let lanes = lanes_of(descriptor, codes[row]);
        for (slot, &lane) in out[row * n..row * n + n].iter_mut().zip(lanes.iter()) {
            let demoted = demote_lane(lane, descriptor.lane_width, descriptor.element_repr);
            *slot = T::from_wire(demoted);
        }
        out_nulls[row] = false;
    }
    errors
}

/// Encode a single tuple, binding a fresh [`Descriptor`] for the call. The
/// SQL-visible name for `kind = Hilbert` is `hilbert_encode`; for `kind =
/// Morton`, `morton_encode`.
pub fn encode_one<T: Lane>(kind: CodecKind, tuple: &[T]) -> Result<u128> {
    let descriptor = Descriptor::encode(kind, T::REPR, T::WIDTH, tuple.len() as u32)?;
    let lanes: SmallVec<[u128; 16]> = tuple
        .iter()
        .map(|&v| promote_lane(v.to_wire(), descriptor.lane_width, descriptor.element_repr))
        .collect();
    Ok(code_of(&descriptor, &lanes))
}

/// Decode a single code word, binding a fresh [`Descriptor`] for the call.
/// `T` determines `return_float`/`return_unsigned` the way the SQL surface's
/// explicit boolean arguments would.
///
/// The code-word width can't be read off `code` itself (a small value like
/// `22` has far fewer significant bits than the 32-bit code word it actually
/// came from) — it has to come from the same `(lane_width, lane_count) ->
/// code_width` table an encode bind uses, keyed by `T::WIDTH`, per the
/// invariant that decode input width equals encode output width for the
/// same `(N, W)` (§3).
pub fn decode_one<T: Lane>(kind: CodecKind, code: u128, lane_count: u32) -> Result<SmallVec<[T; 16]>> {
    let shape = Descriptor::encode(kind, T::REPR, T::WIDTH, lane_count)?;
    let return_float = matches!(T::REPR, ElementRepr::Float);
    let return_unsigned = matches!(T::REPR, ElementRepr::Uint);
    let descriptor =
        Descriptor::decode(kind, shape.code_width, lane_count, return_float, return_unsigned)?;
    let lanes = lanes_of(&descriptor, code);
    Ok(lanes
        .into_iter()
        .map(|l| T::from_wire(demote_lane(l, descriptor.lane_width, descriptor.element_repr)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::ElementRepr;

    #[test]
    fn encode_one_matches_scenario_fixture() {
        let code = encode_one(CodecKind::Hilbert, &[1u8, 2, 3]).unwrap();
        assert_eq!(code, 22);
        let code = encode_one(CodecKind::Morton, &[1u8, 2, 3]).unwrap();
        assert_eq!(code, 29);
    }

    #[test]
    fn decode_one_matches_scenario_fixture() {
        let back: SmallVec<[u8; 16]> = decode_one(CodecKind::Hilbert, 22, 3).unwrap();
        assert_eq!(back.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn encode_decode_round_trip_signed() {
        let tuple = [1i16, -2, 300];
        let code = encode_one(CodecKind::Morton, &tuple).unwrap();
        let back: SmallVec<[i16; 16]> = decode_one(CodecKind::Morton, code, 3).unwrap();
        assert_eq!(back.as_slice(), &tuple);
    }

    #[test]
    fn batch_null_row_is_skipped_and_other_rows_still_execute() {
        let descriptor = Descriptor::encode(CodecKind::Morton, ElementRepr::Uint, 8, 3).unwrap();
        let tuples = [1u8, 2, 3, /* null row */ 0, 0, 0, 4, 5, 6];
        let lane_nulls = [false; 9];
        let row_nulls = [false, true, false];
        let mut out = [0u128; 3];
        let mut out_nulls = [false; 3];
        let errors =
            encode_batch(&descriptor, &tuples, &lane_nulls, &row_nulls, &mut out, &mut out_nulls);
        assert!(errors.is_empty());
        assert_eq!(out[0], 29);
        assert!(out_nulls[1]);
        assert_eq!(out[2], morton::encode(&[4, 5, 6], 8));
    }

    #[test]
    fn batch_partial_null_tuple_is_row_local_input_error() {
        let descriptor = Descriptor::encode(CodecKind::Morton, ElementRepr::Uint, 8, 3).unwrap();
        let tuples = [1u8, 2, 3, 9, 9, 9, 4, 5, 6];
        // row 1's array is not itself null, but its middle lane is.
        let lane_nulls = [false, false, false, false, true, false, false, false, false];
        let row_nulls = [false, false, false];
        let mut out = [0u128; 3];
        let mut out_nulls = [false; 3];
        let errors =
            encode_batch(&descriptor, &tuples, &lane_nulls, &row_nulls, &mut out, &mut out_nulls);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);
        assert_eq!(out[0], 29, "row 0 still executes despite row 1's error");
        assert_eq!(out[2], morton::encode(&[4, 5, 6], 8), "row 2 still executes");
    }
}
