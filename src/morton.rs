//! Morton (Z-order) codec: interleave/deinterleave of N equal-width lanes.
//!
//! Generalizes the teacher's `ops::interleave_lsb`/`deinterleave_lsb` (fixed
//! at `u32`, 4 lanes) to `u128` lanes and code words with up to 16 lanes, to
//! cover the full `N·W ≤ 128` domain this crate supports.
//!
//! Bit `(i * N + j)` of the code word equals bit `i` of lane `N-1-j` (the
//! *last* tuple element occupies the lowest-order bit of every group, the
//! first tuple element the highest). This is the reverse of the "lane 0 is
//! lowest-order" reading of the positional description, but it is what the
//! worked fixtures (the `[1,2,3]`-as-`u8[3]` scenario and the 5×5 grid) pin
//! down unambiguously — see DESIGN.md.

use smallvec::{SmallVec, smallvec};

/// Interleave the low `lane_width` bits of each lane into a single code
/// word. The last lane contributes the lowest-order bit of every group.
pub fn encode(lanes: &[u128], lane_width: u32) -> u128 {
    let dimension = lanes.len() as u32;
    if dimension == 0 || lane_width == 0 {
        return 0;
    }
    let mut code = 0u128;
    for bit in 0..lane_width {
        for (dim, &lane) in lanes.iter().enumerate() {
            if (lane >> bit) & 1 != 0 {
                let pos = dimension - 1 - dim as u32;
                code |= 1u128 << (bit * dimension + pos);
            }
        }
    }
    code
}

/// Deinterleave a Morton code word into `lane_count` lanes of `lane_width`
/// bits each. Inverse of [`encode`].
pub fn decode(code: u128, lane_width: u32, lane_count: u32) -> SmallVec<[u128; 16]> {
    if lane_count == 0 {
        return smallvec![];
    }
    let mut lanes = smallvec![0u128; lane_count as usize];
    if lane_width == 0 {
        return lanes;
    }
    for bit in 0..lane_width {
        for dim in 0..lane_count {
            let pos = lane_count - 1 - dim;
            let bit_index = bit * lane_count + pos;
            if (code >> bit_index) & 1 != 0 {
                lanes[dim as usize] |= 1u128 << bit;
            }
        }
    }
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_layout_matches_spec() {
        // bit (i*N + j) of Z equals bit i of L[N-1-j]
        let lanes = [0b0000_0101u128, 0b0000_0011u128, 0b0000_1001u128];
        let code = encode(&lanes, 8);
        let n = lanes.len() as u32;
        for i in 0..8u32 {
            for (j, &lane) in lanes.iter().enumerate() {
                let expected = (lane >> i) & 1;
                let pos = n - 1 - j as u32;
                let actual = (code >> (i * n + pos)) & 1;
                assert_eq!(actual, expected, "bit mismatch at i={i} j={j}");
            }
        }
    }

    #[test]
    fn grid_matches_spec() {
        // morton_encode([a,b] as i8[2]) grid, rows indexed by a, columns by b.
        let expected: [[u128; 5]; 5] = [
            [0, 1, 4, 5, 16],
            [2, 3, 6, 7, 18],
            [8, 9, 12, 13, 24],
            [10, 11, 14, 15, 26],
            [32, 33, 36, 37, 48],
        ];
        for a in 0..5u128 {
            for b in 0..5u128 {
                assert_eq!(encode(&[a, b], 8), expected[a as usize][b as usize], "(a,b)=({a},{b})");
            }
        }
    }

    #[test]
    fn roundtrip_small_exhaustive() {
        for dim in 1u32..=4 {
            for bits in 0u32..=4 {
                let max = 1u128 << bits;
                let combos = max.pow(dim);
                for idx in 0..combos {
                    let mut lanes = vec![0u128; dim as usize];
                    let mut v = idx;
                    for slot in (0..dim as usize).rev() {
                        lanes[slot] = v % max;
                        v /= max;
                    }
                    let code = encode(&lanes, bits);
                    let back = decode(code, bits, dim);
                    assert_eq!(back.as_slice(), lanes.as_slice());
                }
            }
        }
    }

    #[test]
    fn scenario_u8_triplet() {
        // hilbert_encode/morton_encode([1,2,3] as u8[3]) fixture from the spec.
        let lanes = [1u128, 2, 3];
        assert_eq!(encode(&lanes, 8), 29);
        assert_eq!(decode(29, 8, 3).as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn empty_tuple_is_zero() {
        assert_eq!(encode(&[], 8), 0);
        assert!(decode(0, 8, 0).is_empty());
    }

    #[test]
    fn sixteen_lanes_of_eight_bits_fits_128() {
        let lanes: Vec<u128> = (0..16u128).collect();
        let code = encode(&lanes, 8);
        let back = decode(code, 8, 16);
        assert_eq!(back.as_slice(), lanes.as_slice());
    }
}
