//! Typed tuple elements: the bridge between Rust's numeric types and the
//! codecs' untyped `u128` lane representation.
//!
//! The analytic database host (out of scope, §1/§6) would supply this
//! mapping from its own logical types; this crate still needs *some* typed
//! entry point to be usable directly, so [`Lane`] plays that role, the way
//! the teacher's `Point` wraps a `SmallVec<[u32; 8]>` with typed
//! construction helpers (`point.rs`).

use crate::bits::ElementRepr;

/// A tuple element the codecs can carry: one of the signed/unsigned integer
/// widths or IEEE-754 float widths named in §3 of the data model.
///
/// `to_wire` / `from_wire` convert to and from the raw `u128` lane carried
/// through the Morton and Hilbert codecs. Per this crate's resolution of the
/// float-promotion question (see DESIGN.md), only [`ElementRepr::Sint`] is
/// transformed on the way in and out (top-bit flip); [`ElementRepr::Uint`]
/// and [`ElementRepr::Float`] lanes are carried as their native bit pattern
/// unchanged.
pub trait Lane: Copy {
    /// Bit width of this type; one of 8, 16, 32, 64.
    const WIDTH: u32;
    /// Representation tag used to select the encode-bind table row and the
    /// (De)promotion behavior in the batch driver.
    const REPR: ElementRepr;

    /// Convert to the raw `width`-bit pattern, as a `u128`.
    fn to_wire(self) -> u128;
    /// Convert back from a `width`-bit pattern. `bits` is pre-masked to
    /// `Self::WIDTH` bits by the caller.
    fn from_wire(bits: u128) -> Self;
}

macro_rules! impl_lane_uint {
    ($t:ty, $width:expr) => {
        impl Lane for $t {
            const WIDTH: u32 = $width;
            const REPR: ElementRepr = ElementRepr::Uint;

            #[inline]
            fn to_wire(self) -> u128 {
                self as u128
            }

            #[inline]
            fn from_wire(bits: u128) -> Self {
                bits as $t
            }
        }
    };
}

macro_rules! impl_lane_sint {
    ($t:ty, $u:ty, $width:expr) => {
        impl Lane for $t {
            const WIDTH: u32 = $width;
            const REPR: ElementRepr = ElementRepr::Sint;

            #[inline]
            fn to_wire(self) -> u128 {
                (self as $u) as u128
            }

            #[inline]
            fn from_wire(bits: u128) -> Self {
                bits as $u as $t
            }
        }
    };
}

macro_rules! impl_lane_float {
    ($t:ty, $u:ty, $width:expr) => {
        impl Lane for $t {
            const WIDTH: u32 = $width;
            const REPR: ElementRepr = ElementRepr::Float;

            #[inline]
            fn to_wire(self) -> u128 {
                self.to_bits() as u128
            }

            #[inline]
            fn from_wire(bits: u128) -> Self {
                <$t>::from_bits(bits as $u)
            }
        }
    };
}

impl_lane_uint!(u8, 8);
impl_lane_uint!(u16, 16);
impl_lane_uint!(u32, 32);
impl_lane_uint!(u64, 64);
impl_lane_sint!(i8, u8, 8);
impl_lane_sint!(i16, u16, 16);
impl_lane_sint!(i32, u32, 32);
impl_lane_sint!(i64, u64, 64);
impl_lane_float!(f32, u32, 32);
impl_lane_float!(f64, u64, 64);
