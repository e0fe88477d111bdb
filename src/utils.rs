use crate::types::{FAN_OUT, Value};
use core::ops::Range;

pub(crate) trait RangeSubdivide {
    /// Splits the range into [`FAN_OUT`] consecutive parts of `len / FAN_OUT`
    /// elements each. Trailing elements that don't fill a whole part are
    /// dropped.
    fn subdivide(&self) -> [Range<u32>; FAN_OUT];

    /// Sum of the range's elements with 32-bit wraparound.
    fn wrapping_sum(&self) -> Value;
}

impl RangeSubdivide for Range<u32> {
    #[inline]
    fn subdivide(&self) -> [Range<u32>; FAN_OUT] {
        let len = self
            .end
            .checked_sub(self.start)
            .expect("RangeSubdivide::subdivide: [1]");
        let part = len / u32::try_from(FAN_OUT).expect("RangeSubdivide::subdivide: [2]");
        core::array::from_fn(|i| {
            let i = u32::try_from(i).expect("RangeSubdivide::subdivide: [3]");
            let start = self.start + i * part;
            start..start + part
        })
    }

    #[inline]
    fn wrapping_sum(&self) -> Value {
        self.clone()
            .fold(0, |acc: Value, i| acc.wrapping_add(i.cast_signed()))
    }
}
