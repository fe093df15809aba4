//! Reinterpretation of packed integer columns.
//!
//! The simulator prints every output register as an unsigned field. Signed
//! registers therefore need their sign bit restored before plotting:
//! `decoded = ((raw & mask) ^ sign) - sign`, with `sign = 1 << (width - 1)`.
//! For the 18-bit OCRA1 DAC words this is `(raw ^ 0x20000) - 0x20000`.
use ndarray::{Array2, ArrayView2};
use crate::trace::layout::ResolvedGroup;
fn mask(width: u32) -> i64 {
    (1i64 << width) - 1
}
/// Two's-complement sign extension of the low `width` bits of `raw`.
pub fn sign_extend(raw: i64, width: u32) -> i64 {
    let sign = 1i64 << (width - 1);
    ((raw & mask(width)) ^ sign) - sign
}
/// Low `width` bits of `raw`, read as unsigned.
pub fn zero_extend(raw: i64, width: u32) -> i64 {
    raw & mask(width)
}
/// Field encoding of one channel group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldFormat {
    pub width: u32,
    pub signed: bool,
}
impl FieldFormat {
    pub fn decode(self, raw: i64) -> i64 {
        if self.signed {
            sign_extend(raw, self.width)
        } else {
            zero_extend(raw, self.width)
        }
    }
}
/// Decoded columns of one group, ready for plotting.
#[derive(Clone, Debug)]
pub struct ChannelGroup {
    pub name: String,
    pub labels: Vec<String>,
    pub format: FieldFormat,
    pub values: Array2<i64>, // rows x channels
}
impl ChannelGroup {
    pub fn num_channels(&self) -> usize {
        self.values.ncols()
    }
    /// One channel as plot-ready floats.
    pub fn channel(&self, index: usize) -> Vec<f64> {
        self.values.column(index).iter().map(|&v| v as f64).collect()
    }
    pub fn min_max(&self) -> Option<(i64, i64)> {
        let min = self.values.iter().copied().min()?;
        let max = self.values.iter().copied().max()?;
        Some((min, max))
    }
}
/// Slice `group.columns` out of `data` and decode every field.
///
/// Fields are truncated toward zero before decoding, the way an integer
/// cast of a float column behaves.
pub fn decode_group(
    data: ArrayView2<'_, f64>,
    group: &ResolvedGroup,
    labels: Vec<String>,
) -> ChannelGroup {
    let format = FieldFormat {
        width: group.spec.width,
        signed: group.spec.signed,
    };
    let values = data
        .slice(ndarray::s![.., group.columns.clone()])
        .mapv(|field| format.decode(field as i64));
    ChannelGroup {
        name: group.spec.name.clone(),
        labels,
        format,
        values,
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::layout::TraceLayout;
    use ndarray::array;
    use proptest::prelude::*;
    const OCRA1: FieldFormat = FieldFormat {
        width: 18,
        signed: true,
    };
    fn encode_18(v: i64) -> i64 {
        v & 0x3FFFF
    }
    #[test]
    fn ocra1_sign_bit_is_bit_17() {
        assert_eq!(OCRA1.decode(0x20000), -0x20000);
        assert_eq!(OCRA1.decode(0x3FFFF), -1);
        assert_eq!(OCRA1.decode(0x1FFFF), 0x1FFFF);
        assert_eq!(OCRA1.decode(0), 0);
    }
    #[test]
    fn sixteen_bit_matches_int16_cast() {
        for raw in [0i64, 1, 0x7FFF, 0x8000, 0xFFFF, 0x1_2345, -5] {
            assert_eq!(sign_extend(raw, 16), raw as i16 as i64, "raw {raw:#x}");
        }
    }
    #[test]
    fn eight_bit_flags_match_uint8_cast() {
        for raw in [0i64, 1, 0xFF, 0x100, 0x1FE, -1] {
            assert_eq!(zero_extend(raw, 8), raw as u8 as i64, "raw {raw:#x}");
        }
    }
    #[test]
    fn group_slice_is_decoded() {
        let data = array![
            [0.0, 65535.0, 131072.0, 3.0],
            [1.0, 32767.0, 262143.0, 256.0],
        ];
        let spec = TraceLayout::ocra1().groups[2].clone();
        let group = ResolvedGroup {
            spec,
            columns: 2..3,
        };
        let decoded = decode_group(data.view(), &group, vec!["ocra1 x".into()]);
        assert_eq!(decoded.num_channels(), 1);
        assert_eq!(decoded.channel(0), vec![-131072.0, -1.0]);
        assert_eq!(decoded.min_max(), Some((-131072, -1)));
        assert_eq!(decoded.name, "ocra1");
    }
    #[test]
    fn fractional_fields_truncate_toward_zero() {
        let format = FieldFormat {
            width: 16,
            signed: true,
        };
        assert_eq!(format.decode(12.9f64 as i64), 12);
        assert_eq!(format.decode(-12.9f64 as i64), -12);
    }
    proptest! {
        #[test]
        fn ocra1_round_trips(v in -(1i64 << 17)..(1i64 << 17)) {
            prop_assert_eq!(OCRA1.decode(encode_18(v)), v);
        }
        #[test]
        fn ocra1_decode_stays_in_range(r in 0i64..(1i64 << 18)) {
            let decoded = OCRA1.decode(r);
            prop_assert_eq!(decoded, (r ^ (1 << 17)) - (1 << 17));
            prop_assert!((-(1i64 << 17)..(1i64 << 17)).contains(&decoded));
        }
    }
}
