//! Fixed-width binary packing of risk scores.
//!
//! A score vector is packed by writing every score as a base-2 field,
//! zero-padded on the left to `bits_per_score` digits, and reading the
//! concatenation of all fields (field 0 first, most significant) as one
//! integer. Unpacking pads the integer's binary form to
//! `total_scores * bits_per_score` digits and splits it back into fields
//! from the left.
//!
//! ## Overflow
//!
//! In the default mode nothing is validated. A score wider than its field is
//! emitted at its natural width, which shifts every field boundary after it.
//! A packed value wider than `total_scores` fields decodes into extra leading
//! fields. Both behaviors are kept as-is for compatibility with existing
//! packed values; [`CodecOptions::strict`] turns them into errors instead.
//!
//! ```rust
//! use scorepack::codec::{decode, encode};
//!
//! let packed = encode(&[3, 4, 5, 4, 3, 4, 2], 5).unwrap();
//! assert_eq!(packed, 3_360_820_354);
//! assert_eq!(decode(packed, 7, 5).unwrap(), vec![3, 4, 5, 4, 3, 4, 2]);
//! ```

pub mod trace;

pub use trace::{DecodeTrace, EncodeTrace, TraceMode};

use crate::errors::CodecError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One bounded, non-negative score.
pub type Score = u64;

/// The integer a score vector packs into.
pub type PackedValue = u128;

pub const DEFAULT_BITS_PER_SCORE: u32 = 5;
pub const DEFAULT_TOTAL_SCORES: usize = 7;

/// Widest field a single [`Score`] can fill.
pub const MAX_BITS_PER_SCORE: u32 = Score::BITS;

/// Number of significant bits a [`PackedValue`] can hold.
pub const PACKED_CAPACITY_BITS: u32 = PackedValue::BITS;

/// Longest padded binary form decode will build, i.e. the largest
/// `total_scores * bits_per_score` accepted.
pub const MAX_TOTAL_DIGITS: u64 = 1 << 16;

/// Per-call codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub bits_per_score: u32,
    /// Number of fields to recover when decoding. Ignored by encode.
    pub total_scores: usize,
    /// Reject out-of-range scores and overflowing values instead of
    /// silently widening fields.
    pub strict: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            bits_per_score: DEFAULT_BITS_PER_SCORE,
            total_scores: DEFAULT_TOTAL_SCORES,
            strict: false,
        }
    }
}

impl CodecOptions {
    pub fn new(bits_per_score: u32, total_scores: usize) -> Self {
        Self {
            bits_per_score,
            total_scores,
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Total binary digits a decoded value is padded to.
    pub fn total_digits(&self) -> u64 {
        (self.total_scores as u64).saturating_mul(u64::from(self.bits_per_score))
    }
}

/// Pack `scores` into one integer using `bits_per_score`-wide fields.
///
/// Non-strict: scores wider than a field are emitted at their natural width.
pub fn encode(scores: &[Score], bits_per_score: u32) -> Result<PackedValue, CodecError> {
    encode_with(scores, &CodecOptions::new(bits_per_score, scores.len()))
}

/// Unpack `value` into `total_scores` fields of `bits_per_score` bits.
///
/// Non-strict: a value wider than `total_scores` fields yields extra
/// leading fields.
pub fn decode(
    value: PackedValue,
    total_scores: usize,
    bits_per_score: u32,
) -> Result<Vec<Score>, CodecError> {
    decode_with(value, &CodecOptions::new(bits_per_score, total_scores))
}

pub fn encode_with(scores: &[Score], options: &CodecOptions) -> Result<PackedValue, CodecError> {
    let bits = validate_bit_width(options.bits_per_score)?;

    if options.strict {
        if let Some((index, &score)) = scores
            .iter()
            .enumerate()
            .find(|&(_, &score)| !score_fits(score, bits))
        {
            return Err(CodecError::ScoreOutOfRange {
                index,
                score,
                bits_per_score: bits,
                max: max_score(bits),
            });
        }
    }

    let required = significant_bits(scores, bits);
    if required > u64::from(PACKED_CAPACITY_BITS) {
        return Err(CodecError::CapacityExceeded {
            required_bits: required,
            capacity_bits: PACKED_CAPACITY_BITS,
        });
    }

    let packed = scores.iter().enumerate().fold(0u128, |acc, (index, &score)| {
        let width = field_width(score, bits);
        if width > bits {
            debug!(
                index,
                score,
                bits,
                width,
                "score wider than its field; later field boundaries shift"
            );
        }
        // Capacity was checked above, so no set bit is shifted out.
        (acc << width) | PackedValue::from(score)
    });

    tracing::trace!(scores = ?scores, bits, packed, "encoded score vector");
    Ok(packed)
}

pub fn decode_with(value: PackedValue, options: &CodecOptions) -> Result<Vec<Score>, CodecError> {
    let bits = validate_bit_width(options.bits_per_score)?;
    let total_digits = checked_total_digits(options.total_scores, bits)?;
    let natural = binary_len(value);

    if options.strict && u64::from(significant_len(value)) > total_digits {
        return Err(CodecError::FieldOverflow {
            value,
            total_scores: options.total_scores,
            bits_per_score: bits,
        });
    }

    let digits = total_digits.max(u64::from(natural));
    if u64::from(natural) > total_digits {
        debug!(
            value,
            natural,
            total_digits,
            "value wider than the requested fields; extra leading fields emitted"
        );
    }

    let width = u64::from(bits);
    let scores = (0..digits.div_ceil(width))
        .map(|chunk| {
            let start = chunk * width;
            let end = (start + width).min(digits);
            extract_bits(value, digits - end, end - start)
        })
        .collect::<Vec<_>>();

    tracing::trace!(value, bits, fields = scores.len(), "decoded packed value");
    Ok(scores)
}

/// Whether `score` fits in a `bits_per_score`-wide field.
pub fn score_fits(score: Score, bits_per_score: u32) -> bool {
    bits_per_score >= Score::BITS || score >> bits_per_score == 0
}

/// Total binary digits `scores` occupy when packed, leading zero fields included.
pub fn required_bits(scores: &[Score], bits_per_score: u32) -> u64 {
    scores
        .iter()
        .map(|&score| u64::from(field_width(score, bits_per_score)))
        .sum()
}

/// Width a score occupies when packed: its field width, or its natural
/// width if that is larger.
pub fn field_width(score: Score, bits_per_score: u32) -> u32 {
    bits_per_score.max(score_binary_len(score))
}

fn validate_bit_width(bits_per_score: u32) -> Result<u32, CodecError> {
    if (1..=MAX_BITS_PER_SCORE).contains(&bits_per_score) {
        Ok(bits_per_score)
    } else {
        Err(CodecError::InvalidBitWidth {
            bits_per_score,
            max: MAX_BITS_PER_SCORE,
        })
    }
}

/// `total_scores * bits_per_score`, refused above [`MAX_TOTAL_DIGITS`].
pub(crate) fn checked_total_digits(
    total_scores: usize,
    bits_per_score: u32,
) -> Result<u64, CodecError> {
    let total_digits = (total_scores as u64).saturating_mul(u64::from(bits_per_score));
    if total_digits > MAX_TOTAL_DIGITS {
        return Err(CodecError::FieldCountTooLarge {
            total_scores,
            bits_per_score,
            max_digits: MAX_TOTAL_DIGITS,
        });
    }
    Ok(total_digits)
}

fn max_score(bits_per_score: u32) -> Score {
    if bits_per_score >= Score::BITS {
        Score::MAX
    } else {
        (1 << bits_per_score) - 1
    }
}

/// Significant bits of the concatenation, ignoring leading zero fields.
fn significant_bits(scores: &[Score], bits_per_score: u32) -> u64 {
    scores.iter().fold(0u64, |acc, &score| {
        if acc == 0 {
            u64::from(Score::BITS - score.leading_zeros())
        } else {
            acc + u64::from(field_width(score, bits_per_score))
        }
    })
}

/// Length of the base-2 representation; zero is written as `"0"`.
fn score_binary_len(score: Score) -> u32 {
    (Score::BITS - score.leading_zeros()).max(1)
}

fn binary_len(value: PackedValue) -> u32 {
    significant_len(value).max(1)
}

fn significant_len(value: PackedValue) -> u32 {
    PackedValue::BITS - value.leading_zeros()
}

/// Read `width` (at most 64) bits starting `shift` bits above the least significant bit.
fn extract_bits(value: PackedValue, shift: u64, width: u64) -> Score {
    let shifted = u32::try_from(shift)
        .ok()
        .and_then(|shift| value.checked_shr(shift))
        .unwrap_or(0);
    let mask = (1u128 << width) - 1;
    (shifted & mask) as Score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: [Score; 7] = [3, 4, 5, 4, 3, 4, 2];
    const SAMPLE_PACKED: PackedValue = 3_360_820_354;

    #[test]
    fn test_encode_sample_vector() {
        assert_eq!(encode(&SAMPLE, 5).unwrap(), SAMPLE_PACKED);
    }

    #[test]
    fn test_decode_sample_value() {
        assert_eq!(decode(SAMPLE_PACKED, 7, 5).unwrap(), SAMPLE.to_vec());
    }

    #[test]
    fn test_encode_empty_is_zero() {
        for bits in 1..=16 {
            assert_eq!(encode(&[], bits).unwrap(), 0);
        }
    }

    #[test]
    fn test_encode_all_zero_is_zero() {
        assert_eq!(encode(&[0; 7], 5).unwrap(), 0);
        assert_eq!(encode(&[0; 40], 3).unwrap(), 0);
    }

    #[test]
    fn test_encode_overflowing_score_is_not_truncated() {
        // 32 needs six bits; the field grows instead of failing.
        assert_eq!(encode(&[32], 5).unwrap(), 32);
        assert_eq!(format!("{:b}", encode(&[32], 5).unwrap()), "100000");
    }

    #[test]
    fn test_overflow_shifts_following_fields() {
        // "100000" + "00001" = 0b10000000001
        let packed = encode(&[32, 1], 5).unwrap();
        assert_eq!(packed, 0b100000_00001);
        // "10000" | "00000" | "1"
        assert_eq!(decode(packed, 2, 5).unwrap(), vec![16, 0, 1]);
    }

    #[test]
    fn test_decode_zero_pads_to_requested_fields() {
        assert_eq!(decode(0, 7, 5).unwrap(), vec![0; 7]);
    }

    #[test]
    fn test_decode_zero_with_no_fields_keeps_single_digit() {
        // "0" is never padded away.
        assert_eq!(decode(0, 0, 5).unwrap(), vec![0]);
    }

    #[test]
    fn test_decode_overflow_emits_extra_leading_field() {
        let value = 1u128 << 35;
        let scores = decode(value, 7, 5).unwrap();
        // 36 digits: seven full chunks plus a trailing 1-digit chunk.
        assert_eq!(scores.len(), 8);
        assert_eq!(scores[0], 0b10000);
        assert!(scores[1..].iter().all(|&s| s == 0));
    }

    #[test]
    fn test_decode_partial_final_chunk_is_parsed_as_is() {
        // 0b1111111 padded to 7 digits, 5-bit chunks: "11111" | "11"
        assert_eq!(decode(0b1111111, 1, 7).unwrap(), vec![127]);
        assert_eq!(decode(0b1111111, 0, 5).unwrap(), vec![31, 3]);
    }

    #[test]
    fn test_zero_bit_width_is_rejected() {
        assert_eq!(
            encode(&[1], 0),
            Err(CodecError::InvalidBitWidth {
                bits_per_score: 0,
                max: 64
            })
        );
        assert!(decode(1, 7, 0).is_err());
    }

    #[test]
    fn test_bit_width_above_score_width_is_rejected() {
        assert!(encode(&[1], 65).is_err());
        assert!(encode(&[1], 64).is_ok());
    }

    #[test]
    fn test_capacity_exceeded() {
        let scores = [1; 30];
        assert_eq!(
            encode(&scores, 5),
            Err(CodecError::CapacityExceeded {
                required_bits: 146,
                capacity_bits: 128
            })
        );
    }

    #[test]
    fn test_leading_zero_fields_do_not_count_against_capacity() {
        let mut scores = vec![0; 100];
        scores.push(7);
        assert_eq!(encode(&scores, 5).unwrap(), 7);
    }

    #[test]
    fn test_strict_encode_rejects_out_of_range_score() {
        let options = CodecOptions::new(5, 3).with_strict(true);
        assert_eq!(
            encode_with(&[1, 32, 40], &options),
            Err(CodecError::ScoreOutOfRange {
                index: 1,
                score: 32,
                bits_per_score: 5,
                max: 31
            })
        );
        assert_eq!(encode_with(&[31, 0, 1], &options).unwrap(), 0b11111_00000_00001);
    }

    #[test]
    fn test_strict_decode_rejects_overflowing_value() {
        let options = CodecOptions::default().with_strict(true);
        assert!(matches!(
            decode_with(1 << 35, &options),
            Err(CodecError::FieldOverflow { total_scores: 7, .. })
        ));
        assert_eq!(decode_with((1 << 35) - 1, &options).unwrap(), vec![31; 7]);
    }

    #[test]
    fn test_decode_refuses_unbounded_field_count() {
        assert_eq!(
            decode(1, usize::MAX, 5),
            Err(CodecError::FieldCountTooLarge {
                total_scores: usize::MAX,
                bits_per_score: 5,
                max_digits: MAX_TOTAL_DIGITS,
            })
        );
        assert!(matches!(
            decode(1, 1_000_000_000_000, 5),
            Err(CodecError::FieldCountTooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_accepts_field_count_at_limit() {
        let total = (MAX_TOTAL_DIGITS / 4) as usize;
        let scores = decode(0b1111, total, 4).unwrap();
        assert_eq!(scores.len(), total);
        assert_eq!(scores[total - 1], 15);
        assert!(decode(0, total + 1, 4).is_err());
    }

    #[test]
    fn test_score_fits() {
        assert!(score_fits(31, 5));
        assert!(!score_fits(32, 5));
        assert!(score_fits(0, 1));
        assert!(score_fits(Score::MAX, 64));
    }

    #[test]
    fn test_required_bits_counts_widened_fields() {
        assert_eq!(required_bits(&SAMPLE, 5), 35);
        assert_eq!(required_bits(&[32, 1], 5), 11);
        assert_eq!(required_bits(&[], 5), 0);
    }

    #[test]
    fn test_default_options() {
        let options = CodecOptions::default();
        assert_eq!(options.bits_per_score, 5);
        assert_eq!(options.total_scores, 7);
        assert!(!options.strict);
        assert_eq!(options.total_digits(), 35);
    }

    fn scores_for_width() -> impl Strategy<Value = (u32, Vec<Score>)> {
        (1u32..=16).prop_flat_map(|bits| {
            let max_len = (PACKED_CAPACITY_BITS / bits) as usize;
            (
                Just(bits),
                prop::collection::vec(0..(1u64 << bits), 0..=max_len),
            )
        })
    }

    proptest! {
        /// Property: in-range scores survive a pack/unpack round trip.
        #[test]
        fn roundtrip_in_range_scores((bits, scores) in scores_for_width()) {
            let packed = encode(&scores, bits).unwrap();
            let decoded = decode(packed, scores.len(), bits).unwrap();
            if scores.is_empty() {
                // "0" is a single digit that never pads away.
                prop_assert_eq!(decoded, vec![0]);
            } else {
                prop_assert_eq!(decoded, scores);
            }
        }

        /// Property: values inside the field budget decode to exactly that many fields.
        #[test]
        fn field_count_matches_when_value_fits(
            total in 1usize..=25,
            bits in 1u32..=5,
            raw in any::<u128>()
        ) {
            let digits = total as u32 * bits;
            let value = raw & ((1u128 << digits) - 1);
            prop_assert_eq!(decode(value, total, bits).unwrap().len(), total);
        }

        /// Property: values beyond the field budget decode to more fields.
        #[test]
        fn field_count_grows_when_value_overflows(
            total in 1usize..=20,
            bits in 1u32..=5,
            raw in any::<u128>()
        ) {
            let digits = total as u32 * bits;
            let value = raw | (1u128 << digits);
            prop_assert!(decode(value, total, bits).unwrap().len() > total);
        }
    }
}
