//! Filter cutoff decoding.
//!
//! A cutoff byte counts decay steps down from the top of the range: index 255
//! is the calibrated maximum frequency and every step below it multiplies the
//! frequency by `decay_multiplier / 1024`, truncating after each step. The
//! truncation accumulates, so the result is not a closed-form power.

use crate::{Error, Result};
use derivative::Derivative;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Fixed-point denominator of one decay step.
pub const DECAY_DIVISOR: i64 = 1024;

/// Highest encoded index; decodes to the calibrated maximum frequency.
pub const MAX_INDEX: i32 = 255;

/// Number of entries in a full cutoff table.
pub const TABLE_LEN: usize = MAX_INDEX as usize + 1;

pub const DEFAULT_MAX_FREQUENCY: i32 = 10000;
pub const DEFAULT_DECAY_MULTIPLIER: i32 = 1006;

/// Calibration for one cutoff curve.
///
/// `decay_multiplier` is expected to be below 1024. Larger values grow the
/// frequency instead of decaying it; that is left to the caller and only
/// logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters, Serialize, Deserialize)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[serde(default)]
#[non_exhaustive]
pub struct FrequencyDecoder {
    /// Frequency in Hz produced at index 255
    #[derivative(Default(value = "DEFAULT_MAX_FREQUENCY"))]
    pub max_frequency: i32,

    /// Per-step multiplier over 1024
    #[derivative(Default(value = "DEFAULT_DECAY_MULTIPLIER"))]
    pub decay_multiplier: i32,
}

impl FrequencyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(max_frequency: i32, decay_multiplier: i32) -> Self {
        Self::default()
            .with_max_frequency(max_frequency)
            .with_decay_multiplier(decay_multiplier)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_frequency <= 0 {
            return Err(Error::InvalidArgument(format!(
                "max_frequency must be positive, got {}",
                self.max_frequency
            )));
        }

        if self.decay_multiplier <= 0 {
            return Err(Error::InvalidArgument(format!(
                "decay_multiplier must be positive, got {}",
                self.decay_multiplier
            )));
        }

        if i64::from(self.decay_multiplier) >= DECAY_DIVISOR {
            log::warn!(
                "decay_multiplier {} >= {DECAY_DIVISOR}, frequencies will grow below index {MAX_INDEX}",
                self.decay_multiplier
            );
        }

        Ok(())
    }

    pub fn decode(&self, index: i32) -> Result<i32> {
        self.validate()?;
        self.decay(index)
    }

    /// Decodes every index in `0..=255`, lowest index first.
    pub fn table(&self) -> Result<Vec<i32>> {
        self.validate()?;

        let table = (0..=MAX_INDEX)
            .map(|index| self.decay(index))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "built cutoff table: {} Hz..{} Hz (max={}, mul={})",
            table[0],
            table[TABLE_LEN - 1],
            self.max_frequency,
            self.decay_multiplier
        );

        Ok(table)
    }

    fn decay(&self, index: i32) -> Result<i32> {
        let overflow = || Error::Overflow {
            index,
            max_frequency: self.max_frequency,
            decay_multiplier: self.decay_multiplier,
        };

        // Negative for index > 255, in which case no step runs.
        let steps = i64::from(MAX_INDEX) - i64::from(index);
        let multiplier = i64::from(self.decay_multiplier);
        let mut freq = i64::from(self.max_frequency);

        for _ in 0..steps.max(0) {
            let prev = freq;
            freq *= multiplier;
            freq /= DECAY_DIVISOR;

            if freq > i64::from(i32::MAX) {
                return Err(overflow());
            }

            // Fixed point (zero, or a multiplier of exactly 1024).
            if freq == prev {
                break;
            }
        }

        i32::try_from(freq).map_err(|_| overflow())
    }
}

/// Decodes a cutoff index into Hz.
///
/// Applies `255 - index` decay steps of `f = f * decay_multiplier / 1024`
/// starting from `max_frequency`. Indices above 255 apply no step; negative
/// indices keep decaying past the normal range.
///
/// # Examples
///
/// ```
/// use sysex_param::decode_frequency;
///
/// assert_eq!(decode_frequency(255, 10000, 1006).unwrap(), 10000);
/// assert_eq!(decode_frequency(0, 10000, 1006).unwrap(), 83);
/// assert!(decode_frequency(0, 0, 1006).is_err());
/// ```
pub fn decode_frequency(index: i32, max_frequency: i32, decay_multiplier: i32) -> Result<i32> {
    FrequencyDecoder::from_parts(max_frequency, decay_multiplier).decode(index)
}

pub fn format_frequency(hz: i32) -> String {
    format!("{hz} Hz")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_decay(index: i32, max_frequency: i32, decay_multiplier: i32) -> i32 {
        let mut f = max_frequency;
        let mut steps = 255 - index;
        while steps > 0 {
            f *= decay_multiplier;
            f /= 1024;
            steps -= 1;
        }
        f
    }

    #[test]
    fn test_top_index_is_max_frequency() {
        for (max, mul) in [(10000, 1006), (20000, 1002), (18000, 1003), (1, 1)] {
            assert_eq!(decode_frequency(255, max, mul).unwrap(), max);
        }
    }

    #[test]
    fn test_bottom_index() {
        assert_eq!(decode_frequency(0, 10000, 1006).unwrap(), 83);
        assert_eq!(decode_frequency(1, 10000, 1006).unwrap(), 85);
        assert_eq!(decode_frequency(128, 10000, 1006).unwrap(), 1027);
        assert_eq!(decode_frequency(254, 10000, 1006).unwrap(), 9824);
    }

    #[test]
    fn test_matches_step_by_step_reference() {
        for index in 0..=255 {
            assert_eq!(
                decode_frequency(index, 10000, 1006).unwrap(),
                reference_decay(index, 10000, 1006),
                "index {index}"
            );
        }
    }

    #[test]
    fn test_per_step_truncation_differs_from_closed_form() {
        let closed_form = (10000.0 * (1006.0f64 / 1024.0).powi(255)) as i32;
        assert_eq!(closed_form, 108);
        assert_ne!(decode_frequency(0, 10000, 1006).unwrap(), closed_form);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let table = FrequencyDecoder::new().table().unwrap();
        assert_eq!(table.len(), TABLE_LEN);
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(table[0], 83);
        assert_eq!(table[TABLE_LEN - 1], 10000);
    }

    #[test]
    fn test_index_above_range_applies_no_decay() {
        assert_eq!(decode_frequency(256, 10000, 1006).unwrap(), 10000);
        assert_eq!(decode_frequency(i32::MAX, 10000, 1006).unwrap(), 10000);
    }

    #[test]
    fn test_negative_index_keeps_decaying() {
        assert_eq!(decode_frequency(-1, 10000, 1006).unwrap(), 81);
        assert_eq!(decode_frequency(i32::MIN, 10000, 1006).unwrap(), 0);
    }

    #[test]
    fn test_invalid_calibration() {
        assert!(matches!(
            decode_frequency(10, 0, 1006),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            decode_frequency(10, -5, 1006),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            decode_frequency(10, 10000, 0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(FrequencyDecoder::from_parts(10000, -1).table().is_err());
    }

    #[test]
    fn test_multiplier_at_or_above_divisor() {
        assert_eq!(decode_frequency(0, 10000, 1024).unwrap(), 10000);
        assert_eq!(decode_frequency(0, 1, 1025).unwrap(), 1);
        assert_eq!(decode_frequency(254, 1024, 2048).unwrap(), 2048);
        assert_eq!(
            decode_frequency(0, 10000, 2048),
            Err(Error::Overflow {
                index: 0,
                max_frequency: 10000,
                decay_multiplier: 2048,
            })
        );
    }

    #[test]
    fn test_large_max_frequency_does_not_overflow() {
        assert_eq!(
            decode_frequency(254, i32::MAX, 1023).unwrap(),
            ((i64::from(i32::MAX) * 1023) / 1024) as i32
        );
    }

    #[test]
    fn test_idempotent() {
        let decoder = FrequencyDecoder::from_parts(20000, 1002);
        assert_eq!(decoder.decode(64).unwrap(), decoder.decode(64).unwrap());
        assert_eq!(decoder.decode(64).unwrap(), 294);
    }

    #[test]
    fn test_decoder_config() {
        let decoder = FrequencyDecoder::new();
        assert_eq!(decoder.max_frequency, DEFAULT_MAX_FREQUENCY);
        assert_eq!(decoder.decay_multiplier, DEFAULT_DECAY_MULTIPLIER);

        let decoder = decoder.with_max_frequency(18000).with_decay_multiplier(1003);
        assert_eq!(decoder, FrequencyDecoder::from_parts(18000, 1003));
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(83), "83 Hz");
        assert_eq!(format_frequency(10000), "10000 Hz");
    }
}
