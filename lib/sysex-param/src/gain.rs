//! Gain / morph value formatting.
//!
//! The encoded value is a straight linear map onto tenths of a decibel:
//! `tenths = -240 + index * 120 / 32`. Nothing is clamped, so index 255 gives
//! +71.6 dB even though the hardware never uses that much.

use std::fmt;

const OFFSET_TENTHS: i64 = -240;
const SCALE_NUMERATOR: i64 = 120;
const SCALE_DENOMINATOR: i64 = 32;

/// Tenths of a decibel for an encoded index, truncating toward zero.
pub fn gain_tenths(index: i32) -> i64 {
    let scaled = i64::from(index) * SCALE_NUMERATOR / SCALE_DENOMINATOR;
    OFFSET_TENTHS + scaled
}

/// Gain in tenths of a decibel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gain {
    tenths: i64,
}

impl Gain {
    pub fn from_index(index: i32) -> Self {
        Self::from_tenths(gain_tenths(index))
    }

    pub fn from_tenths(tenths: i64) -> Self {
        Self { tenths }
    }

    pub fn tenths(&self) -> i64 {
        self.tenths
    }

    /// Integer part, truncated toward zero (-0.5 dB has a whole part of 0).
    pub fn whole(&self) -> i64 {
        self.tenths / 10
    }

    /// Single fractional digit, always in `0..=9`.
    pub fn fraction(&self) -> u8 {
        (self.tenths % 10).unsigned_abs() as u8
    }

    pub fn is_negative(&self) -> bool {
        self.tenths < 0
    }

    pub fn as_db(&self) -> f64 {
        self.tenths as f64 / 10.0
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { '-' } else { '+' };
        write!(
            f,
            "{sign}{}.{} dB",
            self.whole().unsigned_abs(),
            self.fraction()
        )
    }
}

/// Formats an encoded gain index as `±D.D dB`.
///
/// # Examples
///
/// ```
/// use sysex_param::format_gain;
///
/// assert_eq!(format_gain(0), "-24.0 dB");
/// assert_eq!(format_gain(64), "+0.0 dB");
/// assert_eq!(format_gain(255), "+71.6 dB");
/// ```
pub fn format_gain(index: i32) -> String {
    Gain::from_index(index).to_string()
}
