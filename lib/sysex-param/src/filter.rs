//! Filter type catalogue.
//!
//! The filter type byte of a layer decides how its cutoff and Q bytes read.
//! Low-pass, high-pass and swept-EQ types each have a documented cutoff curve;
//! swept-EQ types also use Q as a morph gain. Every other type shows raw values.

use crate::{
    Error, Result,
    frequency::{FrequencyDecoder, format_frequency},
    gain::format_gain,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::{fmt, str::FromStr};
use strum::VariantArray as _;
use strum_macros::VariantArray;

/// Filter family; the discriminant is the category number the editor keys on.
#[derive(VariantArray, Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FilterCategory {
    LowPass = 0,
    HighPass,
    BandPass,
    SweptEq,
    PhaserFlanger,
    Vowel,
    ZPlane,
}

impl FilterCategory {
    pub fn all() -> Vec<Self> {
        FilterCategory::VARIANTS.to_vec()
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterCategory::LowPass => "Low-pass",
            FilterCategory::HighPass => "High-pass",
            FilterCategory::BandPass => "Band-pass",
            FilterCategory::SweptEq => "Swept EQ",
            FilterCategory::PhaserFlanger => "Phaser/Flanger",
            FilterCategory::Vowel => "Vowel",
            FilterCategory::ZPlane => "Z-plane",
        }
    }

    /// Cutoff curve for categories whose 0..=255 cutoff maps to Hz.
    pub fn calibration(&self) -> Option<FrequencyDecoder> {
        match self {
            FilterCategory::LowPass => Some(FrequencyDecoder::from_parts(20000, 1002)),
            FilterCategory::HighPass => Some(FrequencyDecoder::from_parts(18000, 1003)),
            FilterCategory::SweptEq => Some(FrequencyDecoder::from_parts(10000, 1006)),
            _ => None,
        }
    }

    /// Whether the Q byte is a morph gain rather than a plain resonance amount.
    pub fn q_is_gain(&self) -> bool {
        matches!(self, FilterCategory::SweptEq)
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        FilterCategory::VARIANTS
            .iter()
            .copied()
            .find(|category| normalize(category.name()) == wanted)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown filter category: {s}")))
    }
}

/// One entry of the filter type catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterType {
    pub name: &'static str,
    pub sysex_id: u16,
    pub category: Option<FilterCategory>,
}

impl FilterType {
    pub const fn new(name: &'static str, sysex_id: u16, category: Option<FilterCategory>) -> Self {
        Self {
            name,
            sysex_id,
            category,
        }
    }

    pub fn all() -> &'static [FilterType] {
        &FILTER_TYPES
    }

    /// Looks up the catalogue entry for a filter type byte.
    pub fn from_sysex_id(sysex_id: u16) -> Result<&'static FilterType> {
        FILTER_TYPES
            .iter()
            .find(|ty| ty.sysex_id == sysex_id)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("unknown filter type id: 0x{sysex_id:02X}"))
            })
    }

    /// Case-insensitive, ignores spaces and punctuation.
    pub fn from_name(name: &str) -> Result<&'static FilterType> {
        let wanted = normalize(name);
        FILTER_TYPES
            .iter()
            .find(|ty| normalize(ty.name) == wanted)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown filter type: {name}")))
    }

    /// Cutoff in Hz when the category has a curve, otherwise the raw value.
    pub fn cutoff_label(&self, value: i32) -> Result<String> {
        match self.category.and_then(|category| category.calibration()) {
            Some(decoder) => Ok(format_frequency(decoder.decode(value)?)),
            None => Ok(value.to_string()),
        }
    }

    /// Q as a morph gain for swept-EQ types, otherwise the raw value.
    pub fn q_label(&self, value: i32) -> String {
        match self.category {
            Some(category) if category.q_is_gain() => format_gain(value),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Accepts a sysex id (decimal or `0x` hex) or a catalogue name.
impl FromStr for FilterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let id = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u16::from_str_radix(hex, 16).ok(),
            None => s.parse::<u16>().ok(),
        };

        match id {
            Some(id) => FilterType::from_sysex_id(id).copied(),
            None => FilterType::from_name(s).copied(),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '>'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub static FILTER_TYPES: [FilterType; 51] = [
    FilterType::new("Off", 0x7F, None),
    FilterType::new("4 LPF Classic", 0x00, Some(FilterCategory::LowPass)),
    FilterType::new("2 LPF Smooth", 0x01, Some(FilterCategory::LowPass)),
    FilterType::new("6 LPF Steeper", 0x02, Some(FilterCategory::LowPass)),
    FilterType::new("2 HPF Shallow", 0x08, Some(FilterCategory::HighPass)),
    FilterType::new("4 HPF Deeper", 0x09, Some(FilterCategory::HighPass)),
    FilterType::new("2 BPF Band-Pass 1", 0x10, Some(FilterCategory::BandPass)),
    FilterType::new("4 BPF Band-Pass 2", 0x11, Some(FilterCategory::BandPass)),
    FilterType::new("6 BPF ContraBand", 0x12, Some(FilterCategory::BandPass)),
    FilterType::new("6 EQ+ Swept 1 Oct", 0x20, Some(FilterCategory::SweptEq)),
    FilterType::new("6 EQ+ Swept 2>1 Oct", 0x21, Some(FilterCategory::SweptEq)),
    FilterType::new("6 EQ+ Swept 3>1 Oct", 0x22, Some(FilterCategory::SweptEq)),
    FilterType::new("6 PHA PhazeShift1", 0x40, Some(FilterCategory::PhaserFlanger)),
    FilterType::new("6 PHA PhaseShift2", 0x41, Some(FilterCategory::PhaserFlanger)),
    FilterType::new("6 PHA BlissBatz", 0x42, Some(FilterCategory::PhaserFlanger)),
    FilterType::new("6 FLG FlangerLite", 0x48, Some(FilterCategory::PhaserFlanger)),
    FilterType::new("6 VOW Aah-Ay-Eeh", 0x50, Some(FilterCategory::Vowel)),
    FilterType::new("6 VOW Ooh-To-Aah", 0x51, Some(FilterCategory::Vowel)),
    FilterType::new("12 EQ+ AceOfBass", 0x83, Some(FilterCategory::ZPlane)),
    FilterType::new("12 LPF MegaSweepz", 0x84, Some(FilterCategory::ZPlane)),
    FilterType::new("12 LPF EarlyRizer", 0x85, Some(FilterCategory::ZPlane)),
    FilterType::new("12 LPF Millennium", 0x86, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ MeatyGizmo", 0x87, Some(FilterCategory::ZPlane)),
    FilterType::new("12 LPF KlubKassi", 0x88, Some(FilterCategory::ZPlane)),
    FilterType::new("12 LPF BassBox-303", 0x89, Some(FilterCategory::ZPlane)),
    FilterType::new("12 DST FuzziFace", 0x8A, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ DeadRinger", 0x8B, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ+ TB-OrNot-TB", 0x8C, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW Ooh-To-Eee", 0x8D, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ+ Bolanass", 0x8E, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW MultiQVox", 0x8F, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW TalkingHedz", 0x90, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ ZoomPeaks", 0x91, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ+ DJAlkaline", 0x92, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ+ BassTracer", 0x93, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ+ RogueHertz", 0x94, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ- RazorBlades", 0x95, Some(FilterCategory::ZPlane)),
    FilterType::new("12 EQ- RadioCraze", 0x96, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW Eeh-To-Aah", 0x97, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW UbuOrator", 0x98, Some(FilterCategory::ZPlane)),
    FilterType::new("12 VOW DeepBouche", 0x99, Some(FilterCategory::ZPlane)),
    FilterType::new("12 PHA FreakShifta", 0x9A, Some(FilterCategory::ZPlane)),
    FilterType::new("12 PHA CruzPusher", 0x9B, Some(FilterCategory::ZPlane)),
    FilterType::new("12 FLG AngelHairz", 0x9C, Some(FilterCategory::ZPlane)),
    FilterType::new("12 FLG DreamWeava", 0x9D, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ AcidRavage", 0x9E, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ BassOMatic", 0x9F, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ LucifersQ", 0xA0, Some(FilterCategory::ZPlane)),
    FilterType::new("12 REZ ToothComb", 0xA1, Some(FilterCategory::ZPlane)),
    FilterType::new("12 WAH EarBender", 0xA2, Some(FilterCategory::ZPlane)),
    FilterType::new("12 SFX KlangKling", 0xA3, Some(FilterCategory::ZPlane)),
];
