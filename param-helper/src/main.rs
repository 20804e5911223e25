mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use config::Config;
use std::path::PathBuf;
use sysex_param::{FilterCategory, FilterType, FrequencyDecoder, Gain, format_frequency};

#[derive(Debug, Parser)]
#[command(name = "param-helper")]
#[command(about = "Decode synthesizer sysex parameter values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the cutoff frequency for every index 0..=255.
    Frequencies {
        /// Frequency in Hz at index 255.
        #[arg(long)]
        max_frequency: Option<i32>,

        /// Per-step multiplier over 1024.
        #[arg(long)]
        decay_multiplier: Option<i32>,

        /// Use the calibration of a filter category, e.g. "low-pass".
        #[arg(long)]
        category: Option<FilterCategory>,

        /// TOML file with a [frequency] calibration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Prefix each line with its index.
        #[arg(long, default_value_t = false)]
        indexed: bool,
    },

    /// Print the morph gain for indices 0..COUNT.
    Gains {
        #[arg(long, default_value_t = 256)]
        count: u32,
    },

    /// Show how a filter type's cutoff and Q values read.
    Filter {
        /// Catalogue name or sysex id (decimal or 0x hex).
        filter_type: FilterType,

        #[arg(long, allow_negative_numbers = true)]
        cutoff: Option<i32>,

        #[arg(long, allow_negative_numbers = true)]
        q: Option<i32>,
    },

    /// List filter categories and their cutoff calibrations.
    Categories,

    /// List the filter type catalogue.
    Types,
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let lines = match cli.command {
        Command::Frequencies {
            max_frequency,
            decay_multiplier,
            category,
            config,
            indexed,
        } => {
            let decoder = resolve_decoder(max_frequency, decay_multiplier, category, config)?;
            frequency_lines(&decoder, indexed)?
        }
        Command::Gains { count } => gain_lines(count),
        Command::Filter {
            filter_type,
            cutoff,
            q,
        } => filter_lines(&filter_type, cutoff, q)?,
        Command::Categories => category_lines(),
        Command::Types => type_lines(),
    };

    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());

            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

/// Flags override the category, the category overrides the config file.
fn resolve_decoder(
    max_frequency: Option<i32>,
    decay_multiplier: Option<i32>,
    category: Option<FilterCategory>,
    config: Option<PathBuf>,
) -> Result<FrequencyDecoder> {
    let mut decoder = match config {
        Some(path) => Config::load(&path)?.frequency,
        None => FrequencyDecoder::new(),
    };

    if let Some(category) = category {
        decoder = match category.calibration() {
            Some(calibration) => calibration,
            None => bail!("{category} filters have no cutoff calibration"),
        };
    }

    if let Some(max_frequency) = max_frequency {
        decoder = decoder.with_max_frequency(max_frequency);
    }

    if let Some(decay_multiplier) = decay_multiplier {
        decoder = decoder.with_decay_multiplier(decay_multiplier);
    }

    Ok(decoder)
}

fn frequency_lines(decoder: &FrequencyDecoder, indexed: bool) -> Result<Vec<String>> {
    let table = decoder.table().context("decode cutoff table")?;

    Ok(table
        .into_iter()
        .enumerate()
        .map(|(index, hz)| {
            if indexed {
                format!("{index:3}: {}", format_frequency(hz))
            } else {
                format_frequency(hz)
            }
        })
        .collect())
}

fn gain_lines(count: u32) -> Vec<String> {
    (0..count.min(i32::MAX as u32) as i32)
        .map(|index| format!("{index:3}: {}", Gain::from_index(index)))
        .collect()
}

fn filter_lines(
    filter_type: &FilterType,
    cutoff: Option<i32>,
    q: Option<i32>,
) -> Result<Vec<String>> {
    let category = filter_type
        .category
        .map(|category| category.to_string())
        .unwrap_or_else(|| "None".to_string());

    let mut lines = vec![
        format!("Type:     {} (0x{:02X})", filter_type.name, filter_type.sysex_id),
        format!("Category: {category}"),
    ];

    if let Some(cutoff) = cutoff {
        lines.push(format!("Cutoff:   {}", filter_type.cutoff_label(cutoff)?));
    }

    if let Some(q) = q {
        lines.push(format!("Q:        {}", filter_type.q_label(q)));
    }

    Ok(lines)
}

fn category_lines() -> Vec<String> {
    FilterCategory::all()
        .into_iter()
        .map(|category| {
            let curve = match category.calibration() {
                Some(decoder) => format!(
                    "{} Hz, x{}/1024 per step",
                    decoder.max_frequency, decoder.decay_multiplier
                ),
                None => "raw values".to_string(),
            };
            let q = if category.q_is_gain() { ", Q as gain" } else { "" };

            format!("{} {}: {curve}{q}", u8::from(category), category)
        })
        .collect()
}

fn type_lines() -> Vec<String> {
    FilterType::all()
        .iter()
        .map(|ty| match ty.category {
            Some(category) => format!("0x{:02X} {} [{category}]", ty.sysex_id, ty.name),
            None => format!("0x{:02X} {}", ty.sysex_id, ty.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli =
            Cli::try_parse_from(["param-helper", "filter", "0x20", "--cutoff", "255"]).unwrap();
        match cli.command {
            Command::Filter {
                filter_type,
                cutoff,
                q,
            } => {
                assert_eq!(filter_type.name, "6 EQ+ Swept 1 Oct");
                assert_eq!(cutoff, Some(255));
                assert_eq!(q, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from(["param-helper", "filter", "no such filter"]).is_err());
        assert!(
            Cli::try_parse_from(["param-helper", "frequencies", "--category", "low-pass"]).is_ok()
        );
    }

    #[test]
    fn test_frequency_lines() {
        let lines = frequency_lines(&FrequencyDecoder::new(), false).unwrap();
        assert_eq!(lines.len(), 256);
        assert_eq!(lines[0], "83 Hz");
        assert_eq!(lines[255], "10000 Hz");

        let lines = frequency_lines(&FrequencyDecoder::new(), true).unwrap();
        assert_eq!(lines[1], "  1: 85 Hz");

        assert!(frequency_lines(&FrequencyDecoder::from_parts(0, 1006), false).is_err());
    }

    #[test]
    fn test_resolve_decoder_precedence() {
        let decoder = resolve_decoder(None, None, None, None).unwrap();
        assert_eq!(decoder, FrequencyDecoder::new());

        let decoder = resolve_decoder(None, None, Some(FilterCategory::LowPass), None).unwrap();
        assert_eq!(decoder, FrequencyDecoder::from_parts(20000, 1002));

        let decoder =
            resolve_decoder(Some(15000), None, Some(FilterCategory::HighPass), None).unwrap();
        assert_eq!(decoder, FrequencyDecoder::from_parts(15000, 1003));

        let err = resolve_decoder(None, None, Some(FilterCategory::Vowel), None).unwrap_err();
        assert_eq!(err.to_string(), "Vowel filters have no cutoff calibration");
    }

    #[test]
    fn test_gain_lines() {
        let lines = gain_lines(65);
        assert_eq!(lines.len(), 65);
        assert_eq!(lines[0], "  0: -24.0 dB");
        assert_eq!(lines[64], " 64: +0.0 dB");
        assert!(gain_lines(0).is_empty());
    }

    #[test]
    fn test_filter_lines() {
        let eq = FilterType::from_sysex_id(0x21).unwrap();
        let lines = filter_lines(eq, Some(0), Some(127)).unwrap();
        assert_eq!(
            lines,
            vec![
                "Type:     6 EQ+ Swept 2>1 Oct (0x21)",
                "Category: Swept EQ",
                "Cutoff:   83 Hz",
                "Q:        +23.6 dB",
            ]
        );

        let off = FilterType::from_sysex_id(0x7F).unwrap();
        let lines = filter_lines(off, None, Some(5)).unwrap();
        assert_eq!(lines[1], "Category: None");
        assert_eq!(lines[2], "Q:        5");
    }

    #[test]
    fn test_listing_lines() {
        let categories = category_lines();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[0], "0 Low-pass: 20000 Hz, x1002/1024 per step");
        assert_eq!(
            categories[3],
            "3 Swept EQ: 10000 Hz, x1006/1024 per step, Q as gain"
        );
        assert_eq!(categories[6], "6 Z-plane: raw values");

        let types = type_lines();
        assert_eq!(types.len(), 51);
        assert_eq!(types[0], "0x7F Off");
        assert_eq!(types[1], "0x00 4 LPF Classic [Low-pass]");
    }
}
