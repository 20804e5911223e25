use sysex_param::{FrequencyDecoder, format_frequency};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let decoder = FrequencyDecoder::new();
    log::info!(
        "Cutoff table: max_frequency={} Hz, decay_multiplier={}",
        decoder.max_frequency,
        decoder.decay_multiplier
    );

    for hz in decoder.table()? {
        println!("{}", format_frequency(hz));
    }

    Ok(())
}
