use clap::Parser;
use log::{debug, info};

use jesd_core::jesd_link_config::JesdLinkConfig;
use jesd_transport::jesd_transport_parameters::get_jesd_transport_parameters;
use lane_map::lane_unpacker::unpack_lane;
use lane_map::transport_model::TransportModel;
use sim_helpers::color_logger::ColorLogger;
use sim_helpers::lane_dump::{format_lane_table, format_nibble_group_table, format_sample_table};
use sim_helpers::stimulus::{generate_converter_stimulus, ConverterPrecision};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppArguments {
    /// Number of lanes
    #[arg(short, long, default_value_t = 2)]
    lanes: usize,
    /// Number of real converters. Valid counts are \[2, 4, 8, 16\]
    #[arg(short = 'm', long, default_value_t = 2)]
    converters: usize,
    /// Nibble group width in bits. Valid widths are \[12, 16, 24, 32, 48\]
    #[arg(short = 'n', long, default_value_t = 48)]
    nibble_group_bits: u32,
    /// Input rate code, a multiple of 122.88 MSps. Valid codes are \[1, 2, 3, 4, 6, 8\]
    #[arg(short, long, default_value_t = 3)]
    rate: u32,
    /// Nominal per-converter sample count before rate adjustment
    #[arg(short, long, default_value_t = 12)]
    samples: usize,
    /// Converter precision in bits, 12 or 16. 12-bit samples are MSB aligned
    #[arg(short, long, default_value_t = 16)]
    precision: u32,
    /// Seed for the random converter stimulus
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Print the input, nibble-group and lane tables
    #[arg(short, long)]
    verbose: bool,
    /// Suppress everything except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), String> {
    let args = AppArguments::parse();
    ColorLogger::new(args.quiet, args.verbose).init();

    let precision = ConverterPrecision::from_bits(args.precision)
        .ok_or_else(|| format!("Invalid converter precision {}, expected 12 or 16", args.precision))?;
    let link = JesdLinkConfig::new(args.lanes, args.converters, args.nibble_group_bits, args.rate)
        .map_err(|err| format!("Invalid link configuration: {err}"))?;
    let params = get_jesd_transport_parameters(&link, args.samples)
        .map_err(|err| format!("Unsupported transport configuration: {err}"))?;

    info!(
        "link: {} lanes, {} converter phases, Np = {} bits, {} MSps",
        link.lanes(),
        link.effective_converters(),
        link.nibble_group_bits(),
        link.rate().sample_rate_msps()
    );
    info!(
        "mapping: {} columns, block of {} x {} = {} bits per lane per cycle",
        params.num_columns, params.block_size, params.nibble_group_width.bits(), params.block_bit_width
    );

    let stimulus =
        generate_converter_stimulus(&link, params.num_columns, precision, args.seed);
    let mut model = TransportModel::new(params);
    model.process(&stimulus.raw_conv_data, &stimulus.valid);

    if args.verbose {
        println!("{}", format_sample_table(&stimulus.raw_conv_data, &stimulus.valid));
        println!("{}", format_nibble_group_table(model.ng_data(), model.ng_valid()));
    }
    if !args.quiet {
        println!("{}", format_lane_table(model.lane_out(), model.lane_valid()));
    }

    // Cross-check the run: the emitted words must replay the nibble-group
    // stream of every lane.
    for lane in 0..model.params.lanes {
        let expected = model.nibble_group_stream(lane);
        let recovered = unpack_lane(
            model.lane_out(),
            model.lane_valid(),
            lane,
            model.params.nibble_group_width,
        );
        if recovered != expected[..recovered.len().min(expected.len())] {
            return Err(format!(
                "lane {lane}: emitted words do not replay the nibble-group stream"
            ));
        }
        let emitted_words = (0..model.params.num_columns)
            .filter(|&s| model.lane_valid().get(lane, s))
            .count();
        debug!(
            "lane {lane}: {emitted_words} words, {} of {} nibble groups recovered",
            recovered.len(),
            expected.len()
        );
    }
    info!("lane mapping self-check passed");

    Ok(())
}
