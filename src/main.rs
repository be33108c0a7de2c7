use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use epc_lora::constants::DEFAULT_MIN_PREFIX_LENGTH;
use epc_lora::logging::log_error;
use epc_lora::util::hex::{decode_hex, encode_hex_upper};
use epc_lora::{
    decode_packet, encode_packet, init_logger, load_epcs, log_info, render_summary, render_table,
    render_process_report, save_results, Epc, EpcLoRaCalculator, PrefixGrouper, RadioConfig,
    TransmissionPlan,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "epc-lora")]
#[command(about = "EPC prefix compression and LoRaWAN airtime calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RadioArgs {
    /// JSON radio config; overrides the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "12")]
    sf: u8,
    /// Bandwidth in kHz (125, 250, 500)
    #[arg(long, default_value = "125")]
    bw: u32,
    /// Coding rate code 1-4 (4/5..4/8)
    #[arg(long, default_value = "1")]
    cr: u8,
    /// Fixed max payload size in bytes instead of the SF table
    #[arg(long)]
    payload_size: Option<usize>,
}

impl RadioArgs {
    fn to_config(&self) -> anyhow::Result<RadioConfig> {
        if let Some(path) = &self.config {
            return RadioConfig::from_json_file(path)
                .with_context(|| format!("loading radio config {}", path.display()));
        }
        let config = RadioConfig::from_raw(self.sf, self.bw, self.cr)?;
        Ok(match self.payload_size {
            Some(size) => config.with_payload_size(size)?,
            None => config,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Group EPCs from a file and report prefix compression
    Analyze {
        input: PathBuf,
        /// Report file (.xlsx or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, default_value_t = DEFAULT_MIN_PREFIX_LENGTH)]
        min_prefix: usize,
    },
    /// Plan the airtime of a batch of EPCs
    Plan {
        count: usize,
        #[command(flatten)]
        radio: RadioArgs,
    },
    /// Packetize random EPCs (or EPCs from a file) and cost every packet
    Simulate {
        #[arg(default_value = "7")]
        count: usize,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        radio: RadioArgs,
    },
    /// Encode EPCs into one packet and print it as hex
    Encode {
        epcs: Vec<String>,
        #[arg(short, long, default_value = "0")]
        packet_id: usize,
        #[command(flatten)]
        radio: RadioArgs,
    },
    /// Decode a hex packet
    Decode { payload: String },
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            min_prefix,
        } => {
            let epcs = load_epcs(&input)?;
            let report = PrefixGrouper::new(min_prefix).analyze(&epcs)?;

            println!("{}", "=".repeat(80));
            println!("EPC LoRaWAN Compression Analysis");
            println!("{}", "=".repeat(80));
            println!("{}", render_table(&report.rows));
            println!();
            println!("{}", render_summary(&report.summary()));

            if let Some(path) = output {
                // Analysis output above stays valid even if the save fails.
                if let Err(e) = save_results(&report.rows, &path) {
                    log_error(&format!("Error saving results: {e}"));
                }
            }
        }
        Commands::Plan { count, radio } => {
            let config = radio.to_config()?;
            let plan = epc_lora::plan_transmission(count, &config)?;
            print_plan(&plan);
        }
        Commands::Simulate {
            count,
            input,
            radio,
        } => {
            let calculator = EpcLoRaCalculator::new(radio.to_config()?)?;
            let report = match input {
                Some(path) => calculator.process_epcs(&load_epcs(&path)?)?,
                None => calculator.simulate(count)?,
            };

            println!("{}", render_process_report(&report));
            println!();
            print_plan(&report.plan);
        }
        Commands::Encode {
            epcs,
            packet_id,
            radio,
        } => {
            let config = radio.to_config()?;
            let epcs = epcs
                .iter()
                .map(|s| Epc::parse(s))
                .collect::<Result<Vec<_>, _>>()?;
            let packet = encode_packet(&epcs, packet_id, config.max_epcs_per_packet())?;
            println!("{}", encode_hex_upper(&packet));
        }
        Commands::Decode { payload } => {
            let bytes = decode_hex(&payload).context("payload is not valid hex")?;
            let decoded = decode_packet(&bytes)?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }

    log_info("Done");
    Ok(())
}

fn print_plan(plan: &TransmissionPlan) {
    println!("Total EPCs: {}", plan.total_epcs);
    println!("EPCs per frame: {}", plan.epcs_per_frame);
    println!("Frames: {}", plan.frames_needed);
    println!("Frame duration: {:.2} ms", plan.frame_duration_ms);
    println!("Batch duration: {:.2} s", plan.batch_duration_s);
    println!("Max batches per day (1% duty): {}", plan.max_batches_per_day);
    println!("Max EPCs per day (1% duty): {}", plan.max_epcs_per_day);
}
