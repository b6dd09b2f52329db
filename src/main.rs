use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use obis_rs::serial::ByteSource;
use obis_rs::util::hex::decode_hex;
use obis_rs::{
    init_logger, ObisRecord, Q3daReceiver, SerialConfig, SmlReceiver, TelegramPort,
};

#[derive(Parser)]
#[command(name = "obis-cli")]
#[command(about = "CLI tool for decoding SML and Q3DA meter telegrams")]
struct Cli {
    /// Print decoded records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum WireFormat {
    Sml,
    Q3da,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one SML frame given as a hex string
    DecodeHex {
        /// Hex-encoded frame, start sequence through CRC
        hex: String,
    },
    /// Decode a Q3DA telegram from a text file
    DecodeText {
        path: String,
    },
    /// Watch a serial port and decode telegrams as they arrive
    Watch {
        port: String,
        #[arg(short, long, default_value = "9600")]
        baudrate: u32,
        #[arg(short, long, value_enum, default_value = "sml")]
        format: WireFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    match cli.command {
        Commands::DecodeHex { hex } => {
            let frame = decode_hex(&hex).context("invalid hex input")?;
            let records = obis_rs::decode_sml_frame(&frame)?;
            print_records(&records, cli.json)?;
        }
        Commands::DecodeText { path } => {
            let body = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            let telegram = obis_rs::decode_q3da_telegram(&body)?;
            println!("identification: {}", telegram.identification);
            print_records(&telegram.records, cli.json)?;
        }
        Commands::Watch {
            port,
            baudrate,
            format,
        } => {
            let config = SerialConfig {
                baudrate,
                ..Default::default()
            };
            let mut source = TelegramPort::connect_with_config(&port, config)
                .await
                .with_context(|| format!("opening {port}"))?;
            watch(&mut source, format, cli.json).await?;
        }
    }

    Ok(())
}

async fn watch(source: &mut TelegramPort, format: WireFormat, json: bool) -> Result<()> {
    let mut sml = SmlReceiver::new();
    let mut q3da = Q3daReceiver::new();
    let mut buf = [0u8; 256];
    loop {
        let n = source.read_chunk(&mut buf).await?;
        if n == 0 {
            continue;
        }
        let records = match format {
            WireFormat::Sml => sml.feed(&buf[..n]),
            WireFormat::Q3da => q3da.feed(&buf[..n]),
        };
        print_records(&records, json)?;
    }
}

fn print_records(records: &[ObisRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for record in records {
        let unit = record.unit_name().unwrap_or("");
        match record.scaled_value() {
            Some(value) if value.is_finite() => {
                println!("{} {} {}", record.code_repr(), value, unit)
            }
            _ => println!("{} {}", record.code_repr(), record.format_value(None)),
        }
    }
    Ok(())
}
