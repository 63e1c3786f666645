//! vcfutils CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use vcfutils::formats;

#[derive(Parser)]
#[command(name = "vcfutils")]
#[command(about = "Variant file interconversion utilities")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a tab-separated variant list into a VCF 4.1 file
    Tab2vcf {
        /// Input tab-separated file (CHROM, POS, REF, ALT; line 1 is a header)
        input: PathBuf,
        /// Output VCF file
        output: PathBuf,
    },
    /// Flatten a VCF file into a tab-separated table
    Vcf2table {
        /// Input VCF file
        input: PathBuf,
        /// Output tab-separated table
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Tab2vcf { input, output } => {
            eprintln!("Converting tab file: {:?} -> {:?}", input, output);
            let stats = formats::convert_tab_to_vcf(&input, &output)?;

            eprintln!("\n=== Conversion Statistics ===");
            eprintln!("Records written: {}", stats.total);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Vcf2table { input, output } => {
            eprintln!("Flattening VCF file: {:?} -> {:?}", input, output);
            let stats = formats::convert_vcf_to_table(&input, &output)?;

            eprintln!("\n=== Conversion Statistics ===");
            eprintln!("Rows written:    {}", stats.total);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
