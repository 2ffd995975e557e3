// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

#![allow(unused_crate_dependencies)]

use anyhow::{Context, Result, bail};
use bulkscan::datagen::ArraySupply;
use bulkscan::dispatch::{Operation, ScanInput, Tier, run};
use bulkscan::harness::verify;
use bulkscan::options::ScanOptions;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use validator::Validate;

#[derive(Parser)]
#[command(version, about = "Scalar and vectorized bulk array scans")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs one operation on generated input and times each tier.
    Scan(ScanArgs),
    /// Checks that every tier agrees on every built-in scenario.
    Verify(VerifyArgs),
    /// Lists the lane backends compiled into this build.
    Backends,
}

#[derive(Args)]
struct ScanArgs {
    /// TOML file with scan options; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    operation: Option<Operation>,
    #[arg(short, long, value_enum)]
    tier: Option<Tier>,
    #[arg(short, long)]
    length: Option<usize>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, allow_hyphen_values = true)]
    item: Option<i32>,
}

#[derive(Args)]
struct VerifyArgs {
    #[arg(short, long)]
    seed: Option<u64>,
}

fn options(args: ScanArgs) -> Result<ScanOptions> {
    let mut options = if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        ScanOptions::from_toml(&text).with_context(|| format!("in {}", path.display()))?
    } else {
        ScanOptions::default()
    };
    if let Some(operation) = args.operation {
        options.operation = operation;
    }
    if let Some(tier) = args.tier {
        options.tier = Some(tier);
    }
    if let Some(length) = args.length {
        options.length = length;
    }
    if let Some(seed) = args.seed {
        options.seed = Some(seed);
    }
    if let Some(item) = args.item {
        options.item = Some(item);
    }
    options.validate()?;
    Ok(options)
}

fn scan(args: ScanArgs) -> Result<()> {
    let options = options(args)?;
    tracing::info!(?options, "scan");
    let mut supply = ArraySupply::new(options.seed);
    let input = ScanInput::generate(options.operation, options.length, options.item, &mut supply);
    let tiers = match options.tier {
        Some(tier) => vec![tier],
        None => Tier::for_operation(options.operation).collect(),
    };
    for tier in tiers {
        let start = Instant::now();
        let Some(outcome) = run(options.operation, tier, &input) else {
            bail!("tier {tier} does not implement {}", options.operation);
        };
        let elapsed = start.elapsed();
        println!("{tier:<10} {:>16} {elapsed:>12.3?}", outcome.to_string());
    }
    Ok(())
}

fn main() -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Scan(args) => scan(args)?,
        Commands::Verify(args) => {
            let report = verify(&mut ArraySupply::new(args.seed));
            for mismatch in &report.mismatches {
                eprintln!("{mismatch}");
            }
            if !report.is_ok() {
                bail!(
                    "{} of {} checks disagreed",
                    report.mismatches.len(),
                    report.checks
                );
            }
            println!("{} checks passed", report.checks);
        }
        Commands::Backends => {
            for (i, (name, bytes, ints)) in simd::backends().into_iter().enumerate() {
                let native = if i == 0 { " (native)" } else { "" };
                println!("{name:<10} {bytes:>3} bytes {ints:>3} i32{native}");
            }
        }
    }
    Ok(())
}
