// [apps/scanner/src/main.rs]
//! Punto de entrada del escáner de fuerza bruta para el rompecabezas
//! Bitcoin #71.

use anyhow::Context;
use clap::Parser;
use puzzle71_scanner::cli::ScannerArgs;
use puzzle71_scanner::coordinator::{run_scan, ScanOutcome};
use puzzle71_scanner::errors::ScannerError;
use puzzle71_scanner::target::SearchTarget;
use puzzle71_scanner::telemetry::init_tracing;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    match run() {
        Ok(exit_code) => exit_code,
        Err(fatal_error) => {
            tracing::error!(error = %fatal_error, "scanner exiting due to a fatal error");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = ScannerArgs::parse();
    let worker_count = args.resolve_worker_count().context("invalid worker count")?;

    puzzle71_core_math::selftest::run_correctness_selftest()
        .context("engine self-test failed; refusing to start a search that could never find the key")?;
    tracing::info!("engine self-test passed");

    let target = SearchTarget::puzzle_71();
    tracing::info!(
        workers = worker_count,
        address = %target.address_label,
        "starting search"
    );

    let outcome = match run_scan(worker_count, &target, &args.found_path, &args.backup_paths) {
        Ok(outcome) => outcome,
        Err(ScannerError::FoundRecordWriteFailed { record, io_error }) => {
            // §7 "Found-but-write-fails": the key must still appear in the
            // process output even though the found-key file could not be
            // written; the found flag is not cleared.
            eprintln!("{}", record.to_plain_text());
            return Err(anyhow::anyhow!(io_error)).context("found the target key but failed to persist the found-key record");
        }
        Err(other_error) => return Err(other_error).context("search terminated with an error"),
    };

    match outcome {
        ScanOutcome::Found(record) => {
            tracing::info!(address = %record.address, "target key found");
            println!("{}", record.to_plain_text());
            Ok(ExitCode::SUCCESS)
        }
        ScanOutcome::Cancelled => {
            tracing::info!("search cancelled by user");
            Ok(ExitCode::SUCCESS)
        }
        ScanOutcome::RangeExhausted => {
            tracing::warn!("search range exhausted without finding the target key");
            Ok(ExitCode::SUCCESS)
        }
    }
}
