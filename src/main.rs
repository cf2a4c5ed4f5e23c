use std::{
    env,
    fs::File,
    io::{self as stdio, BufReader, BufWriter, Write},
    process::ExitCode,
};

use legacy_schem::{
    io::{Result, WriteSchematic},
    scdef, VoxelVolume,
};
use log::{error, info};

/// Opens `path` for reading, `-` meaning stdin.
fn open_input(path: &str) -> stdio::Result<Box<dyn stdio::BufRead>> {
    Ok(match path {
        "-" => Box::new(stdio::stdin().lock()),
        _ => Box::new(BufReader::new(File::open(path)?)),
    })
}

/// Creates `path` for writing, `-` meaning stdout.
fn open_output(path: &str) -> stdio::Result<Box<dyn Write>> {
    Ok(match path {
        "-" => Box::new(BufWriter::new(stdio::stdout().lock())),
        _ => Box::new(BufWriter::new(File::create(path)?)),
    })
}

fn with_path(path: &str, e: stdio::Error) -> stdio::Error {
    stdio::Error::new(e.kind(), format!("{path}: {e}"))
}

fn run(input: &str, output: &str) -> Result<()> {
    let reader = open_input(input).map_err(|e| with_path(input, e))?;
    let mut writer = open_output(output).map_err(|e| with_path(output, e))?;

    let mut volume = VoxelVolume::new();
    let summary = scdef::read_placements(reader, &mut volume)?;
    info!(
        "{} placed, {} unknown, {} malformed",
        summary.placed, summary.unknown, summary.malformed
    );

    writer.write_schematic(&volume)?;
    writer.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        let program = args.first().map_or("legacy-schem", String::as_str);
        eprintln!("Usage: {program} <input|-> <output|->");
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
