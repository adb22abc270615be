//! naksha command line tool
//!
//! Loads maps the way the map server does and saves them the way the map
//! saver does.
//!
//! # Usage
//!
//! ```bash
//! # Print map geometry and cell counts
//! naksha info maps/office.yaml
//!
//! # Re-save a map as PNG (office_png.png + office_png.yaml)
//! naksha convert maps/office.yaml maps/office_png --format png
//!
//! # With a config file supplying defaults
//! naksha --config naksha.toml convert
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use naksha::NodeConfig;
use naksha::{MapSaver, MapServer, RasterFormat};

/// Occupancy grid map server tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to naksha.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a map and print its metadata
    Info {
        /// Map descriptor (YAML)
        descriptor: Option<PathBuf>,
    },

    /// Load a map, publish it, and save the published snapshot
    Convert {
        /// Map descriptor (YAML)
        descriptor: Option<PathBuf>,

        /// Output base path, without extension
        output: Option<PathBuf>,

        /// Output raster format: pgm or png
        #[arg(short, long)]
        format: Option<RasterFormat>,

        /// Occupied threshold written to the new descriptor
        #[arg(long)]
        occupied_thresh: Option<f64>,

        /// Free threshold written to the new descriptor
        #[arg(long)]
        free_thresh: Option<f64>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::load_default()?,
    };
    log::debug!("Config: {:?}", config);

    match args.command {
        Command::Info { descriptor } => {
            let descriptor = descriptor_path(descriptor, &config)?;
            let server = MapServer::open(&descriptor, &config.map.frame_id)?;
            print_info(&server);
        }
        Command::Convert {
            descriptor,
            output,
            format,
            occupied_thresh,
            free_thresh,
        } => {
            let descriptor = descriptor_path(descriptor, &config)?;
            if let Some(format) = format {
                config.saver.format = format;
            }
            if let Some(t) = occupied_thresh {
                config.saver.occupied_thresh = t;
            }
            if let Some(t) = free_thresh {
                config.saver.free_thresh = t;
            }
            config.validate()?;

            let output = output.unwrap_or_else(|| PathBuf::from(&config.saver.output));
            let server = MapServer::open(&descriptor, &config.map.frame_id)?;
            let saver = MapSaver::new(output, config.saver.save_options());

            let rx = server.subscribe_map();
            match saver.save_next(&rx, config.saver.wait_timeout())? {
                Some(saved) => {
                    println!("raster:     {}", saved.raster_path.display());
                    println!("descriptor: {}", saved.descriptor_path.display());
                }
                None => return Err("no map snapshot was published".into()),
            }
        }
    }

    Ok(())
}

fn descriptor_path(
    arg: Option<PathBuf>,
    config: &NodeConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    arg.or_else(|| config.map.descriptor.as_ref().map(PathBuf::from))
        .ok_or_else(|| "no map descriptor given on the command line or in [map] config".into())
}

fn print_info(server: &MapServer) {
    let map = server.get_map();
    let info = map.info();
    let counts = map.count_by_state();

    println!("descriptor: {}", server.descriptor_path().display());
    println!("frame:      {}", map.frame_id());
    println!("size:       {} x {} cells", info.width, info.height);
    println!("resolution: {} m/cell", info.resolution);
    println!(
        "origin:     ({}, {}, {})",
        info.origin.x, info.origin.y, info.origin.theta
    );
    println!(
        "cells:      {} free, {} occupied, {} unknown",
        counts.free, counts.occupied, counts.unknown
    );
}
