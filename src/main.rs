use clap::Parser;
use log::error;
use std::path::Path;

use mat2yolo::config::{Args, Mode};
use mat2yolo::{dataset, inspect};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if !Path::new(&args.annotation_dir).exists() {
        error!(
            "The specified annotation_dir does not exist: {}",
            args.annotation_dir
        );
        std::process::exit(1);
    }
    if !Path::new(&args.image_dir).exists() {
        error!("The specified image_dir does not exist: {}", args.image_dir);
        std::process::exit(1);
    }

    let result = match args.mode {
        Mode::Convert => dataset::process_dataset(&args).map(|_| ()),
        Mode::Inspect => inspect::inspect_dataset(&args),
    };

    if let Err(e) = result {
        error!("Processing failed: {}", e);
        std::process::exit(1);
    }
}
