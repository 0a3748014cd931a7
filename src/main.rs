use anyhow::{Context, bail};
use thermal_frame_rs::image_pipeline::{ExportConfig, OutputFormat, ThermalToTiffPipeline, TiffCompression};
use thermal_frame_rs::logger;

use tracing::{error, info};

const USAGE: &str = "usage: thermal_frame_rs <input.raw> <width> <height> <output.tiff> [--linear]";

fn main() -> anyhow::Result<()> {
    logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (positional, flags): (Vec<&String>, Vec<&String>) =
        args.iter().partition(|arg| !arg.starts_with("--"));

    let [input, width, height, output] = positional.as_slice() else {
        bail!(USAGE);
    };
    let width: u32 = width.parse().with_context(|| format!("invalid width {width:?}"))?;
    let height: u32 = height.parse().with_context(|| format!("invalid height {height:?}"))?;

    let format = if flags.iter().any(|flag| flag.as_str() == "--linear") {
        OutputFormat::LinearFlux
    } else {
        OutputFormat::Grayscale
    };

    info!("Starting thermal_frame_rs...");

    let config = ExportConfig::builder()
        .compression(TiffCompression::DeflateFast)
        .format(format)
        .build();
    let pipeline = ThermalToTiffPipeline::new(config);

    info!("Compression: {:?}", pipeline.config().compression);
    info!("Output: {:?}", pipeline.config().format);

    match pipeline.convert_file(input, width, height, output) {
        Ok(timings) => {
            info!("Conversion successful!");
            timings.log_summary();
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).context("thermal frame conversion failed")
        }
    }
}
