use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    conversions::timing::{PipelineTimings, Timer},
    normalize::FrameNormalizer,
    raw::{LinearFluxReader, RawFrameReader},
    tiff::{ExportConfig, OutputFormat, StandardTiffWriter, TiffWriter},
};

/// Converts captured linear flux buffers into TIFF snapshots.
pub struct ThermalToTiffPipeline<R: RawFrameReader, W: TiffWriter> {
    reader: R,
    writer: W,
    normalizer: FrameNormalizer,
    config: ExportConfig,
}

impl ThermalToTiffPipeline<LinearFluxReader, StandardTiffWriter> {
    pub fn new(config: ExportConfig) -> Self {
        Self::with_custom(LinearFluxReader, StandardTiffWriter, config)
    }
}

impl<R: RawFrameReader, W: TiffWriter> ThermalToTiffPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ExportConfig) -> Self {
        Self {
            reader,
            writer,
            normalizer: FrameNormalizer::new(),
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Frame dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    pub fn convert(
        &self,
        input_data: &[u8],
        width: u32,
        height: u32,
        output: &mut dyn Write,
    ) -> Result<()> {
        self.convert_with_timings(input_data, width, height, output)
            .map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        width: u32,
        height: u32,
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting thermal frame to TIFF conversion");

        let frame = {
            let _span = tracing::info_span!("decode_raw").entered();
            let timer = Timer::start("decode_raw");
            let frame = self.reader.read_frame(input_data, width, height)?;
            timings.record(timer);
            frame
        };

        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            let timer = Timer::start("validate_dimensions");
            self.validate_dimensions(frame.width, frame.height)?;
            timings.record(timer);
        }

        match self.config.format {
            OutputFormat::Grayscale => {
                let image = {
                    let _span = tracing::info_span!("normalize").entered();
                    let timer = Timer::start("normalize");
                    let image = self.normalizer.normalize(&frame)?;
                    timings.record(timer);
                    image
                };

                let _span = tracing::info_span!("encode_tiff").entered();
                let timer = Timer::start("encode_tiff");
                self.writer.write_grayscale(&image, output, &self.config)?;
                timings.record(timer);
            }
            OutputFormat::LinearFlux => {
                let _span = tracing::info_span!("encode_tiff").entered();
                let timer = Timer::start("encode_tiff");
                self.writer.write_linear_flux(&frame, output, &self.config)?;
                timings.record(timer);
            }
        }

        info!(
            width = frame.width,
            height = frame.height,
            "Conversion complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(timings)
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        width: u32,
        height: u32,
        output_path: Q,
    ) -> Result<PipelineTimings> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Encode into memory first so a failed conversion never leaves a
        // truncated file behind.
        let mut encoded = Vec::new();
        let timings = self.convert_with_timings(&input_data, width, height, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(timings)
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }
}
