use std::io::{Cursor, Write};
use tracing::debug;
use tiff::encoder::{TiffEncoder, TiffValue, colortype::{ColorType, Gray16, RGBA8}};
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::normalize::GrayscalePixelBuffer;
use crate::image_pipeline::raw::RawThermalFrame;
use crate::image_pipeline::tiff::types::{ExportConfig, TiffCompression};
use crate::image_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

impl StandardTiffWriter {
    fn encode<C>(
        &self,
        width: u32,
        height: u32,
        data: &[C::Inner],
        output: &mut dyn Write,
        config: &ExportConfig,
    ) -> Result<()>
    where
        C: ColorType,
        [C::Inner]: TiffValue,
    {
        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    1 => tiff::tags::Predictor::None,
                    2 => tiff::tags::Predictor::Horizontal,
                    // 3 is floating point prediction, meaningless for integer samples
                    other => {
                        return Err(ConversionError::EncodeError(format!(
                            "unsupported TIFF predictor {other}"
                        )));
                    }
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<C>(width, height, data)
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;
        Ok(())
    }
}

impl TiffWriter for StandardTiffWriter {
    fn write_grayscale(&self, image: &GrayscalePixelBuffer, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding grayscale TIFF: {}x{}", image.width, image.height);
        self.encode::<RGBA8>(image.width, image.height, &image.pixels, output, config)?;
        debug!("TIFF encoding complete");
        Ok(())
    }

    fn write_linear_flux(&self, frame: &RawThermalFrame, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding linear flux TIFF: {}x{}", frame.width, frame.height);
        frame.validate()?;
        self.encode::<Gray16>(frame.width, frame.height, &frame.samples, output, config)?;
        debug!("TIFF encoding complete");
        Ok(())
    }
}
