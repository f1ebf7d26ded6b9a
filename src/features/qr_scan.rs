//! Camera frame decoding for the scan overlay.

use crate::error::{ShellError, ShellResult};
use rxing::common::HybridBinarizer;
use rxing::Exceptions;
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintValue, DecodeHints, Luma8LuminanceSource,
    MultiFormatReader, Reader,
};
use std::collections::HashSet;

/// Decode a QR code from a camera luminance (Y) plane.
///
/// `row_stride` is the byte distance between rows as reported by the camera
/// analyzer; padded rows are repacked before decoding. `Ok(None)` means the
/// frame holds no readable code.
pub fn decode_qr_frame_luma(
    luma_data: &[u8],
    width: u32,
    height: u32,
    row_stride: u32,
) -> ShellResult<Option<String>> {
    let pixels = pack_luma_rows(luma_data, width, height, row_stride)?;

    let hints = DecodeHints::default()
        .with(DecodeHintValue::TryHarder(true))
        .with(DecodeHintValue::PossibleFormats(HashSet::from([BarcodeFormat::QR_CODE])));

    let luma_source = Luma8LuminanceSource::new(pixels, width, height);
    let binarizer = HybridBinarizer::new(luma_source);
    let mut binary_bitmap = BinaryBitmap::new(binarizer);

    let mut reader = MultiFormatReader::default();
    match reader.decode_with_hints(&mut binary_bitmap, &hints) {
        Ok(result) => Ok(Some(result.getText().to_string())),
        Err(Exceptions::NotFoundException(_)) => Ok(None),
        Err(e) => Err(ShellError::Decode(format!("{e:?}"))),
    }
}

fn pack_luma_rows(data: &[u8], width: u32, height: u32, row_stride: u32) -> ShellResult<Vec<u8>> {
    let width = width as usize;
    let height = height as usize;
    let stride = (row_stride as usize).max(width);
    if width == 0 || height == 0 {
        return Err(ShellError::Decode("empty_frame".into()));
    }
    let needed = stride * (height - 1) + width;
    if data.len() < needed {
        return Err(ShellError::Decode(format!(
            "short_frame:{}<{}",
            data.len(),
            needed
        )));
    }
    if stride == width {
        return Ok(data[..width * height].to_vec());
    }
    let mut packed = Vec::with_capacity(width * height);
    for row in data.chunks(stride).take(height) {
        packed.extend_from_slice(&row[..width]);
    }
    Ok(packed)
}
