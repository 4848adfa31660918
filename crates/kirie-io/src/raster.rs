//! Photo decoding and Blob URL creation.
//!
//! Validates uploaded bytes as a decodable raster image, extracts the
//! pixel dimensions the engine needs for fitting, and turns the bytes
//! into a browser-displayable Blob URL via the Web API.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while preparing an uploaded photo for display.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The bytes could not be decoded as a supported image format.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for RasterError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A decoded photo, ready to hand to the engine and the `<image>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    /// Source pixel width.
    pub width: u32,
    /// Source pixel height.
    pub height: u32,
    /// Blob URL serving the original bytes. Must be revoked via
    /// [`revoke_blob_url`] when replaced.
    pub blob_url: String,
}

/// Decode uploaded bytes and wrap them in a Blob URL.
///
/// The bytes are decoded once to validate the format and read the
/// dimensions; the Blob serves the untouched original so the browser
/// does its own (progressive, hardware-backed) rendering.
///
/// # Errors
///
/// Returns [`RasterError::Decode`] for empty input or an unsupported
/// or corrupt image. Returns [`RasterError::JsError`] if Blob or URL
/// creation fails.
pub fn decode_photo(bytes: &[u8]) -> Result<DecodedPhoto, RasterError> {
    if bytes.is_empty() {
        return Err(RasterError::Decode("empty file".into()));
    }
    let format = image::guess_format(bytes)?;
    let (width, height) = image::load_from_memory_with_format(bytes, format)
        .map(|img| (img.width(), img.height()))?;

    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_for(format));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let blob_url = web_sys::Url::create_object_url_with_blob(&blob)?;

    Ok(DecodedPhoto {
        width,
        height,
        blob_url,
    })
}

/// MIME type for a detected image format.
const fn mime_for(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Bmp => "image/bmp",
        image::ImageFormat::WebP => "image/webp",
        _ => "image/png",
    }
}

/// Revoke a Blob URL previously created by [`decode_photo`].
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked or garbage collected.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
