//! Card image decoding for on-screen preview.

pub const PREVIEW_MAX_DIMENSION: u32 = 1024;

#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let oversized =
        dynamic.width() > PREVIEW_MAX_DIMENSION || dynamic.height() > PREVIEW_MAX_DIMENSION;
    let resized = if oversized {
        dynamic
            .thumbnail(PREVIEW_MAX_DIMENSION, PREVIEW_MAX_DIMENSION)
            .to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]));
    let mut bytes = std::io::Cursor::new(Vec::new());
    buffer
        .write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_small_card_without_resizing() {
        let preview = decode_preview_image(&encode_test_png(4, 3)).expect("decode");
        assert_eq!((preview.width, preview.height), (4, 3));
        assert_eq!(preview.rgba.len(), 4 * 3 * 4);
    }

    #[test]
    fn shrinks_large_card_to_preview_bounds() {
        let preview = decode_preview_image(&encode_test_png(2048, 1024)).expect("decode");
        assert_eq!(preview.width, PREVIEW_MAX_DIMENSION as usize);
        assert_eq!(preview.height, 512);
    }

    #[test]
    fn keeps_card_at_exact_preview_bound() {
        let preview = decode_preview_image(&encode_test_png(PREVIEW_MAX_DIMENSION, 16))
            .expect("decode");
        assert_eq!(
            (preview.width, preview.height),
            (PREVIEW_MAX_DIMENSION as usize, 16)
        );
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(decode_preview_image(b"<html>not a card</html>").is_err());
    }
}
