use anyhow::{bail, Result};
use image::{Rgba, RgbaImage};

/// Encode an image as PNG in memory
pub fn image_to_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    image.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )?;
    Ok(buffer)
}

/// Decode a PNG buffer back into an RGBA image
pub fn png_to_image(buffer: &[u8]) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(buffer, image::ImageFormat::Png)?;
    Ok(image.to_rgba8())
}

pub fn count_color(image: &RgbaImage, color: Rgba<u8>) -> usize {
    image.pixels().filter(|p| **p == color).count()
}

/// Assert that two images are the same, with helpful error messages
pub fn assert_images_equal(generated: &RgbaImage, expected: &RgbaImage) -> Result<()> {
    if generated.dimensions() != expected.dimensions() {
        bail!(
            "Image dimensions do not match: {:?} vs {:?}",
            generated.dimensions(),
            expected.dimensions()
        );
    }

    let diff_pixels = generated
        .pixels()
        .zip(expected.pixels())
        .filter(|(a, b)| a != b)
        .count();
    if diff_pixels != 0 {
        bail!("Generated image does not match ({diff_pixels} pixel differences)");
    }
    Ok(())
}
