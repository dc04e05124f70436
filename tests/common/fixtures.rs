//! Test fixtures and constants.

/// Output colors used across tests
pub mod colors {
    use duotone::Pixel;

    pub const INK_HEX: &str = "#102030";
    pub const PAPER_HEX: &str = "#F0E0D0";

    pub const INK: Pixel = Pixel::rgb(0x10, 0x20, 0x30);
    pub const PAPER: Pixel = Pixel::rgb(0xF0, 0xE0, 0xD0);
}

/// Config with presets that differ from the embedded ones
pub const CUSTOM_CONFIG: &str = r##"
default_preset: ink
presets:
  ink:
    description: Ink on paper
    strength: 0.7
    color_dark: "#102030"
    color_bright: "#F0E0D0"
    algorithm: ordered
  grain:
    algorithm: blue-noise
    seed: 42
  off:
    algorithm: none
    downscale: 4
"##;

/// Packed RGBA diagonal gradient with an alpha ramp
pub fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let span = (width + height - 2).max(1);
    (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                let v = ((x + y) * 255 / span) as u8;
                [v, v / 2, 255 - v, (x * 255 / width.max(1)) as u8]
            })
        })
        .collect()
}

/// Packed RGBA frame of a single gray level
pub fn flat_rgba(width: u32, height: u32, level: u8) -> Vec<u8> {
    [level, level, level, 255].repeat((width * height) as usize)
}

pub fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// RGBA gradient PNG
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(width, height, png::ColorType::Rgba, &gradient_rgba(width, height))
}

/// Opaque RGB gradient PNG
pub fn gradient_rgb_png(width: u32, height: u32) -> Vec<u8> {
    let rgb: Vec<u8> = gradient_rgba(width, height)
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    encode_png(width, height, png::ColorType::Rgb, &rgb)
}

/// Opaque mid-gray PNG
pub fn gray_png(width: u32, height: u32, level: u8) -> Vec<u8> {
    encode_png(width, height, png::ColorType::Rgba, &flat_rgba(width, height, level))
}
