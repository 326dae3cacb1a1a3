use std::path::Path;

use image::{ImageError, RgbImage};
use rayon::prelude::*;

use crate::color::{color_for_magnitude, Colormap};
use crate::fractal::FractalField;

/// Colorise un champ fractal en heatmap RGB puis l'enregistre au format
/// PNG. `thr` est le seuil de divergence de la génération : il borne les
/// magnitudes et sert de référence de normalisation.
///
/// La colorisation est parallélisée par lignes.
pub fn save_png(
    field: &FractalField,
    thr: f64,
    map: Colormap,
    output: &Path,
) -> Result<(), ImageError> {
    let n = field.side();

    let buffer: Vec<u8> = field
        .as_slice()
        .par_chunks(n)
        .flat_map(|row| {
            row.iter()
                .flat_map(|&mag| {
                    let (r, g, b) = color_for_magnitude(mag, thr, map);
                    [r, g, b]
                })
                .collect::<Vec<u8>>()
        })
        .collect();

    let img = RgbImage::from_raw(n as u32, n as u32, buffer).ok_or_else(|| {
        ImageError::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "impossible de créer l'image depuis le buffer",
        ))
    })?;

    // save() détecte le format depuis l'extension du chemin.
    img.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::{generate, FractalKind, GenerationConfig};

    #[test]
    fn test_save_png_roundtrip_dimensions() {
        let config = GenerationConfig {
            n: 16,
            ..GenerationConfig::default()
        };
        let field = generate(FractalKind::Mandelbrot, &config, None).unwrap();

        let dir = std::env::temp_dir();
        let path = dir.join("fractalgen_test_mandelbrot.png");
        save_png(&field, config.thr, Colormap::OrRd, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        let _ = std::fs::remove_file(&path);
    }
}
