use std::path::Path;

use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::RenderError;

/// Rasterize an SVG document at `scale` times its intrinsic size.
///
/// System fonts are loaded, plus anything under a local `fonts/` directory.
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, RenderError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidScale(scale));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();

        let local_fonts = Path::new("fonts");
        if local_fonts.is_dir() {
            fontdb.load_fonts_dir(local_fonts);
        }

        configure_font_fallbacks(fontdb);
    }

    let tree =
        usvg::Tree::from_str(svg, &opts).map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RenderError::PngEncode(e.to_string()))
}

/// Point the generic sans-serif family at a face that covers Sinhala when
/// one is installed, else at any sans face.
fn configure_font_fallbacks(fontdb: &mut usvg::fontdb::Database) {
    let mut sinhala_family: Option<String> = None;
    let mut sans_family: Option<String> = None;
    let mut first_family: Option<String> = None;

    for face in fontdb.faces() {
        for (family, _) in &face.families {
            if first_family.is_none() {
                first_family = Some(family.clone());
            }

            let lower = family.to_ascii_lowercase();
            if sinhala_family.is_none() && lower.contains("sinhala") {
                sinhala_family = Some(family.clone());
            }
            if sans_family.is_none() && lower.contains("sans") {
                sans_family = Some(family.clone());
            }
        }
    }

    let preferred = sinhala_family
        .as_deref()
        .or(sans_family.as_deref())
        .or(first_family.as_deref());
    if let Some(family) = preferred {
        tracing::debug!(family, "sans-serif fallback");
        fontdb.set_sans_serif_family(family);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20" fill="#ff0000"/></svg>"##;

    #[test]
    fn rejects_non_positive_scale() {
        assert!(matches!(
            svg_to_png(SQUARE, 0.0),
            Err(RenderError::InvalidScale(_))
        ));
        assert!(matches!(
            svg_to_png(SQUARE, f32::NAN),
            Err(RenderError::InvalidScale(_))
        ));
    }

    #[test]
    fn scaled_png_has_expected_dimensions() {
        let png = svg_to_png(SQUARE, 2.0).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        // IHDR width and height, big-endian
        assert_eq!(u32::from_be_bytes([png[16], png[17], png[18], png[19]]), 20);
        assert_eq!(u32::from_be_bytes([png[20], png[21], png[22], png[23]]), 40);
    }

    #[test]
    fn malformed_svg_is_reported() {
        assert!(matches!(
            svg_to_png("<svg", 1.0),
            Err(RenderError::SvgParse(_))
        ));
    }
}
