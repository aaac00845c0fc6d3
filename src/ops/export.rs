//! Exporting collages as SVG cards.

use crate::collage::render::render_svg;
use crate::collage::{CollagePoem, PoemVariant};
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// Fails when `poem` has nothing to show for `variant`.
///
/// Only the manual variant can be missing; it exists after `compose`.
pub fn require_variant(poem: &CollagePoem, variant: PoemVariant) -> AppResult<()> {
    if variant == PoemVariant::Manual && poem.manual.is_none() {
        return Err(AppError::Collage(format!(
            "Collage for {} has no manual layout yet; run `mosaic compose` first",
            poem.date
        )));
    }
    Ok(())
}

/// Writes `variant` of `poem` to `path` as SVG, creating parent directories.
pub fn export_svg(poem: &CollagePoem, variant: PoemVariant, path: &Path) -> AppResult<()> {
    require_variant(poem, variant)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_svg(poem, variant))?;

    info!("Exported {} collage to {:?}", variant, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::{create_fragment, Layout, Line};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn poem() -> CollagePoem {
        let mut rng = StdRng::seed_from_u64(2);
        let line = Line::from(vec![
            create_fragment("晚风", &mut rng),
            create_fragment("<旧书>", &mut rng),
        ]);
        CollagePoem {
            id: "p".to_string(),
            title: "拼贴诗".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
            four_lines: Layout::from(vec![line.clone(), Line::new(), Line::new(), Line::new()]),
            eight_lines: Layout::from(vec![line]),
            manual: None,
            image: "https://example.com/a.jpg".to_string(),
            raw_pool: vec!["晚风".into(), "<旧书>".into()],
            font_family: "serif".to_string(),
        }
    }

    #[test]
    fn test_export_svg_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cards").join("2024-04-04.svg");

        export_svg(&poem(), PoemVariant::FourLines, &path).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("晚风"));
        assert!(svg.contains("&lt;旧书&gt;"));
    }

    #[test]
    fn test_export_manual_without_layout_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manual.svg");

        let result = export_svg(&poem(), PoemVariant::Manual, &path);

        assert!(matches!(result, Err(AppError::Collage(_))));
        assert!(!path.exists());
    }
}
