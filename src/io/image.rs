//! PNG preview of part placements with outlines and socket markers

use crate::io::configuration::{
    BACK_OUTLINE_COLOR, FRONT_OUTLINE_COLOR, MAX_PREVIEW_DIMENSION, SOCKET_MARKER_COLOR,
    SOCKET_MARKER_RADIUS,
};
use crate::io::error::{ComposeError, Result, file_system_error, invalid_parameter};
use crate::layout::{Bounds, Placement, bounds};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render placements into an image the size of their bounding box
///
/// Each drawable part is outlined, in a lighter color when it hangs behind
/// its parent, and every socket gets a small red square. Later placements
/// paint over earlier ones, matching draw order.
///
/// # Errors
///
/// Returns an error if:
/// - No placement is drawable
/// - The bounding box exceeds the maximum preview dimension
pub fn render_preview(placements: &[Placement]) -> Result<RgbaImage> {
    let area = bounds(placements).ok_or(ComposeError::EmptyPreview)?;
    let margin = i64::from(SOCKET_MARKER_RADIUS);
    let width = area.width() + 2 * margin;
    let height = area.height() + 2 * margin;

    if width > i64::from(MAX_PREVIEW_DIMENSION) || height > i64::from(MAX_PREVIEW_DIMENSION) {
        return Err(invalid_parameter(
            "preview size",
            &format!("{width}x{height}"),
            &format!("exceeds {MAX_PREVIEW_DIMENSION} pixels"),
        ));
    }

    let mut canvas = Canvas {
        img: RgbaImage::new(width as u32, height as u32),
        offset: [area.min_x - margin, area.min_y - margin],
    };

    for placement in placements {
        if placement.is_drawable() {
            let color = if placement.behind {
                BACK_OUTLINE_COLOR
            } else {
                FRONT_OUTLINE_COLOR
            };
            canvas.outline(placement, Rgba(color));
        }
    }

    for placement in placements {
        canvas.marker(placement.socket, Rgba(SOCKET_MARKER_COLOR));
    }

    Ok(canvas.img)
}

/// Render placements and save them as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_preview`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(placements: &[Placement], output_path: &Path) -> Result<()> {
    let img = render_preview(placements)?;

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path)
        .map_err(|e| ComposeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    log::debug!(path:? = output_path, width = img.width(), height = img.height(); "Wrote preview");
    Ok(())
}

struct Canvas {
    img: RgbaImage,
    offset: [i64; 2],
}

impl Canvas {
    // Pixels outside the canvas are skipped
    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (Ok(px), Ok(py)) = (
            u32::try_from(x - self.offset[0]),
            u32::try_from(y - self.offset[1]),
        ) else {
            return;
        };
        if px < self.img.width() && py < self.img.height() {
            self.img.put_pixel(px, py, color);
        }
    }

    fn outline(&mut self, placement: &Placement, color: Rgba<u8>) {
        let rect = Bounds {
            min_x: placement.x,
            min_y: placement.y,
            max_x: placement.right(),
            max_y: placement.bottom(),
        };
        if rect.width() <= 0 || rect.height() <= 0 {
            return;
        }
        for x in rect.min_x..rect.max_x {
            self.put(x, rect.min_y, color);
            self.put(x, rect.max_y - 1, color);
        }
        for y in rect.min_y..rect.max_y {
            self.put(rect.min_x, y, color);
            self.put(rect.max_x - 1, y, color);
        }
    }

    fn marker(&mut self, center: [i64; 2], color: Rgba<u8>) {
        let radius = i64::from(SOCKET_MARKER_RADIUS);
        for y in center[1] - radius..=center[1] + radius {
            for x in center[0] - radius..=center[0] + radius {
                self.put(x, y, color);
            }
        }
    }
}
