/// The overlay's displayed bounding rectangle in screen points. The overlay
/// stretches to cover the clip area, so this rarely matches the bitmap's
/// intrinsic resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl DisplayRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Maps a screen-space pointer position into bitmap pixel space,
/// compensating for the displayed scale of the overlay.
///
/// The result is undefined when `rect` has zero area; callers gate on the
/// overlay having been sized first.
pub fn map_to_bitmap(rect: DisplayRect, bitmap: (u32, u32), screen: (f32, f32)) -> (i32, i32) {
    let bx = (screen.0 - rect.left) * (bitmap.0 as f32 / rect.width);
    let by = (screen.1 - rect.top) * (bitmap.1 as f32 / rect.height);
    (bx.round() as i32, by.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_exactly_under_half_scale() {
        let rect = DisplayRect::new(0.0, 0.0, 960.0, 540.0);
        assert_eq!(map_to_bitmap(rect, (1920, 1080), (0.0, 0.0)), (0, 0));
        assert_eq!(
            map_to_bitmap(rect, (1920, 1080), (960.0, 540.0)),
            (1920, 1080)
        );
    }

    #[test]
    fn display_offset_is_subtracted_before_scaling() {
        let rect = DisplayRect::new(100.0, 50.0, 960.0, 540.0);
        assert_eq!(map_to_bitmap(rect, (1920, 1080), (100.0, 50.0)), (0, 0));
        assert_eq!(
            map_to_bitmap(rect, (1920, 1080), (580.0, 320.0)),
            (960, 540)
        );
    }

    #[test]
    fn upscaled_display_maps_down_into_the_bitmap() {
        let rect = DisplayRect::new(0.0, 0.0, 1280.0, 720.0);
        assert_eq!(map_to_bitmap(rect, (640, 360), (1280.0, 720.0)), (640, 360));
        assert_eq!(map_to_bitmap(rect, (640, 360), (640.0, 360.0)), (320, 180));
    }
}
