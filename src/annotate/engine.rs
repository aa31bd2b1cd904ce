use crate::annotate::canvas::OverlayBitmap;
use crate::annotate::history::SnapshotHistory;
use crate::annotate::model::{Color, Tool, ToolState, ERASER_STAMP_SIZE, PEN_STROKE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EngineState {
    #[default]
    Idle,
    Drawing {
        last: (i32, i32),
    },
}

/// Pointer-down/move/up lifecycle for one overlay. Strokes are baked into
/// the bitmap as they are drawn; nothing is retained per stroke beyond the
/// last point of the in-progress path.
///
/// Drawing is only permitted while playback is paused: a pointer-down while
/// playing is ignored, as is any move outside the Drawing state.
#[derive(Debug, Clone, Default)]
pub struct StrokeEngine {
    state: EngineState,
}

impl StrokeEngine {
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, EngineState::Drawing { .. })
    }

    /// Anchors a new path. No pixels are touched until the first move.
    pub fn pointer_down(&mut self, pos: (i32, i32), paused: bool, canvas: &OverlayBitmap) {
        if !paused || !canvas.has_area() {
            return;
        }
        if self.is_drawing() {
            return;
        }
        self.state = EngineState::Drawing { last: pos };
    }

    /// Extends the in-progress path. Pen strokes a segment from the last
    /// point; the eraser stamps a fixed-size clear at the new point only,
    /// so fast motion leaves gaps. Returns whether the bitmap was touched.
    pub fn pointer_move(
        &mut self,
        pos: (i32, i32),
        paused: bool,
        tools: &ToolState,
        canvas: &mut OverlayBitmap,
    ) -> bool {
        let EngineState::Drawing { last } = self.state else {
            return false;
        };
        if !paused {
            return false;
        }

        match tools.tool {
            Tool::Pen => draw_segment(canvas, last, pos, tools.color, PEN_STROKE_WIDTH),
            Tool::Eraser => eraser_stamp(canvas, pos),
        }
        self.state = EngineState::Drawing { last: pos };
        true
    }

    /// Ends the stroke. Capture keys on the Drawing-to-Idle transition, not
    /// on pixels changed, so a click with no movement still captures.
    pub fn pointer_up(&mut self, history: &mut SnapshotHistory, canvas: &OverlayBitmap) -> bool {
        if !self.is_drawing() {
            return false;
        }
        self.state = EngineState::Idle;
        history.capture(canvas);
        true
    }

    /// Discards any in-progress path without capturing. Used when the
    /// overlay is re-bound mid-stroke.
    pub fn abort(&mut self) {
        self.state = EngineState::Idle;
    }
}

/// Rasterises a segment by walking it with Bresenham and stamping a round
/// brush at every cell.
pub(crate) fn draw_segment(
    canvas: &mut OverlayBitmap,
    start: (i32, i32),
    end: (i32, i32),
    color: Color,
    width: u32,
) {
    let mut x0 = start.0;
    let mut y0 = start.1;
    let x1 = end.0;
    let y1 = end.1;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        draw_brush(canvas, (x0, y0), color, width);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn draw_brush(canvas: &mut OverlayBitmap, center: (i32, i32), color: Color, width: u32) {
    let radius = (width.saturating_sub(1) / 2) as i32;
    for y in (center.1 - radius)..=(center.1 + radius) {
        for x in (center.0 - radius)..=(center.0 + radius) {
            let dx = x - center.0;
            let dy = y - center.1;
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel(x, y, color);
            }
        }
    }
}

/// One eraser stamp: clears the half-open square
/// `[x-8, x+8) x [y-8, y+8)` centred on the point.
pub(crate) fn eraser_stamp(canvas: &mut OverlayBitmap, center: (i32, i32)) {
    let half = (ERASER_STAMP_SIZE / 2) as i32;
    canvas.clear_rect(
        center.0 - half,
        center.1 - half,
        ERASER_STAMP_SIZE,
        ERASER_STAMP_SIZE,
    );
}
