use crate::png::chunk::{BlendOp, DisposeOp, FrameControl};
use crate::utils::error::{PngError, PngResult};

/// Carries the animation canvas from one frame to the next.
#[derive(Debug, Clone)]
pub struct Compositor {
    width: u32,
    height: u32,
    canvas: Option<Vec<u8>>,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Compositor {
            width,
            height,
            canvas: None,
        }
    }

    fn canvas_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Draws one decoded sub-image and returns a copy of the resulting canvas.
    ///
    /// `Background` starts from a cleared canvas; `None` and `Previous` start
    /// from the carried one. After a `Previous` frame the carried canvas goes
    /// back to what it was before the frame was drawn.
    pub fn compose(&mut self, control: &FrameControl, sub_image: &[u8]) -> PngResult<Vec<u8>> {
        self.check_frame(control)?;

        let expected = control.width as usize * control.height as usize * 4;
        if sub_image.len() != expected {
            return Err(PngError::data(format!(
                "Frame {} has {} bytes of pixels, expected {}",
                control.sequence_number,
                sub_image.len(),
                expected
            )));
        }

        let mut canvas = match control.dispose_op {
            DisposeOp::Background => vec![0u8; self.canvas_len()],
            DisposeOp::None | DisposeOp::Previous => {
                self.canvas.take().unwrap_or_else(|| vec![0u8; self.canvas_len()])
            }
        };

        let restore = match control.dispose_op {
            DisposeOp::Previous => Some(canvas.clone()),
            _ => None,
        };

        self.draw(&mut canvas, control, sub_image);

        let snapshot = canvas.clone();
        self.canvas = Some(restore.unwrap_or(canvas));

        Ok(snapshot)
    }

    /// Fails with a `Data` error unless the frame rectangle is non-empty and
    /// lies inside the canvas. Run it before sizing any buffer from `control`.
    pub fn check_frame(&self, control: &FrameControl) -> PngResult<()> {
        if control.width == 0 || control.height == 0 {
            return Err(PngError::data(format!(
                "Frame {} has zero size {}x{}",
                control.sequence_number, control.width, control.height
            )));
        }

        let right = control.x_offset.checked_add(control.width);
        let bottom = control.y_offset.checked_add(control.height);

        match (right, bottom) {
            (Some(r), Some(b)) if r <= self.width && b <= self.height => Ok(()),
            _ => Err(PngError::data(format!(
                "Frame {} ({}x{} at {},{}) does not fit the {}x{} canvas",
                control.sequence_number,
                control.width,
                control.height,
                control.x_offset,
                control.y_offset,
                self.width,
                self.height
            ))),
        }
    }

    fn draw(&self, canvas: &mut [u8], control: &FrameControl, sub_image: &[u8]) {
        let row_bytes = control.width as usize * 4;
        let stride = self.width as usize * 4;

        for (y, src_row) in sub_image.chunks_exact(row_bytes).enumerate() {
            let start = (control.y_offset as usize + y) * stride + control.x_offset as usize * 4;
            let dst_row = &mut canvas[start..start + row_bytes];

            match control.blend_op {
                BlendOp::Source => dst_row.copy_from_slice(src_row),
                BlendOp::Over => {
                    for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                        blend_over(dst, src);
                    }
                }
            }
        }
    }
}

/// `dst = round(dst * (1 - a) + src * a)` on all four channels, then opaque alpha.
pub fn blend_over(dst: &mut [u8], src: &[u8]) {
    let a = src[3] as f32 / 255.0;

    for i in 0..4 {
        let value = dst[i] as f32 * (1.0 - a) + src[i] as f32 * a;
        dst[i] = value.round().clamp(0.0, 255.0) as u8;
    }

    dst[3] = 255;
}
