/// Border extrapolation modes for sliding-window operators.
///
/// The mode is applied per axis, so corners combine both axes consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Out-of-bounds samples read zero in every channel.
    /// Corresponds to OpenCV's `BORDER_CONSTANT` with a zero value.
    #[default]
    Zero,

    /// Replicate the value of the nearest border pixel.
    /// Corresponds to OpenCV's `BORDER_REPLICATE`.
    Replicate,

    /// Reflect the image across the border, duplicating the border pixel.
    /// Corresponds to OpenCV's `BORDER_REFLECT`.
    Reflect,
}

impl BorderMode {
    /// Resolve a possibly out-of-bounds coordinate along one axis of length
    /// `len`.
    ///
    /// Returns `None` when the sample must read zero. An axis of length zero
    /// has no pixels to replicate or reflect, so every mode resolves to
    /// `None`.
    #[inline]
    pub fn resolve(&self, coord: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if coord >= 0 && (coord as usize) < len {
            return Some(coord as usize);
        }
        match self {
            BorderMode::Zero => None,
            BorderMode::Replicate => Some(coord.clamp(0, len as isize - 1) as usize),
            BorderMode::Reflect => Some(reflect_index(coord, len as isize) as usize),
        }
    }
}

// The reflected sequence repeats with period 2 * len, which keeps the
// mapping defined for offsets farther out than one image width.
fn reflect_index(coord: isize, len: isize) -> isize {
    let period = 2 * len;
    let m = ((coord % period) + period) % period;
    if m < len {
        m
    } else {
        period - m - 1
    }
}

/// A borrowed plane of wide samples that extends past its edges according to
/// a [`BorderMode`].
///
/// Sliding-window operators snapshot their source once and read every window
/// sample through this view, so border handling stays identical for every
/// channel and offset, corners included.
pub struct BorderedView<'a> {
    samples: &'a [f64],
    width: usize,
    height: usize,
    channels: usize,
    border: BorderMode,
}

impl<'a> BorderedView<'a> {
    /// Wrap a row-major interleaved sample buffer.
    ///
    /// The caller guarantees `samples.len() == width * height * channels`.
    pub fn new(
        samples: &'a [f64],
        width: usize,
        height: usize,
        channels: usize,
        border: BorderMode,
    ) -> Self {
        Self {
            samples,
            width,
            height,
            channels,
            border,
        }
    }

    /// Read the sample at `(x, y, channel)`, extrapolating out-of-bounds
    /// coordinates.
    #[inline]
    pub fn get(&self, x: isize, y: isize, channel: usize) -> f64 {
        match (
            self.border.resolve(x, self.width),
            self.border.resolve(y, self.height),
        ) {
            (Some(x), Some(y)) => self.samples[(y * self.width + x) * self.channels + channel],
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, BorderedView};

    #[test]
    fn in_bounds_is_identity() {
        for mode in [BorderMode::Zero, BorderMode::Replicate, BorderMode::Reflect] {
            for coord in 0..4 {
                assert_eq!(mode.resolve(coord, 4), Some(coord as usize));
            }
        }
    }

    #[test]
    fn zero_mode_yields_none_outside() {
        assert_eq!(BorderMode::Zero.resolve(-1, 4), None);
        assert_eq!(BorderMode::Zero.resolve(4, 4), None);
        assert_eq!(BorderMode::Zero.resolve(100, 4), None);
    }

    #[test]
    fn replicate_clamps_to_edges() {
        assert_eq!(BorderMode::Replicate.resolve(-5, 4), Some(0));
        assert_eq!(BorderMode::Replicate.resolve(-1, 4), Some(0));
        assert_eq!(BorderMode::Replicate.resolve(4, 4), Some(3));
        assert_eq!(BorderMode::Replicate.resolve(9, 4), Some(3));
    }

    #[test]
    fn reflect_duplicates_the_border_pixel() {
        assert_eq!(BorderMode::Reflect.resolve(-1, 4), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(-2, 4), Some(1));
        assert_eq!(BorderMode::Reflect.resolve(4, 4), Some(3));
        assert_eq!(BorderMode::Reflect.resolve(5, 4), Some(2));
    }

    #[test]
    fn empty_axis_resolves_to_none() {
        for mode in [BorderMode::Zero, BorderMode::Replicate, BorderMode::Reflect] {
            assert_eq!(mode.resolve(-3, 0), None);
            assert_eq!(mode.resolve(0, 0), None);
            assert_eq!(mode.resolve(3, 0), None);
        }
    }

    #[test]
    fn reflect_is_total_far_out_of_bounds() {
        assert_eq!(BorderMode::Reflect.resolve(-5, 4), Some(3));
        assert_eq!(BorderMode::Reflect.resolve(-8, 4), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(8, 4), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(11, 4), Some(3));
        assert_eq!(BorderMode::Reflect.resolve(-1, 1), Some(0));
        assert_eq!(BorderMode::Reflect.resolve(7, 1), Some(0));
    }

    #[test]
    fn zero_fill_reads_zero_before_origin() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let view = BorderedView::new(&samples, 2, 2, 1, BorderMode::Zero);
        assert_eq!(view.get(-1, 0, 0), 0.0);
        assert_eq!(view.get(0, -1, 0), 0.0);
        assert_eq!(view.get(-1, -1, 0), 0.0);
        assert_eq!(view.get(0, 0, 0), 1.0);
    }

    #[test]
    fn corner_reads_combine_both_axes() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let replicate = BorderedView::new(&samples, 2, 2, 1, BorderMode::Replicate);
        assert_eq!(replicate.get(-3, -3, 0), 1.0);
        assert_eq!(replicate.get(5, 5, 0), 4.0);

        let reflect = BorderedView::new(&samples, 2, 2, 1, BorderMode::Reflect);
        assert_eq!(reflect.get(-1, -1, 0), 1.0);
        assert_eq!(reflect.get(2, 2, 0), 4.0);
    }

    #[test]
    fn channels_are_extrapolated_consistently() {
        let samples = [1.0, 10.0, 2.0, 20.0];
        let view = BorderedView::new(&samples, 2, 1, 2, BorderMode::Replicate);
        assert_eq!(view.get(-1, 0, 0), 1.0);
        assert_eq!(view.get(-1, 0, 1), 10.0);
        assert_eq!(view.get(2, 0, 0), 2.0);
        assert_eq!(view.get(2, 0, 1), 20.0);
    }
}
