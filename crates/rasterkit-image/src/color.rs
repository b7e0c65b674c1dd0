/// A per-pixel tuple of channel intensities.
///
/// The channel count is fixed at construction and the values are immutable.
/// Intensities are carried as 64-bit floats regardless of the destination
/// encoding; clamping to `[0, 255]` happens only when a color is written
/// into narrow storage.
///
/// # Examples
///
/// ```
/// use rasterkit_image::Color;
///
/// let c = Color::rgb(255.0, 128.0, 0.0);
///
/// assert_eq!(c.channels(), 3);
/// assert_eq!(c.channel(1), Some(128.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Color(Vec<f64>);

impl Color {
    /// Create a color from a vector of channel intensities.
    pub fn new(channels: Vec<f64>) -> Self {
        Self(channels)
    }

    /// Create a color with `channels` channels all set to `value`.
    pub fn splat(value: f64, channels: usize) -> Self {
        Self(vec![value; channels])
    }

    /// Create a single-channel grayscale color.
    pub fn gray(value: f64) -> Self {
        Self(vec![value])
    }

    /// Create a three-channel color in RGB channel order.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self(vec![r, g, b])
    }

    /// Create a four-channel color in RGBA channel order.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self(vec![r, g, b, a])
    }

    /// Number of channels in the color.
    pub fn channels(&self) -> usize {
        self.0.len()
    }

    /// Get the intensity of the channel at `index`, or `None` if out of bounds.
    pub fn channel(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// View the channel intensities as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Compare two colors channel-wise within an absolute tolerance.
    ///
    /// Returns `false` when the channel counts differ.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| (a - b).abs() <= eps)
    }

    /// Euclidean distance between two colors over their channels.
    ///
    /// Both colors must have the same channel count.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::Color;
    ///
    /// let a = Color::rgb(0.0, 0.0, 0.0);
    /// let b = Color::rgb(3.0, 0.0, 4.0);
    ///
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    pub fn distance(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.0.len(),
            other.0.len(),
            "colors must have the same channel count"
        );
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f64>> for Color {
    fn from(channels: Vec<f64>) -> Self {
        Self(channels)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use approx::assert_relative_eq;

    #[test]
    fn constructors() {
        assert_eq!(Color::gray(7.0).channels(), 1);
        assert_eq!(Color::rgb(1.0, 2.0, 3.0).channels(), 3);
        assert_eq!(Color::rgba(1.0, 2.0, 3.0, 4.0).channels(), 4);
        assert_eq!(Color::splat(0.5, 5).as_slice(), &[0.5; 5]);
    }

    #[test]
    fn channel_access() {
        let c = Color::new(vec![10.0, 20.0]);
        assert_eq!(c.channel(0), Some(10.0));
        assert_eq!(c.channel(1), Some(20.0));
        assert_eq!(c.channel(2), None);
    }

    #[test]
    fn equality_is_element_wise() {
        assert_eq!(Color::rgb(1.0, 2.0, 3.0), Color::new(vec![1.0, 2.0, 3.0]));
        assert_ne!(Color::rgb(1.0, 2.0, 3.0), Color::rgb(1.0, 2.0, 3.5));
        assert_ne!(Color::gray(1.0), Color::splat(1.0, 2));
    }

    #[test]
    fn approx_eq_tolerance() {
        let a = Color::rgb(1.0, 2.0, 3.0);
        let b = Color::rgb(1.0 + 1e-7, 2.0, 3.0 - 1e-7);
        assert!(a.approx_eq(&b, 1e-6));
        assert!(!a.approx_eq(&b, 1e-8));
        assert!(!a.approx_eq(&Color::gray(1.0), 1e-6));
    }

    #[test]
    fn euclidean_distance() {
        let a = Color::gray(10.0);
        let b = Color::gray(13.0);
        assert_eq!(a.distance(&b), 3.0);

        let a = Color::rgb(0.0, 0.0, 0.0);
        let b = Color::rgb(1.0, 1.0, 1.0);
        assert_relative_eq!(a.distance(&b), 3.0f64.sqrt());
    }

    #[test]
    #[should_panic(expected = "colors must have the same channel count")]
    fn distance_rejects_mismatched_channel_counts() {
        let _ = Color::gray(1.0).distance(&Color::rgb(1.0, 2.0, 3.0));
    }
}
