/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rasterkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A pixel coordinate with non-negative components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    /// Horizontal coordinate, growing rightwards.
    pub x: usize,
    /// Vertical coordinate, growing downwards.
    pub y: usize,
}

impl Point {
    /// Create a new point.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle addressing a sub-region of an image.
///
/// The rectangle spans `[x, x + width)` horizontally and `[y, y + height)`
/// vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Horizontal offset of the top-left corner.
    pub x: usize,
    /// Vertical offset of the top-left corner.
    pub y: usize,
    /// Width of the rectangle in pixels.
    pub width: usize,
    /// Height of the rectangle in pixels.
    pub height: usize,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and extents.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right-most column covered by the rectangle.
    ///
    /// Saturates at `usize::MAX` when the extent overflows.
    pub fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom-most row covered by the rectangle.
    ///
    /// Saturates at `usize::MAX` when the extent overflows.
    pub fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// The extents of the rectangle as an [`ImageSize`].
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains_point(&self, point: Point) -> bool {
        // subtraction instead of `x + width`, which can overflow
        point.x >= self.x
            && point.x - self.x < self.width
            && point.y >= self.y
            && point.y - self.y < self.height
    }

    /// Whether `other` lies fully inside the rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.width <= self.width
            && other.height <= self.height
            && other.x - self.x <= self.width - other.width
            && other.y - self.y <= self.height - other.height
    }
}
