//! Region growing by color similarity.
//!
//! [`flood_fill`] grows a connected region outwards from a seed pixel,
//! overwriting accepted pixels with a fill color as it goes. Acceptance
//! compares colors as they were before the fill started, so the fill color
//! never feeds back into the growth.

use std::collections::VecDeque;

use rasterkit_image::{Color, Image, ImageError, Point, Rect};

/// Neighborhood used when growing a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    /// The four edge-adjacent neighbors.
    Four,
    /// Edge and corner neighbors.
    Eight,
}

/// Reference color a candidate pixel is compared against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangePolicy {
    /// Compare against the seed pixel's color. The region stays within a
    /// fixed ball around the seed.
    Fixed,
    /// Compare against the color of the neighbor the candidate was reached
    /// from. The region can drift across smooth gradients.
    Neighbor,
}

/// Summary of a grown region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Number of pixels in the region.
    pub area: usize,
    /// Tightest rectangle containing every region pixel.
    pub bounds: Rect,
    /// Mean pixel coordinate of the region, `(x, y)`.
    pub centroid: (f64, f64),
}

// Euclidean distance between two colors given as channel slices.
fn color_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

struct RegionStats {
    area: usize,
    min_x: usize,
    max_x: usize,
    min_y: usize,
    max_y: usize,
    sum_x: f64,
    sum_y: f64,
}

impl RegionStats {
    fn new(seed: Point) -> Self {
        Self {
            area: 1,
            min_x: seed.x,
            max_x: seed.x,
            min_y: seed.y,
            max_y: seed.y,
            sum_x: seed.x as f64,
            sum_y: seed.y as f64,
        }
    }

    fn accept(&mut self, x: usize, y: usize) {
        self.area += 1;
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.sum_x += x as f64;
        self.sum_y += y as f64;
    }

    fn finish(&self) -> Region {
        let area = self.area as f64;
        Region {
            area: self.area,
            bounds: Rect::new(
                self.min_x,
                self.min_y,
                self.max_x - self.min_x + 1,
                self.max_y - self.min_y + 1,
            ),
            centroid: (self.sum_x / area, self.sum_y / area),
        }
    }
}

/// Grow a region from `seed` and fill it with `fill`.
///
/// The seed pixel always joins the region. A candidate neighbor joins when
/// the Euclidean distance between its pre-fill color and the reference color
/// chosen by `policy` is at most `max_distance`. Accepted pixels are
/// overwritten immediately, so the fill is visible through any view sharing
/// the image's storage as soon as the call returns.
///
/// A pixel rejected against one neighbor can still join later through
/// another, which matters for [`RangePolicy::Neighbor`].
///
/// # Arguments
///
/// * `image` - The image to grow over and fill, modified in place.
/// * `seed` - Starting pixel in image coordinates.
/// * `max_distance` - Largest color distance a candidate may have.
/// * `fill` - Color written over accepted pixels.
/// * `connectivity` - Neighborhood shape.
/// * `policy` - Reference color selection.
///
/// # Returns
///
/// The [`Region`] statistics gathered while growing.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Color, Image, ImageSize, PixelEncoding, Point};
/// use rasterkit_imgproc::region::{flood_fill, Connectivity, RangePolicy};
///
/// let size = ImageSize { width: 3, height: 1 };
/// let mut image = Image::from_samples(size, 1, PixelEncoding::U8, &[10.0, 12.0, 200.0]).unwrap();
///
/// let region = flood_fill(
///     &mut image,
///     Point::new(0, 0),
///     5.0,
///     &Color::gray(255.0),
///     Connectivity::Four,
///     RangePolicy::Fixed,
/// )
/// .unwrap();
/// assert_eq!(region.area, 2);
/// assert_eq!(image.to_vec(), vec![255.0, 255.0, 200.0]);
/// ```
pub fn flood_fill(
    image: &mut Image,
    seed: Point,
    max_distance: f64,
    fill: &Color,
    connectivity: Connectivity,
    policy: RangePolicy,
) -> Result<Region, ImageError> {
    let width = image.width();
    let height = image.height();
    let channels = image.num_channels();
    if seed.x >= width || seed.y >= height {
        return Err(ImageError::PixelIndexOutOfBounds(
            seed.x, seed.y, width, height,
        ));
    }
    if fill.channels() != channels {
        return Err(ImageError::ChannelMismatch(channels, fill.channels()));
    }

    // colors as they were before any overwrite; all acceptance checks read
    // from this snapshot
    let original = image.to_vec();
    let color_of = |x: usize, y: usize| -> &[f64] {
        let start = (y * width + x) * channels;
        &original[start..start + channels]
    };

    let offsets: &[(isize, isize)] = match connectivity {
        Connectivity::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        Connectivity::Eight => &[
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ],
    };

    let mut visited = vec![false; width * height];
    let mut stats = RegionStats::new(seed);
    let mut frontier = VecDeque::new();

    visited[seed.y * width + seed.x] = true;
    image.set_color(seed.x, seed.y, fill)?;
    frontier.push_back((seed.x, seed.y));

    while let Some((x, y)) = frontier.pop_front() {
        for &(dx, dy) in offsets {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if visited[ny * width + nx] {
                continue;
            }
            let reference = match policy {
                RangePolicy::Fixed => color_of(seed.x, seed.y),
                RangePolicy::Neighbor => color_of(x, y),
            };
            if color_distance(color_of(nx, ny), reference) <= max_distance {
                visited[ny * width + nx] = true;
                image.set_color(nx, ny, fill)?;
                stats.accept(nx, ny);
                frontier.push_back((nx, ny));
            }
        }
    }

    Ok(stats.finish())
}
