use crate::color::Color;
use crate::error::ImageError;
use crate::geometry::{ImageSize, Rect};
use crate::storage::{self, quantize_u8, PixelEncoding, PixelStorage, SharedStorage};

/// Absolute tolerance for wide-encoded sample comparisons in image equality.
pub const SAMPLE_EPSILON: f64 = 1e-6;

/// A logical view over a rectangle of a shared pixel storage.
///
/// An image addresses its samples as `(x, y, channel)` with the origin at the
/// top-left of its rectangle. Views created with [`Image::sub_image`] and
/// [`Image::channel_view`] alias the same storage, so writes through one view
/// are visible through every overlapping view. [`Image::duplicate`] breaks
/// aliasing by deep-cloning the samples. `Clone` on `Image` clones the view
/// handle, not the samples.
///
/// The backing buffer lives as long as any view over it.
///
/// # Examples
///
/// ```
/// use rasterkit_image::{Image, ImageSize, PixelEncoding, Rect};
///
/// let mut image = Image::new(
///     ImageSize {
///         width: 4,
///         height: 4,
///     },
///     1,
///     PixelEncoding::U8,
/// )
/// .unwrap();
///
/// // writes through a sub-image are visible through the parent
/// let mut inner = image.sub_image(Rect::new(1, 1, 2, 2)).unwrap();
/// inner.set(0, 0, 0, 200.0).unwrap();
///
/// assert_eq!(image.get(1, 1, 0).unwrap(), 200.0);
/// ```
#[derive(Clone)]
pub struct Image {
    storage: SharedStorage,
    rect: Rect,
    channel_base: usize,
    channels: usize,
    encoding: PixelEncoding,
}

impl Image {
    /// Create a new zero-filled image.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels; both dimensions must be positive.
    /// * `channels` - The number of channels per pixel; must be positive.
    /// * `encoding` - The numeric encoding of the backing storage.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension or the channel count is zero.
    pub fn new(
        size: ImageSize,
        channels: usize,
        encoding: PixelEncoding,
    ) -> Result<Self, ImageError> {
        Self::check_geometry(size, channels)?;
        let storage = PixelStorage::new(size.width, size.height, channels, encoding);
        Ok(Self::root(storage, channels, encoding))
    }

    /// Create a new image with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid or the color's channel
    /// count does not match `channels`.
    pub fn from_color(
        size: ImageSize,
        channels: usize,
        encoding: PixelEncoding,
        color: &Color,
    ) -> Result<Self, ImageError> {
        Self::check_geometry(size, channels)?;
        if color.channels() != channels {
            return Err(ImageError::ChannelMismatch(channels, color.channels()));
        }
        let len = size.width * size.height * channels;
        let samples: Vec<f64> = color.as_slice().iter().copied().cycle().take(len).collect();
        let storage =
            PixelStorage::from_samples(size.width, size.height, channels, encoding, &samples);
        Ok(Self::root(storage, channels, encoding))
    }

    /// Create a new image from row-major interleaved wide samples.
    ///
    /// The sample order is `(x, y, channel)` with the channel running
    /// fastest. Narrow storage rounds and clamps each sample to `[0, 255]`
    /// on ingestion.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid or the sample count does
    /// not match `width * height * channels`.
    pub fn from_samples(
        size: ImageSize,
        channels: usize,
        encoding: PixelEncoding,
        samples: &[f64],
    ) -> Result<Self, ImageError> {
        Self::check_geometry(size, channels)?;
        let expected = size.width * size.height * channels;
        if samples.len() != expected {
            return Err(ImageError::InvalidSampleCount(samples.len(), expected));
        }
        let storage =
            PixelStorage::from_samples(size.width, size.height, channels, encoding, samples);
        Ok(Self::root(storage, channels, encoding))
    }

    /// Create a new image from row-major interleaved 8-bit samples.
    ///
    /// Channel order is preserved; wide storage widens each sample
    /// losslessly.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry is invalid or the byte count does
    /// not match `width * height * channels`.
    pub fn from_bytes(
        size: ImageSize,
        channels: usize,
        encoding: PixelEncoding,
        bytes: &[u8],
    ) -> Result<Self, ImageError> {
        Self::check_geometry(size, channels)?;
        let expected = size.width * size.height * channels;
        if bytes.len() != expected {
            return Err(ImageError::InvalidSampleCount(bytes.len(), expected));
        }
        let storage = PixelStorage::from_bytes(size.width, size.height, channels, encoding, bytes);
        Ok(Self::root(storage, channels, encoding))
    }

    fn check_geometry(size: ImageSize, channels: usize) -> Result<(), ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::InvalidImageSize(size.width, size.height));
        }
        if channels == 0 {
            return Err(ImageError::InvalidChannelCount(channels));
        }
        Ok(())
    }

    fn root(storage: PixelStorage, channels: usize, encoding: PixelEncoding) -> Self {
        let rect = Rect::new(0, 0, storage.width(), storage.height());
        Self {
            storage: storage::shared(storage),
            rect,
            channel_base: 0,
            channels,
            encoding,
        }
    }

    /// The size of the view in pixels.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.rect.width,
            height: self.rect.height,
        }
    }

    /// Width of the view in pixels.
    pub fn width(&self) -> usize {
        self.rect.width
    }

    /// Height of the view in pixels.
    pub fn height(&self) -> usize {
        self.rect.height
    }

    /// Number of channels visible through the view.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// The numeric encoding of the backing storage.
    pub fn encoding(&self) -> PixelEncoding {
        self.encoding
    }

    /// The region of the backing storage this view addresses.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn check_pixel(&self, x: usize, y: usize) -> Result<(), ImageError> {
        if x >= self.rect.width || y >= self.rect.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.rect.width,
                self.rect.height,
            ));
        }
        Ok(())
    }

    fn check_channel(&self, channel: usize) -> Result<(), ImageError> {
        if channel >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, self.channels));
        }
        Ok(())
    }

    #[inline]
    fn sample_index(&self, storage: &PixelStorage, x: usize, y: usize, channel: usize) -> usize {
        storage.index(
            self.rect.x + x,
            self.rect.y + y,
            self.channel_base + channel,
        )
    }

    /// Read the sample at `(x, y, channel)`, widened to `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates or the channel index are out of
    /// bounds.
    pub fn get(&self, x: usize, y: usize, channel: usize) -> Result<f64, ImageError> {
        self.check_pixel(x, y)?;
        self.check_channel(channel)?;
        let storage = storage::read_guard(&self.storage);
        let index = self.sample_index(&storage, x, y, channel);
        Ok(storage.read(index))
    }

    /// Write a sample at `(x, y, channel)`.
    ///
    /// Narrow storage rounds the value to the nearest integer and clamps it
    /// to `[0, 255]`; wide storage keeps the raw value. The write is visible
    /// through every view aliasing the same storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates or the channel index are out of
    /// bounds.
    pub fn set(
        &mut self,
        x: usize,
        y: usize,
        channel: usize,
        value: f64,
    ) -> Result<(), ImageError> {
        self.check_pixel(x, y)?;
        self.check_channel(channel)?;
        let mut storage = storage::write_guard(&self.storage);
        let index = self.sample_index(&storage, x, y, channel);
        storage.write(index, value);
        Ok(())
    }

    /// Read every channel at `(x, y)` as a [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of bounds.
    pub fn color_at(&self, x: usize, y: usize) -> Result<Color, ImageError> {
        self.check_pixel(x, y)?;
        let storage = storage::read_guard(&self.storage);
        let channels = (0..self.channels)
            .map(|c| storage.read(self.sample_index(&storage, x, y, c)))
            .collect();
        Ok(Color::new(channels))
    }

    /// Write every channel at `(x, y)` from a [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates are out of bounds or the color's
    /// channel count does not match the view.
    pub fn set_color(&mut self, x: usize, y: usize, color: &Color) -> Result<(), ImageError> {
        self.check_pixel(x, y)?;
        if color.channels() != self.channels {
            return Err(ImageError::ChannelMismatch(self.channels, color.channels()));
        }
        let mut storage = storage::write_guard(&self.storage);
        for (c, &value) in color.as_slice().iter().enumerate() {
            let index = self.sample_index(&storage, x, y, c);
            storage.write(index, value);
        }
        Ok(())
    }

    /// Create an aliasing view over a rectangle of this view.
    ///
    /// The rectangle is expressed in this view's coordinates; the returned
    /// image's origin maps to the rectangle's top-left corner. Writes are
    /// bidirectionally visible between the two views.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle has a zero dimension or is not
    /// fully contained in this view.
    pub fn sub_image(&self, rect: Rect) -> Result<Image, ImageError> {
        if rect.width == 0 || rect.height == 0 {
            return Err(ImageError::InvalidImageSize(rect.width, rect.height));
        }
        if rect.right() > self.rect.width || rect.bottom() > self.rect.height {
            return Err(ImageError::RectOutOfBounds(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                self.rect.width,
                self.rect.height,
            ));
        }
        Ok(Image {
            storage: SharedStorage::clone(&self.storage),
            rect: Rect::new(
                self.rect.x + rect.x,
                self.rect.y + rect.y,
                rect.width,
                rect.height,
            ),
            channel_base: self.channel_base,
            channels: self.channels,
            encoding: self.encoding,
        })
    }

    /// Create an aliasing single-channel view, not a copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel index is out of bounds.
    pub fn channel_view(&self, channel: usize) -> Result<Image, ImageError> {
        self.check_channel(channel)?;
        Ok(Image {
            storage: SharedStorage::clone(&self.storage),
            rect: self.rect,
            channel_base: self.channel_base + channel,
            channels: 1,
            encoding: self.encoding,
        })
    }

    /// Deep-clone the view into an image with independent storage.
    ///
    /// The result compares equal to the source and later writes to either
    /// are invisible to the other.
    pub fn duplicate(&self) -> Image {
        let samples = self.to_vec();
        let storage = PixelStorage::from_samples(
            self.rect.width,
            self.rect.height,
            self.channels,
            self.encoding,
            &samples,
        );
        Self::root(storage, self.channels, self.encoding)
    }

    /// Overwrite every pixel of the view with `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the color's channel count does not match the view.
    pub fn fill(&mut self, color: &Color) -> Result<(), ImageError> {
        if color.channels() != self.channels {
            return Err(ImageError::ChannelMismatch(self.channels, color.channels()));
        }
        let mut storage = storage::write_guard(&self.storage);
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                for (c, &value) in color.as_slice().iter().enumerate() {
                    let index = self.sample_index(&storage, x, y, c);
                    storage.write(index, value);
                }
            }
        }
        Ok(())
    }

    /// Copy every sample from an image of identical geometry into this view.
    ///
    /// The source is snapshotted first, so copying between overlapping views
    /// of the same storage is well defined.
    ///
    /// # Errors
    ///
    /// Returns an error if the sizes or channel counts differ.
    pub fn copy_from(&mut self, other: &Image) -> Result<(), ImageError> {
        if self.size() != other.size() {
            return Err(ImageError::SizeMismatch(
                self.rect.width,
                self.rect.height,
                other.rect.width,
                other.rect.height,
            ));
        }
        if self.channels != other.channels {
            return Err(ImageError::ChannelMismatch(self.channels, other.channels));
        }
        let samples = other.to_vec();
        let mut storage = storage::write_guard(&self.storage);
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                for c in 0..self.channels {
                    let value = samples[(y * self.rect.width + x) * self.channels + c];
                    let index = self.sample_index(&storage, x, y, c);
                    storage.write(index, value);
                }
            }
        }
        Ok(())
    }

    /// Snapshot the view as row-major interleaved wide samples.
    pub fn to_vec(&self) -> Vec<f64> {
        let storage = storage::read_guard(&self.storage);
        let mut samples = Vec::with_capacity(self.rect.width * self.rect.height * self.channels);
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                for c in 0..self.channels {
                    samples.push(storage.read(self.sample_index(&storage, x, y, c)));
                }
            }
        }
        samples
    }

    /// Export the view as row-major interleaved 8-bit samples.
    ///
    /// Channel order is preserved; every sample is rounded and clamped to
    /// `[0, 255]` regardless of the internal encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let storage = storage::read_guard(&self.storage);
        let mut bytes = Vec::with_capacity(self.rect.width * self.rect.height * self.channels);
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                for c in 0..self.channels {
                    bytes.push(quantize_u8(
                        storage.read(self.sample_index(&storage, x, y, c)),
                    ));
                }
            }
        }
        bytes
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("rect", &self.rect)
            .field("channels", &self.channels)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Value equality over the view contents.
///
/// Two images are equal when their sizes and channel counts match and every
/// sample matches. If either side is wide-encoded the samples compare within
/// [`SAMPLE_EPSILON`]; narrow-to-narrow comparison is exact.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() || self.channels != other.channels {
            return false;
        }
        let a = self.to_vec();
        let b = other.to_vec();
        match (self.encoding, other.encoding) {
            (PixelEncoding::U8, PixelEncoding::U8) => a == b,
            _ => a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x - y).abs() <= SAMPLE_EPSILON),
        }
    }
}
