use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Numeric encoding of a pixel storage buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelEncoding {
    /// Narrow 8-bit integer samples, clamped to `[0, 255]` on write.
    U8,
    /// Wide 64-bit floating point samples, stored unclamped.
    F64,
}

/// The tagged sample buffer behind a pixel storage.
///
/// Both variants share the `(x, y, channel)` addressing contract; only the
/// sample width differs.
#[derive(Clone, Debug)]
pub enum PixelData {
    /// 8-bit integer samples.
    U8(Vec<u8>),
    /// 64-bit floating point samples.
    F64(Vec<f64>),
}

/// Round a wide sample to the nearest narrow value and clamp to `[0, 255]`.
#[inline]
pub fn quantize_u8(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// A dense row-major sample buffer addressed as `(x, y, channel)`.
///
/// Dimensions and channel count are fixed at construction and the buffer is
/// never resized. Samples are read and written through a widened `f64`
/// interface; the narrow encoding rounds to nearest and clamps on write.
#[derive(Clone, Debug)]
pub struct PixelStorage {
    data: PixelData,
    width: usize,
    height: usize,
    channels: usize,
}

impl PixelStorage {
    /// Allocate a zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize, encoding: PixelEncoding) -> Self {
        let len = width * height * channels;
        let data = match encoding {
            PixelEncoding::U8 => PixelData::U8(vec![0; len]),
            PixelEncoding::F64 => PixelData::F64(vec![0.0; len]),
        };
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Allocate a buffer from row-major interleaved wide samples.
    ///
    /// The caller guarantees `samples.len() == width * height * channels`.
    /// Narrow storage rounds and clamps each sample on ingestion.
    pub fn from_samples(
        width: usize,
        height: usize,
        channels: usize,
        encoding: PixelEncoding,
        samples: &[f64],
    ) -> Self {
        let data = match encoding {
            PixelEncoding::U8 => PixelData::U8(samples.iter().map(|&x| quantize_u8(x)).collect()),
            PixelEncoding::F64 => PixelData::F64(samples.to_vec()),
        };
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Allocate a buffer from row-major interleaved 8-bit samples.
    ///
    /// The caller guarantees `bytes.len() == width * height * channels`.
    /// Wide storage widens each sample losslessly.
    pub fn from_bytes(
        width: usize,
        height: usize,
        channels: usize,
        encoding: PixelEncoding,
        bytes: &[u8],
    ) -> Self {
        let data = match encoding {
            PixelEncoding::U8 => PixelData::U8(bytes.to_vec()),
            PixelEncoding::F64 => PixelData::F64(bytes.iter().map(|&x| f64::from(x)).collect()),
        };
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// The numeric encoding of the buffer.
    pub fn encoding(&self) -> PixelEncoding {
        match self.data {
            PixelData::U8(_) => PixelEncoding::U8,
            PixelData::F64(_) => PixelEncoding::F64,
        }
    }

    /// Width of the buffer in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the buffer in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of samples in the buffer.
    pub fn num_samples(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// Flat index of the sample at `(x, y, channel)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, channel: usize) -> usize {
        (y * self.width + x) * self.channels + channel
    }

    /// Read the sample at the flat index, widened to `f64`.
    #[inline]
    pub fn read(&self, index: usize) -> f64 {
        match &self.data {
            PixelData::U8(data) => f64::from(data[index]),
            PixelData::F64(data) => data[index],
        }
    }

    /// Write a wide sample at the flat index.
    ///
    /// Narrow storage rounds to nearest and clamps to `[0, 255]`; wide
    /// storage keeps the raw value.
    #[inline]
    pub fn write(&mut self, index: usize, value: f64) {
        match &mut self.data {
            PixelData::U8(data) => data[index] = quantize_u8(value),
            PixelData::F64(data) => data[index] = value,
        }
    }
}

/// Shared handle to a pixel storage.
///
/// Aliasing images hold clones of the same handle; the buffer is freed when
/// the last one drops.
pub(crate) type SharedStorage = Arc<RwLock<PixelStorage>>;

pub(crate) fn shared(storage: PixelStorage) -> SharedStorage {
    Arc::new(RwLock::new(storage))
}

// A poisoned lock only means a panic elsewhere while holding the guard; the
// buffer itself stays valid, so the poison flag is dropped.
pub(crate) fn read_guard(storage: &SharedStorage) -> RwLockReadGuard<'_, PixelStorage> {
    match storage.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub(crate) fn write_guard(storage: &SharedStorage) -> RwLockWriteGuard<'_, PixelStorage> {
    match storage.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
