use crate::Error;

/// One RGBA pixel, channels in R, G, B, A order.
pub type Rgba8 = [u8; 4];

/// Owned row-major image with `stride == width`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = pixel_count(width, height)?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &mut self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Result<Self, Error> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }
}

impl Image<Rgba8> {
    pub fn as_rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Hands the pixel storage over as raw bytes without copying.
    pub fn into_rgba_bytes(self) -> Vec<u8> {
        self.data.into_flattened()
    }
}

/// Borrowed read-only view. `stride` is in elements and may exceed `width`.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::InvalidDimensions {
            width,
            height,
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    pub fn subview(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ImageView<'a, T>, Error> {
        if x > self.width
            || y > self.height
            || width > (self.width - x)
            || height > (self.height - y)
        {
            return Err(Error::OutOfBounds);
        }

        let start = y
            .checked_mul(self.stride)
            .and_then(|v| v.checked_add(x))
            .ok_or(Error::OutOfBounds)?;
        let min_len = min_required_len(width, height, self.stride).ok_or(Error::OutOfBounds)?;
        let tail = self.data.get(start..).ok_or(Error::OutOfBounds)?;

        if tail.len() < min_len {
            return Err(Error::OutOfBounds);
        }

        Ok(ImageView {
            width,
            height,
            stride: self.stride,
            data: tail,
        })
    }
}

impl<'a> ImageView<'a, Rgba8> {
    /// Zero-copy view over a tightly packed `width * height * 4` byte buffer.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &'a [u8]) -> Result<Self, Error> {
        let expected = rgba_len(width, height)?;
        if bytes.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let data: &[Rgba8] = bytemuck::try_cast_slice(bytes).map_err(|_| Error::SizeMismatch {
            expected,
            actual: bytes.len(),
        })?;
        Self::from_slice(width, height, width, data)
    }
}

#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a mut [T],
}

impl<'a, T> ImageViewMut<'a, T> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a mut [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::InvalidDimensions {
            width,
            height,
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Backing storage trimmed to the rows this view covers, plus the stride.
    ///
    /// Splitting the slice into `stride`-sized chunks yields one chunk per
    /// row; only the first `width` elements of each chunk belong to the view.
    /// The last chunk may be shorter than `stride` but never than `width`.
    pub fn strided_rows_mut(&mut self) -> (&mut [T], usize) {
        let len = min_required_len(self.width, self.height, self.stride).unwrap_or(0);
        (&mut self.data[..len], self.stride.max(1))
    }
}

impl<'a> ImageViewMut<'a, Rgba8> {
    /// Mutable zero-copy view over a tightly packed RGBA byte buffer, e.g. a
    /// sink pre-sized by the caller.
    pub fn from_rgba_bytes_mut(
        width: usize,
        height: usize,
        bytes: &'a mut [u8],
    ) -> Result<Self, Error> {
        let expected = rgba_len(width, height)?;
        let actual = bytes.len();
        if actual != expected {
            return Err(Error::SizeMismatch { expected, actual });
        }

        let data: &mut [Rgba8] = bytemuck::try_cast_slice_mut(bytes)
            .map_err(|_| Error::SizeMismatch { expected, actual })?;
        Self::from_slice_mut(width, height, width, data)
    }
}

fn pixel_count(width: usize, height: usize) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })
}

/// Byte length of a tightly packed RGBA buffer.
fn rgba_len(width: usize, height: usize) -> Result<usize, Error> {
    pixel_count(width, height)?
        .checked_mul(4)
        .ok_or(Error::InvalidDimensions { width, height })
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }

    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}
