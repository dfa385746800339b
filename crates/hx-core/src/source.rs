use crate::image::{Image, ImageView, Rgba8};

/// Read-only random access to decoded RGBA pixels.
///
/// `pixel(x, y)` is defined for every `x < width()` and `y < height()` and
/// panics for anything outside that range.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixel(&self, x: usize, y: usize) -> Rgba8;
}

impl PixelSource for ImageView<'_, Rgba8> {
    #[inline]
    fn width(&self) -> usize {
        ImageView::width(self)
    }

    #[inline]
    fn height(&self) -> usize {
        ImageView::height(self)
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        match self.get(x, y) {
            Some(&px) => px,
            None => panic!(
                "pixel ({x}, {y}) outside {}x{} source",
                ImageView::width(self),
                ImageView::height(self)
            ),
        }
    }
}

impl PixelSource for Image<Rgba8> {
    #[inline]
    fn width(&self) -> usize {
        Image::width(self)
    }

    #[inline]
    fn height(&self) -> usize {
        Image::height(self)
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Rgba8 {
        self.as_view().pixel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, Rgba8};

    use super::PixelSource;

    fn corner<S: PixelSource>(src: &S) -> Rgba8 {
        src.pixel(src.width() - 1, src.height() - 1)
    }

    #[test]
    fn owned_and_borrowed_agree() {
        let data: Vec<Rgba8> = (0..6u8).map(|i| [i, i * 2, i * 3, 255]).collect();
        let img = Image::from_vec(3, 2, data).expect("valid image");

        assert_eq!(corner(&img), [5, 10, 15, 255]);
        assert_eq!(corner(&img.as_view()), [5, 10, 15, 255]);

        let sub = img.as_view().subview(0, 0, 2, 2).expect("valid subview");
        assert_eq!(corner(&sub), [4, 8, 12, 255]);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 source")]
    fn subview_pixel_past_width_panics() {
        let data: Vec<Rgba8> = (0..8u8).map(|i| [i, 0, 0, 255]).collect();
        let img = Image::from_vec(4, 2, data).expect("valid image");
        let sub = img.as_view().subview(0, 0, 2, 2).expect("valid subview");
        // Column 3 exists in the parent row but not in the subview.
        let _ = sub.pixel(3, 0);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 source")]
    fn owned_pixel_past_width_panics() {
        let img = Image::new_fill(2, 2, [1u8, 2, 3, 255]).expect("valid image");
        // Would alias (0, 1) if the column were not checked.
        let _ = img.pixel(2, 0);
    }
}
