/// Read-only access to an interleaved image, one row slice at a time.
///
/// `row(y)` yields exactly `width() * channels()` samples; the backing storage
/// may be wider (`stride()` samples between rows) when the view is a
/// sub-window of a larger buffer.
pub trait ImageView {
    type Sample: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn channels(&self) -> usize;

    fn stride(&self) -> usize {
        self.width() * self.channels()
    }

    fn row(&self, y: usize) -> &[Self::Sample];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Sample];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.image.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

impl<I: ImageView> ExactSizeIterator for Rows<'_, I> {}
