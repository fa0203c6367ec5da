use crate::utils::error::{PngError, PngResult};
use std::ops::Range;

pub(crate) trait SafeAccess<T> {
    fn get_range_safe(&self, range: Range<usize>) -> PngResult<&[T]>;
}

impl<T> SafeAccess<T> for [T] {
    /// Retrieves the sub-slice `range`, or a `Data` error when it does not fit.
    fn get_range_safe(&self, range: Range<usize>) -> PngResult<&[T]> {
        let len = self.len();
        self.get(range.clone()).ok_or_else(|| {
            PngError::data(format!("Range {}..{} out of bounds (len {})", range.start, range.end, len))
        })
    }
}
