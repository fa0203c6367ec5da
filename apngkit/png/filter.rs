use crate::utils::error::{PngError, PngResult};
use crate::utils::traits::SafeAccess;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        FilterType::None,
        FilterType::Sub,
        FilterType::Up,
        FilterType::Average,
        FilterType::Paeth,
    ];

    pub fn from_code(code: u8) -> PngResult<FilterType> {
        match code {
            0 => Ok(FilterType::None),
            1 => Ok(FilterType::Sub),
            2 => Ok(FilterType::Up),
            3 => Ok(FilterType::Average),
            4 => Ok(FilterType::Paeth),
            _ => Err(PngError::unsupported(format!("Unknown filter type {}", code))),
        }
    }
}

/// Picks whichever of left, up and upper-left is closest to `left + up - upper_left`.
/// Ties go to left, then up.
pub fn paeth_predictor(left: u8, up: u8, upper_left: u8) -> u8 {
    let a = left as i16;
    let b = up as i16;
    let c = upper_left as i16;

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        up
    } else {
        upper_left
    }
}

fn predict(filter: FilterType, left: u8, up: u8, upper_left: u8) -> u8 {
    match filter {
        FilterType::None => 0,
        FilterType::Sub => left,
        FilterType::Up => up,
        FilterType::Average => ((left as u16 + up as u16) >> 1) as u8,
        FilterType::Paeth => paeth_predictor(left, up, upper_left),
    }
}

/// Reverses `filter` on one scanline in place.
///
/// `prior` is the previous reconstructed scanline, all zeros for the first row.
pub fn unfilter_row(filter: FilterType, row: &mut [u8], prior: &[u8], bytes_per_pixel: usize) {
    if filter == FilterType::None {
        return;
    }

    for i in 0..row.len() {
        let left = if i >= bytes_per_pixel { row[i - bytes_per_pixel] } else { 0 };
        let up = prior.get(i).copied().unwrap_or(0);
        let upper_left = if i >= bytes_per_pixel {
            prior.get(i - bytes_per_pixel).copied().unwrap_or(0)
        } else {
            0
        };

        row[i] = row[i].wrapping_add(predict(filter, left, up, upper_left));
    }
}

/// Applies `filter` to one raw scanline, appending the filtered bytes to `out`.
pub fn filter_row(filter: FilterType, row: &[u8], prior: &[u8], bytes_per_pixel: usize, out: &mut Vec<u8>) {
    out.reserve(row.len());

    for i in 0..row.len() {
        let left = if i >= bytes_per_pixel { row[i - bytes_per_pixel] } else { 0 };
        let up = prior.get(i).copied().unwrap_or(0);
        let upper_left = if i >= bytes_per_pixel {
            prior.get(i - bytes_per_pixel).copied().unwrap_or(0)
        } else {
            0
        };

        out.push(row[i].wrapping_sub(predict(filter, left, up, upper_left)));
    }
}

/// Reconstructs `height` scanlines of `row_bytes` bytes each.
///
/// Every scanline in `data` is prefixed with its filter byte. Bytes past the
/// last scanline are ignored.
pub fn unfilter_scanlines(data: &[u8], row_bytes: usize, height: usize, bytes_per_pixel: usize) -> PngResult<Vec<u8>> {
    let stride = row_bytes
        .checked_add(1)
        .ok_or_else(|| PngError::data("Scanline length overflows"))?;
    let needed = stride
        .checked_mul(height)
        .ok_or_else(|| PngError::data(format!("{} scanlines of {} bytes overflow", height, stride)))?;

    if data.len() < needed {
        return Err(PngError::data(format!(
            "Decompressed image data is {} bytes, expected at least {}",
            data.len(),
            needed
        )));
    }

    // bounded by `needed`
    let mut out = vec![0u8; row_bytes * height];
    let zero_row = vec![0u8; row_bytes];

    for y in 0..height {
        let scanline = data.get_range_safe(y * stride..(y + 1) * stride)?;
        let filter = FilterType::from_code(scanline[0])?;

        let (done, rest) = out.split_at_mut(y * row_bytes);
        let prior = if y == 0 { &zero_row[..] } else { &done[(y - 1) * row_bytes..] };
        let row = &mut rest[..row_bytes];

        row.copy_from_slice(&scanline[1..]);
        unfilter_row(filter, row, prior, bytes_per_pixel);
    }

    Ok(out)
}

/// Filters raw rows with a single filter type, prefixing each with its filter byte.
pub fn filter_scanlines(raw: &[u8], row_bytes: usize, bytes_per_pixel: usize, filter: FilterType) -> Vec<u8> {
    if row_bytes == 0 {
        return Vec::new();
    }

    let height = raw.len() / row_bytes;
    let mut out = Vec::with_capacity(height * (row_bytes + 1));
    let zero_row = vec![0u8; row_bytes];

    for (y, row) in raw.chunks_exact(row_bytes).enumerate() {
        let prior = if y == 0 { &zero_row[..] } else { &raw[(y - 1) * row_bytes..y * row_bytes] };

        out.push(filter as u8);
        filter_row(filter, row, prior, bytes_per_pixel, &mut out);
    }

    out
}
