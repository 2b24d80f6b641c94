use crate::DomainError;

pub const BYTES_PER_PIXEL: usize = 4;

/// Decoded RGBA8 pixels with straight (non-premultiplied) alpha, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DomainError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(BYTES_PER_PIXEL));
        if width == 0 || height == 0 || expected != Some(pixels.len()) {
            return Err(DomainError::InvalidBitmap {
                width,
                height,
                byte_len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, DomainError> {
        let count = (width as usize).saturating_mul(height as usize);
        Self::new(width, height, rgba.repeat(count))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0_u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions_and_short_buffers() {
        assert!(matches!(
            Bitmap::new(0, 4, Vec::new()),
            Err(DomainError::InvalidBitmap { width: 0, .. })
        ));
        assert!(matches!(
            Bitmap::new(2, 2, vec![0; 15]),
            Err(DomainError::InvalidBitmap { byte_len: 15, .. })
        ));
        assert!(Bitmap::new(2, 2, vec![0; 16]).is_ok());
    }

    #[test]
    fn pixel_reads_row_major_rgba() {
        let bitmap = Bitmap::new(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).expect("bitmap");
        assert_eq!(bitmap.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(bitmap.pixel(2, 0), None);
    }
}
