//! Decoded image types

/// Host-owned RGBA image, 8 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// RGBA pixel data interleaved [R, G, B, A, R, G, B, A, ...]
    pub data: Vec<u8>,
}

impl DecodedImage {
    pub const CHANNELS: usize = 4;

    /// RGBA value at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        self.data
            .get(offset..offset + Self::CHANNELS)
            .and_then(|px| px.try_into().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
