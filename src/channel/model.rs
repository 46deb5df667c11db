use image::{ImageBuffer, Pixel, Primitive, Rgba};

use super::Channel;

/// Pixel transform that keeps one colour sample and the alpha sample
///
/// The two other colour samples are zeroed. Applying the same model twice
/// gives the same pixel as applying it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelModel {
    channel: Channel,
}

impl ChannelModel {
    /// Red-only rendering of channel A
    pub const A: ChannelModel = ChannelModel { channel: Channel::A };

    /// Green-only rendering of channel B
    pub const B: ChannelModel = ChannelModel { channel: Channel::B };

    pub fn for_channel(channel: Channel) -> Self {
        ChannelModel { channel }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Converts a single pixel
    pub fn convert<T>(&self, pixel: Rgba<T>) -> Rgba<T>
    where
        T: Primitive + 'static,
        Rgba<T>: Pixel<Subpixel = T>,
    {
        let keep = self.channel.sample_index();
        let mut out = [T::DEFAULT_MIN_VALUE; 4];
        out[keep] = pixel.0[keep];
        out[3] = pixel.0[3];
        Rgba(out)
    }

    /// Converts every pixel of an image into a new buffer
    pub fn apply<T>(&self, image: &ImageBuffer<Rgba<T>, Vec<T>>) -> ImageBuffer<Rgba<T>, Vec<T>>
    where
        T: Primitive + 'static,
        Rgba<T>: Pixel<Subpixel = T>,
    {
        let mut out = image.clone();
        self.apply_in_place(&mut out);
        out
    }

    /// Converts every pixel of an image in place
    pub fn apply_in_place<T>(&self, image: &mut ImageBuffer<Rgba<T>, Vec<T>>)
    where
        T: Primitive + 'static,
        Rgba<T>: Pixel<Subpixel = T>,
    {
        for pixel in image.pixels_mut() {
            *pixel = self.convert(*pixel);
        }
    }
}
