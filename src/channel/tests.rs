use image::{ImageBuffer, Rgba};

use super::{Channel, ChannelModel};

#[test]
fn test_channel_a_keeps_red_and_alpha() {
    let pixel = Rgba([1000u16, 2000, 3000, 40000]);
    assert_eq!(ChannelModel::A.convert(pixel), Rgba([1000, 0, 0, 40000]));
}

#[test]
fn test_channel_b_keeps_green_and_alpha() {
    let pixel = Rgba([10u8, 20, 30, 255]);
    assert_eq!(ChannelModel::B.convert(pixel), Rgba([0, 20, 0, 255]));
}

#[test]
fn test_conversion_is_idempotent() {
    let samples = [
        Rgba([0u16, 0, 0, 0]),
        Rgba([65535, 65535, 65535, 65535]),
        Rgba([123, 4567, 8910, 1112]),
    ];

    for model in [ChannelModel::A, ChannelModel::B] {
        for pixel in samples {
            let once = model.convert(pixel);
            assert_eq!(model.convert(once), once);
        }
    }
}

#[test]
fn test_apply_converts_whole_image() {
    let mut image = ImageBuffer::from_pixel(3, 2, Rgba([9u8, 8, 7, 6]));
    image.put_pixel(2, 1, Rgba([1, 2, 3, 4]));

    let isolated = ChannelModel::for_channel(Channel::B).apply(&image);

    assert_eq!(isolated.get_pixel(0, 0), &Rgba([0, 8, 0, 6]));
    assert_eq!(isolated.get_pixel(2, 1), &Rgba([0, 2, 0, 4]));
    // source untouched
    assert_eq!(image.get_pixel(0, 0), &Rgba([9, 8, 7, 6]));
}

#[test]
fn test_channel_parse() {
    assert_eq!(Channel::parse("650"), Some(Channel::A));
    assert_eq!(Channel::parse(" B "), Some(Channel::B));
    assert_eq!(Channel::parse("blue"), None);
}
