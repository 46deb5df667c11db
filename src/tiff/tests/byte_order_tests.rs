//! Tests for byte order detection and handlers

extern crate std;

use std::io::Cursor;
use byteorder::{LittleEndian, BigEndian, WriteBytesExt};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler, LittleEndianHandler, BigEndianHandler};

#[test]
fn test_byte_order_detection() {
    let mut cursor = Cursor::new(b"II".to_vec());
    std::assert_eq!(ByteOrder::detect(&mut cursor).unwrap(), ByteOrder::LittleEndian);

    let mut cursor = Cursor::new(b"MM".to_vec());
    std::assert_eq!(ByteOrder::detect(&mut cursor).unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_byte_order_detection_invalid() {
    let mut cursor = Cursor::new(vec![0x34, 0x12]);
    std::assert!(ByteOrder::detect(&mut cursor).is_err());
}

#[test]
fn test_handlers_read_both_orders() {
    let mut le = Vec::new();
    le.write_u16::<LittleEndian>(0x1234).unwrap();
    le.write_u32::<LittleEndian>(0x12345678).unwrap();
    le.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();
    let mut be = Vec::new();
    be.write_u16::<BigEndian>(0x1234).unwrap();
    be.write_u32::<BigEndian>(0x12345678).unwrap();
    be.write_u64::<BigEndian>(0x1234567890ABCDEF).unwrap();

    let handlers: [(&dyn ByteOrderHandler, Vec<u8>); 2] = [(&LittleEndianHandler, le), (&BigEndianHandler, be)];
    for (handler, bytes) in handlers {
        let mut cursor = Cursor::new(bytes);
        std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
        std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
        std::assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
    }
}

#[test]
fn test_sample_conversion() {
    std::assert_eq!(ByteOrder::LittleEndian.u16_from_bytes([0x01, 0x02]), 0x0201);
    std::assert_eq!(ByteOrder::BigEndian.u16_from_bytes([0x01, 0x02]), 0x0102);
    std::assert_eq!(ByteOrder::BigEndian.u16_to_bytes(0xABCD), [0xAB, 0xCD]);
}
