//! Interoperability with the `weezl` codec in both directions.

use lzwpress_lzw::{LzwConfig, compress, decompress};
use weezl::BitOrder;
use weezl::decode::Decoder as WeezlDecoder;
use weezl::encode::Encoder as WeezlEncoder;

fn random_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn samples() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"A".to_vec(),
        b"TOBEORNOTTOBEORTOBEORNOT".to_vec(),
        vec![0u8; 10_000],
        b"The quick brown fox jumps over the lazy dog. ".repeat(200),
        random_bytes(300, 1),
        random_bytes(20_000, 2),
        random_bytes(100_000, 3),
    ]
}

#[test]
fn test_weezl_decodes_tiff_streams() {
    for data in samples() {
        let compressed = compress(&data, LzwConfig::TIFF).unwrap();
        let decoded = WeezlDecoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .decode(&compressed)
            .expect("weezl rejected the stream");
        assert_eq!(decoded, data, "mismatch for {} bytes", data.len());
    }
}

#[test]
fn test_weezl_decodes_gif_streams() {
    for data in samples() {
        let compressed = compress(&data, LzwConfig::GIF).unwrap();
        let decoded = WeezlDecoder::new(BitOrder::Lsb, 8)
            .decode(&compressed)
            .expect("weezl rejected the stream");
        assert_eq!(decoded, data, "mismatch for {} bytes", data.len());
    }
}

#[test]
fn test_weezl_decodes_every_length_near_width_change() {
    let source = random_bytes(600, 77);
    for len in 240..600 {
        let data = &source[..len];

        let tiff = compress(data, LzwConfig::TIFF).unwrap();
        let decoded = WeezlDecoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .decode(&tiff)
            .unwrap();
        assert_eq!(decoded, data, "tiff mismatch at length {len}");

        let gif = compress(data, LzwConfig::GIF).unwrap();
        let decoded = WeezlDecoder::new(BitOrder::Lsb, 8).decode(&gif).unwrap();
        assert_eq!(decoded, data, "gif mismatch at length {len}");
    }
}

#[test]
fn test_weezl_decodes_small_code_sizes() {
    for code_size in 2..=7u8 {
        let modulus = 1u32 << code_size;
        let data: Vec<u8> = (0..5_000u32)
            .map(|i| ((i * 13 + i / 5) % modulus) as u8)
            .collect();

        let compressed = compress(&data, LzwConfig::gif(code_size)).unwrap();
        let decoded = WeezlDecoder::new(BitOrder::Lsb, code_size)
            .decode(&compressed)
            .unwrap();
        assert_eq!(decoded, data, "mismatch for code size {code_size}");
    }
}

#[test]
fn test_decode_weezl_streams() {
    for data in samples() {
        let tiff = WeezlEncoder::with_tiff_size_switch(BitOrder::Msb, 8)
            .encode(&data)
            .unwrap();
        assert_eq!(decompress(&tiff, LzwConfig::TIFF).unwrap(), data);

        let gif = WeezlEncoder::new(BitOrder::Lsb, 8).encode(&data).unwrap();
        assert_eq!(decompress(&gif, LzwConfig::GIF).unwrap(), data);
    }
}
