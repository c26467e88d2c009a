use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use std::io::{self, Read, Write};

/// Compresses one glyph's packed bytes into a standalone zlib stream.
///
/// No fallback to the raw bytes is made when the stream comes out larger than
/// its input, which is normal for tiny glyphs.
pub fn compress(packed: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(packed.len()), Compression::default());
    encoder.write_all(packed)?;
    encoder.finish()
}

/// The bytes stored in the atlas for one glyph: a zlib stream when
/// `enabled`, otherwise the packed bytes as they are.
pub fn encode_glyph(packed: Vec<u8>, enabled: bool) -> io::Result<Vec<u8>> {
    if enabled {
        compress(&packed)
    } else {
        Ok(packed)
    }
}

/// Inflates a single glyph's stream, as the display driver does on demand.
pub fn decompress(compressed: &[u8]) -> io::Result<Vec<u8>> {
    let mut packed = Vec::new();
    ZlibDecoder::new(compressed).read_to_end(&mut packed)?;
    Ok(packed)
}
