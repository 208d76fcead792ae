//! Multipart message framing.
//!
//! A message is an ordered list of byte frames, written as a big-endian
//! `u32` frame count followed by each frame as a big-endian `u32` length and
//! its bytes.

use std::io;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Upper bound on the encoded size of one message.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

const LEN_SIZE: usize = 4;

/// Codec for multipart messages.
#[derive(Debug, Clone)]
pub struct MultipartCodec {
    max_message_size: usize,
}

impl MultipartCodec {
    pub fn new() -> Self {
        Self::with_max_message_size(MAX_MESSAGE_SIZE)
    }

    pub fn with_max_message_size(max_message_size: usize) -> Self {
        Self { max_message_size }
    }

    fn too_large(&self, size: usize) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "message of {} bytes exceeds limit of {} bytes",
                size, self.max_message_size
            ),
        )
    }
}

impl Default for MultipartCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MultipartCodec {
    type Item = Vec<Bytes>;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Walk the buffer without consuming it until the whole message is in.
        let mut cursor = &src[..];
        if cursor.len() < LEN_SIZE {
            return Ok(None);
        }
        let frame_count = cursor.get_u32() as usize;
        let mut total = LEN_SIZE;
        let mut lengths = Vec::with_capacity(frame_count.min(64));

        for _ in 0..frame_count {
            if cursor.len() < LEN_SIZE {
                src.reserve(LEN_SIZE);
                return Ok(None);
            }
            let len = cursor.get_u32() as usize;
            total += LEN_SIZE + len;
            if total > self.max_message_size {
                return Err(self.too_large(total));
            }
            if cursor.len() < len {
                src.reserve(total - src.len());
                return Ok(None);
            }
            cursor.advance(len);
            lengths.push(len);
        }

        let mut message = src.split_to(total);
        message.advance(LEN_SIZE);
        let frames = lengths
            .into_iter()
            .map(|len| {
                message.advance(LEN_SIZE);
                message.split_to(len).freeze()
            })
            .collect();
        Ok(Some(frames))
    }
}

impl<T: AsRef<[u8]>> Encoder<Vec<T>> for MultipartCodec {
    type Error = io::Error;

    fn encode(&mut self, frames: Vec<T>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let total = LEN_SIZE
            + frames
                .iter()
                .map(|frame| LEN_SIZE + frame.as_ref().len())
                .sum::<usize>();
        if total > self.max_message_size {
            return Err(self.too_large(total));
        }

        dst.reserve(total);
        dst.put_u32(frames.len() as u32);
        for frame in &frames {
            let frame = frame.as_ref();
            dst.put_u32(frame.len() as u32);
            dst.put_slice(frame);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(frames: Vec<&str>) -> BytesMut {
        let mut buf = BytesMut::new();
        MultipartCodec::new().encode(frames, &mut buf).unwrap();
        buf
    }

    #[test]
    fn test_encode_layout() {
        let buf = encode(vec!["ab", ""]);
        assert_eq!(&buf[..], &[0, 0, 0, 2, 0, 0, 0, 2, b'a', b'b', 0, 0, 0, 0][..]);
    }

    #[test]
    fn test_decode_waits_for_full_message() {
        let full = encode(vec!["id", "", "Jag har många"]);
        let mut codec = MultipartCodec::new();

        for cut in [0, 3, 4, 9, full.len() - 1] {
            let mut partial = BytesMut::from(&full[..cut]);
            assert!(codec.decode(&mut partial).unwrap().is_none(), "cut at {cut}");
            assert_eq!(partial.len(), cut, "partial input must not be consumed");
        }
    }

    #[test]
    fn test_decode_two_messages_back_to_back() {
        let mut buf = encode(vec!["first"]);
        buf.extend_from_slice(&encode(vec!["second", "x"]));
        let mut codec = MultipartCodec::new();

        let first = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(first, vec![Bytes::from("first")]);
        let second = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(second, vec![Bytes::from("second"), Bytes::from("x")]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_rejects_oversized_message() {
        let mut buf = BytesMut::new();
        buf.put_u32(1);
        buf.put_u32(1024);
        let mut codec = MultipartCodec::with_max_message_size(512);
        let err = codec.decode(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_encode_rejects_oversized_message() {
        let mut codec = MultipartCodec::with_max_message_size(16);
        let mut buf = BytesMut::new();
        assert!(codec.encode(vec!["a".repeat(32)], &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_empty_message() {
        let mut buf = encode(Vec::new());
        let frames = MultipartCodec::new().decode(&mut buf).unwrap().unwrap();
        assert!(frames.is_empty());
    }
}
