//! Forward-only byte cursor over a file's contents.

use glam::{Vec2, Vec3, Vec4};

use crate::error::{DecodeError, DecodeResult};

/// A sequential reader over an in-memory file buffer.
///
/// The reader borrows the full file contents and advances a read offset as
/// primitives are consumed. All multi-byte values are little-endian. There
/// is no seeking; every decoder walks the file exactly once, forward.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read offset in bytes.
    #[must_use]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Total buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Consume `n` bytes, returning a slice into the buffer.
    fn take(&mut self, n: usize, context: &'static str) -> DecodeResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(DecodeError::TruncatedInput {
                context,
                offset: self.offset,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self, context: &'static str) -> DecodeResult<u8> {
        Ok(self.take(1, context)?[0])
    }

    /// Read a little-endian unsigned 32-bit integer.
    pub fn read_u32(&mut self, context: &'static str) -> DecodeResult<u32> {
        let bytes = self.take(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian IEEE-754 32-bit float.
    pub fn read_f32(&mut self, context: &'static str) -> DecodeResult<f32> {
        let bytes = self.take(4, context)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> DecodeResult<Vec<u8>> {
        Ok(self.take(n, context)?.to_vec())
    }

    /// Read a packed 24-bit RGB color (one byte per channel, no alpha).
    pub fn read_rgb24(&mut self, context: &'static str) -> DecodeResult<[u8; 3]> {
        let bytes = self.take(3, context)?;
        Ok([bytes[0], bytes[1], bytes[2]])
    }

    /// Read `k` consecutive floats.
    pub fn read_vec_f32(&mut self, k: usize, context: &'static str) -> DecodeResult<Vec<f32>> {
        self.check_list(k, 4, context)?;
        (0..k).map(|_| self.read_f32(context)).collect()
    }

    /// Read `k` consecutive unsigned 32-bit integers.
    pub fn read_vec_u32(&mut self, k: usize, context: &'static str) -> DecodeResult<Vec<u32>> {
        self.check_list(k, 4, context)?;
        (0..k).map(|_| self.read_u32(context)).collect()
    }

    /// Read three floats as a position or direction vector.
    pub fn read_vec3(&mut self, context: &'static str) -> DecodeResult<Vec3> {
        Ok(Vec3::new(
            self.read_f32(context)?,
            self.read_f32(context)?,
            self.read_f32(context)?,
        ))
    }

    /// Read two floats as a UV coordinate pair.
    pub fn read_vec2(&mut self, context: &'static str) -> DecodeResult<Vec2> {
        Ok(Vec2::new(self.read_f32(context)?, self.read_f32(context)?))
    }

    /// Read four floats.
    pub fn read_vec4(&mut self, context: &'static str) -> DecodeResult<Vec4> {
        Ok(Vec4::new(
            self.read_f32(context)?,
            self.read_f32(context)?,
            self.read_f32(context)?,
            self.read_f32(context)?,
        ))
    }

    /// Read a length-prefixed byte run: a u32 length followed by that many
    /// raw bytes.
    pub fn read_sized_bytes(&mut self, context: &'static str) -> DecodeResult<Vec<u8>> {
        let len = self.read_u32(context)? as usize;
        self.read_bytes(len, context)
    }

    /// Read a length-prefixed string, strip the trailing NUL, and validate
    /// UTF-8.
    pub fn read_string(&mut self, context: &'static str) -> DecodeResult<String> {
        let offset = self.offset;
        let raw = self.read_sized_bytes(context)?;
        text_from_raw(raw, context, offset)
    }

    /// Reject a declared element count that could not possibly fit in the
    /// remaining buffer, before any allocation happens.
    ///
    /// `elem_size` is the minimum encoded size of one element.
    pub fn check_list(
        &self,
        count: usize,
        elem_size: usize,
        context: &'static str,
    ) -> DecodeResult<()> {
        let declared = count.saturating_mul(elem_size);
        if declared > self.remaining() {
            return Err(DecodeError::CorruptLength {
                context,
                offset: self.offset,
                declared,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

/// Convert a decoded byte run to text: strip one trailing NUL if present,
/// then validate UTF-8.
pub(crate) fn text_from_raw(
    mut raw: Vec<u8>,
    context: &'static str,
    offset: usize,
) -> DecodeResult<String> {
    if raw.last() == Some(&0) {
        raw.pop();
    }
    String::from_utf8(raw).map_err(|_| DecodeError::CorruptString { context, offset })
}
