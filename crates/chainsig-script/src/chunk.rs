//! Script chunk parsing and encoding.
//!
//! A chunk is either a bare opcode or a data push carrying the bytes it
//! pushes. Decoding never interprets OP_RETURN specially: every byte of
//! the script is accounted for by exactly one chunk, which lets callers
//! rebuild a script from the raw ranges they keep.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

/// Read the chunk starting at `pos`.
///
/// # Returns
/// The chunk and the offset just past it, or `DataTooSmall` if a push
/// claims more bytes than remain.
pub fn read_chunk(bytes: &[u8], pos: usize) -> Result<(ScriptChunk, usize), ScriptError> {
    let op = *bytes.get(pos).ok_or(ScriptError::DataTooSmall)?;
    let (len_size, length) = match op {
        OP_DATA_1..=OP_DATA_75 => (0, op as usize),
        OP_PUSHDATA1 => (1, read_len(bytes, pos + 1, 1)?),
        OP_PUSHDATA2 => (2, read_len(bytes, pos + 1, 2)?),
        OP_PUSHDATA4 => (4, read_len(bytes, pos + 1, 4)?),
        _ => return Ok((ScriptChunk { op, data: None }, pos + 1)),
    };

    let start = pos + 1 + len_size;
    let end = start.checked_add(length).ok_or(ScriptError::DataTooSmall)?;
    if end > bytes.len() {
        return Err(ScriptError::DataTooSmall);
    }
    let chunk = ScriptChunk {
        op,
        data: Some(bytes[start..end].to_vec()),
    };
    Ok((chunk, end))
}

fn read_len(bytes: &[u8], at: usize, size: usize) -> Result<usize, ScriptError> {
    let raw = bytes.get(at..at + size).ok_or(ScriptError::DataTooSmall)?;
    Ok(raw
        .iter()
        .rev()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize))
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// # Returns
/// A vector of parsed chunks, or a `ScriptError` if the data is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let (chunk, next) = read_chunk(bytes, pos)?;
        chunks.push(chunk);
        pos = next;
    }
    Ok(chunks)
}

/// Compute the OP_PUSHDATA prefix bytes for a data payload of the given length.
///
/// # Returns
/// The minimal prefix for the payload, or `DataTooBig` if it cannot be
/// expressed.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}
