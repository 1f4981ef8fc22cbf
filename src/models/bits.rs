//! Bit arithmetic over big-endian byte buffers.
//!
//! Both address families store their value as a fixed-width byte array; these
//! helpers work on any buffer length so the IPv4 and IPv6 code paths share one
//! implementation. Prefix lengths are assumed to be already validated against
//! `bit_width(buf)` by the caller.

/// Number of bits held by the buffer.
pub fn bit_width(buf: &[u8]) -> u8 {
    (buf.len() * 8) as u8
}

/// Overwrite `buf` with a netmask of `len` leading one-bits.
pub fn write_mask(buf: &mut [u8], len: u8) {
    let mut remaining = len as usize;
    for byte in buf.iter_mut() {
        *byte = match remaining {
            0 => 0x00,
            1..=7 => 0xFFu8 << (8 - remaining),
            _ => 0xFF,
        };
        remaining = remaining.saturating_sub(8);
    }
}

/// Clear every bit after the first `len` bits (the network part).
pub fn cut(buf: &mut [u8], len: u8) {
    let mut remaining = len as usize;
    for byte in buf.iter_mut() {
        match remaining {
            0 => *byte = 0x00,
            1..=7 => *byte &= 0xFFu8 << (8 - remaining),
            _ => {}
        }
        remaining = remaining.saturating_sub(8);
    }
}

/// Set every bit after the first `len` bits (the host part).
pub fn fill_host(buf: &mut [u8], len: u8) {
    let mut remaining = len as usize;
    for byte in buf.iter_mut() {
        match remaining {
            0 => *byte = 0xFF,
            1..=7 => *byte |= 0xFFu8 >> remaining,
            _ => {}
        }
        remaining = remaining.saturating_sub(8);
    }
}

pub fn invert(buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        *byte = !*byte;
    }
}

/// `dst &= src`, both buffers must have the same length.
pub fn and_assign(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d &= *s;
    }
}

/// `dst |= src`, both buffers must have the same length.
pub fn or_assign(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d |= *s;
    }
}

/// Add one in place. Returns `false` (buffer untouched) on overflow.
pub fn increment(buf: &mut [u8]) -> bool {
    if buf.iter().all(|b| *b == 0xFF) {
        return false;
    }
    for byte in buf.iter_mut().rev() {
        let (v, carry) = byte.overflowing_add(1);
        *byte = v;
        if !carry {
            break;
        }
    }
    true
}

/// Subtract one in place. Returns `false` (buffer untouched) on underflow.
pub fn decrement(buf: &mut [u8]) -> bool {
    if is_zero(buf) {
        return false;
    }
    for byte in buf.iter_mut().rev() {
        let (v, borrow) = byte.overflowing_sub(1);
        *byte = v;
        if !borrow {
            break;
        }
    }
    true
}

pub fn is_zero(buf: &[u8]) -> bool {
    buf.iter().all(|b| *b == 0)
}

/// True when the first `len` bits of `buf` equal those of `prefix`.
pub fn prefix_matches(buf: &[u8], prefix: &[u8], len: u8) -> bool {
    let full = (len / 8) as usize;
    let rest = len % 8;
    if buf[..full] != prefix[..full] {
        return false;
    }
    if rest == 0 {
        return true;
    }
    let mask = 0xFFu8 << (8 - rest);
    buf[full] & mask == prefix[full] & mask
}

/// Big-endian integer value of the buffer (at most 16 bytes).
pub fn to_u128(buf: &[u8]) -> u128 {
    buf.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128)
}

/// Store the low `buf.len()` bytes of `value` big-endian.
pub fn write_u128(buf: &mut [u8], value: u128) {
    let bytes = value.to_be_bytes();
    let start = bytes.len() - buf.len();
    buf.copy_from_slice(&bytes[start..]);
}
