//! Bus value helpers.
//!
//! Every net carries an unsigned value of 1 to 64 bits stored in a `u64`. Values are
//! kept masked to their width at all times, so operations such as `not` must re-mask
//! their result. These helpers are used both at load time (width checks, constant
//! validation) and on the evaluation hot path.

/// Widest bus the kernel can represent.
pub const MAX_BUS_WIDTH: u32 = 64;

/// Returns a mask with the low `width` bits set.
///
/// A width of 64 or more yields `u64::MAX`; a width of zero yields zero.
#[inline(always)]
pub const fn mask(width: u32) -> u64 {
    if width >= MAX_BUS_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Returns `true` if `value` is representable in `width` bits.
#[inline(always)]
pub const fn fits(value: u64, width: u32) -> bool {
    value & !mask(width) == 0
}

/// Extracts `count` bits of `value` starting at bit `low`.
#[inline(always)]
pub const fn bits(value: u64, low: u32, count: u32) -> u64 {
    if low >= MAX_BUS_WIDTH {
        0
    } else {
        (value >> low) & mask(count)
    }
}

/// Number of words addressable with an `addr_width`-bit address.
///
/// # Arguments
///
/// * `addr_width` - Address bus width in bits.
///
/// # Returns
///
/// `2^addr_width`, saturating at `usize::MAX` for address buses wider than the host.
pub const fn address_space(addr_width: u32) -> usize {
    if addr_width >= usize::BITS {
        usize::MAX
    } else {
        1usize << addr_width
    }
}
