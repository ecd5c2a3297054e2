//! Compile-time tunables for the lattice.

/// Capacity reserved by the canonical registry at first use.
pub const INITIAL_REGISTRY_CAPACITY: usize = 1024;

/// Largest arena index a type handle can carry. Handles are 32 bits wide.
pub const MAX_TYPE_INDEX: u32 = u32::MAX;

/// Legal integer widths, ascending. Width 1 is the boolean type.
pub const INT_WIDTHS: [u8; 5] = [1, 8, 16, 32, 64];

/// Legal float widths, ascending.
pub const FLT_WIDTHS: [u8; 2] = [32, 64];

/// Mantissa bits of each float width (implicit bit included).
pub const fn flt_mantissa_bits(bits: u8) -> u8 {
    if bits <= 32 {
        24
    } else {
        53
    }
}

/// Round `bits` up to the nearest legal integer width (saturating at 64).
pub fn int_width(bits: u8) -> u8 {
    round_up(&INT_WIDTHS, bits)
}

/// Round `bits` up to the nearest legal float width (saturating at 64).
pub fn flt_width(bits: u8) -> u8 {
    round_up(&FLT_WIDTHS, bits)
}

fn round_up(widths: &[u8], bits: u8) -> u8 {
    widths
        .iter()
        .copied()
        .find(|&w| w >= bits)
        .unwrap_or(64)
}
