// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{structs::IpFam, AddressError, IPV6_BITS};
use tracing::warn;

/**
Network mask for `prefix` bits of the given family, as the low
`fam.bits()` bits of a [u128].

Out-of-range prefixes are clamped: negative values give an all-zero mask,
values above the family width give an all-ones mask. Use [try_mask_for]
to have them rejected instead.
*/
pub fn mask_for(fam: IpFam, prefix: i32) -> u128 {
    mask_u128(fam.bits(), clamp_prefix(fam, prefix))
}

/// Like [mask_for], but a prefix outside `0..=fam.bits()` is an error.
pub fn try_mask_for(fam: IpFam, prefix: i32) -> Result<u128, AddressError> {
    match u8::try_from(prefix) {
        Ok(pre) if pre <= fam.bits() => Ok(mask_u128(fam.bits(), pre)),
        _ => Err(AddressError::PrefixOutOfRange { fam, prefix }),
    }
}

/**
Convert a network mask back into its prefix length.

The mask must fit the family width and consist of contiguous high one-bits.
*/
pub fn prefix_from_mask(fam: IpFam, mask: u128) -> Result<u8, AddressError> {
    let bits: u8 = fam.bits();
    let err = AddressError::InvalidMask { fam, mask };
    if bits < IPV6_BITS && mask >> bits != 0 {
        return Err(err);
    }

    // left-align into 128 bits so leading_ones counts from the family's top bit
    let aligned: u128 = mask << (IPV6_BITS - bits);
    let prefix: u32 = aligned.leading_ones();
    if aligned.checked_shl(prefix).unwrap_or(0) == 0 {
        Ok(prefix as u8)
    } else {
        Err(err)
    }
}

/* ---------------------------------- */

/// Clamp a caller-supplied prefix into `0..=fam.bits()`.
pub(crate) fn clamp_prefix(fam: IpFam, prefix: i32) -> u8 {
    let max: u8 = fam.bits();
    let clamped: u8 = prefix.clamp(0, max as i32) as u8;
    if clamped as i32 != prefix {
        warn!(%fam, prefix, clamped, "prefix length out of range, clamping");
    }
    clamped
}

/**
Returns a u128 with prefix high bits set, remaining low bits zero.

bits: 32 or 128, prefix: `0..=bits`
*/
#[inline]
pub(crate) fn mask_u128(bits: u8, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let all: u128 = if bits == IPV6_BITS {
        !0u128
    } else {
        (1u128 << bits) - 1
    };
    if prefix >= bits {
        return all;
    }
    let low: u8 = bits - prefix;
    all & !((1u128 << low) - 1)
}

/* -------------------------------------------------------------------------- */
