// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IP address literal validation, structural parsing, ordering values and prefix masks.

mod grammar;
mod masks;
mod parser;
mod strings;
mod structs;

use std::{error, fmt};
use strings::*;

pub use grammar::{classify, classify_bytes, is_ipv4_literal, is_ipv6_literal};
pub use masks::{mask_for, prefix_from_mask, try_mask_for};
pub use parser::{parse, parse_ipv4, parse_ipv6};
pub use structs::{Address, IpFam, Ipv4Address, Ipv6Address, Ipv6Tail, LiteralKind};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;
/// number of 16-bit groups in a pure IPv6 literal
pub(crate) const V6_GROUPS: usize = 8;
/// number of 16-bit groups left when the low 32 bits are a dotted IPv4 tail
pub(crate) const V6_GROUPS_EMBEDDED: usize = 6;

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// not a literal of the requested (or any) family
    InvalidFormat(String),
    InvalidV4Octet(String),
    InvalidV6Hextet(String),
    /// more than one `::`
    DoubleElision(String),
    GroupCount { literal: String, expected: usize, found: usize },
    /// `::` present but every group slot is already taken
    ElisionTooLong(String),
    PrefixOutOfRange { fam: IpFam, prefix: i32 },
    InvalidMask { fam: IpFam, mask: u128 },
    /// the regex grammar and the state machine disagree about a literal
    Inconsistent(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidFormat(lit) => {
                write!(f, "{ERR_INVALID_FMT}: '{lit}'")
            }
            AddressError::InvalidV4Octet(val) => {
                write!(f, "{ERR_V4_OCTET}: '{val}'")
            }
            AddressError::InvalidV6Hextet(val) => {
                write!(f, "{ERR_V6_HEXTET}: '{val}'")
            }
            AddressError::DoubleElision(lit) => {
                write!(f, "{ERR_DOUBLE_ELISION}: '{lit}'")
            }
            AddressError::GroupCount { literal, expected, found } => {
                write!(f, "{ERR_GROUP_COUNT} in '{literal}' (expected {expected}, got {found})")
            }
            AddressError::ElisionTooLong(lit) => {
                write!(f, "{ERR_ELISION_LEN}: '{lit}'")
            }
            AddressError::PrefixOutOfRange { fam, prefix } => {
                write!(f, "{ERR_PREFIX_RANGE}: {prefix} (max {} for {fam})", fam.bits())
            }
            AddressError::InvalidMask { fam, mask } => {
                write!(f, "{ERR_INVALID_MASK} for {fam}: {mask:#x}")
            }
            AddressError::Inconsistent(lit) => {
                write!(f, "{ERR_INCONSISTENT}: '{lit}'")
            }
        }
    }
}

impl error::Error for AddressError {}

/* -------------------------------------------------------------------------- */
