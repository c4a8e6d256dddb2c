// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: char = '.';
pub(crate) static COLON: char = ':';
pub(crate) static ELISION: &str = "::";

pub(crate) static VERSION_V4: &str = "IPv4";
pub(crate) static VERSION_V6: &str = "IPv6";

// mod.rs
pub(crate) static ERR_INVALID_FMT: &str = "not a valid IPv4 or IPv6 address literal";
pub(crate) static ERR_V4_OCTET: &str = "invalid IPv4 octet";
pub(crate) static ERR_V6_HEXTET: &str = "invalid IPv6 group";
pub(crate) static ERR_DOUBLE_ELISION: &str = "more than one '::' in IPv6 literal";
pub(crate) static ERR_GROUP_COUNT: &str = "wrong number of IPv6 groups";
pub(crate) static ERR_ELISION_LEN: &str = "'::' must stand for at least one zero group";
pub(crate) static ERR_PREFIX_RANGE: &str = "prefix length out of range";
pub(crate) static ERR_INVALID_MASK: &str = "not a contiguous network mask";
pub(crate) static ERR_INCONSISTENT: &str = "validator accepted a literal the parser rejected";
