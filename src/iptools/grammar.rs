// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::structs::LiteralKind;
use lazy_static::lazy_static;
use regex::Regex;

/// one IPv6 group
const HEX: &str = "[0-9a-f]{1,4}";
/// one IPv4 octet, 1-3 digits with a value of at most 255
const OCTET: &str = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]{1,2})";

// Compiled once per program execution.
lazy_static! {
    static ref IPV4_RE: Regex = Regex::new(&format!("^{}$", dotted_quad()))
        .expect("IPv4 literal pattern must compile");
    static ref IPV6_RE: Regex = Regex::new(&ipv6_pattern())
        .expect("IPv6 literal pattern must compile");
}

fn dotted_quad() -> String {
    format!(r"{OCTET}(?:\.{OCTET}){{3}}")
}

/**
Build the anchored, case-insensitive IPv6 literal pattern.

Two halves, each listing the five elision shapes (none, all, leading,
trailing, middle):
- pure hex: 8 group slots
- dotted IPv4 tail: 6 group slots followed by `:a.b.c.d`

In the middle shapes the number of written groups stays below the slot
count, so `::` always stands for at least one zero group.
*/
fn ipv6_pattern() -> String {
    let mut pure: Vec<String> = vec![
        format!("{HEX}(?::{HEX}){{7}}"),
        "::".to_string(),
        format!(":(?::{HEX}){{1,7}}"),
        format!("(?:{HEX}:){{1,7}}:"),
    ];
    pure.extend((1..=6).map(|n| format!("(?:{HEX}:){{{n}}}(?::{HEX}){{1,{}}}", 7 - n)));

    // each of these is followed by ":a.b.c.d"
    let mut mixed: Vec<String> = vec![
        format!("{HEX}(?::{HEX}){{5}}"),
        ":".to_string(),
        format!(":(?::{HEX}){{1,5}}"),
        format!("(?:{HEX}:){{1,5}}"),
    ];
    mixed.extend((1..=4).map(|n| format!("(?:{HEX}:){{{n}}}(?::{HEX}){{1,{}}}", 5 - n)));

    format!(
        "(?i)^(?:(?:{})|(?:(?:{}):{}))$",
        pure.join("|"),
        mixed.join("|"),
        dotted_quad()
    )
}

/// Whether `text` is, in its entirety, a dotted-decimal IPv4 literal.
pub fn is_ipv4_literal(text: impl AsRef<str>) -> bool {
    IPV4_RE.is_match(text.as_ref())
}

/// Whether `text` is, in its entirety, an IPv6 literal (hex digits in any case).
pub fn is_ipv6_literal(text: impl AsRef<str>) -> bool {
    IPV6_RE.is_match(text.as_ref())
}

/// Decide which address family, if any, `text` is a literal of.
pub fn classify(text: impl AsRef<str>) -> LiteralKind {
    let text: &str = text.as_ref();
    if is_ipv4_literal(text) {
        LiteralKind::Ipv4
    } else if is_ipv6_literal(text) {
        LiteralKind::Ipv6
    } else {
        LiteralKind::Invalid
    }
}

/// [classify] for raw bytes. Anything that is not UTF-8 is [LiteralKind::Invalid].
pub fn classify_bytes(bytes: &[u8]) -> LiteralKind {
    match std::str::from_utf8(bytes) {
        Ok(text) => classify(text),
        Err(_) => LiteralKind::Invalid,
    }
}

/* -------------------------------------------------------------------------- */
