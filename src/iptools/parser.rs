// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    grammar::classify,
    strings::*,
    structs::{Address, Ipv4Address, Ipv6Address, LiteralKind},
    AddressError, V6_GROUPS, V6_GROUPS_EMBEDDED,
};
use tracing::{debug, error, trace};

/// Where the group scanner is relative to the (single) `::`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Elision {
    /// no `::` seen yet, groups fill slots from the left
    Before,
    /// `::` just consumed, no group after it yet
    Inside,
    /// groups after `::`, aligned to the right end later
    After,
}

/**
Parse an IPv4 or IPv6 literal into an [Address].

The literal is classified by the grammar first and then decomposed by the
state machine in this module. Both have to agree: a literal accepted by
one and rejected by the other yields [AddressError::Inconsistent].
*/
pub fn parse(text: impl AsRef<str>) -> Result<Address, AddressError> {
    let text: &str = text.as_ref();
    let kind: LiteralKind = classify(text);

    match kind {
        LiteralKind::Ipv4 => {
            let addr: Ipv4Address = parse_ipv4(text).map_err(|e| disagreement(text, e))?;
            trace!(literal = text, bits = addr.to_bits(), "parsed IPv4 literal");
            Ok(Address::V4 { literal: text.to_string(), addr })
        }
        LiteralKind::Ipv6 => {
            let addr: Ipv6Address = parse_ipv6(text).map_err(|e| disagreement(text, e))?;
            trace!(literal = text, bits = addr.to_bits(), "parsed IPv6 literal");
            Ok(Address::V6 { literal: text.to_string(), addr })
        }
        LiteralKind::Invalid => {
            // run the state machine anyway for a more precise error
            let detail: Result<(), AddressError> = match (text.contains(COLON), text.contains(DOT)) {
                (true, _) => parse_ipv6(text).map(|_| ()),
                (false, true) => parse_ipv4(text).map(|_| ()),
                // no separator at all, nothing to be more precise about
                (false, false) => Err(AddressError::InvalidFormat(text.to_string())),
            };
            match detail {
                Err(e) => {
                    debug!(literal = text, error = %e, "rejected address literal");
                    Err(e)
                }
                Ok(()) => {
                    error!(literal = text, "parser accepted a literal the grammar rejected");
                    Err(AddressError::Inconsistent(text.to_string()))
                }
            }
        }
    }
}

fn disagreement(text: &str, e: AddressError) -> AddressError {
    error!(literal = text, error = %e, "grammar accepted a literal the parser rejected");
    AddressError::Inconsistent(text.to_string())
}

/// Parse a dotted-decimal IPv4 literal (`a.b.c.d`, each part 1-3 digits, at most 255).
pub fn parse_ipv4(text: impl AsRef<str>) -> Result<Ipv4Address, AddressError> {
    let text: &str = text.as_ref();
    let mut octets: [u8; 4] = [0; 4];
    let mut count: usize = 0;

    for part in text.split(DOT) {
        if count == octets.len() {
            return Err(AddressError::InvalidFormat(text.to_string()));
        }
        octets[count] = parse_octet(part)?;
        count += 1;
    }

    if count != octets.len() {
        return Err(AddressError::InvalidFormat(text.to_string()));
    }
    Ok(Ipv4Address::from_octets(octets))
}

fn parse_octet(part: &str) -> Result<u8, AddressError> {
    let err = || AddressError::InvalidV4Octet(part.to_string());
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    part.parse::<u8>().map_err(|_| err())
}

/**
Parse an IPv6 literal, including the `::` forms and a dotted IPv4 tail
in the low 32 bits.

Every group ends up as a concrete value: the zero run stood for by `::`
is filled in here.
*/
pub fn parse_ipv6(text: impl AsRef<str>) -> Result<Ipv6Address, AddressError> {
    let text: &str = text.as_ref();

    match split_embedded(text) {
        Some((groups_part, v4_part)) => {
            let v4: Ipv4Address = parse_ipv4(v4_part)?;
            let groups: [u16; V6_GROUPS] = expand_groups(text, groups_part, V6_GROUPS_EMBEDDED)?;
            let mut head: [u16; V6_GROUPS_EMBEDDED] = [0; V6_GROUPS_EMBEDDED];
            head.copy_from_slice(&groups[..V6_GROUPS_EMBEDDED]);
            Ok(Ipv6Address::with_embedded(head, v4))
        }
        None => {
            let groups: [u16; V6_GROUPS] = expand_groups(text, text, V6_GROUPS)?;
            Ok(Ipv6Address::from_groups(groups))
        }
    }
}

/**
Split off a dotted IPv4 tail after the last `:`, if there is one.

A `::` directly in front of the tail stays with the group part, so
`::1.2.3.4` splits into `::` and `1.2.3.4`, while `1:2:3:4:5:6:1.2.3.4`
splits into `1:2:3:4:5:6` and `1.2.3.4`.
*/
fn split_embedded(text: &str) -> Option<(&str, &str)> {
    let colon: usize = text.rfind(COLON)?;
    let tail: &str = &text[colon + 1..];
    if !tail.contains(DOT) {
        return None;
    }
    let groups_part: &str = match text[..colon].ends_with(COLON) {
        true => &text[..=colon],
        false => &text[..colon],
    };
    Some((groups_part, tail))
}

/**
Scan `part` into `budget` group slots (8, or 6 in front of an IPv4 tail).

Groups before `::` go into slots from the left; groups after it are
collected separately and copied into the last slots once the scan ends.
The slots in between stay zero. `literal` is only used for error messages.
*/
fn expand_groups(literal: &str, part: &str, budget: usize) -> Result<[u16; V6_GROUPS], AddressError> {
    let bytes: &[u8] = part.as_bytes();
    let mut groups: [u16; V6_GROUPS] = [0; V6_GROUPS];
    let mut trailing: [u16; V6_GROUPS] = [0; V6_GROUPS];
    let mut lead: usize = 0;
    let mut trail: usize = 0;
    let mut state: Elision = Elision::Before;
    let mut pos: usize = 0;

    let invalid = || AddressError::InvalidFormat(literal.to_string());
    let too_long = || AddressError::ElisionTooLong(literal.to_string());

    if part.starts_with(ELISION) {
        state = Elision::Inside;
        pos = ELISION.len();
    }

    while pos < bytes.len() {
        // only ASCII is ever consumed, so `pos` stays on a char boundary
        let (value, used) = read_hextet(literal, &part[pos..])?;
        pos += used;

        match state {
            Elision::Before => {
                if lead == budget {
                    return Err(AddressError::GroupCount {
                        literal: literal.to_string(),
                        expected: budget,
                        found: lead + 1,
                    });
                }
                groups[lead] = value;
                lead += 1;
            }
            Elision::Inside | Elision::After => {
                state = Elision::After;
                if lead + trail + 1 >= budget {
                    return Err(too_long());
                }
                trailing[trail] = value;
                trail += 1;
            }
        }

        if pos == bytes.len() {
            break;
        }
        if bytes[pos] != b':' {
            return Err(invalid());
        }
        pos += 1;

        if bytes.get(pos) == Some(&b':') {
            if state != Elision::Before {
                return Err(AddressError::DoubleElision(literal.to_string()));
            }
            state = Elision::Inside;
            pos += 1;
        } else if pos == bytes.len() {
            // dangling single ':'
            return Err(invalid());
        }
    }

    match state {
        Elision::Before if lead != budget => {
            return Err(AddressError::GroupCount {
                literal: literal.to_string(),
                expected: budget,
                found: lead,
            });
        }
        Elision::Before => {}
        Elision::Inside | Elision::After => {
            if lead + trail >= budget {
                return Err(too_long());
            }
            groups[budget - trail..budget].copy_from_slice(&trailing[..trail]);
        }
    }
    Ok(groups)
}

/// Read one group of 1-4 hex digits from the start of `rest`.
fn read_hextet(literal: &str, rest: &str) -> Result<(u16, usize), AddressError> {
    let digits: usize = rest.bytes().take_while(|b| b.is_ascii_hexdigit()).count();
    match digits {
        0 => Err(AddressError::InvalidFormat(literal.to_string())),
        1..=4 => u16::from_str_radix(&rest[..digits], 16)
            .map(|value| (value, digits))
            .map_err(|_| AddressError::InvalidV6Hextet(rest[..digits].to_string())),
        _ => Err(AddressError::InvalidV6Hextet(rest[..digits].to_string())),
    }
}

/* -------------------------------------------------------------------------- */
