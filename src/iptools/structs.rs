// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    masks::{clamp_prefix, mask_u128},
    parser::parse,
    strings::*,
    AddressError, IPV4_BITS, IPV6_BITS, V6_GROUPS, V6_GROUPS_EMBEDDED,
};
use ipnet::IpNet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    /// Width of an address of this family in bits.
    pub const fn bits(self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }

    /// `"IPv4"` or `"IPv6"`.
    pub fn version(self) -> &'static str {
        match self {
            IpFam::V4 => VERSION_V4,
            IpFam::V6 => VERSION_V6,
        }
    }
}

impl fmt::Display for IpFam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version())
    }
}

/// Result of classifying a candidate string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Ipv4,
    Ipv6,
    Invalid,
}

impl LiteralKind {
    pub fn is_valid(self) -> bool {
        !matches!(self, LiteralKind::Invalid)
    }

    /// The address family, if the literal was valid.
    pub fn family(self) -> Option<IpFam> {
        match self {
            LiteralKind::Ipv4 => Some(IpFam::V4),
            LiteralKind::Ipv6 => Some(IpFam::V6),
            LiteralKind::Invalid => None,
        }
    }
}

/* -------------------------------------------------------------------------- */

/// Four octets, most significant first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address {
    octets: [u8; 4],
}

impl Ipv4Address {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self { octets: [a, b, c, d] }
    }

    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Self { octets }
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// Big-endian numeric value of the address.
    pub const fn to_bits(&self) -> u32 {
        u32::from_be_bytes(self.octets)
    }

    /// IPv4 netmask for `prefix`, clamped into `0..=32`.
    pub fn mask(prefix: i32) -> u32 {
        mask_u128(IPV4_BITS, clamp_prefix(IpFam::V4, prefix)) as u32
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.octets)
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self::from_octets(addr.octets())
    }
}

/* ---------------------------------- */

/// How the low 32 bits of an IPv6 address were written.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Ipv6Tail {
    /// two ordinary hex groups
    Groups([u16; 2]),
    /// dotted-decimal IPv4 tail, e.g. `::ffff:192.0.2.1`
    Embedded(Ipv4Address),
}

impl Ipv6Tail {
    fn to_bits(self) -> u32 {
        match self {
            Ipv6Tail::Groups([hi, lo]) => ((hi as u32) << 16) | lo as u32,
            Ipv6Tail::Embedded(v4) => v4.to_bits(),
        }
    }
}

/**
Six leading 16-bit groups plus a 32-bit tail, always 128 bits in total.

Equality, ordering and hashing go by the numeric value, so
`::ffff:c000:201` and `::ffff:192.0.2.1` compare equal. Compare
[Ipv6Address::tail] to tell the two spellings apart.
*/
#[derive(Clone, Copy, Debug)]
pub struct Ipv6Address {
    head: [u16; V6_GROUPS_EMBEDDED],
    tail: Ipv6Tail,
}

impl Ipv6Address {
    pub fn from_groups(groups: [u16; V6_GROUPS]) -> Self {
        let mut head = [0u16; V6_GROUPS_EMBEDDED];
        head.copy_from_slice(&groups[..V6_GROUPS_EMBEDDED]);
        Self {
            head,
            tail: Ipv6Tail::Groups([groups[6], groups[7]]),
        }
    }

    pub const fn with_embedded(head: [u16; V6_GROUPS_EMBEDDED], v4: Ipv4Address) -> Self {
        Self {
            head,
            tail: Ipv6Tail::Embedded(v4),
        }
    }

    /// The six leading groups.
    pub const fn head(&self) -> [u16; V6_GROUPS_EMBEDDED] {
        self.head
    }

    pub const fn tail(&self) -> Ipv6Tail {
        self.tail
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self.tail, Ipv6Tail::Embedded(_))
    }

    pub fn embedded_ipv4(&self) -> Option<Ipv4Address> {
        match self.tail {
            Ipv6Tail::Embedded(v4) => Some(v4),
            Ipv6Tail::Groups(_) => None,
        }
    }

    /// All eight groups, with an embedded IPv4 tail folded into the last two.
    pub fn groups(&self) -> [u16; V6_GROUPS] {
        let mut groups = [0u16; V6_GROUPS];
        groups[..V6_GROUPS_EMBEDDED].copy_from_slice(&self.head);
        let low: u32 = self.tail.to_bits();
        groups[6] = (low >> 16) as u16;
        groups[7] = low as u16;
        groups
    }

    /// Big-endian numeric value of the address.
    pub fn to_bits(&self) -> u128 {
        let high: u128 = self
            .head
            .iter()
            .fold(0u128, |acc, &g| (acc << 16) | g as u128);
        (high << 32) | self.tail.to_bits() as u128
    }

    /// IPv6 prefix mask for `prefix`, clamped into `0..=128`.
    pub fn mask(prefix: i32) -> u128 {
        mask_u128(IPV6_BITS, clamp_prefix(IpFam::V6, prefix))
    }
}

impl PartialEq for Ipv6Address {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Ipv6Address {}

impl Hash for Ipv6Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl PartialOrd for Ipv6Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ipv6Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_bits().cmp(&other.to_bits())
    }
}

impl From<Ipv6Address> for Ipv6Addr {
    fn from(addr: Ipv6Address) -> Self {
        Ipv6Addr::from(addr.to_bits())
    }
}

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self::from_groups(addr.segments())
    }
}

/* -------------------------------------------------------------------------- */

/**
A parsed address literal. Keeps the literal exactly as written, so
[fmt::Display] never re-serializes into a different spelling.

Equality, ordering and hashing go by (family, ordering value): every IPv4
address sorts before every IPv6 address, and `::1` equals `0:0:0:0:0:0:0:1`.
*/
#[derive(Clone, Debug)]
pub enum Address {
    V4 { literal: String, addr: Ipv4Address },
    V6 { literal: String, addr: Ipv6Address },
}

impl Address {
    pub fn family(&self) -> IpFam {
        match self {
            Address::V4 { .. } => IpFam::V4,
            Address::V6 { .. } => IpFam::V6,
        }
    }

    /// `"IPv4"` or `"IPv6"`.
    pub fn version(&self) -> &'static str {
        self.family().version()
    }

    /// The literal this address was parsed from, verbatim.
    pub fn literal(&self) -> &str {
        match self {
            Address::V4 { literal, .. } | Address::V6 { literal, .. } => literal,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self, Address::V4 { .. })
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, Address::V6 { .. })
    }

    pub fn as_ipv4(&self) -> Option<&Ipv4Address> {
        match self {
            Address::V4 { addr, .. } => Some(addr),
            Address::V6 { .. } => None,
        }
    }

    pub fn as_ipv6(&self) -> Option<&Ipv6Address> {
        match self {
            Address::V6 { addr, .. } => Some(addr),
            Address::V4 { .. } => None,
        }
    }

    /// Big-endian integer value: 32 significant bits for IPv4, 128 for IPv6.
    pub fn to_ordering_value(&self) -> u128 {
        match self {
            Address::V4 { addr, .. } => addr.to_bits() as u128,
            Address::V6 { addr, .. } => addr.to_bits(),
        }
    }

    /// Network portion of this address for `prefix` (clamped to the family width).
    pub fn masked(&self, prefix: i32) -> u128 {
        let fam: IpFam = self.family();
        self.to_ordering_value() & mask_u128(fam.bits(), clamp_prefix(fam, prefix))
    }

    /**
    The single network of length `prefix` containing this address, with host
    bits cleared. Unlike [Address::masked], an out-of-range prefix is an error.
    */
    pub fn network(&self, prefix: i32) -> Result<IpNet, AddressError> {
        let fam: IpFam = self.family();
        let err = || AddressError::PrefixOutOfRange { fam, prefix };
        let prefix_len: u8 = u8::try_from(prefix).map_err(|_| err())?;
        IpNet::new(self.to_ip_addr(), prefix_len)
            .map(|net| net.trunc())
            .map_err(|_| err())
    }

    pub fn to_ip_addr(&self) -> IpAddr {
        match self {
            Address::V4 { addr, .. } => IpAddr::V4((*addr).into()),
            Address::V6 { addr, .. } => IpAddr::V6((*addr).into()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl From<&Address> for IpAddr {
    fn from(addr: &Address) -> Self {
        addr.to_ip_addr()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family().hash(state);
        self.to_ordering_value().hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.family(), self.to_ordering_value()).cmp(&(other.family(), other.to_ordering_value()))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.literal())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal: String = String::deserialize(deserializer)?;
        parse(&literal).map_err(serde::de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPED: &str = "::ffff:192.0.2.1";
    const MAPPED_HEX: &str = "::ffff:c000:201";
    const LOOPBACK: &str = "::1";
    const LOOPBACK_FULL: &str = "0:0:0:0:0:0:0:1";

    #[test]
    fn test_ipv4_bits() {
        let addr = Ipv4Address::new(192, 0, 2, 1);
        assert_eq!(addr.to_bits(), 0xc000_0201);
        assert_eq!(Ipv4Addr::from(addr), Ipv4Addr::new(192, 0, 2, 1));
    }

    #[test]
    fn test_family_masks() {
        assert_eq!(Ipv4Address::mask(24), 0xffff_ff00);
        assert_eq!(Ipv4Address::mask(32), u32::MAX);
        assert_eq!(Ipv4Address::mask(40), u32::MAX);
        assert_eq!(Ipv4Address::mask(0), 0);
        assert_eq!(Ipv4Address::mask(-1), 0);

        assert_eq!(Ipv6Address::mask(64), (u64::MAX as u128) << 64);
        assert_eq!(Ipv6Address::mask(200), u128::MAX);
        assert_eq!(Ipv6Address::mask(-1), 0);
    }

    #[test]
    fn test_literal_kind() {
        assert!(LiteralKind::Ipv4.is_valid());
        assert!(!LiteralKind::Invalid.is_valid());
        assert_eq!(LiteralKind::Ipv4.family(), Some(IpFam::V4));
        assert_eq!(LiteralKind::Ipv6.family(), Some(IpFam::V6));
        assert_eq!(LiteralKind::Invalid.family(), None);
    }

    #[test]
    fn test_family_accessors() {
        let v4: Address = "192.0.2.1".parse().unwrap();
        let v6: Address = MAPPED.parse().unwrap();
        assert_eq!(v4.as_ipv4(), Some(&Ipv4Address::new(192, 0, 2, 1)));
        assert!(v4.as_ipv6().is_none());
        assert!(v6.as_ipv4().is_none());
        assert_eq!(v6.as_ipv6().map(|a| a.embedded_ipv4()), Some(Some(Ipv4Address::new(192, 0, 2, 1))));
    }

    #[test]
    fn test_ipv6_groups_fold_embedded_tail() {
        let addr = Ipv6Address::with_embedded([0, 0, 0, 0, 0, 0xffff], Ipv4Address::new(192, 0, 2, 1));
        assert_eq!(addr.groups(), [0, 0, 0, 0, 0, 0xffff, 0xc000, 0x0201]);
        assert_eq!(addr.to_bits(), 0xffff_c000_0201);
        assert_eq!(addr.embedded_ipv4(), Some(Ipv4Address::new(192, 0, 2, 1)));
    }

    #[test]
    fn test_ipv6_equality_ignores_spelling() {
        let embedded = Ipv6Address::with_embedded([0, 0, 0, 0, 0, 0xffff], Ipv4Address::new(192, 0, 2, 1));
        let plain = Ipv6Address::from_groups([0, 0, 0, 0, 0, 0xffff, 0xc000, 0x0201]);
        assert_eq!(embedded, plain);
        assert_ne!(embedded.tail(), plain.tail());
    }

    #[test]
    fn test_display_echoes_literal() {
        let addr: Address = MAPPED.parse().unwrap();
        assert_eq!(addr.to_string(), MAPPED);
        let addr: Address = "FE80::1".parse().unwrap();
        assert_eq!(addr.to_string(), "FE80::1");
    }

    #[test]
    fn test_address_equality_and_order() {
        let a: Address = LOOPBACK.parse().unwrap();
        let b: Address = LOOPBACK_FULL.parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a.literal(), b.literal());

        let m: Address = MAPPED.parse().unwrap();
        let h: Address = MAPPED_HEX.parse().unwrap();
        assert_eq!(m, h);

        let v4: Address = "255.255.255.255".parse().unwrap();
        assert!(v4 < a, "IPv4 sorts before IPv6");

        let mut list: Vec<Address> = ["10.0.0.2", "10.0.0.10", "9.255.255.255"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        list.sort();
        let sorted: Vec<&str> = list.iter().map(|a| a.literal()).collect();
        assert_eq!(sorted, ["9.255.255.255", "10.0.0.2", "10.0.0.10"]);
    }

    #[test]
    fn test_version() {
        let v4: Address = "127.0.0.1".parse().unwrap();
        let v6: Address = LOOPBACK.parse().unwrap();
        assert_eq!(v4.version(), "IPv4");
        assert_eq!(v6.version(), "IPv6");
        assert!(v4.is_ipv4() && v6.is_ipv6());
    }

    #[test]
    fn test_masked_and_network() {
        let addr: Address = "192.168.1.77".parse().unwrap();
        assert_eq!(addr.masked(24), 0xc0a8_0100);
        assert_eq!(addr.masked(99), 0xc0a8_014d);
        assert_eq!(addr.network(24).unwrap().to_string(), "192.168.1.0/24");
        assert!(addr.network(33).is_err());
        assert!(addr.network(-1).is_err());

        let addr: Address = "2001:db8::8000:1".parse().unwrap();
        assert_eq!(addr.network(64).unwrap().to_string(), "2001:db8::/64");
        assert_eq!(addr.masked(0), 0);
    }

    #[test]
    fn test_std_conversions() {
        let addr: Address = MAPPED.parse().unwrap();
        let std_addr: IpAddr = MAPPED.parse().unwrap();
        assert_eq!(addr.to_ip_addr(), std_addr);
        assert_eq!(IpAddr::from(&addr), std_addr);

        let from_std: Ipv6Address = Ipv6Address::from(Ipv6Addr::LOCALHOST);
        assert_eq!(from_std.groups(), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert!(!from_std.is_embedded());
        let v4: Ipv4Address = Ipv4Addr::new(10, 1, 2, 3).into();
        assert_eq!(v4.octets(), [10, 1, 2, 3]);
    }

    #[test]
    fn test_serde() {
        let addr: Address = MAPPED.parse().unwrap();
        let json: String = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{MAPPED}\""));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back.literal(), MAPPED);

        let bad: Result<Address, _> = serde_json::from_str("\"1::2::3\"");
        assert!(bad.is_err());

        let kind: String = serde_json::to_string(&LiteralKind::Ipv6).unwrap();
        assert_eq!(kind, "\"Ipv6\"");
    }
}
