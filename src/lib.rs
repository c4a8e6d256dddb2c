// Copyright (c) 2026 Mikko Tanner. All rights reserved.

/*!
Textual IPv4/IPv6 address literals: validation, structural parsing,
big-endian ordering values and prefix masks.

```
use ipliteral::{classify, mask_for, parse, IpFam, LiteralKind};

assert_eq!(classify("1::2::3"), LiteralKind::Invalid);

let addr = parse("::ffff:192.0.2.1").unwrap();
assert_eq!(addr.version(), "IPv6");
assert_eq!(addr.to_string(), "::ffff:192.0.2.1");
assert_eq!(addr.to_ordering_value() & 0xffff_ffff, 0xc000_0201);

assert_eq!(mask_for(IpFam::V4, 24), 0xffff_ff00);
```
*/

mod iptools;

pub use iptools::*;
