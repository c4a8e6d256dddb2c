// Copyright (c) 2026 Mikko Tanner. All rights reserved.

use clap::Parser;
use ipnet::IpNet;
use ipliteral::{mask_for, parse, try_mask_for, Address, AddressError, IpFam};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ipaddr-probe")]
#[command(about = "Classify IP address literals and show their numeric values.")]
struct CommandLine {
    /// Prefix length to compute a mask and network for
    #[arg(short, long, allow_negative_numbers = true)]
    prefix: Option<i32>,
    /// Reject out-of-range prefixes instead of clamping them
    #[arg(short, long)]
    strict: bool,
    /// Address literals to inspect
    #[arg(required = true)]
    literals: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: CommandLine = CommandLine::parse();
    let mut failed: bool = false;

    for literal in &args.literals {
        match describe(literal, args.prefix, args.strict) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("{literal}: {e}");
                failed = true;
            }
        }
    }

    match failed {
        true => ExitCode::FAILURE,
        false => ExitCode::SUCCESS,
    }
}

fn describe(literal: &str, prefix: Option<i32>, strict: bool) -> Result<String, AddressError> {
    let addr: Address = parse(literal)?;
    let fam: IpFam = addr.family();
    let width: usize = fam.bits() as usize / 4;
    let mut line: String = format!(
        "{addr} {} {:#0w$x}",
        addr.version(),
        addr.to_ordering_value(),
        w = width + 2
    );

    if let Some(prefix) = prefix {
        let (mask, prefix): (u128, i32) = match strict {
            true => (try_mask_for(fam, prefix)?, prefix),
            false => (mask_for(fam, prefix), prefix.clamp(0, fam.bits() as i32)),
        };
        // network() is strict, so it only ever sees an in-range prefix here
        let net: IpNet = addr.network(prefix)?;
        line.push_str(&format!(" mask={mask:#0w$x} net={net}", w = width + 2));
    }
    Ok(line)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_without_prefix() {
        let line: String = describe("10.0.0.1", None, false).unwrap();
        assert_eq!(line, "10.0.0.1 IPv4 0x0a000001");
        assert!(describe("10.0.0.256", None, false).is_err());
    }

    #[test]
    fn test_describe_clamps_prefix() {
        let cases: &[(&str, i32, &str)] = &[
            ("10.0.0.1", 40, "mask=0xffffffff net=10.0.0.1/32"),
            ("10.0.0.1", -3, "mask=0x00000000 net=0.0.0.0/0"),
            ("10.0.0.1", 24, "mask=0xffffff00 net=10.0.0.0/24"),
            ("2001:db8::1", 200, "net=2001:db8::1/128"),
        ];
        for (literal, prefix, expected) in cases {
            let line: String = describe(literal, Some(*prefix), false).unwrap();
            assert!(line.ends_with(expected), "'{literal}' /{prefix}: {line}");
        }
    }

    #[test]
    fn test_describe_strict() {
        assert!(matches!(
            describe("10.0.0.1", Some(40), true),
            Err(AddressError::PrefixOutOfRange { prefix: 40, .. })
        ));
        let line: String = describe("10.0.0.1", Some(8), true).unwrap();
        assert!(line.ends_with("mask=0xff000000 net=10.0.0.0/8"), "{line}");
    }
}
