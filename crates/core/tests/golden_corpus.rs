//! Golden corpus tests for subnet calculations.
//!
//! Each case pins the full set of fields a caller renders, so any change in
//! arithmetic or formatting shows up as a readable diff.

use std::net::Ipv4Addr;

use pretty_assertions::assert_eq;
use subnetcalc_core::{
    calculate, calculate_with_hint, cidr_to_mask, expand_ipv6, mask_to_cidr, AddressCount,
    CalculationError, Family, FamilyHint, SubnetResult, UsableHosts,
};

/// Expected IPv4 output, as rendered strings.
struct V4Case {
    input: &'static str,
    mask: &'static str,
    network: &'static str,
    broadcast: &'static str,
    first: Option<&'static str>,
    last: Option<&'static str>,
    total: u64,
    usable: UsableHosts,
}

const V4_CASES: &[V4Case] = &[
    V4Case {
        input: "192.168.1.0/24",
        mask: "255.255.255.0",
        network: "192.168.1.0",
        broadcast: "192.168.1.255",
        first: Some("192.168.1.1"),
        last: Some("192.168.1.254"),
        total: 256,
        usable: UsableHosts::Count(254),
    },
    V4Case {
        input: "10.0.0.0/31",
        mask: "255.255.255.254",
        network: "10.0.0.0",
        broadcast: "10.0.0.1",
        first: None,
        last: None,
        total: 2,
        usable: UsableHosts::PointToPoint,
    },
    V4Case {
        input: "192.168.1.5/32",
        mask: "255.255.255.255",
        network: "192.168.1.5",
        broadcast: "192.168.1.5",
        first: None,
        last: None,
        total: 1,
        usable: UsableHosts::Count(1),
    },
    V4Case {
        input: "172.20.33.7/255.255.240.0",
        mask: "255.255.240.0",
        network: "172.20.32.0",
        broadcast: "172.20.47.255",
        first: Some("172.20.32.1"),
        last: Some("172.20.47.254"),
        total: 4096,
        usable: UsableHosts::Count(4094),
    },
    V4Case {
        input: "10.10.10.10/0",
        mask: "0.0.0.0",
        network: "0.0.0.0",
        broadcast: "255.255.255.255",
        first: Some("0.0.0.1"),
        last: Some("255.255.255.254"),
        total: 4_294_967_296,
        usable: UsableHosts::Count(4_294_967_294),
    },
];

#[test]
fn test_golden_ipv4() {
    for case in V4_CASES {
        let result = calculate(case.input).unwrap();
        let v4 = result.as_v4().expect("IPv4 result");

        assert_eq!(v4.mask.to_string(), case.mask, "{}: mask", case.input);
        assert_eq!(v4.network.to_string(), case.network, "{}: network", case.input);
        assert_eq!(
            v4.broadcast.to_string(),
            case.broadcast,
            "{}: broadcast",
            case.input
        );
        assert_eq!(
            v4.first_usable.map(|a| a.to_string()).as_deref(),
            case.first,
            "{}: first",
            case.input
        );
        assert_eq!(
            v4.last_usable.map(|a| a.to_string()).as_deref(),
            case.last,
            "{}: last",
            case.input
        );
        assert_eq!(v4.total, case.total, "{}: total", case.input);
        assert_eq!(v4.usable, case.usable, "{}: usable", case.input);
    }
}

#[test]
fn test_golden_ipv6_documentation_prefix() {
    let result = calculate("2001:db8::/64").unwrap();
    let v6 = result.as_v6().expect("IPv6 result");

    assert_eq!(v6.network, "2001:0db8:0000:0000:0000:0000:0000:0000");
    assert_eq!(v6.network_compressed, "2001:db8::");
    assert_eq!(v6.host_bits, 64);
    assert_eq!(v6.total, AddressCount::Symbolic { host_bits: 64 });
    assert_eq!(v6.total.to_string(), "2^64");
    assert_eq!(v6.usable, v6.total);
    assert_eq!(v6.network_portion, vec!["2001", "0db8", "0000", "0000"]);
    assert_eq!(v6.host_portion, vec!["0000", "0000", "0000", "0000"]);
}

#[test]
fn test_golden_ipv6_loopback() {
    let result = calculate("::1/128").unwrap();
    let v6 = result.as_v6().expect("IPv6 result");

    assert_eq!(v6.network, "0000:0000:0000:0000:0000:0000:0000:0001");
    assert_eq!(v6.total, AddressCount::Exact(1));
    assert_eq!(v6.host_portion, Vec::<String>::new());
}

#[test]
fn test_golden_ipv6_small_subnet() {
    let result = calculate("fe80::1234:5678/120").unwrap();
    let v6 = result.as_v6().expect("IPv6 result");

    assert_eq!(v6.address, "fe80:0000:0000:0000:0000:0000:1234:5678");
    assert_eq!(v6.network, "fe80:0000:0000:0000:0000:0000:1234:5600");
    assert_eq!(v6.total, AddressCount::Exact(256));
}

#[test]
fn test_golden_errors() {
    let cases: &[(&str, &str)] = &[
        ("", "empty_input"),
        ("10.0.0.1", "missing_separator"),
        ("example/24", "unknown_family"),
        ("300.1.1.1/24", "invalid_ipv4_address"),
        ("10.0.0.0/33", "invalid_ipv4_mask_or_cidr"),
        ("10.0.0.0/255.0.255.0", "invalid_ipv4_mask_or_cidr"),
        ("2001:db8:::1/64", "invalid_ipv6_address"),
        ("2001:db8::/129", "invalid_ipv6_prefix_length"),
    ];

    for (input, kind) in cases {
        let err = calculate(input).unwrap_err();
        assert_eq!(err.kind(), *kind, "{input:?} -> {err}");
    }
}

#[test]
fn test_scenario_invalid_octet() {
    assert_eq!(
        calculate("300.1.1.1/24"),
        Err(CalculationError::InvalidIPv4Address {
            address: "300.1.1.1".to_string()
        })
    );
}

#[test]
fn test_family_hint_mismatch() {
    assert_eq!(
        calculate_with_hint("::1/128", FamilyHint::V4),
        Err(CalculationError::FamilyMismatch {
            detected: Family::V6,
            requested: Family::V4,
        })
    );
}

// =============================================================================
// Properties over every prefix length
// =============================================================================

#[test]
fn test_property_mask_round_trip() {
    for cidr in 0..=32u8 {
        assert_eq!(mask_to_cidr(cidr_to_mask(cidr)), Some(cidr), "/{cidr}");
    }
}

#[test]
fn test_property_ipv4_host_bits() {
    let address = "203.0.113.77";
    for cidr in 0..=32u8 {
        let result = calculate(&format!("{address}/{cidr}")).unwrap();
        let v4 = result.as_v4().unwrap();
        let mask = u32::from(v4.mask);
        let network = u32::from(v4.network);
        let broadcast = u32::from(v4.broadcast);

        assert_eq!(network & !mask, 0, "/{cidr}: network has host bits set");
        assert_eq!(broadcast & !mask, !mask, "/{cidr}: broadcast host bits not all set");
        assert_eq!(v4.total, 1u64 << (32 - cidr), "/{cidr}: total");

        match cidr {
            32 => assert_eq!(v4.usable, UsableHosts::Count(1)),
            31 => assert_eq!(v4.usable, UsableHosts::PointToPoint),
            _ => assert_eq!(v4.usable, UsableHosts::Count(v4.total - 2), "/{cidr}"),
        }
    }
}

#[test]
fn test_property_ipv4_network_is_own_network() {
    for cidr in 0..=32u8 {
        let first = calculate(&format!("198.51.100.200/{cidr}")).unwrap();
        let network = first.as_v4().unwrap().network;
        let again = calculate(&format!("{network}/{cidr}")).unwrap();
        assert_eq!(again.as_v4().unwrap().network, network, "/{cidr}");
    }
}

#[test]
fn test_property_ipv6_counts() {
    for prefix in 0..=128u8 {
        let result = calculate(&format!("2001:db8:1234:5678:9abc:def0:1357:2468/{prefix}")).unwrap();
        let v6 = result.as_v6().unwrap();
        let host_bits = 128 - prefix;

        assert_eq!(v6.host_bits, host_bits);
        if host_bits <= 53 {
            assert_eq!(v6.total, AddressCount::Exact(1u64 << host_bits), "/{prefix}");
        } else {
            assert_eq!(v6.total.to_string(), format!("2^{host_bits}"), "/{prefix}");
        }
        assert_eq!(v6.network_portion.len() + v6.host_portion.len(), 8);
    }
}

#[test]
fn test_property_ipv6_network_is_own_network() {
    for prefix in 0..=128u8 {
        let first = calculate(&format!("fd12:3456:789a:bcde:f012:3456:789a:bcde/{prefix}")).unwrap();
        let network = first.as_v6().unwrap().network.clone();
        let again = calculate(&format!("{network}/{prefix}")).unwrap();
        assert_eq!(again.as_v6().unwrap().network, network, "/{prefix}");
    }
}

#[test]
fn test_property_expand_idempotent() {
    for addr in ["::", "::1", "1::", "2001:db8::8a2e:370:7334", "a:b:c:d:e:f:0:1"] {
        let once = expand_ipv6(addr).unwrap();
        assert_eq!(expand_ipv6(&once).unwrap(), once, "{addr}");
    }
}

#[test]
fn test_result_serializes_with_family_tag() {
    let v4 = serde_json::to_value(calculate("10.0.0.0/31").unwrap()).unwrap();
    assert_eq!(v4["family"], "v4");
    assert_eq!(v4["usable"], "N/A");
    assert_eq!(v4["first_usable"], serde_json::Value::Null);
    assert_eq!(v4["network"], "10.0.0.0");

    let v6 = serde_json::to_value(calculate("2001:db8::/64").unwrap()).unwrap();
    assert_eq!(v6["family"], "v6");
    assert_eq!(v6["total"], "2^64");

    let v6_exact = serde_json::to_value(calculate("2001:db8::/120").unwrap()).unwrap();
    assert_eq!(v6_exact["total"], 256);
}

#[test]
fn test_results_are_independent() {
    let a = calculate("10.0.0.0/8").unwrap();
    let b = calculate("10.0.0.0/8").unwrap();
    assert_eq!(a, b);
    assert!(matches!(a, SubnetResult::V4(_)));
    assert_eq!(a.as_v4().unwrap().network, Ipv4Addr::new(10, 0, 0, 0));
}
