use std::fmt;

use num_bigint::BigUint;

use crate::addr::{IpAddress, Ipv4Address, Ipv6Address};
use crate::net::IpNetwork;
use crate::parse::NetworkSpec;


/// The historical classful designation of an IPv4 address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
    Invalid,
    NotApplicable,
}
impl AddressClass {
    /// Classifies an IPv4 address by its first octet.
    pub fn of_ipv4(addr: Ipv4Address) -> AddressClass {
        match addr.octets()[0] {
            1..=126 => AddressClass::A,
            128..=191 => AddressClass::B,
            192..=223 => AddressClass::C,
            224..=239 => AddressClass::D,
            240..=255 => AddressClass::E,
            _ => AddressClass::Invalid,
        }
    }
}
impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::A => write!(f, "A"),
            AddressClass::B => write!(f, "B"),
            AddressClass::C => write!(f, "C"),
            AddressClass::D => write!(f, "D (Multicast)"),
            AddressClass::E => write!(f, "E (Reserved)"),
            AddressClass::Invalid => write!(f, "Invalid"),
            AddressClass::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// The properties of a network, derived from an address and a prefix length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkDetails<A: IpAddress> {
    /// The address as entered, host bits included.
    pub address: A,

    /// The network containing the address.
    pub network: IpNetwork<A>,

    /// The broadcast address; IPv6 has none.
    pub broadcast: Option<A>,

    /// The first and last usable address, or `None` if the network has no usable addresses.
    pub usable_range: Option<(A, A)>,

    pub total_addresses: BigUint,
    pub usable_hosts: BigUint,
    pub class: AddressClass,
}
impl<A: IpAddress> NetworkDetails<A> {
    pub fn network_addr(&self) -> A { self.network.base_addr() }
    pub fn netmask(&self) -> A { self.network.subnet_mask() }
    pub fn wildcard(&self) -> A { self.network.cisco_wildcard() }
    pub fn last_addr(&self) -> A { self.network.last_addr_of_subnet() }
}

/// The details of either an IPv4 or an IPv6 network.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Description {
    Ipv4(NetworkDetails<Ipv4Address>),
    Ipv6(NetworkDetails<Ipv6Address>),
}
impl Description {
    pub fn version(&self) -> u32 {
        match self {
            Description::Ipv4(_) => Ipv4Address::VERSION,
            Description::Ipv6(_) => Ipv6Address::VERSION,
        }
    }

    pub fn cidr_prefix(&self) -> usize {
        match self {
            Description::Ipv4(d) => d.network.cidr_prefix(),
            Description::Ipv6(d) => d.network.cidr_prefix(),
        }
    }

    pub fn max_prefix(&self) -> usize {
        match self {
            Description::Ipv4(_) => Ipv4Address::BIT_COUNT,
            Description::Ipv6(_) => Ipv6Address::BIT_COUNT,
        }
    }

    pub fn total_addresses(&self) -> &BigUint {
        match self {
            Description::Ipv4(d) => &d.total_addresses,
            Description::Ipv6(d) => &d.total_addresses,
        }
    }

    pub fn usable_hosts(&self) -> &BigUint {
        match self {
            Description::Ipv4(d) => &d.usable_hosts,
            Description::Ipv6(d) => &d.usable_hosts,
        }
    }
}

/// Derives the IPv4 network properties: the last address is the broadcast address, and neither
/// it nor the network address is usable.
pub fn describe_ipv4(address: Ipv4Address, network: IpNetwork<Ipv4Address>) -> NetworkDetails<Ipv4Address> {
    let usable_range = network.first_host_addr()
        .zip(network.last_host_addr());

    NetworkDetails {
        address,
        network,
        broadcast: Some(network.last_addr_of_subnet()),
        usable_range,
        total_addresses: network.address_count(),
        usable_hosts: network.host_count(),
        class: AddressClass::of_ipv4(network.base_addr()),
    }
}

/// Derives the IPv6 network properties. There is no broadcast address, so every address in the
/// network counts as usable.
pub fn describe_ipv6(address: Ipv6Address, network: IpNetwork<Ipv6Address>) -> NetworkDetails<Ipv6Address> {
    let total_addresses = network.address_count();

    NetworkDetails {
        address,
        network,
        broadcast: None,
        usable_range: Some((network.base_addr(), network.last_addr_of_subnet())),
        usable_hosts: total_addresses.clone(),
        total_addresses,
        class: AddressClass::NotApplicable,
    }
}

/// Derives the properties of the network in the given specification.
pub fn describe(spec: &NetworkSpec) -> Description {
    match spec {
        NetworkSpec::Ipv4(a, n) => Description::Ipv4(describe_ipv4(*a, *n)),
        NetworkSpec::Ipv6(a, n) => Description::Ipv6(describe_ipv6(*a, *n)),
    }
}
