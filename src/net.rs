use std::fmt;

use num_bigint::BigUint;

use crate::addr::IpAddress;
use crate::cidr;


/// An IP network, described by its base address and its CIDR prefix length.
///
/// The base address never has any host bits set; constructing a network from an arbitrary host
/// address masks them off.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IpNetwork<A: IpAddress> {
    base_addr: A,
    cidr_prefix: usize,
}

impl<A: IpAddress> IpNetwork<A> {
    /// Returns the network with the given prefix length that contains the given address, or
    /// `None` if the prefix is longer than the address.
    pub fn new_with_prefix(
        addr: A,
        cidr_prefix: usize,
    ) -> Option<IpNetwork<A>> {
        let subnet_mask: A = cidr::subnet_mask_from_prefix(cidr_prefix)?;

        // calculate base address by ANDing address with subnet mask
        let base_addr = addr & subnet_mask;

        Some(IpNetwork {
            base_addr,
            cidr_prefix,
        })
    }

    /// Assembles a network from a base address without host bits and a prefix length no longer
    /// than the address. Both are the caller's responsibility.
    pub(crate) fn new_unchecked(base_addr: A, cidr_prefix: usize) -> IpNetwork<A> {
        debug_assert!(cidr_prefix <= A::BIT_COUNT);
        IpNetwork {
            base_addr,
            cidr_prefix,
        }
    }

    pub fn base_addr(&self) -> A { self.base_addr }
    pub fn cidr_prefix(&self) -> usize { self.cidr_prefix }
    pub fn host_bits(&self) -> usize { A::BIT_COUNT - self.cidr_prefix }

    pub fn subnet_mask(&self) -> A {
        // every constructor keeps the prefix within the address width
        cidr::subnet_mask_from_prefix(self.cidr_prefix)
            .unwrap_or_else(|| unreachable!("prefix /{} exceeds {} bits", self.cidr_prefix, A::BIT_COUNT))
    }

    pub fn cisco_wildcard(&self) -> A {
        cidr::host_mask_from_prefix(self.cidr_prefix)
            .unwrap_or_else(|| unreachable!("prefix /{} exceeds {} bits", self.cidr_prefix, A::BIT_COUNT))
    }

    /// The number of addresses in this network, including any network and broadcast addresses.
    pub fn address_count(&self) -> BigUint {
        BigUint::from(1u32) << self.host_bits()
    }

    /// The number of addresses in this network excluding the network and broadcast addresses;
    /// zero if the network is too small to have both.
    pub fn host_count(&self) -> BigUint {
        if self.host_bits() < 2 {
            BigUint::from(0u32)
        } else {
            self.address_count() - 2u32
        }
    }

    pub fn first_host_addr(&self) -> Option<A> {
        if self.host_bits() < 2 {
            // all ones: the base address is the network
            // all ones except one zero: 0 is the network, 1 is broadcast
            // => at least two zeroes necessary for a non-degenerate subnet
            return None;
        }
        self.base_addr.add_offset(1)
    }

    pub fn last_host_addr(&self) -> Option<A> {
        if self.host_bits() < 2 {
            return None;
        }
        self.last_addr_of_subnet().subtract_offset(1)
    }

    /// The last address of the network; the broadcast address in IPv4 terms.
    pub fn last_addr_of_subnet(&self) -> A {
        self.base_addr | self.cisco_wildcard()
    }

    /// The base address of the equally-sized network following this one, or `None` if this
    /// network ends at the top of the address space.
    pub fn next_subnet_base_addr(&self) -> Option<A> {
        self.last_addr_of_subnet().add_offset(1)
    }
}
impl<A: IpAddress> fmt::Display for IpNetwork<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.cidr_prefix)
    }
}


#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::addr::{Ipv4Address, Ipv6Address};

    pub(crate) fn parse_ipv4(s: &str) -> Ipv4Address {
        s.parse().unwrap()
    }

    pub(crate) fn parse_ipv4net(s: &str, prefix: usize) -> IpNetwork<Ipv4Address> {
        IpNetwork::new_with_prefix(parse_ipv4(s), prefix).unwrap()
    }

    pub(crate) fn parse_ipv6(s: &str) -> Ipv6Address {
        s.parse().unwrap()
    }

    pub(crate) fn parse_ipv6net(s: &str, prefix: usize) -> IpNetwork<Ipv6Address> {
        IpNetwork::new_with_prefix(parse_ipv6(s), prefix).unwrap()
    }

    #[test]
    fn test_base_addr_masked() {
        let net = parse_ipv4net("192.168.1.10", 24);
        assert_eq!(parse_ipv4("192.168.1.0"), net.base_addr());
        assert_eq!(parse_ipv4("255.255.255.0"), net.subnet_mask());
        assert_eq!(parse_ipv4("0.0.0.255"), net.cisco_wildcard());
        assert_eq!("192.168.1.0/24", net.to_string());

        let net = parse_ipv6net("2001:db8:1234::1", 32);
        assert_eq!(parse_ipv6("2001:db8::"), net.base_addr());
        assert_eq!("2001:db8::/32", net.to_string());

        let net = parse_ipv4net("10.1.2.3", 0);
        assert_eq!(parse_ipv4("0.0.0.0"), net.base_addr());
        assert_eq!(parse_ipv4("255.255.255.255"), net.last_addr_of_subnet());

        assert_eq!(None, IpNetwork::new_with_prefix(parse_ipv4("10.1.2.3"), 33));
        assert_eq!(None, IpNetwork::new_with_prefix(parse_ipv6("::1"), 129));
    }

    #[test]
    fn test_masks_follow_prefix() {
        for prefix in 0..=32 {
            let net = parse_ipv4net("172.16.5.4", prefix);
            assert_eq!(cidr::subnet_mask_from_prefix::<Ipv4Address>(prefix), Some(net.subnet_mask()));
            assert_eq!(cidr::host_mask_from_prefix::<Ipv4Address>(prefix), Some(net.cisco_wildcard()));
            assert_eq!(Ipv4Address::new(0xFFFFFFFF), net.subnet_mask() | net.cisco_wildcard());
            assert_eq!(Ipv4Address::new(0), net.subnet_mask() & net.cisco_wildcard());
        }
        for prefix in 0..=128 {
            let net = parse_ipv6net("2001:db8::1", prefix);
            assert_eq!(Some(prefix), cidr::prefix_from_subnet_mask(net.subnet_mask()));
            assert_eq!(Ipv6Address::new(u128::MAX), net.subnet_mask() | net.cisco_wildcard());
        }

        // the mask never leaks the base address through
        let net = parse_ipv4net("10.20.30.40", 32);
        assert_eq!(parse_ipv4("255.255.255.255"), net.subnet_mask());
        assert_eq!(parse_ipv4("0.0.0.0"), net.cisco_wildcard());
    }

    #[test]
    fn test_hosts() {
        let net = parse_ipv4net("192.0.2.77", 28);
        assert_eq!(parse_ipv4("192.0.2.64"), net.base_addr());
        assert_eq!(Some(parse_ipv4("192.0.2.65")), net.first_host_addr());
        assert_eq!(Some(parse_ipv4("192.0.2.78")), net.last_host_addr());
        assert_eq!(parse_ipv4("192.0.2.79"), net.last_addr_of_subnet());
        assert_eq!(BigUint::from(16u32), net.address_count());
        assert_eq!(BigUint::from(14u32), net.host_count());

        let net = parse_ipv4net("192.0.2.77", 31);
        assert_eq!(None, net.first_host_addr());
        assert_eq!(None, net.last_host_addr());
        assert_eq!(BigUint::from(2u32), net.address_count());
        assert_eq!(BigUint::from(0u32), net.host_count());

        let net = parse_ipv4net("192.0.2.77", 32);
        assert_eq!(None, net.first_host_addr());
        assert_eq!(parse_ipv4("192.0.2.77"), net.last_addr_of_subnet());
        assert_eq!(BigUint::from(1u32), net.address_count());
        assert_eq!(BigUint::from(0u32), net.host_count());
    }

    #[test]
    fn test_address_count_wide() {
        let net = parse_ipv6net("::", 0);
        assert_eq!(BigUint::from(1u32) << 128usize, net.address_count());
        assert_eq!(parse_ipv6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), net.last_addr_of_subnet());
        assert_eq!(None, net.next_subnet_base_addr());

        let net = parse_ipv6net("2001:db8::1", 32);
        assert_eq!(BigUint::from(1u32) << 96usize, net.address_count());
    }

    #[test]
    fn test_next_subnet() {
        let net = parse_ipv4net("10.0.0.0", 10);
        assert_eq!(Some(parse_ipv4("10.64.0.0")), net.next_subnet_base_addr());

        let net = parse_ipv4net("255.255.255.0", 24);
        assert_eq!(None, net.next_subnet_base_addr());
    }
}
