use std::error::Error;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::{IpAddress, IpAddressParseError, Ipv4Address, Ipv6Address};
use crate::error::ErrorKind;
use crate::net::IpNetwork;


static CIDR_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^/?(?P<cidr>[0-9]+)$").unwrap()
);
static IPV4_MASK_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^[0-9]+(?:[.][0-9]+){3}$").unwrap()
);
static IPV6_MASK_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^[0-9A-Fa-f:.]*:[0-9A-Fa-f:.]*$").unwrap()
);


/// An IP address that has been parsed from a string.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParsedIpAddress {
    Ipv4(Ipv4Address),
    Ipv6(Ipv6Address),
}
impl ParsedIpAddress {
    pub fn version(&self) -> u32 {
        match self {
            ParsedIpAddress::Ipv4(_) => Ipv4Address::VERSION,
            ParsedIpAddress::Ipv6(_) => Ipv6Address::VERSION,
        }
    }

    pub fn max_prefix(&self) -> usize {
        match self {
            ParsedIpAddress::Ipv4(_) => Ipv4Address::BIT_COUNT,
            ParsedIpAddress::Ipv6(_) => Ipv6Address::BIT_COUNT,
        }
    }
}
impl fmt::Display for ParsedIpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedIpAddress::Ipv4(a) => write!(f, "{}", a),
            ParsedIpAddress::Ipv6(a) => write!(f, "{}", a),
        }
    }
}

/// An IP network specification parsed from strings, consisting of the IP address as entered and
/// the network within which this IP address is contained.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NetworkSpec {
    Ipv4(Ipv4Address, IpNetwork<Ipv4Address>),
    Ipv6(Ipv6Address, IpNetwork<Ipv6Address>),
}
impl NetworkSpec {
    pub fn address(&self) -> ParsedIpAddress {
        match self {
            NetworkSpec::Ipv4(a, _) => ParsedIpAddress::Ipv4(*a),
            NetworkSpec::Ipv6(a, _) => ParsedIpAddress::Ipv6(*a),
        }
    }

    pub fn version(&self) -> u32 {
        self.address().version()
    }

    pub fn max_prefix(&self) -> usize {
        self.address().max_prefix()
    }

    pub fn cidr_prefix(&self) -> usize {
        match self {
            NetworkSpec::Ipv4(_, n) => n.cidr_prefix(),
            NetworkSpec::Ipv6(_, n) => n.cidr_prefix(),
        }
    }
}

/// A subnet specification parsed from a string, in the form of either a CIDR prefix or a mask
/// literal. Whether a mask literal is a subnet mask or a wildcard is decided later.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParsedSubnet {
    Cidr(usize),
    Ipv4Mask(Ipv4Address),
    Ipv6Mask(Ipv6Address),
}

/// The way a mask was written.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MaskForm {
    Cidr,
    SubnetMask,
    Wildcard,
}

/// Why a mask was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MaskError {
    /// The text looks like neither a prefix nor a mask.
    Unrecognized,

    /// The text looks like a mask literal but is not a valid address.
    Literal(IpAddressParseError),

    /// The mask is written for the other IP version. The first value is the version of the mask,
    /// the second the version of the address.
    WrongVersion(u32, u32),

    /// The mask is neither a contiguous subnet mask nor a contiguous wildcard.
    NonContiguous,
}
impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::Unrecognized
                => write!(f, "not a CIDR prefix, subnet mask or wildcard"),
            MaskError::Literal(e)
                => write!(f, "{}", e),
            MaskError::WrongVersion(mask_version, addr_version)
                => write!(f, "IPv{} mask given for an IPv{} address", mask_version, addr_version),
            MaskError::NonContiguous
                => write!(f, "mask bits are not contiguous"),
        }
    }
}

/// An error that occurs when attempting to parse an address and mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The IP address could not be parsed. The contained string is the address as given; the
    /// contained error describes why parsing failed.
    InvalidAddress(String, IpAddressParseError),

    /// The mask could not be interpreted. The contained string is the mask as given.
    InvalidMask(String, MaskError),

    /// The CIDR prefix is out of range. The first value is the prefix as given and the second
    /// value is the maximum CIDR prefix for the given IP address type.
    PrefixOutOfRange(String, usize),
}
impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidAddress(_, _) => ErrorKind::InvalidAddress,
            ParseError::InvalidMask(_, _) => ErrorKind::InvalidMask,
            ParseError::PrefixOutOfRange(_, _) => ErrorKind::PrefixOutOfRange,
        }
    }
}
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidAddress(spec, e)
                => write!(f, "invalid address {:?}: {}", spec, e),
            ParseError::InvalidMask(spec, e)
                => write!(f, "invalid mask {:?}: {}", spec, e),
            ParseError::PrefixOutOfRange(got, max)
                => write!(f, "CIDR prefix {} is greater than the maximum ({})", got, max),
        }
    }
}
impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::InvalidAddress(_, e) => Some(e),
            ParseError::InvalidMask(_, MaskError::Literal(e)) => Some(e),
            _ => None,
        }
    }
}


/// Attempts to parse a single IP address.
pub fn parse_addr(spec: &str) -> Result<ParsedIpAddress, IpAddressParseError> {
    if spec.contains(':') {
        // IPv6, possibly with an embedded IPv4 address
        spec.parse()
            .map(ParsedIpAddress::Ipv6)
    } else if spec.contains('.') {
        spec.parse()
            .map(ParsedIpAddress::Ipv4)
    } else {
        Err(IpAddressParseError::UnknownAddressType)
    }
}

/// Attempts to parse a CIDR prefix (`N` or `/N`) that may be at most `max_prefix`.
///
/// Returns `Ok(None)` if the text is not shaped like a CIDR prefix at all.
fn parse_cidr(spec: &str, max_prefix: usize) -> Result<Option<usize>, ParseError> {
    let caps = match CIDR_REGEX.captures(spec) {
        Some(c) => c,
        None => return Ok(None),
    };
    let cidr_str = caps.name("cidr").map(|m| m.as_str()).unwrap_or(spec);

    // only digits are left, so the parse can only fail by overflow
    let cidr: usize = cidr_str.parse()
        .map_err(|_| ParseError::PrefixOutOfRange(String::from(cidr_str), max_prefix))?;
    if cidr > max_prefix {
        return Err(ParseError::PrefixOutOfRange(cidr.to_string(), max_prefix));
    }
    Ok(Some(cidr))
}

/// Attempts to parse a subnet specification (CIDR prefix or mask literal) for an address with the
/// given maximum prefix length.
pub fn parse_subnet(spec: &str, max_prefix: usize) -> Result<ParsedSubnet, ParseError> {
    if let Some(cidr) = parse_cidr(spec, max_prefix)? {
        return Ok(ParsedSubnet::Cidr(cidr));
    }

    let mask_err = |e: IpAddressParseError| ParseError::InvalidMask(String::from(spec), MaskError::Literal(e));
    if IPV4_MASK_REGEX.is_match(spec) {
        let mask: Ipv4Address = spec.parse().map_err(mask_err)?;
        Ok(ParsedSubnet::Ipv4Mask(mask))
    } else if IPV6_MASK_REGEX.is_match(spec) {
        let mask: Ipv6Address = spec.parse().map_err(mask_err)?;
        Ok(ParsedSubnet::Ipv6Mask(mask))
    } else {
        Err(ParseError::InvalidMask(String::from(spec), MaskError::Unrecognized))
    }
}

/// Interprets a mask literal, first as a subnet mask and then as a wildcard, and returns its
/// prefix length.
pub fn prefix_from_mask<A: IpAddress>(mask: A) -> Result<(usize, MaskForm), MaskError> {
    if let Some(prefix) = crate::cidr::prefix_from_subnet_mask(mask) {
        return Ok((prefix, MaskForm::SubnetMask));
    }
    if let Some(prefix) = crate::cidr::prefix_from_subnet_mask(mask.bitwise_negate()) {
        return Ok((prefix, MaskForm::Wildcard));
    }
    Err(MaskError::NonContiguous)
}

fn resolve_prefix<A: IpAddress>(
    mask_str: &str,
    subnet: ParsedSubnet,
    mask_of_version: Option<A>,
) -> Result<(usize, MaskForm), ParseError> {
    let mask_version = match &subnet {
        ParsedSubnet::Cidr(cidr) => return Ok((*cidr, MaskForm::Cidr)),
        ParsedSubnet::Ipv4Mask(_) => Ipv4Address::VERSION,
        ParsedSubnet::Ipv6Mask(_) => Ipv6Address::VERSION,
    };
    let mask = mask_of_version.ok_or_else(|| ParseError::InvalidMask(
        String::from(mask_str),
        MaskError::WrongVersion(mask_version, A::VERSION),
    ))?;
    prefix_from_mask(mask)
        .map_err(|e| ParseError::InvalidMask(String::from(mask_str), e))
}

fn build_network<A: IpAddress>(
    addr: A,
    mask_str: &str,
    subnet: ParsedSubnet,
    mask_of_version: Option<A>,
) -> Result<IpNetwork<A>, ParseError> {
    let (prefix, form) = resolve_prefix(mask_str, subnet, mask_of_version)?;
    log::debug!("mask {:?} read as {:?} for prefix /{}", mask_str, form, prefix);
    IpNetwork::new_with_prefix(addr, prefix)
        .ok_or_else(|| ParseError::PrefixOutOfRange(prefix.to_string(), A::BIT_COUNT))
}

/// Parses an address and a mask into a network specification.
///
/// The mask may be a CIDR prefix (`24` or `/24`), a subnet mask (`255.255.255.0`) or a wildcard
/// (`0.0.0.255`), tried in that order. Host bits set in the address are masked off in the
/// resulting network; the address itself is kept as entered.
pub fn parse(address_text: &str, mask_text: &str) -> Result<NetworkSpec, ParseError> {
    let addr_str = address_text.trim();
    let mask_str = mask_text.trim();

    let addr = parse_addr(addr_str)
        .map_err(|e| ParseError::InvalidAddress(String::from(addr_str), e))?;
    let subnet = parse_subnet(mask_str, addr.max_prefix())?;

    match addr {
        ParsedIpAddress::Ipv4(a) => {
            let mask = match &subnet {
                ParsedSubnet::Ipv4Mask(m) => Some(*m),
                _ => None,
            };
            let net = build_network(a, mask_str, subnet, mask)?;
            Ok(NetworkSpec::Ipv4(a, net))
        },
        ParsedIpAddress::Ipv6(a) => {
            let mask = match &subnet {
                ParsedSubnet::Ipv6Mask(m) => Some(*m),
                _ => None,
            };
            let net = build_network(a, mask_str, subnet, mask)?;
            Ok(NetworkSpec::Ipv6(a, net))
        },
    }
}

/// Parses the prefix length requested for splitting a network into subnets (`N` or `/N`).
pub fn parse_child_prefix(spec: &str, max_prefix: usize) -> Result<usize, ParseError> {
    let spec = spec.trim();
    parse_cidr(spec, max_prefix)?
        .ok_or_else(|| ParseError::InvalidMask(String::from(spec), MaskError::Unrecognized))
}
