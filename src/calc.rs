use std::error::Error;
use std::fmt;

use num_bigint::BigUint;

use crate::addr::{IpAddress, Ipv4Address, Ipv6Address};
use crate::describe::{describe, Description, NetworkDetails};
use crate::error::ErrorKind;
use crate::net::IpNetwork;
use crate::parse::{parse, parse_child_prefix, NetworkSpec, ParseError};
use crate::partition::{partition, PartitionError, Subnets};
use crate::report::Report;


/// An error that occurs during a calculation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalcError {
    Parse(ParseError),
    Partition(PartitionError),
}
impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Parse(e) => e.kind(),
            CalcError::Partition(e) => e.kind(),
        }
    }
}
impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Parse(e) => write!(f, "{}", e),
            CalcError::Partition(e) => write!(f, "{}", e),
        }
    }
}
impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CalcError::Parse(e) => e.source(),
            CalcError::Partition(_) => None,
        }
    }
}
impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self { CalcError::Parse(e) }
}
impl From<PartitionError> for CalcError {
    fn from(e: PartitionError) -> Self { CalcError::Partition(e) }
}


/// The subnets a network has been split into, of either IP version.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SubnetPlan {
    Ipv4(Subnets<Ipv4Address>),
    Ipv6(Subnets<Ipv6Address>),
}
impl SubnetPlan {
    pub fn child_prefix(&self) -> usize {
        match self {
            SubnetPlan::Ipv4(s) => s.child_prefix(),
            SubnetPlan::Ipv6(s) => s.child_prefix(),
        }
    }

    pub fn count(&self) -> BigUint {
        match self {
            SubnetPlan::Ipv4(s) => s.count(),
            SubnetPlan::Ipv6(s) => s.count(),
        }
    }

    pub fn addresses_per_subnet(&self) -> BigUint {
        match self {
            SubnetPlan::Ipv4(s) => s.addresses_per_subnet(),
            SubnetPlan::Ipv6(s) => s.addresses_per_subnet(),
        }
    }

    /// The subnets in CIDR notation, produced one at a time.
    pub fn cidrs(&self) -> Box<dyn Iterator<Item = String>> {
        match *self {
            SubnetPlan::Ipv4(s) => Box::new(s.into_iter().map(|n| n.to_string())),
            SubnetPlan::Ipv6(s) => Box::new(s.into_iter().map(|n| n.to_string())),
        }
    }
}


/// The outcome of a calculation: the network's details and, if requested, its subnets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Calculation {
    pub description: Description,
    pub subnets: Option<SubnetPlan>,
}
impl Calculation {
    /// Lays out the calculation as labeled fields, listing at most `preview_limit` subnets.
    pub fn report(&self, preview_limit: usize) -> Report {
        let mut report = Report::new();

        match &self.description {
            Description::Ipv4(d) => {
                push_head(&mut report, d);
                report.push("Wildcard Mask", d.wildcard());
                report.push("Broadcast Address", d.broadcast.unwrap_or_else(|| d.last_addr()));
                push_counts(&mut report, d);
            },
            Description::Ipv6(d) => {
                push_head(&mut report, d);
                report.push("Compressed Address", d.network_addr());
                report.push("Expanded Address", d.network_addr().to_full_string());
                push_counts(&mut report, d);
            },
        };

        match &self.subnets {
            Some(SubnetPlan::Ipv4(s)) => push_subnets(&mut report, s, preview_limit),
            Some(SubnetPlan::Ipv6(s)) => push_subnets(&mut report, s, preview_limit),
            None => {},
        };

        report
    }
}

fn push_head<A: IpAddress>(report: &mut Report, details: &NetworkDetails<A>) {
    report.push("IP Version", format!("IPv{}", A::VERSION));
    report.push("Host Address", details.address);
    report.push("Network Address", details.network_addr());
    report.push("CIDR", format!("/{}", details.network.cidr_prefix()));
    report.push("Netmask", details.netmask());
}

fn push_counts<A: IpAddress>(report: &mut Report, details: &NetworkDetails<A>) {
    report.push("Total Addresses", &details.total_addresses);
    let range = match details.usable_range {
        Some((first, last)) => format!("{} - {}", first, last),
        None => String::from("N/A"),
    };
    report.push("Usable Host Range", range);
    report.push("Usable Hosts", &details.usable_hosts);
    report.push("Address Class", details.class);
}

fn push_subnets<A: IpAddress>(report: &mut Report, subnets: &Subnets<A>, preview_limit: usize) {
    let count = subnets.count();
    let first: IpNetwork<A> = subnets.first();

    report.push_section("--- Subnetting ---");
    report.push("Number of Subnets", format!("{} (using /{})", count, subnets.child_prefix()));
    report.push("Addresses per Subnet", subnets.addresses_per_subnet());
    report.push("First Subnet Range", format!("{} - {}", first.base_addr(), first.last_addr_of_subnet()));

    let preview = subnets.preview(preview_limit);
    for (i, net) in preview.iter().enumerate() {
        report.push(format!("Subnet {}", i + 1), net);
    }

    let shown = BigUint::from(preview.len());
    if count > shown {
        report.push("More Subnets", format!("{} more", count - shown));
    }
}


/// Runs a full calculation: parses the address and mask, describes the network and, if a subnet
/// prefix is given, splits the network into subnets of that prefix.
///
/// An empty or blank subnet prefix counts as none.
pub fn calculate(address: &str, mask: &str, child_prefix: Option<&str>) -> Result<Calculation, CalcError> {
    let spec = parse(address, mask)?;
    let description = describe(&spec);

    let child_text = child_prefix
        .map(|c| c.trim())
        .filter(|c| !c.is_empty());
    let subnets = match child_text {
        Some(text) => {
            let child = parse_child_prefix(text, spec.max_prefix())?;
            let plan = match spec {
                NetworkSpec::Ipv4(_, n) => SubnetPlan::Ipv4(partition(n, child)?),
                NetworkSpec::Ipv6(_, n) => SubnetPlan::Ipv6(partition(n, child)?),
            };
            Some(plan)
        },
        None => None,
    };

    Ok(Calculation {
        description,
        subnets,
    })
}
