//! Address and subnet arithmetic for IPv4 and IPv6.
//!
//! An address and a mask are parsed into a network, the network is described (netmask, wildcard,
//! broadcast, usable range, counts, class) and, optionally, split into equally-sized subnets that
//! are produced lazily.

pub mod addr;
pub mod calc;
pub mod cidr;
pub mod describe;
pub mod error;
pub mod net;
pub mod parse;
pub mod partition;
pub mod report;

pub use crate::addr::{IpAddress, IpAddressParseError, Ipv4Address, Ipv6Address};
pub use crate::calc::{calculate, CalcError, Calculation, SubnetPlan};
pub use crate::describe::{describe, AddressClass, Description, NetworkDetails};
pub use crate::error::ErrorKind;
pub use crate::net::IpNetwork;
pub use crate::parse::{parse, NetworkSpec, ParseError};
pub use crate::partition::{partition, PartitionError, SubnetIter, Subnets};
pub use crate::report::{Field, Report};
