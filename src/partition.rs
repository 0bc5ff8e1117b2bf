use std::error::Error;
use std::fmt;
use std::iter::FusedIterator;

use num_bigint::BigUint;

use crate::addr::IpAddress;
use crate::error::ErrorKind;
use crate::net::IpNetwork;


/// An error that occurs when a network cannot be split into subnets of the requested size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PartitionError {
    /// The requested subnet prefix is not longer than the prefix of the network. The first value
    /// is the network's prefix and the second value the requested prefix.
    ChildPrefixNotLarger(usize, usize),

    /// The requested subnet prefix is longer than the address. The first value is the requested
    /// prefix and the second value the maximum for the IP version.
    PrefixOutOfRange(usize, usize),
}
impl PartitionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PartitionError::ChildPrefixNotLarger(_, _) => ErrorKind::ChildPrefixNotLarger,
            PartitionError::PrefixOutOfRange(_, _) => ErrorKind::PrefixOutOfRange,
        }
    }
}
impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionError::ChildPrefixNotLarger(parent, child)
                => write!(f, "subnet prefix /{} must be longer than the network prefix /{}", child, parent),
            PartitionError::PrefixOutOfRange(got, max)
                => write!(f, "subnet prefix {} is greater than the maximum ({})", got, max),
        }
    }
}
impl Error for PartitionError {
}


/// The equally-sized subnets a network splits into for a given, longer prefix.
///
/// Nothing is computed up front; every call to `iter` walks the subnets afresh.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Subnets<A: IpAddress> {
    parent: IpNetwork<A>,
    child_prefix: usize,
}
impl<A: IpAddress> Subnets<A> {
    pub fn parent(&self) -> IpNetwork<A> { self.parent }
    pub fn child_prefix(&self) -> usize { self.child_prefix }

    /// The number of subnets, `2^(child_prefix - parent_prefix)`.
    pub fn count(&self) -> BigUint {
        BigUint::from(1u32) << (self.child_prefix - self.parent.cidr_prefix())
    }

    pub fn addresses_per_subnet(&self) -> BigUint {
        BigUint::from(1u32) << (A::BIT_COUNT - self.child_prefix)
    }

    /// The distance between the base addresses of consecutive subnets. The child prefix is at
    /// least 1, so this always fits.
    fn step(&self) -> u128 {
        1u128 << (A::BIT_COUNT - self.child_prefix)
    }

    fn last_base_addr(&self) -> A {
        // the last subnet ends where the parent ends
        self.parent.last_addr_of_subnet() & self.first().subnet_mask()
    }

    pub fn first(&self) -> IpNetwork<A> {
        IpNetwork::new_unchecked(self.parent.base_addr(), self.child_prefix)
    }

    pub fn last(&self) -> IpNetwork<A> {
        IpNetwork::new_unchecked(self.last_base_addr(), self.child_prefix)
    }

    /// Returns the subnet at the given position, or `None` if there are not that many subnets.
    pub fn get(&self, index: u128) -> Option<IpNetwork<A>> {
        let index_bits = (self.child_prefix - self.parent.cidr_prefix()) as u32;
        if let Some(overflow) = index.checked_shr(index_bits) {
            if overflow != 0 {
                return None;
            }
        }

        let offset = index.checked_mul(self.step())?;
        let base_addr = self.parent.base_addr().add_offset(offset)?;
        Some(IpNetwork::new_unchecked(base_addr, self.child_prefix))
    }

    /// Collects at most `limit` subnets from the start.
    pub fn preview(&self, limit: usize) -> Vec<IpNetwork<A>> {
        self.iter()
            .take(limit)
            .collect()
    }

    pub fn iter(&self) -> SubnetIter<A> {
        log::trace!("walking the /{} subnets of {}", self.child_prefix, self.parent);
        SubnetIter {
            is_empty: false,
            front_addr: self.parent.base_addr(),
            back_addr: self.last_base_addr(),
            step: self.step(),
            child_prefix: self.child_prefix,
        }
    }
}
impl<A: IpAddress> IntoIterator for Subnets<A> {
    type Item = IpNetwork<A>;
    type IntoIter = SubnetIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, A: IpAddress> IntoIterator for &'a Subnets<A> {
    type Item = IpNetwork<A>;
    type IntoIter = SubnetIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Walks the subnets of a network in ascending order (or descending, from the back).
#[derive(Clone, Debug)]
pub struct SubnetIter<A: IpAddress> {
    is_empty: bool,
    front_addr: A,
    back_addr: A,
    step: u128,
    child_prefix: usize,
}
impl<A: IpAddress> SubnetIter<A> {
    /// The number of subnets left, or `None` if that does not fit into a `u128`.
    fn remaining(&self) -> Option<u128> {
        if self.is_empty {
            return Some(0);
        }
        let span = self.back_addr.to_u128() - self.front_addr.to_u128();
        (span / self.step).checked_add(1)
    }
}
impl<A: IpAddress> Iterator for SubnetIter<A> {
    type Item = IpNetwork<A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_empty {
            return None;
        }

        let current = self.front_addr;
        if current == self.back_addr {
            self.is_empty = true;
        } else if let Some(next_addr) = current.add_offset(self.step) {
            self.front_addr = next_addr;
        } else {
            self.is_empty = true;
        }

        Some(IpNetwork::new_unchecked(current, self.child_prefix))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if self.is_empty {
            return None;
        }

        let skipped = (n as u128).checked_mul(self.step)
            .and_then(|offset| self.front_addr.add_offset(offset));
        match skipped {
            Some(addr) if addr <= self.back_addr => {
                self.front_addr = addr;
                self.next()
            },
            _ => {
                self.is_empty = true;
                None
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining().map(usize::try_from) {
            Some(Ok(n)) => (n, Some(n)),
            _ => (usize::MAX, None),
        }
    }
}
impl<A: IpAddress> DoubleEndedIterator for SubnetIter<A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.is_empty {
            return None;
        }

        let current = self.back_addr;
        if current == self.front_addr {
            self.is_empty = true;
        } else if let Some(prev_addr) = current.subtract_offset(self.step) {
            self.back_addr = prev_addr;
        } else {
            self.is_empty = true;
        }

        Some(IpNetwork::new_unchecked(current, self.child_prefix))
    }
}
impl<A: IpAddress> FusedIterator for SubnetIter<A> {
}


/// Splits a network into the subnets with the given, longer prefix.
pub fn partition<A: IpAddress>(parent: IpNetwork<A>, child_prefix: usize) -> Result<Subnets<A>, PartitionError> {
    if child_prefix <= parent.cidr_prefix() {
        return Err(PartitionError::ChildPrefixNotLarger(parent.cidr_prefix(), child_prefix));
    }
    if child_prefix > A::BIT_COUNT {
        return Err(PartitionError::PrefixOutOfRange(child_prefix, A::BIT_COUNT));
    }

    let subnets = Subnets {
        parent,
        child_prefix,
    };
    log::debug!("{} splits into {} subnets of /{}", parent, subnets.count(), child_prefix);
    Ok(subnets)
}
