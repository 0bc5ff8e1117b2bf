use crate::addr::IpAddress;


/// Moves the value of the address into the most significant bits of a `u128`, so that IPv4 and
/// IPv6 masks can be examined the same way.
fn top_aligned<A: IpAddress>(addr: A) -> u128 {
    addr.to_u128() << (128 - A::BIT_COUNT)
}

/// Returns the CIDR prefix length of a subnet mask, or `None` if the mask is not a contiguous run
/// of ones followed by a contiguous run of zeroes.
pub fn prefix_from_subnet_mask<A: IpAddress>(subnet_mask: A) -> Option<usize> {
    let aligned = top_aligned(subnet_mask);
    let ones = aligned.leading_ones();
    if aligned.count_ones() != ones {
        // a one after the first zero: non-CIDR
        return None;
    }
    Some(ones as usize)
}

/// Returns the subnet mask with the given CIDR prefix length, or `None` if the prefix is longer
/// than the address.
pub fn subnet_mask_from_prefix<A: IpAddress>(prefix: usize) -> Option<A> {
    if prefix > A::BIT_COUNT {
        return None;
    }
    if prefix == 0 {
        return A::from_u128(0);
    }

    let aligned = u128::MAX << (128 - prefix);
    A::from_u128(aligned >> (128 - A::BIT_COUNT))
}

/// Returns the host mask (Cisco wildcard) with the given CIDR prefix length, or `None` if the
/// prefix is longer than the address.
pub fn host_mask_from_prefix<A: IpAddress>(prefix: usize) -> Option<A> {
    subnet_mask_from_prefix::<A>(prefix)
        .map(|m| m.bitwise_negate())
}
