use std::fmt;


/// The kind of failure a calculation ran into. Every error raised by the engine maps onto exactly
/// one of these.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The address text is not a valid IPv4 or IPv6 literal.
    InvalidAddress,

    /// The mask text is neither a CIDR prefix nor a contiguous netmask or wildcard.
    InvalidMask,

    /// A prefix length exceeds the bit width of the address version.
    PrefixOutOfRange,

    /// A subnet prefix length is not longer than the prefix of the network being split.
    ChildPrefixNotLarger,
}
impl ErrorKind {
    /// A short machine-readable reason string.
    pub fn reason(&self) -> &'static str {
        match self {
            ErrorKind::InvalidAddress => "invalid-address",
            ErrorKind::InvalidMask => "invalid-mask",
            ErrorKind::PrefixOutOfRange => "prefix-out-of-range",
            ErrorKind::ChildPrefixNotLarger => "child-prefix-not-larger",
        }
    }
}
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}
