use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, BitXor};
use std::str::FromStr;

/// This trait is to be implemented by structures that represent an IP address or a similar network
/// address.
pub trait IpAddress:
    BitAnd<Output = Self> + BitOr<Output = Self> + BitXor<Output = Self>
    + Copy + fmt::Debug + fmt::Display + FromStr<Err = IpAddressParseError> + Hash + Ord + Sized
{
    /// The number of bits in an address of this type.
    const BIT_COUNT: usize;

    /// The IP version number (4 or 6).
    const VERSION: u32;

    /// Returns the numeric value of this address, zero-extended to 128 bits.
    fn to_u128(&self) -> u128;

    /// Constructs an address from its numeric value. Returns `None` if the value does not fit into
    /// an address of this type.
    fn from_u128(value: u128) -> Option<Self>;

    /// Returns this IP address with each bit negated.
    fn bitwise_negate(&self) -> Self;

    /// Returns the sum of this IP address and an offset. Returns `None` if the addition overflows
    /// beyond the range of the IP address.
    fn add_offset(&self, offset: u128) -> Option<Self>;

    /// Returns the difference between this IP address and an offset. Returns `None` if the
    /// subtraction underflows below the zero address.
    fn subtract_offset(&self, offset: u128) -> Option<Self>;
}

/// An IPv4 address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Address {
    addr_value: u32,
}

impl Ipv4Address {
    /// Constructs a new IPv4 address from its 32-bit representation, where the leftmost byte in the
    /// canonical string representation is the most significant byte (i.e. `"1.2.3.4"` ->
    /// `0x01020304`).
    pub fn new(
        addr_value: u32,
    ) -> Ipv4Address {
        Ipv4Address {
            addr_value,
        }
    }

    pub fn value(&self) -> u32 { self.addr_value }

    pub fn octets(&self) -> [u8; 4] { self.addr_value.to_be_bytes() }
}

impl IpAddress for Ipv4Address {
    const BIT_COUNT: usize = 32;
    const VERSION: u32 = 4;

    fn to_u128(&self) -> u128 { self.addr_value.into() }

    fn from_u128(value: u128) -> Option<Ipv4Address> {
        u32::try_from(value)
            .ok()
            .map(Ipv4Address::new)
    }

    fn bitwise_negate(&self) -> Ipv4Address {
        Ipv4Address::new(!self.addr_value)
    }

    fn add_offset(&self, offset: u128) -> Option<Ipv4Address> {
        let offset32 = u32::try_from(offset).ok()?;
        self.addr_value.checked_add(offset32)
            .map(Ipv4Address::new)
    }

    fn subtract_offset(&self, offset: u128) -> Option<Ipv4Address> {
        let offset32 = u32::try_from(offset).ok()?;
        self.addr_value.checked_sub(offset32)
            .map(Ipv4Address::new)
    }
}

impl FromStr for Ipv4Address {
    type Err = IpAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chunks: Vec<&str> = s.split('.').collect();
        if chunks.len() != 4 {
            return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 4));
        }

        let mut addr_val: u32 = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.len() == 0 {
                return Err(IpAddressParseError::EmptyChunk(i));
            }
            if !chunk.bytes().all(|b| b.is_ascii_digit()) {
                return Err(IpAddressParseError::InvalidChunk(i, String::from(*chunk)));
            }
            if chunk.len() > 3 {
                return Err(IpAddressParseError::ChunkTooLong(i, String::from(*chunk), 3));
            }
            if chunk.len() > 1 && chunk.starts_with('0') {
                // "010" could be octal to some parsers and decimal to others
                return Err(IpAddressParseError::AmbiguousLeadingZero(i, String::from(*chunk)));
            }

            let chunk_val: u32 = chunk.parse()
                .map_err(|_| IpAddressParseError::InvalidChunk(i, String::from(*chunk)))?;
            if chunk_val > 255 {
                return Err(IpAddressParseError::ChunkOutOfRange(i, chunk_val, 0, 255));
            }

            addr_val = (addr_val << 8) | chunk_val;
        }

        Ok(Ipv4Address::new(addr_val))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.octets();
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl BitAnd for Ipv4Address {
    type Output = Ipv4Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value & rhs.addr_value)
    }
}

impl BitOr for Ipv4Address {
    type Output = Ipv4Address;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value | rhs.addr_value)
    }
}

impl BitXor for Ipv4Address {
    type Output = Ipv4Address;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value ^ rhs.addr_value)
    }
}

/// An IPv6 address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv6Address {
    addr_value: u128,
}

impl Ipv6Address {
    /// Constructs a new IPv6 address from its 128-bit representation, where the leftmost chunk in
    /// the canonical string representation is the most significant (i.e.
    /// `"0102:0304:0506:0708:090a:0b0c:0d0e:0f00"` -> `0x0102030405060708090a0b0c0d0e0f00`).
    pub fn new(
        addr_value: u128,
    ) -> Ipv6Address {
        Ipv6Address {
            addr_value,
        }
    }

    pub fn value(&self) -> u128 { self.addr_value }

    /// Outputs the IPv6 address in its full string representation with all leading zeroes and no
    /// omissions of consecutive zero fields.
    pub fn to_full_string(&self) -> String {
        let chunk_strings: Vec<String> = self.to_chunks()
            .iter()
            .map(|c| format!("{:04x}", c))
            .collect();
        chunk_strings.join(":")
    }

    /// Returns this address represented as 16-bit chunks.
    pub fn to_chunks(&self) -> [u16; 8] {
        let mut ret = [0u16; 8];
        for (i, chunk) in ret.iter_mut().enumerate() {
            let shift_count = 112 - (i * 16);
            *chunk = ((self.addr_value >> shift_count) & 0xFFFF) as u16;
        }
        ret
    }

    /// Creates an IPv6 address from its 16-bit chunk representation.
    pub fn from_chunks(chunks: &[u16; 8]) -> Ipv6Address {
        let addr_value = chunks.iter()
            .fold(0u128, |acc, c| (acc << 16) | u128::from(*c));
        Ipv6Address::new(addr_value)
    }

    fn parse_chunk(index: usize, chunk: &str) -> Result<u16, IpAddressParseError> {
        if chunk.len() == 0 {
            return Err(IpAddressParseError::EmptyChunk(index));
        }
        if !chunk.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IpAddressParseError::InvalidChunk(index, String::from(chunk)));
        }
        if chunk.len() > 4 {
            return Err(IpAddressParseError::ChunkTooLong(index, String::from(chunk), 4));
        }
        u16::from_str_radix(chunk, 16)
            .map_err(|_| IpAddressParseError::InvalidChunk(index, String::from(chunk)))
    }
}

impl IpAddress for Ipv6Address {
    const BIT_COUNT: usize = 128;
    const VERSION: u32 = 6;

    fn to_u128(&self) -> u128 { self.addr_value }

    fn from_u128(value: u128) -> Option<Ipv6Address> {
        Some(Ipv6Address::new(value))
    }

    fn bitwise_negate(&self) -> Ipv6Address {
        Ipv6Address::new(!self.addr_value)
    }

    fn add_offset(&self, offset: u128) -> Option<Ipv6Address> {
        self.addr_value.checked_add(offset)
            .map(Ipv6Address::new)
    }

    fn subtract_offset(&self, offset: u128) -> Option<Ipv6Address> {
        self.addr_value.checked_sub(offset)
            .map(Ipv6Address::new)
    }
}

impl FromStr for Ipv6Address {
    type Err = IpAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('%') {
            return Err(IpAddressParseError::ZoneIdentifier);
        }

        let mut chunks: Vec<String> = s.split(':')
            .map(String::from)
            .collect();

        // "::" is the shortest valid form and already has three chunks
        if chunks.len() < 3 {
            return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 8));
        }

        // an embedded IPv4 address ("::ffff:192.0.2.1") stands for the final two chunks
        if chunks.last().map(|c| c.contains('.')).unwrap_or(false) {
            let ipv4_str = chunks.pop().unwrap_or_default();
            let ipv4: Ipv4Address = ipv4_str.parse()?;
            let ipv4_value = ipv4.value();
            chunks.push(format!("{:x}", ipv4_value >> 16));
            chunks.push(format!("{:x}", ipv4_value & 0xFFFF));
        }

        // at most eight chunks, plus one if "::" is at the start or end
        if chunks.len() > 9 {
            return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 8));
        }

        // how many shortening elements do we have?
        let last_index = chunks.len() - 1;
        let shortening_indexes: Vec<usize> = (1..last_index)
            .filter(|i| chunks[*i].len() == 0)
            .collect();
        if shortening_indexes.len() > 1 {
            // "1234::5678::9abc" is invalid
            return Err(IpAddressParseError::TooManyShorteningElements(shortening_indexes.len(), 1));
        }

        let mut actual_chunks = [0u16; 8];
        if let Some(&skip_index) = shortening_indexes.first() {
            // shortened address "123::456a"
            let mut front_count = skip_index;
            let mut back_count = chunks.len() - skip_index - 1;
            if chunks[0].len() == 0 {
                // a leading colon is only allowed as part of a leading "::"
                front_count -= 1;
                if front_count != 0 {
                    return Err(IpAddressParseError::EmptyChunk(0));
                }
            }
            if chunks[last_index].len() == 0 {
                back_count -= 1;
                if back_count != 0 {
                    return Err(IpAddressParseError::EmptyChunk(last_index));
                }
            }
            if front_count + back_count >= 8 {
                // "::" must stand for at least one zero chunk
                return Err(IpAddressParseError::UselessShortening);
            }

            // copy from front
            for i in 0..front_count {
                actual_chunks[i] = Ipv6Address::parse_chunk(i, &chunks[i])?;
            }

            // copy from back
            for i in 0..back_count {
                let source_index = chunks.len() - back_count + i;
                let target_index = 8 - back_count + i;
                actual_chunks[target_index] = Ipv6Address::parse_chunk(target_index, &chunks[source_index])?;
            }

            // leave remaining chunks as zero
        } else {
            // full address "123:45:678:9:ab:cd:ef:21"
            if chunks.len() != 8 {
                return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 8));
            }

            for (i, chunk) in chunks.iter().enumerate() {
                actual_chunks[i] = Ipv6Address::parse_chunk(i, chunk)?;
            }
        }

        Ok(Ipv6Address::from_chunks(&actual_chunks))
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addr_value == 0 {
            return write!(f, "::");
        }

        let chunks = self.to_chunks();

        // find the longest run of zero chunks; the first one wins a tie
        let mut i = 0;
        let mut zero_index: Option<usize> = None;
        let mut zero_length = 0;
        while i < 8 {
            if chunks[i] != 0 {
                i += 1;
                continue;
            }

            // zero chunk!
            let mut j = i + 1;
            while j < 8 && chunks[j] == 0 {
                j += 1;
            }

            if zero_length < j - i {
                zero_index = Some(i);
                zero_length = j - i;
            }

            // continue at j
            i = j;
        }

        if zero_length < 2 {
            // a lone zero chunk is written out, not shortened
            zero_index = None;
        }

        let mut chunk_strings = Vec::new();
        let mut i = 0;
        while i < 8 {
            if zero_index == Some(i) {
                if i == 0 {
                    // the initial part of the address is zero
                    chunk_strings.push(String::from(""));
                }

                // an empty chunk causes two adjacent colons
                chunk_strings.push(String::from(""));

                // jump past the length
                i += zero_length;

                if i == 8 {
                    // the final part of the address is zero
                    chunk_strings.push(String::from(""));
                }
            } else {
                chunk_strings.push(format!("{:x}", chunks[i]));
                i += 1;
            }
        }

        write!(f, "{}", chunk_strings.join(":"))
    }
}

impl BitAnd for Ipv6Address {
    type Output = Ipv6Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ipv6Address::new(self.addr_value & rhs.addr_value)
    }
}

impl BitOr for Ipv6Address {
    type Output = Ipv6Address;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ipv6Address::new(self.addr_value | rhs.addr_value)
    }
}

impl BitXor for Ipv6Address {
    type Output = Ipv6Address;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Ipv6Address::new(self.addr_value ^ rhs.addr_value)
    }
}

/// An error that occurs when an IP address literal cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IpAddressParseError {
    UnknownAddressType,
    IncorrectChunkCount(usize, usize),
    EmptyChunk(usize),
    InvalidChunk(usize, String),
    ChunkTooLong(usize, String, usize),
    AmbiguousLeadingZero(usize, String),
    ChunkOutOfRange(usize, u32, u32, u32),
    TooManyShorteningElements(usize, usize),
    UselessShortening,
    ZoneIdentifier,
}
impl fmt::Display for IpAddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddressParseError::UnknownAddressType
                => write!(f, "unknown IP address type"),
            IpAddressParseError::IncorrectChunkCount(got, expected)
                => write!(f, "IP address has {} chunk(s); expected {}", got, expected),
            IpAddressParseError::EmptyChunk(chunk_idx)
                => write!(f, "IP address chunk with index {} is empty", chunk_idx),
            IpAddressParseError::InvalidChunk(chunk_idx, chunk)
                => write!(f, "IP address chunk with index {} ({:?}) contains invalid characters", chunk_idx, chunk),
            IpAddressParseError::ChunkTooLong(chunk_idx, chunk, max_len)
                => write!(f, "IP address chunk with index {} ({:?}) is longer than {} characters", chunk_idx, chunk, max_len),
            IpAddressParseError::AmbiguousLeadingZero(chunk_idx, chunk)
                => write!(f, "IP address chunk with index {} ({:?}) has an ambiguous leading zero", chunk_idx, chunk),
            IpAddressParseError::ChunkOutOfRange(chunk_idx, got, min, max)
                => write!(f, "IP address chunk with index {} ({}) is out of range {} <= n <= {}", chunk_idx, got, min, max),
            IpAddressParseError::TooManyShorteningElements(got, expected_max)
                => write!(f, "IP address has {} shortening elements; expected maximum {}", got, expected_max),
            IpAddressParseError::UselessShortening
                => write!(f, "IP address shortening element does not replace any chunks"),
            IpAddressParseError::ZoneIdentifier
                => write!(f, "IPv6 zone identifiers are not supported"),
        }
    }
}
impl Error for IpAddressParseError {
}
