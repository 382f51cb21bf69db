//! IPv4 address block (CIDR) utilities.
//!
//! Provides [`Ipv4`] for representing an address block as base address plus
//! prefix length, along with the mask arithmetic the planner is built on.

use crate::error::PlanError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Address width in bits, the longest possible prefix.
pub const MAX_LENGTH: u8 = 32;

/// Convert a dotted-quad address to its 32-bit value.
///
/// # Examples
/// ```
/// use vpc_subnet_planner::models::ip_to_int;
/// assert_eq!(ip_to_int("10.0.32.0").unwrap(), 0x0A002000);
/// ```
pub fn ip_to_int(addr: &str) -> Result<u32, PlanError> {
    let addr = Ipv4Addr::from_str(addr.trim())
        .map_err(|_| PlanError::InvalidAddress(addr.to_string()))?;
    Ok(u32::from(addr))
}

/// Convert a 32-bit value back to dotted-quad form.
pub fn int_to_ip(bits: u32) -> String {
    Ipv4Addr::from(bits).to_string()
}

/// Convert a prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use vpc_subnet_planner::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, PlanError> {
    if len > MAX_LENGTH {
        Err(PlanError::InvalidPrefix(len.to_string()))
    } else {
        Ok(mask_bits(len))
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = get_cidr_mask(len)?;
    let subnet_size = 1u64 << (MAX_LENGTH - len);
    let network_bits = (u32::from(addr) & mask) as u64;
    let next_bits = network_bits + subnet_size;
    if next_bits > u32::MAX as u64 {
        return Err(PlanError::AddressOverflow(format!("{addr}/{len}")));
    }
    Ok(Ipv4Addr::from(next_bits as u32))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// Number of usable host addresses in a VPC subnet.
///
/// The provider reserves 5 addresses per subnet (network, router, DNS,
/// future use and broadcast).
pub fn num_aws_hosts(len: u8) -> Result<u64, PlanError> {
    if len >= MAX_LENGTH - 2 {
        // /29 = 8 ips, 3 usable
        Err(PlanError::InvalidPrefix(format!(
            "/{len} leaves no usable hosts"
        )))
    } else {
        Ok((1u64 << (MAX_LENGTH - len)) - 5)
    }
}

/// Shortest prefix the address is aligned to, based on trailing zeros.
pub fn lo_mask(ip: Ipv4Addr) -> u8 {
    let trailing_zeros = u32::from(ip).trailing_zeros().min(MAX_LENGTH as u32) as u8;
    MAX_LENGTH - trailing_zeros
}

fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    ((u32::MAX as u64 >> right_len) << right_len) as u32
}

/// IPv4 address block in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The base address.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Ipv4 {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/16").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, PlanError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| PlanError::InvalidCidr(addr_cidr.to_string()))?;
        let addr = Ipv4Addr::from_str(addr)
            .map_err(|_| PlanError::InvalidAddress(addr.to_string()))?;
        if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::InvalidPrefix(mask.to_string()));
        }
        let mask: u8 = mask
            .parse()
            .map_err(|_| PlanError::InvalidPrefix(mask.to_string()))?;
        if mask > MAX_LENGTH {
            return Err(PlanError::InvalidPrefix(mask.to_string()));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the broadcast address for this block, keeping the prefix.
    pub fn broadcast(&self) -> Ipv4 {
        Ipv4 {
            addr: self.hi(),
            mask: self.mask,
        }
    }

    /// This block with host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        let mask = mask_bits(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Number of addresses in the block.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask.min(MAX_LENGTH))
    }

    /// True when the address has bits set below the prefix.
    pub fn has_host_bits(&self) -> bool {
        self.addr != self.lo()
    }

    /// Check if an IP address is contained within this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// Check if another block lies entirely within this one.
    pub fn contains_block(&self, other: &Ipv4) -> bool {
        self.contains(other.lo()) && self.contains(other.hi())
    }

    /// Check if two blocks share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_to_int_round_trip() {
        for addr in [
            "0.0.0.0",
            "10.0.0.0",
            "10.0.160.0",
            "172.16.254.1",
            "192.168.1.0",
            "255.255.255.255",
        ] {
            assert_eq!(int_to_ip(ip_to_int(addr).unwrap()), addr);
        }
        assert_eq!(ip_to_int("0.0.0.0").unwrap(), 0);
        assert_eq!(ip_to_int("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(ip_to_int("10.0.32.0").unwrap(), 167_780_352);
    }

    #[test]
    fn test_int_to_ip_sweep() {
        // every 2^24 - 1 step crosses all four octets
        for bits in (0..=u32::MAX).step_by(16_777_215) {
            assert_eq!(ip_to_int(&int_to_ip(bits)).unwrap(), bits);
        }
    }

    #[test]
    fn test_ip_to_int_invalid() {
        for addr in ["", "10.0.0", "10.0.0.0.0", "256.0.0.1", "10.a.0.1", "-1.0.0.0"] {
            assert_eq!(
                ip_to_int(addr).unwrap_err(),
                PlanError::InvalidAddress(addr.to_string()),
                "{addr} should be rejected"
            );
        }
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(19).unwrap(), 0xFFFFE000);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), ip);
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(10, 0, 0, 0);
        assert_eq!(ip_after_subnet(ip, 19).unwrap(), Ipv4Addr::new(10, 0, 32, 0));
        assert_eq!(ip_after_subnet(ip, 16).unwrap(), Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(ip_after_subnet(ip, 32).unwrap(), Ipv4Addr::new(10, 0, 0, 1));
        assert!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 0), 24).is_err());
    }

    #[test]
    fn test_broadcast_addr() {
        let ip = Ipv4Addr::new(10, 0, 32, 0);
        assert_eq!(broadcast_addr(ip, 19).unwrap(), Ipv4Addr::new(10, 0, 63, 255));
        assert_eq!(broadcast_addr(ip, 32).unwrap(), ip);
        assert_eq!(
            broadcast_addr(ip, 0).unwrap(),
            Ipv4Addr::new(255, 255, 255, 255)
        );
    }

    #[test]
    fn test_num_aws_hosts() {
        assert_eq!(num_aws_hosts(16).unwrap(), 65531);
        assert_eq!(num_aws_hosts(19).unwrap(), 8187);
        assert_eq!(num_aws_hosts(24).unwrap(), 251);
        assert_eq!(num_aws_hosts(28).unwrap(), 11);
        assert_eq!(num_aws_hosts(29).unwrap(), 3);
        assert!(num_aws_hosts(30).is_err());
    }

    #[test]
    fn test_lo_mask() {
        assert_eq!(lo_mask(Ipv4Addr::new(192, 168, 1, 1)), 32);
        assert_eq!(lo_mask(Ipv4Addr::new(10, 0, 192, 0)), 18);
        assert_eq!(lo_mask(Ipv4Addr::new(0, 0, 0, 0)), 0);
    }

    #[test]
    fn test_ipv4_new() {
        let ip = Ipv4::new(" 10.0.0.0/16 ").unwrap();
        assert_eq!(ip.addr, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(ip.mask, 16);
        assert_eq!(ip.to_string(), "10.0.0.0/16");
        assert_eq!("10.0.0.0/16".parse::<Ipv4>().unwrap(), ip);

        assert!(matches!(Ipv4::new("10.0.0.0"), Err(PlanError::InvalidCidr(_))));
        assert!(matches!(Ipv4::new("10.0.0/16"), Err(PlanError::InvalidAddress(_))));
        assert!(matches!(Ipv4::new("10.0.0.0/33"), Err(PlanError::InvalidPrefix(_))));
        assert!(matches!(Ipv4::new("10.0.0.0/-1"), Err(PlanError::InvalidPrefix(_))));
        assert!(matches!(Ipv4::new("10.0.0.0/x"), Err(PlanError::InvalidPrefix(_))));
    }

    #[test]
    fn test_ipv4_new_strict_prefix() {
        for cidr in ["10.0.0.0/+16", "10.0.0.0/", "10.0.0.0/ 16", "10.0.0.0/16.0"] {
            assert_eq!(
                Ipv4::new(cidr),
                Err(PlanError::InvalidPrefix(cidr.split_once('/').unwrap().1.to_string())),
                "{cidr}"
            );
        }
        assert!(matches!(
            crate::planner::generate("10.0.0.0/+16", 2),
            Err(PlanError::InvalidPrefix(_))
        ));
        assert_eq!(Ipv4::new("10.0.0.0/016").unwrap().mask, 16);
    }

    #[test]
    fn test_ipv4_range() {
        let ip = Ipv4::new("10.0.37.9/19").unwrap();
        assert!(ip.has_host_bits());
        assert_eq!(ip.network(), Ipv4::new("10.0.32.0/19").unwrap());
        assert_eq!(ip.broadcast().addr, Ipv4Addr::new(10, 0, 63, 255));
        assert_eq!(ip.size(), 8192);
        assert_eq!(Ipv4::new("0.0.0.0/0").unwrap().size(), 1 << 32);
        assert!(ip.contains(Ipv4Addr::new(10, 0, 32, 0)));
        assert!(!ip.contains(Ipv4Addr::new(10, 0, 64, 0)));
    }

    #[test]
    fn test_ipv4_contains_and_overlaps() {
        let vpc = Ipv4::new("10.0.0.0/16").unwrap();
        let a = Ipv4::new("10.0.0.0/19").unwrap();
        let b = Ipv4::new("10.0.32.0/19").unwrap();
        let c = Ipv4::new("10.0.16.0/20").unwrap();
        assert!(vpc.contains_block(&a));
        assert!(!a.contains_block(&vpc));
        assert!(!vpc.contains_block(&Ipv4::new("10.1.0.0/24").unwrap()));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
        assert!(vpc.overlaps(&b));
    }

    #[test]
    fn test_ipv4_serde() {
        let ip = Ipv4::new("192.168.1.0/24").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, "\"192.168.1.0/24\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>("\"192.168.1.0\"").is_err());
    }

    #[test]
    fn test_ipv4_cmp() {
        let ip1 = Ipv4::new("10.0.0.0/19").unwrap();
        let ip2 = Ipv4::new("10.0.32.0/19").unwrap();
        let ip3 = Ipv4::new("10.0.0.0/16").unwrap();
        assert!(ip1 < ip2);
        assert!(ip3 < ip1);
    }
}
