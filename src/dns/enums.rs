use std::fmt;

/// Resource record types the zone compiler knows how to produce.
///
/// Aliases are carried under the obsolete MF code. They never leave the
/// server; the answer path resolves them internally.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DNSResourceType {
    #[default]
    A,
    NS,
    MF,
    CNAME,
    SOA,
    MX,
    AAAA,
}

impl DNSResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DNSResourceType::A => "A",
            DNSResourceType::NS => "NS",
            DNSResourceType::MF => "MF",
            DNSResourceType::CNAME => "CNAME",
            DNSResourceType::SOA => "SOA",
            DNSResourceType::MX => "MX",
            DNSResourceType::AAAA => "AAAA",
        }
    }
}

impl fmt::Display for DNSResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u16> for DNSResourceType {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DNSResourceType::A),
            2 => Ok(DNSResourceType::NS),
            4 => Ok(DNSResourceType::MF),
            5 => Ok(DNSResourceType::CNAME),
            6 => Ok(DNSResourceType::SOA),
            15 => Ok(DNSResourceType::MX),
            28 => Ok(DNSResourceType::AAAA),
            x => Err(x),
        }
    }
}

impl From<DNSResourceType> for u16 {
    fn from(rtype: DNSResourceType) -> u16 {
        match rtype {
            DNSResourceType::A => 1,
            DNSResourceType::NS => 2,
            DNSResourceType::MF => 4,
            DNSResourceType::CNAME => 5,
            DNSResourceType::SOA => 6,
            DNSResourceType::MX => 15,
            DNSResourceType::AAAA => 28,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DNSResourceClass {
    #[default]
    IN,
}

impl fmt::Display for DNSResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DNSResourceClass::IN => f.write_str("IN"),
        }
    }
}

impl From<DNSResourceClass> for u16 {
    fn from(class: DNSResourceClass) -> u16 {
        match class {
            DNSResourceClass::IN => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        for rtype in [
            DNSResourceType::A,
            DNSResourceType::NS,
            DNSResourceType::MF,
            DNSResourceType::CNAME,
            DNSResourceType::SOA,
            DNSResourceType::MX,
            DNSResourceType::AAAA,
        ] {
            let code: u16 = rtype.into();
            assert_eq!(DNSResourceType::try_from(code), Ok(rtype));
        }
        assert_eq!(DNSResourceType::try_from(16), Err(16));
    }

    #[test]
    fn test_class_is_internet() {
        let class = DNSResourceClass::default();
        assert_eq!(class, DNSResourceClass::IN);
        assert_eq!(u16::from(class), 1);
        assert_eq!(class.to_string(), "IN");
    }
}
