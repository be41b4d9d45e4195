//! Unforgeable references and their access rights

use std::fmt;

use cspr_crypto::checksum;

use super::KeyError;

/// Access rights bit set carried by a [`URef`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccessRights(u8);

impl AccessRights {
    /// No access
    pub const NONE: AccessRights = AccessRights(0b000);
    /// Read
    pub const READ: AccessRights = AccessRights(0b001);
    /// Write
    pub const WRITE: AccessRights = AccessRights(0b010);
    /// Add
    pub const ADD: AccessRights = AccessRights(0b100);
    /// Read and write
    pub const READ_WRITE: AccessRights = AccessRights(0b011);
    /// Read and add
    pub const READ_ADD: AccessRights = AccessRights(0b101);
    /// Add and write
    pub const ADD_WRITE: AccessRights = AccessRights(0b110);
    /// Everything
    pub const READ_ADD_WRITE: AccessRights = AccessRights(0b111);

    /// Parse the wire byte; only the three low bits may be set
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits <= Self::READ_ADD_WRITE.0).then_some(AccessRights(bits))
    }

    /// Wire byte
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Read bit set
    pub fn is_readable(&self) -> bool {
        self.0 & Self::READ.0 != 0
    }

    /// Write bit set
    pub fn is_writeable(&self) -> bool {
        self.0 & Self::WRITE.0 != 0
    }

    /// Add bit set
    pub fn is_addable(&self) -> bool {
        self.0 & Self::ADD.0 != 0
    }
}

impl fmt::Debug for AccessRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            AccessRights::NONE => "NONE",
            AccessRights::READ => "READ",
            AccessRights::WRITE => "WRITE",
            AccessRights::ADD => "ADD",
            AccessRights::READ_WRITE => "READ_WRITE",
            AccessRights::READ_ADD => "READ_ADD",
            AccessRights::ADD_WRITE => "ADD_WRITE",
            _ => "READ_ADD_WRITE",
        };
        f.write_str(name)
    }
}

/// Unforgeable reference: a 32-byte address plus access rights
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct URef {
    addr: [u8; 32],
    access_rights: AccessRights,
}

impl URef {
    /// Text prefix
    pub const PREFIX: &'static str = "uref-";
    /// Serialized length (address + access rights byte)
    pub const SERIALIZED_LENGTH: usize = 33;

    /// Create a URef
    pub fn new(addr: [u8; 32], access_rights: AccessRights) -> Self {
        Self { addr, access_rights }
    }

    /// Address bytes
    pub fn addr(&self) -> &[u8; 32] {
        &self.addr
    }

    /// Access rights
    pub fn access_rights(&self) -> AccessRights {
        self.access_rights
    }

    /// Same address with different rights
    pub fn with_access_rights(self, access_rights: AccessRights) -> Self {
        Self { access_rights, ..self }
    }

    /// Address followed by the access rights byte
    pub fn to_bytes(&self) -> [u8; 33] {
        let mut bytes = [0u8; 33];
        bytes[..32].copy_from_slice(&self.addr);
        bytes[32] = self.access_rights.bits();
        bytes
    }

    /// Parse 33 raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != Self::SERIALIZED_LENGTH {
            return Err(KeyError::InvalidLength {
                prefix: Self::PREFIX,
                expected: Self::SERIALIZED_LENGTH,
                got: bytes.len(),
            });
        }
        let mut addr = [0u8; 32];
        addr.copy_from_slice(&bytes[..32]);
        let access_rights = AccessRights::from_bits(bytes[32])
            .ok_or_else(|| KeyError::InvalidAccessRights(format!("{:#04x}", bytes[32])))?;
        Ok(Self::new(addr, access_rights))
    }

    /// `uref-<hex>-<NNN>` with the rights as three octal digits
    pub fn to_formatted_string(&self) -> String {
        format!(
            "{}{}-{:03o}",
            Self::PREFIX,
            hex::encode(self.addr),
            self.access_rights.bits()
        )
    }

    /// Parse `uref-<hex>-<NNN>`; the address may be CEP57 checksummed
    pub fn from_formatted_str(s: &str) -> Result<Self, KeyError> {
        let rest = s.strip_prefix(Self::PREFIX).ok_or_else(|| KeyError::UnknownPrefix {
            prefixes: Self::PREFIX.to_string(),
        })?;
        let (addr_hex, rights) = rest
            .rsplit_once('-')
            .ok_or_else(|| KeyError::InvalidAccessRights(format!("missing suffix in {:?}", s)))?;
        if rights.len() != 3 {
            return Err(KeyError::InvalidAccessRights(rights.to_string()));
        }
        let bits = u8::from_str_radix(rights, 8)
            .map_err(|_| KeyError::InvalidAccessRights(rights.to_string()))?;
        let access_rights = AccessRights::from_bits(bits)
            .ok_or_else(|| KeyError::InvalidAccessRights(rights.to_string()))?;

        let addr = checksum::decode_strict(addr_hex)?;
        let addr: [u8; 32] = addr.as_slice().try_into().map_err(|_| KeyError::InvalidLength {
            prefix: Self::PREFIX,
            expected: 32,
            got: addr.len(),
        })?;
        Ok(Self::new(addr, access_rights))
    }
}

impl fmt::Debug for URef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URef({})", self.to_formatted_string())
    }
}

impl fmt::Display for URef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string())
    }
}

impl std::str::FromStr for URef {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl serde::Serialize for URef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> serde::Deserialize<'de> for URef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        URef::from_formatted_str(&s).map_err(serde::de::Error::custom)
    }
}
