//! Addresses of entries in the bids table

use std::fmt;

use crate::bytesrepr::{ByteReader, BytesReprError};

use super::KeyError;

/// Address of a bid record; the first byte on the wire selects the layout
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BidAddr {
    /// Pre-split bid of a validator and its delegators
    Unified([u8; 32]),
    /// Validator bid
    Validator([u8; 32]),
    /// Delegator bid under a validator
    Delegator {
        /// Validator account hash
        validator: [u8; 32],
        /// Delegator account hash
        delegator: [u8; 32],
    },
}

impl BidAddr {
    const UNIFIED: u8 = 0;
    const VALIDATOR: u8 = 1;
    const DELEGATOR: u8 = 2;

    fn tag(&self) -> u8 {
        match self {
            BidAddr::Unified(_) => Self::UNIFIED,
            BidAddr::Validator(_) => Self::VALIDATOR,
            BidAddr::Delegator { .. } => Self::DELEGATOR,
        }
    }

    /// Layout tag followed by one or two account hashes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(65);
        bytes.push(self.tag());
        match self {
            BidAddr::Unified(hash) | BidAddr::Validator(hash) => bytes.extend_from_slice(hash),
            BidAddr::Delegator {
                validator,
                delegator,
            } => {
                bytes.extend_from_slice(validator);
                bytes.extend_from_slice(delegator);
            }
        }
        bytes
    }

    /// Parse the exact byte form produced by [`BidAddr::to_bytes`]
    pub fn from_slice(raw: &[u8]) -> Result<Self, KeyError> {
        let (&tag, rest) = raw.split_first().ok_or(KeyError::InvalidLength {
            prefix: "bid-addr-",
            expected: 33,
            got: 0,
        })?;
        let expected = match tag {
            Self::UNIFIED | Self::VALIDATOR => 32,
            Self::DELEGATOR => 64,
            other => return Err(KeyError::InvalidBidAddr(other)),
        };
        if rest.len() != expected {
            return Err(KeyError::InvalidLength {
                prefix: "bid-addr-",
                expected: expected + 1,
                got: raw.len(),
            });
        }
        let mut reader = ByteReader::new(rest);
        Self::read_body(tag, &mut reader).map_err(|_| KeyError::InvalidBidAddr(tag))
    }

    /// Read a bid address from a cursor
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, BytesReprError> {
        let tag = reader.read_u8("bid addr tag")?;
        Self::read_body(tag, reader)
    }

    fn read_body(tag: u8, reader: &mut ByteReader<'_>) -> Result<Self, BytesReprError> {
        match tag {
            Self::UNIFIED => Ok(BidAddr::Unified(reader.read_array::<32>("bid addr")?)),
            Self::VALIDATOR => Ok(BidAddr::Validator(reader.read_array::<32>("bid addr")?)),
            Self::DELEGATOR => Ok(BidAddr::Delegator {
                validator: reader.read_array::<32>("bid addr validator")?,
                delegator: reader.read_array::<32>("bid addr delegator")?,
            }),
            value => Err(BytesReprError::InvalidDiscriminant {
                context: "bid addr",
                value,
            }),
        }
    }
}

impl fmt::Debug for BidAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BidAddr({})", hex::encode(self.to_bytes()))
    }
}
