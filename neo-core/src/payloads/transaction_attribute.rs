use super::OracleResponse;
use crate::io::{BinaryWriter, Serializable};

/// Attribute type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionAttributeType {
    HighPriority = 0x01,
    OracleResponse = 0x11,
}

/// Attributes attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TransactionAttribute {
    HighPriority,
    OracleResponse(OracleResponse),
}

impl TransactionAttribute {
    pub fn attribute_type(&self) -> TransactionAttributeType {
        match self {
            Self::HighPriority => TransactionAttributeType::HighPriority,
            Self::OracleResponse(_) => TransactionAttributeType::OracleResponse,
        }
    }

    pub fn as_oracle_response(&self) -> Option<&OracleResponse> {
        match self {
            Self::OracleResponse(response) => Some(response),
            Self::HighPriority => None,
        }
    }
}

impl Serializable for TransactionAttribute {
    fn size(&self) -> usize {
        1 + match self {
            Self::HighPriority => 0,
            Self::OracleResponse(response) => response.size(),
        }
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.attribute_type() as u8);
        if let Self::OracleResponse(response) = self {
            response.serialize(writer);
        }
    }
}
