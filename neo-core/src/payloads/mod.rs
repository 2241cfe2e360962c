//! Transaction payloads.

mod oracle_response;
mod signer;
mod transaction;
mod transaction_attribute;
mod witness;

pub use oracle_response::{OracleResponse, MAX_RESULT_SIZE};
pub use signer::Signer;
pub use transaction::{Transaction, HEADER_SIZE};
pub use transaction_attribute::{TransactionAttribute, TransactionAttributeType};
pub use witness::Witness;
