use super::{OracleResponse, Signer, TransactionAttribute, Witness};
use crate::error::CoreResult;
use crate::io::{get_var_size_bytes, get_var_size_serializable_slice, BinaryWriter, Serializable};
use neo_crypto::{Crypto, KeyPair};
use neo_primitives::{UInt160, UInt256};

/// Size of the fixed transaction header:
/// version (1) + nonce (4) + system fee (8) + network fee (8) + valid-until-block (4).
pub const HEADER_SIZE: usize = 1 + 4 + 8 + 8 + 4;

/// A Neo N3 transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    version: u8,
    nonce: u32,
    system_fee: i64,
    network_fee: i64,
    valid_until_block: u32,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
    script: Vec<u8>,
    witnesses: Vec<Witness>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn set_nonce(&mut self, nonce: u32) {
        self.nonce = nonce;
    }

    pub fn system_fee(&self) -> i64 {
        self.system_fee
    }

    pub fn set_system_fee(&mut self, system_fee: i64) {
        self.system_fee = system_fee;
    }

    pub fn network_fee(&self) -> i64 {
        self.network_fee
    }

    pub fn set_network_fee(&mut self, network_fee: i64) {
        self.network_fee = network_fee;
    }

    pub fn valid_until_block(&self) -> u32 {
        self.valid_until_block
    }

    pub fn set_valid_until_block(&mut self, valid_until_block: u32) {
        self.valid_until_block = valid_until_block;
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub fn set_signers(&mut self, signers: Vec<Signer>) {
        self.signers = signers;
    }

    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    pub fn set_attributes(&mut self, attributes: Vec<TransactionAttribute>) {
        self.attributes = attributes;
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn set_script(&mut self, script: Vec<u8>) {
        self.script = script;
    }

    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    pub fn witnesses_mut(&mut self) -> &mut [Witness] {
        &mut self.witnesses
    }

    pub fn set_witnesses(&mut self, witnesses: Vec<Witness>) {
        self.witnesses = witnesses;
    }

    /// The oracle response attribute, if this is a response transaction.
    pub fn oracle_response(&self) -> Option<&OracleResponse> {
        self.attributes
            .iter()
            .find_map(TransactionAttribute::as_oracle_response)
    }

    /// Accounts whose witnesses verify this transaction, in witness order.
    pub fn get_script_hashes_for_verifying(&self) -> Vec<UInt160> {
        self.signers.iter().map(|signer| signer.account).collect()
    }

    /// Serializes everything except the witnesses.
    pub fn serialize_unsigned(&self, writer: &mut BinaryWriter) {
        writer.write_u8(self.version);
        writer.write_u32(self.nonce);
        writer.write_i64(self.system_fee);
        writer.write_i64(self.network_fee);
        writer.write_u32(self.valid_until_block);
        writer.write_serializable_slice(&self.signers);
        writer.write_serializable_slice(&self.attributes);
        writer.write_var_bytes(&self.script);
    }

    /// SHA-256 of the unsigned serialization.
    pub fn hash(&self) -> UInt256 {
        let mut writer = BinaryWriter::new();
        self.serialize_unsigned(&mut writer);
        UInt256::from_array(Crypto::sha256(&writer.into_bytes()))
    }

    /// Bytes every witness signs: network magic (LE) followed by the hash.
    pub fn get_sign_data(&self, network: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + 32);
        data.extend_from_slice(&network.to_le_bytes());
        data.extend_from_slice(self.hash().as_bytes());
        data
    }

    /// Signs the sign-data for `network` with `key`.
    pub fn sign(&self, key: &KeyPair, network: u32) -> CoreResult<Vec<u8>> {
        Ok(key.sign(&self.get_sign_data(network))?)
    }
}

impl Serializable for Transaction {
    fn size(&self) -> usize {
        HEADER_SIZE
            + get_var_size_serializable_slice(&self.signers)
            + get_var_size_serializable_slice(&self.attributes)
            + get_var_size_bytes(&self.script)
            + get_var_size_serializable_slice(&self.witnesses)
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        self.serialize_unsigned(writer);
        writer.write_serializable_slice(&self.witnesses);
    }
}
