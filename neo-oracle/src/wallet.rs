//! Wallet collaborator interfaces and a key-pair backed implementation.

use neo_core::{Contract, ECPoint, KeyPair, UInt160};
use parking_lot::RwLock;
use std::sync::Arc;

/// A wallet account as seen by the oracle service.
#[derive(Debug, Clone)]
pub struct WalletAccount {
    public_key: ECPoint,
    key: Option<KeyPair>,
    locked: bool,
}

impl WalletAccount {
    pub fn from_key_pair(key: KeyPair) -> Self {
        Self {
            public_key: key.public_key().clone(),
            key: Some(key),
            locked: false,
        }
    }

    pub fn watch_only(public_key: ECPoint) -> Self {
        Self {
            public_key,
            key: None,
            locked: false,
        }
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn public_key(&self) -> &ECPoint {
        &self.public_key
    }

    pub fn script_hash(&self) -> UInt160 {
        Contract::create_signature_contract(&self.public_key).script_hash()
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The private key, unless the account is watch-only or locked.
    pub fn get_key(&self) -> Option<&KeyPair> {
        if self.locked {
            return None;
        }
        self.key.as_ref()
    }
}

pub trait Wallet: Send + Sync {
    fn get_accounts(&self) -> Vec<WalletAccount>;
}

/// Supplies the node's currently opened wallet.
pub trait WalletProvider: Send + Sync {
    fn get_wallet(&self) -> Option<Arc<dyn Wallet>>;
}

/// In-memory wallet holding plain key pairs.
#[derive(Debug, Default)]
pub struct KeyPairWallet {
    accounts: RwLock<Vec<WalletAccount>>,
}

impl KeyPairWallet {
    pub fn new(keys: impl IntoIterator<Item = KeyPair>) -> Self {
        Self {
            accounts: RwLock::new(keys.into_iter().map(WalletAccount::from_key_pair).collect()),
        }
    }

    pub fn add_account(&self, account: WalletAccount) {
        self.accounts.write().push(account);
    }

    pub fn set_locked(&self, locked: bool) {
        for account in self.accounts.write().iter_mut() {
            account.locked = locked;
        }
    }
}

impl Wallet for KeyPairWallet {
    fn get_accounts(&self) -> Vec<WalletAccount> {
        self.accounts.read().clone()
    }
}
