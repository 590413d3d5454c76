//! # Account Record
//!
//! The value stored in the state trie for each account.
//!
//! RLP-encoded as `[nonce, balance, storage_root, code_hash]`, the same
//! field order every Ethereum client uses.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use shared_types::{keccak256, AccountState, Hash, EMPTY_ROOT_HASH, KECCAK_EMPTY, U256};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRecord {
    pub nonce: u64,
    pub balance: U256,
    /// Root of the account's storage trie (`EMPTY_ROOT_HASH` when empty).
    pub storage_root: Hash,
    /// Keccak256 of the code (`KECCAK_EMPTY` for accounts without code).
    pub code_hash: Hash,
}

impl Default for AccountRecord {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::zero(),
            storage_root: EMPTY_ROOT_HASH,
            code_hash: KECCAK_EMPTY,
        }
    }
}

impl AccountRecord {
    /// Record for `account` once its storage root is known.
    pub fn from_state(account: &AccountState, storage_root: Hash) -> Self {
        Self {
            nonce: account.nonce,
            balance: account.balance,
            storage_root,
            code_hash: code_hash(&account.code),
        }
    }

    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }
}

/// Hash of contract code; the published empty-code constant for no code.
pub fn code_hash(code: &[u8]) -> Hash {
    if code.is_empty() {
        KECCAK_EMPTY
    } else {
        keccak256(code)
    }
}

impl Encodable for AccountRecord {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        s.append(&self.nonce);
        s.append(&self.balance);
        s.append(&self.storage_root);
        s.append(&self.code_hash);
    }
}

impl Decodable for AccountRecord {
    fn decode(rlp: &Rlp) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            nonce: rlp.val_at(0)?,
            balance: rlp.val_at(1)?,
            storage_root: rlp.val_at(2)?,
            code_hash: rlp.val_at(3)?,
        })
    }
}
