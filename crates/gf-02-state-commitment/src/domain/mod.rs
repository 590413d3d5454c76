pub mod account;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod parallel;
pub mod proof;
pub mod trie;

pub use account::AccountRecord;
pub use errors::BuilderError;
pub use nibbles::Nibbles;
pub use node::NodeRef;
pub use trie::{commit, TrieCommit};
