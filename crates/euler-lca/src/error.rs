#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("No valid root to build the index from")]
    InvalidRoot,

    #[error("Node {node} is not part of the indexed tree")]
    NodeNotIndexed { node: String },

    #[error("Index built at generation {built} but the tree is at generation {current}")]
    StaleIndex { built: u64, current: u64 },

    #[error("Node {node} is linked below {parent} but does not belong to the tree")]
    ForeignNode { node: String, parent: String },

    #[error("Node {node} is reachable more than once, the structure is not a tree")]
    NotATree { node: String },

    #[error("Euler tour of length {len} does not fit u32 positions")]
    TooLarge { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
