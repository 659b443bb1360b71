//! The intrusive storage cell of the hash table engine.

use super::root::{fmt, ptr};

/// One element of a hash table: a forward link threading the master chain,
/// the element's cached hash, and the payload itself.
///
/// A node's address is stable for its entire lifetime: rehashing, swapping
/// and unrelated mutations only ever touch the link, never the location.
/// The cached hash lets rehashing and exchange relink nodes without
/// re-invoking the hasher.
pub struct Node<T> {
    //  The next node on the master chain, if any.
    pub(crate) next: Option<ptr::NonNull<Node<T>>>,
    //  The hash of the payload's key, as computed at insertion.
    pub(crate) hash: u64,
    //  The payload.
    pub(crate) value: T,
}

impl<T> Node<T> {
    /// Creates an unlinked node.
    pub fn new(hash: u64, value: T) -> Self {
        Node { next: None, hash, value }
    }

    /// Returns the cached hash.
    pub fn hash(&self) -> u64 { self.hash }

    /// Returns a reference to the payload.
    pub fn value(&self) -> &T { &self.value }

    /// Returns a mutable reference to the payload.
    ///
    /// Warning: modifying the part of the payload that determines its key or
    /// hash corrupts the invariants of the table owning the node. Not unsafe,
    /// but unwise.
    pub fn value_mut(&mut self) -> &mut T { &mut self.value }

    /// Unwraps the payload.
    pub fn into_value(self) -> T { self.value }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node {{ hash: {}, value: {:?} }}", self.hash, self.value)
    }
}
