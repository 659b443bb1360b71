//! The raw hash table.
//!
//! `RawTable` implements the open-chained layout: all nodes on one master
//! chain, each bucket a contiguous segment of it, segment starts recorded in
//! an external `BucketStore`. It owns no storage whatsoever: nodes are
//! allocated, constructed and released by the caller, and the bucket store is
//! passed into every operation. The caller guarantees it always passes the
//! same store, and that every node handed in stays valid until handed back.

use super::buckets::{Anchor, BucketStore};
use super::node::Node;
use super::root::{fmt, hint, marker, ptr};

/// Maximum load factor of a freshly created table.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

//  Lower bound applied by `set_max_load_factor`; a zero or negative factor
//  would demand infinite buckets.
const MIN_MAX_LOAD_FACTOR: f32 = 0.125;

/// RawTable
///
/// The bookkeeping of one open-chained hash table: the chain head, the number
/// of nodes, and the configured maximum load factor.
pub struct RawTable<T> {
    //  Head of the master chain.
    head: Option<ptr::NonNull<Node<T>>>,
    //  Number of nodes on the chain.
    len: usize,
    //  Threshold of `len / bucket_count` beyond which a growable store
    //  should grow.
    max_load_factor: f32,
}

impl<T> RawTable<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        RawTable { head: None, len: 0, max_load_factor: DEFAULT_MAX_LOAD_FACTOR }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the table holds no node.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the maximum load factor.
    pub fn max_load_factor(&self) -> f32 { self.max_load_factor }

    /// Sets the maximum load factor, clamped away from zero.
    pub fn set_max_load_factor(&mut self, factor: f32) {
        self.max_load_factor = if factor > MIN_MAX_LOAD_FACTOR {
            factor
        } else {
            MIN_MAX_LOAD_FACTOR
        };
    }

    /// Returns whether inserting one more node would push the load factor
    /// past its maximum.
    pub fn needs_grow(&self, bucket_count: usize) -> bool {
        bucket_count == 0
            || (self.len + 1) as f32 > self.max_load_factor * bucket_count as f32
    }

    /// Returns the bucket count a growable store should adopt before the next
    /// insertion: the current count doubled until the load factor fits.
    pub fn grown_bucket_count(&self, bucket_count: usize) -> usize {
        let mut count = if bucket_count == 0 {
            super::DEFAULT_BUCKET_COUNT
        } else {
            bucket_count * 2
        };

        while (self.len + 1) as f32 > self.max_load_factor * count as f32 {
            count *= 2;
        }

        count
    }

    /// Returns the bucket a hash maps to.
    pub fn bucket_of(hash: u64, bucket_count: usize) -> usize {
        debug_assert!(bucket_count > 0);

        (hash % bucket_count as u64) as usize
    }

    /// Links a node into the table.
    ///
    /// The node lands in the segment of its bucket; if the segment already
    /// holds nodes of equal hash, right after the first of them, keeping
    /// equal-hash runs contiguous.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `node` is valid, not linked into any table, and stays
    ///     valid until removed.
    /// -   Assumes that `buckets` is this table's store, with at least one
    ///     bucket.
    pub unsafe fn insert<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        node: ptr::NonNull<Node<T>>,
    ) {
        let count = buckets.bucket_count();

        debug_assert!(count > 0);

        //  Safety:
        //  -   `node` is valid, per this function's contract.
        let hash = unsafe { (*node.as_ptr()).hash };
        let bucket = Self::bucket_of(hash, count);

        //  Safety:
        //  -   `buckets` is this table's store, per this function's contract.
        let run = unsafe {
            self.find_in_bucket(buckets, bucket, |candidate| candidate == hash)
        };

        if let Some(run) = run {
            //  Safety:
            //  -   `run` is linked in this table, `node` is not.
            unsafe { self.link_after(buckets, bucket, run, node) };
        } else {
            //  Safety:
            //  -   `node` is not linked in any table.
            unsafe { self.link_front(buckets, bucket, node) };
        }

        self.len += 1;
    }

    /// Unlinks a node, returning it still constructed; the caller decides
    /// whether to destroy it or link it elsewhere.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `node` is linked into this table.
    /// -   Assumes that `buckets` is this table's store.
    pub unsafe fn remove<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        node: ptr::NonNull<Node<T>>,
    ) -> ptr::NonNull<Node<T>> {
        let count = buckets.bucket_count();

        //  Safety:
        //  -   `node` is valid, as it is linked into this table.
        let (hash, successor) = unsafe { ((*node.as_ptr()).hash, (*node.as_ptr()).next) };
        let bucket = Self::bucket_of(hash, count);

        let anchor = buckets.anchor(bucket);
        let first = self.first_of(anchor);

        if first == Some(node) {
            //  Safety:
            //  -   `node` is the first node of its segment.
            unsafe { self.unlink_first(buckets, bucket, anchor, successor) };
        } else {
            //  Safety:
            //  -   `node` is linked in its segment, behind `first`.
            unsafe { self.unlink_inner(buckets, bucket, first, node, successor) };
        }

        //  Safety:
        //  -   `node` is valid; clearing the stale link keeps the node inert
        //      until relinked.
        unsafe { (*node.as_ptr()).next = None };

        self.len -= 1;

        node
    }

    /// Returns the first node matching `hash` for which `eq` returns true,
    /// if any.
    ///
    /// `eq` is only ever invoked on elements whose cached hash equals `hash`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `buckets` is this table's store.
    pub unsafe fn find<B, F>(
        &self,
        buckets: &B,
        hash: u64,
        mut eq: F,
    ) -> Option<ptr::NonNull<Node<T>>>
    where
        B: BucketStore<T>,
        F: FnMut(&T) -> bool,
    {
        let count = buckets.bucket_count();

        if count == 0 {
            return None;
        }

        let bucket = Self::bucket_of(hash, count);

        let mut current = self.first_of(buckets.anchor(bucket));

        while let Some(node) = current {
            //  Safety:
            //  -   Chain nodes are valid.
            let candidate = unsafe { &*node.as_ptr() };

            if Self::bucket_of(candidate.hash, count) != bucket {
                break;
            }

            if candidate.hash == hash && eq(&candidate.value) {
                return Some(node);
            }

            current = candidate.next;
        }

        None
    }

    /// Returns the bounds of the run of nodes whose cached hash equals
    /// `hash`: the first node of the run, and the first node past it (`None`
    /// when the run ends the chain).
    ///
    /// #   Safety
    ///
    /// -   Assumes that `buckets` is this table's store.
    pub unsafe fn equal_range<B: BucketStore<T>>(
        &self,
        buckets: &B,
        hash: u64,
    ) -> (Option<ptr::NonNull<Node<T>>>, Option<ptr::NonNull<Node<T>>>) {
        let count = buckets.bucket_count();

        if count == 0 {
            return (None, None);
        }

        let bucket = Self::bucket_of(hash, count);

        //  Safety:
        //  -   `buckets` is this table's store, per this function's contract.
        let start = unsafe {
            self.find_in_bucket(buckets, bucket, |candidate| candidate == hash)
        };

        let Some(start) = start else { return (None, None) };

        let mut end = unsafe { (*start.as_ptr()).next };

        while let Some(node) = end {
            //  Safety:
            //  -   Chain nodes are valid.
            let candidate = unsafe { &*node.as_ptr() };

            if candidate.hash != hash {
                break;
            }

            end = candidate.next;
        }

        (Some(start), end)
    }

    /// Returns the number of nodes whose cached hash equals `hash`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `buckets` is this table's store.
    pub unsafe fn count<B: BucketStore<T>>(&self, buckets: &B, hash: u64) -> usize {
        //  Safety:
        //  -   `buckets` is this table's store, per this function's contract.
        let (start, end) = unsafe { self.equal_range(buckets, hash) };

        let mut current = start;
        let mut count = 0;

        while current != end {
            //  Safety:
            //  -   `current` lies between `start` and `end`, hence is valid.
            current = unsafe { (*current.unwrap_or_else(|| unreachable()).as_ptr()).next };
            count += 1;
        }

        count
    }

    /// Detaches the entire master chain, leaving the table empty and all
    /// anchors reset.
    ///
    /// The returned chain owns the nodes; dropping it without draining them
    /// leaks.
    pub fn detach<B: BucketStore<T>>(&mut self, buckets: &mut B) -> Chain<T> {
        let chain = Chain { head: self.head.take(), len: self.len };

        self.len = 0;
        buckets.reset();

        chain
    }

    /// Relinks every node according to the current bucket count, payloads
    /// untouched. To be called after the bucket store changed size.
    pub fn rehash<B: BucketStore<T>>(&mut self, buckets: &mut B) {
        let mut chain = self.detach(buckets);

        while let Some(node) = chain.pop() {
            //  Safety:
            //  -   `node` comes off this table's own chain, unlinked.
            unsafe { self.insert(buckets, node) };
        }
    }

    /// Returns an iterator over all nodes, in master chain order.
    pub fn iter(&self) -> RawIter<'_, T> {
        RawIter { current: self.head, remaining: self.len, _marker: marker::PhantomData }
    }

    /// Returns a mutable iterator over all nodes, in master chain order.
    pub fn iter_mut(&mut self) -> RawIterMut<'_, T> {
        RawIterMut { current: self.head, remaining: self.len, _marker: marker::PhantomData }
    }

    /// Returns an iterator over the nodes of one bucket.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `buckets` is this table's store, and `bucket` is in
    ///     bounds.
    pub unsafe fn bucket_iter<'a, B: BucketStore<T>>(
        &'a self,
        buckets: &B,
        bucket: usize,
    ) -> BucketIter<'a, T> {
        let count = buckets.bucket_count();

        debug_assert!(bucket < count);

        BucketIter {
            current: self.first_of(buckets.anchor(bucket)),
            bucket,
            bucket_count: count,
            _marker: marker::PhantomData,
        }
    }

    //  Returns the first node of a bucket's segment, from its anchor.
    fn first_of(&self, anchor: Anchor<T>) -> Option<ptr::NonNull<Node<T>>> {
        match anchor {
            Anchor::Empty => None,
            Anchor::Head => self.head,
            //  Safety:
            //  -   An anchor only ever designates a node linked in the table.
            Anchor::Before(before) => unsafe { (*before.as_ptr()).next },
        }
    }

    //  Walks a bucket's segment, returning the first node whose hash
    //  satisfies `matches`.
    //
    //  #   Safety
    //
    //  -   Assumes that `buckets` is this table's store.
    unsafe fn find_in_bucket<B, F>(
        &self,
        buckets: &B,
        bucket: usize,
        mut matches: F,
    ) -> Option<ptr::NonNull<Node<T>>>
    where
        B: BucketStore<T>,
        F: FnMut(u64) -> bool,
    {
        let count = buckets.bucket_count();
        let mut current = self.first_of(buckets.anchor(bucket));

        while let Some(node) = current {
            //  Safety:
            //  -   Chain nodes are valid.
            let candidate = unsafe { &*node.as_ptr() };

            if Self::bucket_of(candidate.hash, count) != bucket {
                break;
            }

            if matches(candidate.hash) {
                return Some(node);
            }

            current = candidate.next;
        }

        None
    }

    //  Links a node at the front of its bucket's segment.
    //
    //  #   Safety
    //
    //  -   Assumes that `node` is valid and unlinked, and `buckets` is this
    //      table's store.
    unsafe fn link_front<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        bucket: usize,
        node: ptr::NonNull<Node<T>>,
    ) {
        match buckets.anchor(bucket) {
            Anchor::Empty => {
                //  New segment at the head of the chain; the segment which
                //  held the head, if any, is now anchored behind `node`.
                //
                //  Safety:
                //  -   `node` is valid for writes.
                unsafe { (*node.as_ptr()).next = self.head };

                if let Some(previous_head) = self.head {
                    //  Safety:
                    //  -   `previous_head` is linked, hence valid.
                    let head_hash = unsafe { (*previous_head.as_ptr()).hash };
                    let head_bucket = Self::bucket_of(head_hash, buckets.bucket_count());

                    buckets.set_anchor(head_bucket, Anchor::Before(node));
                }

                self.head = Some(node);
                buckets.set_anchor(bucket, Anchor::Head);
            }
            Anchor::Head => {
                //  Safety:
                //  -   `node` is valid for writes.
                unsafe { (*node.as_ptr()).next = self.head };

                self.head = Some(node);
            }
            Anchor::Before(before) => {
                //  Safety:
                //  -   `node` and `before` are valid; `before` is linked.
                unsafe {
                    (*node.as_ptr()).next = (*before.as_ptr()).next;
                    (*before.as_ptr()).next = Some(node);
                }
            }
        }
    }

    //  Links a node right after `after`, in the same bucket.
    //
    //  #   Safety
    //
    //  -   Assumes that `after` is linked into `bucket`'s segment, `node` is
    //      valid and unlinked, and `buckets` is this table's store.
    unsafe fn link_after<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        bucket: usize,
        after: ptr::NonNull<Node<T>>,
        node: ptr::NonNull<Node<T>>,
    ) {
        //  Safety:
        //  -   `after` and `node` are valid; `after` is linked.
        let successor = unsafe {
            let successor = (*after.as_ptr()).next;
            (*node.as_ptr()).next = successor;
            (*after.as_ptr()).next = Some(node);
            successor
        };

        //  If `after` was the last node of the segment, the next segment was
        //  anchored on it, and is now anchored on `node`.
        if let Some(successor) = successor {
            //  Safety:
            //  -   `successor` is linked, hence valid.
            let successor_hash = unsafe { (*successor.as_ptr()).hash };
            let successor_bucket =
                Self::bucket_of(successor_hash, buckets.bucket_count());

            if successor_bucket != bucket {
                buckets.set_anchor(successor_bucket, Anchor::Before(node));
            }
        }
    }

    //  Unlinks the first node of `bucket`'s segment.
    //
    //  #   Safety
    //
    //  -   Assumes the segment is non-empty, `anchor` is its current anchor,
    //      and `successor` is its first node's successor.
    unsafe fn unlink_first<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        bucket: usize,
        anchor: Anchor<T>,
        successor: Option<ptr::NonNull<Node<T>>>,
    ) {
        match anchor {
            Anchor::Empty => {
                debug_assert!(false, "removal from an empty bucket");

                //  Safety:
                //  -   Unreachable when the table invariants hold.
                unsafe { hint::unreachable_unchecked() }
            }
            Anchor::Head => self.head = successor,
            //  Safety:
            //  -   `before` is linked, hence valid.
            Anchor::Before(before) => unsafe {
                (*before.as_ptr()).next = successor;
            },
        }

        match successor {
            Some(successor) => {
                //  Safety:
                //  -   `successor` is linked, hence valid.
                let successor_hash = unsafe { (*successor.as_ptr()).hash };
                let successor_bucket =
                    Self::bucket_of(successor_hash, buckets.bucket_count());

                if successor_bucket != bucket {
                    //  The bucket emptied; its former anchor now designates
                    //  the successor's segment.
                    buckets.set_anchor(bucket, Anchor::Empty);
                    buckets.set_anchor(successor_bucket, anchor);
                }
            }
            None => buckets.set_anchor(bucket, Anchor::Empty),
        }
    }

    //  Unlinks a node which is not the first of its segment.
    //
    //  #   Safety
    //
    //  -   Assumes that `node` is linked in `bucket`'s segment behind
    //      `first`, and `successor` is its successor.
    unsafe fn unlink_inner<B: BucketStore<T>>(
        &mut self,
        buckets: &mut B,
        bucket: usize,
        first: Option<ptr::NonNull<Node<T>>>,
        node: ptr::NonNull<Node<T>>,
        successor: Option<ptr::NonNull<Node<T>>>,
    ) {
        let Some(mut previous) = first else {
            debug_assert!(false, "removal from an empty bucket");

            //  Safety:
            //  -   Unreachable when the table invariants hold.
            unsafe { hint::unreachable_unchecked() }
        };

        //  The predecessor lies within the segment, since `node` is not its
        //  first node.
        loop {
            //  Safety:
            //  -   Segment nodes are valid.
            let next = unsafe { (*previous.as_ptr()).next };

            if next == Some(node) {
                break;
            }

            let Some(next) = next else {
                debug_assert!(false, "node not found in its own bucket");

                //  Safety:
                //  -   Unreachable when the table invariants hold.
                unsafe { hint::unreachable_unchecked() }
            };

            previous = next;
        }

        //  Safety:
        //  -   `previous` is linked, hence valid.
        unsafe { (*previous.as_ptr()).next = successor };

        if let Some(successor) = successor {
            //  Safety:
            //  -   `successor` is linked, hence valid.
            let successor_hash = unsafe { (*successor.as_ptr()).hash };
            let successor_bucket =
                Self::bucket_of(successor_hash, buckets.bucket_count());

            if successor_bucket != bucket {
                //  `node` was the last of its segment; the next segment is
                //  now anchored on `previous`.
                buckets.set_anchor(successor_bucket, Anchor::Before(previous));
            }
        }
    }
}

impl<T> Default for RawTable<T> {
    fn default() -> Self { Self::new() }
}

impl<T> fmt::Debug for RawTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawTable {{ len: {} }}", self.len)
    }
}

/// Chain
///
/// A detached master chain: the nodes of a table, still constructed, no
/// longer reachable from it. Dropping a non-empty chain leaks its nodes;
/// drain it with `pop`.
pub struct Chain<T> {
    head: Option<ptr::NonNull<Node<T>>>,
    len: usize,
}

impl<T> Chain<T> {
    /// Returns the number of nodes left on the chain.
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the chain is drained.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Pops the first node, unlinked.
    pub fn pop(&mut self) -> Option<ptr::NonNull<Node<T>>> {
        let node = self.head?;

        //  Safety:
        //  -   Chain nodes are valid until popped.
        unsafe {
            self.head = (*node.as_ptr()).next;
            (*node.as_ptr()).next = None;
        }

        self.len -= 1;

        Some(node)
    }
}

/// An iterator over the nodes of a table, in master chain order.
pub struct RawIter<'a, T> {
    current: Option<ptr::NonNull<Node<T>>>,
    remaining: usize,
    _marker: marker::PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for RawIter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<&'a Node<T>> {
        let node = self.current?;

        //  Safety:
        //  -   Chain nodes are valid for the lifetime of the borrow.
        let node = unsafe { &*node.as_ptr() };

        self.current = node.next;
        self.remaining -= 1;

        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> Clone for RawIter<'a, T> {
    fn clone(&self) -> Self {
        RawIter {
            current: self.current,
            remaining: self.remaining,
            _marker: marker::PhantomData,
        }
    }
}

impl<'a, T> ExactSizeIterator for RawIter<'a, T> {}

/// A mutable iterator over the nodes of a table, in master chain order.
pub struct RawIterMut<'a, T> {
    current: Option<ptr::NonNull<Node<T>>>,
    remaining: usize,
    _marker: marker::PhantomData<&'a mut Node<T>>,
}

impl<'a, T> Iterator for RawIterMut<'a, T> {
    type Item = &'a mut Node<T>;

    fn next(&mut self) -> Option<&'a mut Node<T>> {
        let node = self.current?;

        //  Safety:
        //  -   Chain nodes are valid for the lifetime of the borrow, and
        //      each is yielded exactly once.
        let node = unsafe { &mut *node.as_ptr() };

        self.current = node.next;
        self.remaining -= 1;

        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RawIterMut<'a, T> {}

/// An iterator over the nodes of a single bucket.
pub struct BucketIter<'a, T> {
    current: Option<ptr::NonNull<Node<T>>>,
    bucket: usize,
    bucket_count: usize,
    _marker: marker::PhantomData<&'a Node<T>>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<&'a Node<T>> {
        let node = self.current?;

        //  Safety:
        //  -   Chain nodes are valid for the lifetime of the borrow.
        let node = unsafe { &*node.as_ptr() };

        if RawTable::<T>::bucket_of(node.hash, self.bucket_count) != self.bucket {
            self.current = None;
            return None;
        }

        self.current = node.next;

        Some(node)
    }
}

impl<'a, T> Clone for BucketIter<'a, T> {
    fn clone(&self) -> Self {
        BucketIter {
            current: self.current,
            bucket: self.bucket,
            bucket_count: self.bucket_count,
            _marker: marker::PhantomData,
        }
    }
}

#[cold]
#[inline(never)]
fn unreachable() -> ! {
    panic!("Corrupted hash table chain");
}

#[cfg(test)]
mod tests {

use super::*;
use super::super::buckets::DynamicBuckets;

fn node(hash: u64, value: i32) -> ptr::NonNull<Node<i32>> {
    //  Safety:
    //  -   `Box::into_raw` never returns null.
    unsafe { ptr::NonNull::new_unchecked(Box::into_raw(Box::new(Node::new(hash, value)))) }
}

fn free(node: ptr::NonNull<Node<i32>>) -> i32 {
    //  Safety:
    //  -   `node` was created by `node` above, and unlinked.
    unsafe { Box::from_raw(node.as_ptr()) }.into_value()
}

fn drain<B: BucketStore<i32>>(table: &mut RawTable<i32>, buckets: &mut B) {
    let mut chain = table.detach(buckets);

    while let Some(node) = chain.pop() {
        free(node);
    }
}

fn values(table: &RawTable<i32>) -> Vec<i32> {
    table.iter().map(|node| *node.value()).collect()
}

#[test]
fn insert_then_find() {
    let mut buckets = DynamicBuckets::with_bucket_count(4);
    let mut table = RawTable::new();

    unsafe {
        table.insert(&mut buckets, node(0, 10));
        table.insert(&mut buckets, node(1, 11));
        table.insert(&mut buckets, node(6, 16));
    }

    assert_eq!(3, table.len());

    unsafe {
        let found = table.find(&buckets, 1, |value| *value == 11);
        assert_eq!(Some(11), found.map(|node| *node.as_ref().value()));

        assert!(table.find(&buckets, 1, |value| *value == 99).is_none());
        assert!(table.find(&buckets, 3, |_| true).is_none());
    }

    drain(&mut table, &mut buckets);
}

#[test]
fn equal_hash_runs_are_contiguous() {
    let mut buckets = DynamicBuckets::with_bucket_count(4);
    let mut table = RawTable::new();

    //  Hashes 1 and 5 collide in bucket 1; the two nodes of hash 1 must end
    //  up adjacent regardless of insertion order.
    unsafe {
        table.insert(&mut buckets, node(1, 100));
        table.insert(&mut buckets, node(5, 500));
        table.insert(&mut buckets, node(1, 101));
    }

    unsafe {
        assert_eq!(2, table.count(&buckets, 1));
        assert_eq!(1, table.count(&buckets, 5));
        assert_eq!(0, table.count(&buckets, 9));

        let (start, end) = table.equal_range(&buckets, 1);
        let start = start.unwrap();

        let first = *start.as_ref().value();
        let second = *(*start.as_ptr()).next.unwrap().as_ref().value();

        let mut run = [first, second];
        run.sort_unstable();
        assert_eq!([100, 101], run);

        assert_eq!((*start.as_ptr()).next.unwrap().as_ref().next, end);
    }

    drain(&mut table, &mut buckets);
}

#[test]
fn remove_first_of_bucket_reanchors_successor() {
    let mut buckets = DynamicBuckets::with_bucket_count(4);
    let mut table = RawTable::new();

    let zero = node(0, 10);
    let one = node(1, 11);

    //  Chain after both inserts: [one, zero]; bucket 1 anchored at the head,
    //  bucket 0 anchored behind `one`.
    unsafe {
        table.insert(&mut buckets, zero);
        table.insert(&mut buckets, one);

        let removed = table.remove(&mut buckets, one);
        assert_eq!(one, removed);
        free(removed);

        //  Bucket 0 took over the chain head.
        assert!(table.find(&buckets, 1, |_| true).is_none());
        let found = table.find(&buckets, 0, |value| *value == 10);
        assert_eq!(Some(10), found.map(|node| *node.as_ref().value()));
    }

    assert_eq!(1, table.len());

    drain(&mut table, &mut buckets);
}

#[test]
fn remove_inner_node_of_run() {
    let mut buckets = DynamicBuckets::with_bucket_count(4);
    let mut table = RawTable::new();

    let first = node(2, 20);
    let second = node(2, 21);
    let third = node(2, 22);

    unsafe {
        table.insert(&mut buckets, first);
        table.insert(&mut buckets, second);
        table.insert(&mut buckets, third);

        let removed = table.remove(&mut buckets, second);
        free(removed);

        assert_eq!(2, table.count(&buckets, 2));

        let removed = table.remove(&mut buckets, first);
        free(removed);

        let found = table.find(&buckets, 2, |value| *value == 22);
        assert_eq!(Some(22), found.map(|node| *node.as_ref().value()));
    }

    assert_eq!(1, table.len());

    drain(&mut table, &mut buckets);
}

#[test]
fn rehash_preserves_nodes() {
    let mut buckets = DynamicBuckets::with_bucket_count(4);
    let mut table = RawTable::new();

    let nodes: Vec<_> = (0..8).map(|index| node(index as u64, index)).collect();

    unsafe {
        for &n in &nodes {
            table.insert(&mut buckets, n);
        }
    }

    assert!(table.needs_grow(buckets.bucket_count()));
    assert_eq!(16, table.grown_bucket_count(buckets.bucket_count()));

    assert!(buckets.grow_to(16));
    table.rehash(&mut buckets);

    assert_eq!(8, table.len());

    //  Same nodes, same addresses, new segments.
    unsafe {
        for (index, &n) in nodes.iter().enumerate() {
            let found = table.find(&buckets, index as u64, |value| *value == index as i32);
            assert_eq!(Some(n), found);
        }
    }

    drain(&mut table, &mut buckets);
}

#[test]
fn iteration_covers_all_nodes() {
    let mut buckets = DynamicBuckets::with_bucket_count(8);
    let mut table = RawTable::new();

    unsafe {
        for index in 0..5 {
            table.insert(&mut buckets, node(index as u64, index));
        }
    }

    let mut seen = values(&table);
    seen.sort_unstable();

    assert_eq!(vec![0, 1, 2, 3, 4], seen);
    assert_eq!(5, table.iter().len());

    unsafe {
        let in_bucket: Vec<_> =
            table.bucket_iter(&buckets, 3).map(|node| *node.value()).collect();
        assert_eq!(vec![3], in_bucket);
    }

    drain(&mut table, &mut buckets);
}

#[test]
fn load_factor_thresholds() {
    let mut table: RawTable<i32> = RawTable::new();

    assert!(table.needs_grow(0));
    assert!(!table.needs_grow(1));

    table.set_max_load_factor(0.0);
    assert!(table.max_load_factor() > 0.0);

    table.set_max_load_factor(4.0);
    assert_eq!(4.0, table.max_load_factor());
}

}
