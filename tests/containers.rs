//! End-to-end scenarios over the public API, including the `shared_arena!`
//! macro as an external user would invoke it.

use std::hash::RandomState;

use corral::allocator::NodeAllocator;
use corral::arena::Arena;
use corral::failure::Failure;
use corral::hashmap::{self, HashMap};
use corral::hashset::{self, HashSet};
use corral::list::{self, List};
use corral::shared_arena;
use corral::table::buckets::FixedBuckets;
use corral::table::node::Node;

shared_arena! {
    //  One pool for every set of u32 in this test binary.
    struct SharedSetPool(Node<hashset::Entry<u32>>, 16);
}

#[test]
fn shared_arena_backs_multiple_sets() {
    let mut first = HashSet::with_parts(
        RandomState::new(),
        SharedSetPool,
        FixedBuckets::<_, 8>::new(),
    );
    let mut second = HashSet::with_parts(
        RandomState::new(),
        SharedSetPool,
        FixedBuckets::<_, 8>::new(),
    );

    first.extend([1, 2, 3]);
    second.extend([4, 5]);

    //  Both sets draw from the same 16 slots.
    assert_eq!(11, SharedSetPool.reserve());

    //  Same storage: O(1) exchange.
    first.try_swap(&mut second).unwrap();

    assert_eq!(2, first.len());
    assert!(first.contains(&4));
    assert_eq!(3, second.len());
    assert!(second.contains(&1));

    first.clear();
    second.clear();

    assert_eq!(16, SharedSetPool.reserve());
}

#[test]
fn arena_map_lifecycle() {
    let arena: Arena<Node<hashmap::Entry<u32, String>>, 4> = Arena::new();

    let mut map = HashMap::with_parts(
        RandomState::new(),
        &arena,
        FixedBuckets::<_, 4>::new(),
    );

    for i in 0..4 {
        map.try_insert(i, i.to_string()).unwrap();
    }

    assert_eq!(Err(Failure::OutOfMemory), map.try_insert(4, "4".to_string()));
    assert_eq!(0, arena.reserve());

    assert_eq!(Some("2".to_string()), map.remove(&2));
    assert_eq!(1, arena.reserve());

    map.try_insert(4, "4".to_string()).unwrap();
    assert_eq!(Some(&"4".to_string()), map.get(&4));
}

#[test]
fn heap_and_arena_maps_swap_contents() {
    let arena: Arena<Node<hashmap::Entry<u32, u32>>, 8> = Arena::new();

    let mut constrained = HashMap::with_parts(
        RandomState::new(),
        &arena,
        FixedBuckets::<_, 8>::new(),
    );
    let mut roomy: HashMap<u32, u32> = (0..6).map(|i| (i, i * i)).collect();

    constrained.try_insert(100, 0).unwrap();

    roomy.try_swap_with(&mut constrained).unwrap();

    assert_eq!(1, roomy.len());
    assert_eq!(Some(&0), roomy.get(&100));

    assert_eq!(6, constrained.len());
    assert_eq!(Some(&25), constrained.get(&5));
    assert_eq!(2, arena.reserve());
}

#[test]
fn list_round_trip_through_iterators() {
    let list: List<u32> = (0..8).collect();

    let doubled: List<u32> = list.iter().map(|value| value * 2).collect();

    assert_eq!(8, doubled.len());
    assert_eq!(Some(&0), doubled.front());
    assert_eq!(Some(&14), doubled.back());

    let back: Vec<u32> = doubled.into_iter().collect();
    assert_eq!(vec![0, 2, 4, 6, 8, 10, 12, 14], back);
}

#[test]
fn arena_lists_swap_without_heap() {
    let ping_pool: Arena<list::Node<u8>, 3> = Arena::new();
    let pong_pool: Arena<list::Node<u8>, 5> = Arena::new();

    let mut ping = List::with_allocator(&ping_pool);
    let mut pong = List::with_allocator(&pong_pool);

    ping.extend(*b"abc");
    pong.extend(*b"xy");

    ping.try_swap_with(&mut pong).unwrap();

    assert_eq!(b"xy".to_vec(), ping.iter().copied().collect::<Vec<_>>());
    assert_eq!(b"abc".to_vec(), pong.iter().copied().collect::<Vec<_>>());

    //  A five-element pong no longer fits ping's three slots.
    pong.extend(*b"de");

    assert_eq!(Err(Failure::ExceedsCapacity), ping.try_swap_with(&mut pong));
}
