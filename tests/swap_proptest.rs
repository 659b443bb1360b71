//! Property tests: exchanges are bijections, and the containers track a
//! model implementation under random workloads.

use std::hash::RandomState;

use proptest::prelude::*;

use corral::arena::Arena;
use corral::failure::Failure;
use corral::hashmap::HashMap;
use corral::hashset::{self, HashSet};
use corral::list::{self, List};
use corral::table::buckets::FixedBuckets;
use corral::table::node::Node;

proptest! {
    #[test]
    fn list_swap_is_bijective(
        left in prop::collection::vec(any::<i32>(), 0..16),
        right in prop::collection::vec(any::<i32>(), 0..16),
    ) {
        let left_arena: Arena<list::Node<i32>, 16> = Arena::new();
        let right_arena: Arena<list::Node<i32>, 16> = Arena::new();

        let mut a = List::with_allocator(&left_arena);
        let mut b = List::with_allocator(&right_arena);

        a.extend(left.iter().copied());
        b.extend(right.iter().copied());

        a.try_swap_with(&mut b).unwrap();

        prop_assert_eq!(&right, &a.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(&left, &b.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn oversized_list_swap_is_rejected(
        values in prop::collection::vec(any::<i32>(), 5..24),
    ) {
        let small_arena: Arena<list::Node<i32>, 4> = Arena::new();

        let mut small = List::with_allocator(&small_arena);
        let mut large: List<i32> = values.iter().copied().collect();

        prop_assert_eq!(
            Err(Failure::ExceedsCapacity),
            large.try_swap_with(&mut small)
        );

        //  Nothing moved on either side.
        prop_assert_eq!(&values, &large.iter().copied().collect::<Vec<_>>());
        prop_assert!(small.is_empty());
    }

    #[test]
    fn map_matches_model(
        ops in prop::collection::vec((any::<u8>(), any::<u8>()), 0..64),
    ) {
        let mut subject: HashMap<u8, u8> = HashMap::new();
        let mut model = std::collections::HashMap::new();

        for (op, key) in ops {
            if op % 4 == 0 {
                prop_assert_eq!(model.remove(&key), subject.remove(&key));
            } else {
                prop_assert_eq!(model.insert(key, op), subject.insert(key, op));
            }

            prop_assert_eq!(model.len(), subject.len());
        }

        for (key, value) in &model {
            prop_assert_eq!(Some(value), subject.get(key));
        }
    }

    #[test]
    fn rehash_preserves_contents(
        values in prop::collection::vec(any::<u32>(), 0..64),
        count in 1usize..128,
    ) {
        let mut map: HashMap<u32, u32> =
            values.iter().map(|&value| (value, value)).collect();

        let len = map.len();

        map.rehash(count);

        prop_assert!(map.bucket_count() >= count);
        prop_assert_eq!(len, map.len());

        for &value in &values {
            prop_assert_eq!(Some(&value), map.get(&value));
        }
    }

    #[test]
    fn set_swap_exchanges_membership(
        left in prop::collection::hash_set(any::<u16>(), 0..12),
        right in prop::collection::hash_set(any::<u16>(), 0..12),
    ) {
        let left_arena: Arena<Node<hashset::Entry<u16>>, 12> = Arena::new();
        let right_arena: Arena<Node<hashset::Entry<u16>>, 12> = Arena::new();

        let mut a = HashSet::with_parts(
            RandomState::new(),
            &left_arena,
            FixedBuckets::<_, 8>::new(),
        );
        let mut b = HashSet::with_parts(
            RandomState::new(),
            &right_arena,
            FixedBuckets::<_, 8>::new(),
        );

        a.extend(left.iter().copied());
        b.extend(right.iter().copied());

        a.try_swap_with(&mut b).unwrap();

        prop_assert_eq!(right.len(), a.len());
        prop_assert_eq!(left.len(), b.len());

        for value in &right {
            prop_assert!(a.contains(value));
        }

        for value in &left {
            prop_assert!(b.contains(value));
        }
    }
}
