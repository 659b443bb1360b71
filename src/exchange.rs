//! The bounded content exchange.
//!
//! Swapping two containers backed by the same storage is a pointer exchange,
//! which the containers perform themselves. Swapping two containers backed
//! by *different* fixed-capacity storages is not: every element must
//! physically move to a slot of the other side's storage, under the
//! constraint that neither storage is ever asked to hold more than its
//! capacity, even transiently.
//!
//! The drivers below work over `Port`, a container-agnostic cursor into one
//! side of the exchange; the two sides need not be the same container type,
//! as long as they ferry the same element type. Feasibility is checked up
//! front: the exchange runs only if each side's content fits the other
//! side's capacity. From there the drivers interleave transfers so that each
//! move frees the slot the next move needs, with a single *pivot* element
//! parked outside both storages when both start completely full. The
//! arithmetic guarantees the interleave never stalls:
//!
//! -   A transfer into a side is only attempted when it has a free slot.
//! -   If neither side has a free slot while elements remain, both are at
//!     capacity; the pivot extraction made that state unreachable.

use super::failure::{Failure, Result};

use super::root::mem;

/// One side of an exchange: a cursor over the elements a container held when
/// the exchange started.
///
/// `take_next` and `put_taken` must preserve relative order for ordered
/// containers: elements received via `put_taken` land before the remaining
/// original elements, in reception order, and `put_first` lands before
/// everything else.
pub trait Port {
    /// The element type ferried across.
    type Value;

    /// Returns the number of original elements not yet taken, plus the
    /// elements received so far.
    fn len(&self) -> usize;

    /// Returns the number of slots currently free in the backing storage.
    fn free_slots(&self) -> usize;

    /// Returns the capacity of the backing storage.
    fn max_len(&self) -> usize;

    /// Removes and returns the next original element, freeing its slot.
    ///
    /// Only called when original elements remain.
    fn take_next(&mut self) -> Self::Value;

    /// Stores an element received from the other side.
    ///
    /// Only called when a slot is free.
    fn put_taken(&mut self, value: Self::Value);

    /// Stores the pivot element, before everything else stored so far.
    ///
    /// Only called when a slot is free.
    fn put_first(&mut self, value: Self::Value);
}

/// A port whose elements can also be swapped payload for payload, nodes
/// staying put, for containers able to exchange without freeing a slot
/// first.
pub trait InPlacePort: Port {
    /// Returns the next original element, in place.
    ///
    /// Only called when original elements remain.
    fn peek_next(&mut self) -> &mut Self::Value;

    /// Advances past the next original element, leaving it in place.
    ///
    /// Only called when original elements remain.
    fn advance(&mut self);
}

//  Validates capacity both ways.
//
//  Returns the element counts to transfer.
fn validate<P, Q>(a: &P, b: &Q) -> Result<(usize, usize)>
where
    P: Port,
    Q: Port<Value = P::Value>,
{
    if a.len() > b.max_len() || b.len() > a.max_len() {
        return Err(Failure::ExceedsCapacity);
    }

    Ok((a.len(), b.len()))
}

/// Exchanges the contents of two containers by moving every element across.
///
/// Each element moves exactly once, except possibly one pivot element which
/// moves twice.
///
/// #   Errors
///
/// Returns `ExceedsCapacity`, without moving anything, if either side's
/// content does not fit the other side's capacity.
pub fn exchange<P, Q>(a: &mut P, b: &mut Q) -> Result<()>
where
    P: Port,
    Q: Port<Value = P::Value>,
{
    let (mut from_a, mut from_b) = validate(a, b)?;

    //  Both sides full: park one element of `a` outside both storages, so
    //  that the interleave below always finds a free slot.
    let pivot = if a.free_slots() == 0 && b.free_slots() == 0 && from_a > 0 {
        from_a -= 1;

        Some(a.take_next())
    } else {
        None
    };

    while from_a > 0 || from_b > 0 {
        if from_b > 0 && a.free_slots() > 0 {
            a.put_taken(b.take_next());
            from_b -= 1;
        } else if from_a > 0 && b.free_slots() > 0 {
            b.put_taken(a.take_next());
            from_a -= 1;
        } else {
            debug_assert!(false, "exchange stalled");

            break;
        }
    }

    if let Some(value) = pivot {
        b.put_first(value);
    }

    Ok(())
}

/// Exchanges the contents of two containers, swapping payloads in place for
/// as long as both sides have elements, then moving the longer side's
/// remainder across.
///
/// #   Errors
///
/// Returns `ExceedsCapacity`, without moving anything, if either side's
/// content does not fit the other side's capacity.
pub fn exchange_in_place<P, Q>(a: &mut P, b: &mut Q) -> Result<()>
where
    P: InPlacePort,
    Q: InPlacePort<Value = P::Value>,
{
    let (mut from_a, mut from_b) = validate(a, b)?;

    while from_a > 0 && from_b > 0 {
        mem::swap(a.peek_next(), b.peek_next());

        a.advance();
        b.advance();

        from_a -= 1;
        from_b -= 1;
    }

    //  The remainder fits: validation bounded each side's content by the
    //  other side's capacity.
    while from_b > 0 {
        a.put_taken(b.take_next());
        from_b -= 1;
    }

    while from_a > 0 {
        b.put_taken(a.take_next());
        from_a -= 1;
    }

    Ok(())
}
