//! The Key trait, to extract the key of an element.

pub trait Key {
    type Key: ?Sized;

    fn key(&self) -> &Self::Key;
}
