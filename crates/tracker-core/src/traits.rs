use crate::TrackerResult;

/// A form-shaped view of an entity: prefilled from it, applied back onto it.
///
/// `apply_to` must leave the entity untouched when it returns an error.
pub trait Editable<T>: Sized {
    fn from_entity(entity: &T) -> Self;

    fn apply_to(self, entity: &mut T) -> TrackerResult<()>;
}
