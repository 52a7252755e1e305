//! Pure backlog reordering, decoupled from persistence.
//!
//! Moving an epic is two independent concerns: this array operation, and a
//! storage call that commits the resulting priority order. The allocator
//! never depends on either; it just consumes whatever order it is given.

/// Move the element at `from` to position `to`, shifting the elements in
/// between. Out-of-range indices (or `from == to`) return the list
/// unchanged.
pub fn reorder<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    if from >= items.len() || to >= items.len() || from == to {
        return items;
    }
    let item = items.remove(from);
    items.insert(to, item);
    items
}
