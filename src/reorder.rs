//! Ordered-sequence helpers

/// Move the element at `from` so it ends up at `to`, shifting the others.
///
/// A negative `to` counts back from the end of the full sequence, so `-1`
/// puts the element last. The resolved slot is then applied to the sequence
/// with the element taken out: a slot still negative counts back once more
/// (stopping at the front) and anything past the end appends.
/// Out-of-range `from` leaves the sequence untouched.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: isize) {
    if from >= items.len() {
        return;
    }
    let target = if to < 0 { items.len() as isize + to } else { to };
    let item = items.remove(from);
    let len = items.len() as isize;
    let index = if target < 0 { (len + target).max(0) } else { target.min(len) };
    items.insert(index as usize, item);
}
