/// Balanced, order-preserving bipartition of a sibling list.
///
/// Used at every level of the treemap: a rectangle is cut in two along its
/// longer axis in proportion to the two halves' sizes, and each half is
/// split again until single items remain.

/// The two halves produced by [`split_in_two`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<T> {
    /// Front and back halves, each in the input's relative order.
    pub lists: [Vec<T>; 2],
    /// Total draw size of each half. `sizes[0] >= sizes[1]` always holds.
    pub sizes: [u64; 2],
}

/// Split `items` into two runs of roughly equal total `draw_size`.
///
/// Two lists grow from opposite ends of `items` toward the middle; the
/// lighter side takes the next item (ties go to the back). If the front ends
/// up lighter, the innermost item of the back list moves to the front, and
/// if it is still lighter the halves trade places. For input sorted by
/// descending size this keeps both halves contiguous and ordered.
///
/// # Panics
///
/// Panics if `items` holds fewer than two elements.
pub fn split_in_two<T, F>(items: &[T], draw_size: F) -> Split<T>
where
    T: Copy,
    F: Fn(T) -> u64,
{
    assert!(items.len() >= 2, "split_in_two needs at least two items");

    let last = items.len() - 1;
    let mut front = vec![items[0]];
    let mut back = vec![items[last]];
    let mut front_size = draw_size(items[0]);
    let mut back_size = draw_size(items[last]);

    // `next_back` counts down and may pass `next_front`; track it as the
    // exclusive end of the untaken middle to stay in unsigned arithmetic.
    let mut next_front = 1;
    let mut middle_end = last;
    while next_front < middle_end {
        if front_size < back_size {
            front.push(items[next_front]);
            front_size += draw_size(items[next_front]);
            next_front += 1;
        } else {
            middle_end -= 1;
            back.push(items[middle_end]);
            back_size += draw_size(items[middle_end]);
        }
    }

    if front_size < back_size && back.len() > 1 {
        // Move the innermost back item across so the front is never lighter.
        if let Some(moved) = back.pop() {
            let size = draw_size(moved);
            back_size -= size;
            front_size += size;
            front.push(moved);
        }
    }

    // The back list was built from the tail inward.
    back.reverse();

    if front_size < back_size {
        // Only reachable with unsorted input: keep the invariant by swapping.
        std::mem::swap(&mut front, &mut back);
        std::mem::swap(&mut front_size, &mut back_size);
    }

    Split {
        lists: [front, back],
        sizes: [front_size, back_size],
    }
}
