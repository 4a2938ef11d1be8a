//! Ratcliff/Obershelp matching blocks.

/// Count the characters covered by the matching blocks of `a` and `b`.
///
/// The longest common run is taken first (earliest in `a`, then earliest in
/// `b` when several runs share the maximum length), and the same search is
/// repeated on the unmatched pieces to its left and right.
pub fn matching_characters<T: Eq>(a: &[T], b: &[T]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    total
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`.
fn longest_match<T: Eq>(
    a: &[T],
    b: &[T],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    if alo >= ahi || blo >= bhi {
        return (best_i, best_j, best_size);
    }

    // run[col] = length of the common suffix ending at a[i], b[blo + col - 1]
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut run = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let col = j - blo + 1;
            if a[i] == b[j] {
                let size = prev[col - 1] + 1;
                run[col] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            } else {
                run[col] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut run);
    }

    (best_i, best_j, best_size)
}
