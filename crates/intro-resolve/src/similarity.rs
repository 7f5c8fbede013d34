//! String similarity scoring
//!
//! Gestalt pattern matching (Ratcliff/Obershelp): find the longest common
//! block, recurse on the pieces to its left and right, and score
//! `2 * matched / (len(a) + len(b))`. Identical strings score `1.0`, strings
//! with no character in common score `0.0`.
//!
//! Thresholds used by callers were tuned against this exact scoring, so the
//! block search keeps the same tie-break: among equally long blocks the one
//! starting earliest in `a` wins, then earliest in `b`.

/// Similarity ratio of `a` and `b` in `[0.0, 1.0]`.
///
/// Two empty strings are identical and score `1.0`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let score = 2.0 * matching_chars(&a, &b) as f64 / total as f64;
    score
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_block(a, b, (alo, ahi), (blo, bhi));
        if block.len == 0 {
            continue;
        }
        matched += block.len;

        if alo < block.a && blo < block.b {
            pending.push((alo, block.a, blo, block.b));
        }
        if block.a + block.len < ahi && block.b + block.len < bhi {
            pending.push((block.a + block.len, ahi, block.b + block.len, bhi));
        }
    }

    matched
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a: usize,
    b: usize,
    len: usize,
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
fn longest_block(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> Block {
    let mut best = Block {
        a: alo,
        b: blo,
        len: 0,
    };

    // run[j - blo + 1] = length of the common run ending at (i, j)
    let width = bhi - blo;
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let run = prev[slot - 1] + 1;
                curr[slot] = run;
                if run > best.len {
                    best = Block {
                        a: i + 1 - run,
                        b: j + 1 - run,
                        len: run,
                    };
                }
            } else {
                curr[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
