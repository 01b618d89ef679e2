//! Ratcliff/Obershelp sequence matching over characters.
//!
//! The ratio is `2·M / (|a| + |b|)` where `M` is the number of characters
//! covered by the matching blocks: find the longest common run, then recurse
//! on the pieces left and right of it. No junk heuristic is applied, so
//! every character participates.

use std::collections::HashMap;

/// Similarity ratio of two character sequences, in `[0, 1]`.
///
/// Both empty yields `1.0`. The longest-run search breaks ties toward the
/// earliest position in `a`, so callers that need `ratio(a, b) == ratio(b, a)`
/// must pass the operands in a canonical order (see `similarity::similarity`).
pub fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(a, b) as f64 / total as f64
}

/// Upper bound of `ratio` for sequences of the given lengths.
pub fn ratio_upper_bound(len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 1.0;
    }
    2.0 * len_a.min(len_b) as f64 / total as f64
}

/// Total length of the matching blocks between `a` and `b`.
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &c) in b.iter().enumerate() {
        b2j.entry(c).or_default().push(j);
    }

    let mut scratch = Scratch::new(b.len());
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi, &mut scratch);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    total
}

/// Run-length tables reused across `longest_match` calls. Entry `j + 1`
/// holds the length of the run ending at `b[j]`; every entry is zero
/// between calls.
struct Scratch {
    cur: Vec<usize>,
    next: Vec<usize>,
    cur_touched: Vec<usize>,
    next_touched: Vec<usize>,
}

impl Scratch {
    fn new(len_b: usize) -> Self {
        Self {
            cur: vec![0; len_b + 1],
            next: vec![0; len_b + 1],
            cur_touched: Vec::new(),
            next_touched: Vec::new(),
        }
    }

    fn advance(&mut self) {
        for &t in &self.cur_touched {
            self.cur[t] = 0;
        }
        std::mem::swap(&mut self.cur, &mut self.next);
        std::mem::swap(&mut self.cur_touched, &mut self.next_touched);
        self.next_touched.clear();
    }

    fn reset(&mut self) {
        for &t in &self.cur_touched {
            self.cur[t] = 0;
        }
        self.cur_touched.clear();
    }
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
    scratch: &mut Scratch,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = scratch.cur[j] + 1;
                scratch.next[j + 1] = k;
                scratch.next_touched.push(j + 1);
                if k > best_len {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_len = k;
                }
            }
        }
        scratch.advance();
    }
    scratch.reset();

    (best_i, best_j, best_len)
}
