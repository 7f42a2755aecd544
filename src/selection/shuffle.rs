//! Comparator-driven shuffle.
//!
//! The daily ordering comes from sorting the pool with a comparator that
//! ignores its arguments and answers with a fresh random draw. The result is
//! a biased permutation that depends on the exact sequence of comparisons the
//! sort performs. `comparator_sort` is therefore a complete run-merging sort
//! (run detection, binary insertion up to the minimum run length, a pending
//! run stack and galloping merges) that issues its comparisons in the same
//! order as the `Array.prototype.sort` implementation shipped in browsers,
//! so the same seed yields the same day on every tier.
//!
//! It never panics on an inconsistent comparator and always leaves a
//! permutation of its input behind.

use std::cmp::Ordering;

use super::rng::SineRng;

const MIN_GALLOP: usize = 7;

/// Shuffle `v` in place, consuming one draw of `rng` per comparison.
pub fn shuffle_with<T: Copy>(v: &mut [T], rng: &mut SineRng) {
    comparator_sort(v, |_, _| rng.draw_ordering());
}

/// Stable run-merging sort driven by an arbitrary comparator.
pub fn comparator_sort<T, F>(v: &mut [T], compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let mut state = SortState {
        v,
        compare,
        min_gallop: MIN_GALLOP,
        runs: Vec::new(),
    };

    let min_run = min_run_length(len);
    let mut low = 0;
    let mut remaining = len;

    while remaining != 0 {
        let mut run_len = state.count_and_make_run(low, low + remaining);

        if run_len < min_run {
            let forced = min_run.min(remaining);
            state.binary_insertion_sort(low, low + run_len, low + forced);
            run_len = forced;
        }

        state.runs.push(Run {
            base: low,
            len: run_len,
        });
        state.merge_collapse();

        low += run_len;
        remaining -= run_len;
    }

    state.merge_force_collapse();
    debug_assert_eq!(state.runs.len(), 1);
}

fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= 64 {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

fn lt<T, F: FnMut(&T, &T) -> Ordering>(compare: &mut F, a: &T, b: &T) -> bool {
    compare(a, b) == Ordering::Less
}

/// Leftmost position in `arr[base..base + len]` at which `key` can be
/// inserted, searching outward from `hint`.
fn gallop_left<T, F>(
    compare: &mut F,
    arr: &[T],
    key: T,
    base: usize,
    len: usize,
    hint: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut last_ofs = 0;
    let mut ofs = 1;

    let (mut lo, mut hi) = if lt(compare, &arr[base + hint], &key) {
        let max_ofs = len - hint;
        while ofs < max_ofs {
            if !lt(compare, &arr[base + hint + ofs], &key) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + last_ofs + 1, hint + ofs)
    } else {
        let max_ofs = hint + 1;
        while ofs < max_ofs {
            if lt(compare, &arr[base + hint - ofs], &key) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + 1 - ofs, hint - last_ofs)
    };

    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if lt(compare, &arr[base + mid], &key) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Rightmost insertion position, mirror of `gallop_left`.
fn gallop_right<T, F>(
    compare: &mut F,
    arr: &[T],
    key: T,
    base: usize,
    len: usize,
    hint: usize,
) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut last_ofs = 0;
    let mut ofs = 1;

    let (mut lo, mut hi) = if lt(compare, &key, &arr[base + hint]) {
        let max_ofs = hint + 1;
        while ofs < max_ofs {
            if !lt(compare, &key, &arr[base + hint - ofs]) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + 1 - ofs, hint - last_ofs)
    } else {
        let max_ofs = len - hint;
        while ofs < max_ofs {
            if lt(compare, &key, &arr[base + hint + ofs]) {
                break;
            }
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        (hint + last_ofs + 1, hint + ofs)
    };

    while lo < hi {
        let mid = lo + ((hi - lo) >> 1);
        if lt(compare, &key, &arr[base + mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    hi
}

#[derive(Debug, Clone, Copy)]
struct Run {
    base: usize,
    len: usize,
}

/// How a merge loop ended.
enum MergeEnd {
    /// One side is exhausted; copy whatever is left of the buffered side.
    Done,
    /// Exactly one buffered element remains; it goes after the other side.
    LastBuffered,
}

struct SortState<'a, T, F> {
    v: &'a mut [T],
    compare: F,
    min_gallop: usize,
    runs: Vec<Run>,
}

impl<'a, T, F> SortState<'a, T, F>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Length of the run starting at `low`; strictly descending runs are
    /// reversed in place.
    fn count_and_make_run(&mut self, low: usize, high: usize) -> usize {
        let next = low + 1;
        if next == high {
            return 1;
        }

        let mut run_len = 2;
        let descending = lt(&mut self.compare, &self.v[next], &self.v[next - 1]);

        let mut previous = self.v[next];
        for idx in next + 1..high {
            let current = self.v[idx];
            let order = (self.compare)(&current, &previous);
            let continues = if descending {
                order == Ordering::Less
            } else {
                order != Ordering::Less
            };
            if !continues {
                break;
            }
            previous = current;
            run_len += 1;
        }

        if descending {
            self.v[low..low + run_len].reverse();
        }
        run_len
    }

    /// `v[low..start]` is already sorted; extend it to `v[low..high]`.
    fn binary_insertion_sort(&mut self, low: usize, start: usize, high: usize) {
        let mut start = if low == start { start + 1 } else { start };

        while start < high {
            let pivot = self.v[start];
            let mut left = low;
            let mut right = start;

            while left < right {
                let mid = left + ((right - left) >> 1);
                if lt(&mut self.compare, &pivot, &self.v[mid]) {
                    right = mid;
                } else {
                    left = mid + 1;
                }
            }

            self.v.copy_within(left..start, left + 1);
            self.v[left] = pivot;
            start += 1;
        }
    }

    fn run_invariant_established(&self, n: usize) -> bool {
        if n < 2 {
            return true;
        }
        self.runs[n - 2].len > self.runs[n - 1].len + self.runs[n].len
    }

    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;

            if !self.run_invariant_established(n + 1) || !self.run_invariant_established(n) {
                if self.runs[n - 1].len < self.runs[n + 1].len {
                    n -= 1;
                }
                self.merge_at(n);
            } else if self.runs[n].len <= self.runs[n + 1].len {
                self.merge_at(n);
            } else {
                break;
            }
        }
    }

    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            if n > 0 && self.runs[n - 1].len < self.runs[n + 1].len {
                n -= 1;
            }
            self.merge_at(n);
        }
    }

    fn merge_at(&mut self, i: usize) {
        let Run {
            base: mut base_a,
            len: mut len_a,
        } = self.runs[i];
        let Run {
            base: base_b,
            len: mut len_b,
        } = self.runs[i + 1];

        self.runs[i].len = len_a + len_b;
        self.runs.remove(i + 1);

        // Elements of A already in place before B's first element.
        let key_right = self.v[base_b];
        let k = gallop_right(&mut self.compare, &*self.v, key_right, base_a, len_a, 0);
        base_a += k;
        len_a -= k;
        if len_a == 0 {
            return;
        }

        // Elements of B already in place after A's last element.
        let key_left = self.v[base_a + len_a - 1];
        len_b = gallop_left(&mut self.compare, &*self.v, key_left, base_b, len_b, len_b - 1);
        if len_b == 0 {
            return;
        }

        if len_a <= len_b {
            self.merge_low(base_a, len_a, base_b, len_b);
        } else {
            self.merge_high(base_a, len_a, base_b, len_b);
        }
    }

    /// Merge with A buffered, filling from the left.
    fn merge_low(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let tmp: Vec<T> = self.v[base_a..base_a + len_a].to_vec();
        let mut dest = base_a;
        let mut cursor_tmp = 0;
        let mut cursor_b = base_b;

        self.v[dest] = self.v[cursor_b];
        dest += 1;
        cursor_b += 1;
        len_b -= 1;

        let end = if len_b == 0 {
            MergeEnd::Done
        } else if len_a == 1 {
            MergeEnd::LastBuffered
        } else {
            let mut min_gallop = self.min_gallop;
            'merge: loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                // One element at a time until one side keeps winning.
                loop {
                    if lt(&mut self.compare, &self.v[cursor_b], &tmp[cursor_tmp]) {
                        self.v[dest] = self.v[cursor_b];
                        dest += 1;
                        cursor_b += 1;
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    } else {
                        self.v[dest] = tmp[cursor_tmp];
                        dest += 1;
                        cursor_tmp += 1;
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 1 {
                            break 'merge MergeEnd::LastBuffered;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first_iteration = true;
                while wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP || first_iteration {
                    first_iteration = false;
                    min_gallop = (min_gallop - 1).max(1);
                    self.min_gallop = min_gallop;

                    let key = self.v[cursor_b];
                    wins_a = gallop_right(&mut self.compare, &tmp, key, cursor_tmp, len_a, 0);
                    if wins_a > 0 {
                        self.v[dest..dest + wins_a]
                            .copy_from_slice(&tmp[cursor_tmp..cursor_tmp + wins_a]);
                        dest += wins_a;
                        cursor_tmp += wins_a;
                        len_a -= wins_a;
                        if len_a == 1 {
                            break 'merge MergeEnd::LastBuffered;
                        }
                        // Only reachable with an inconsistent comparator.
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    self.v[dest] = self.v[cursor_b];
                    dest += 1;
                    cursor_b += 1;
                    len_b -= 1;
                    if len_b == 0 {
                        break 'merge MergeEnd::Done;
                    }

                    let key = tmp[cursor_tmp];
                    wins_b = gallop_left(&mut self.compare, &*self.v, key, cursor_b, len_b, 0);
                    if wins_b > 0 {
                        self.v.copy_within(cursor_b..cursor_b + wins_b, dest);
                        dest += wins_b;
                        cursor_b += wins_b;
                        len_b -= wins_b;
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    self.v[dest] = tmp[cursor_tmp];
                    dest += 1;
                    cursor_tmp += 1;
                    len_a -= 1;
                    if len_a == 1 {
                        break 'merge MergeEnd::LastBuffered;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match end {
            MergeEnd::Done => {
                self.v[dest..dest + len_a].copy_from_slice(&tmp[cursor_tmp..cursor_tmp + len_a]);
            }
            MergeEnd::LastBuffered => {
                self.v.copy_within(cursor_b..cursor_b + len_b, dest);
                self.v[dest + len_b] = tmp[cursor_tmp];
            }
        }
    }

    /// Merge with B buffered, filling from the right.
    ///
    /// `dest`, `cursor_a` and `cursor_tmp` are exclusive ends: the next
    /// element to move is at `index - 1`.
    fn merge_high(&mut self, base_a: usize, mut len_a: usize, base_b: usize, mut len_b: usize) {
        let tmp: Vec<T> = self.v[base_b..base_b + len_b].to_vec();
        let mut dest = base_b + len_b;
        let mut cursor_tmp = len_b;
        let mut cursor_a = base_a + len_a;

        dest -= 1;
        cursor_a -= 1;
        self.v[dest] = self.v[cursor_a];
        len_a -= 1;

        let end = if len_a == 0 {
            MergeEnd::Done
        } else if len_b == 1 {
            MergeEnd::LastBuffered
        } else {
            let mut min_gallop = self.min_gallop;
            'merge: loop {
                let mut wins_a = 0;
                let mut wins_b = 0;

                loop {
                    if lt(&mut self.compare, &tmp[cursor_tmp - 1], &self.v[cursor_a - 1]) {
                        dest -= 1;
                        cursor_a -= 1;
                        self.v[dest] = self.v[cursor_a];
                        wins_a += 1;
                        wins_b = 0;
                        len_a -= 1;
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                        if wins_a >= min_gallop {
                            break;
                        }
                    } else {
                        dest -= 1;
                        cursor_tmp -= 1;
                        self.v[dest] = tmp[cursor_tmp];
                        wins_b += 1;
                        wins_a = 0;
                        len_b -= 1;
                        if len_b == 1 {
                            break 'merge MergeEnd::LastBuffered;
                        }
                        if wins_b >= min_gallop {
                            break;
                        }
                    }
                }

                min_gallop += 1;
                let mut first_iteration = true;
                while wins_a >= MIN_GALLOP || wins_b >= MIN_GALLOP || first_iteration {
                    first_iteration = false;
                    min_gallop = (min_gallop - 1).max(1);
                    self.min_gallop = min_gallop;

                    let key = tmp[cursor_tmp - 1];
                    let k =
                        gallop_right(&mut self.compare, &*self.v, key, base_a, len_a, len_a - 1);
                    wins_a = len_a - k;
                    if wins_a > 0 {
                        dest -= wins_a;
                        cursor_a -= wins_a;
                        self.v.copy_within(cursor_a..cursor_a + wins_a, dest);
                        len_a -= wins_a;
                        if len_a == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    dest -= 1;
                    cursor_tmp -= 1;
                    self.v[dest] = tmp[cursor_tmp];
                    len_b -= 1;
                    if len_b == 1 {
                        break 'merge MergeEnd::LastBuffered;
                    }

                    let key = self.v[cursor_a - 1];
                    let k = gallop_left(&mut self.compare, &tmp, key, 0, len_b, len_b - 1);
                    wins_b = len_b - k;
                    if wins_b > 0 {
                        dest -= wins_b;
                        cursor_tmp -= wins_b;
                        self.v[dest..dest + wins_b]
                            .copy_from_slice(&tmp[cursor_tmp..cursor_tmp + wins_b]);
                        len_b -= wins_b;
                        if len_b == 1 {
                            break 'merge MergeEnd::LastBuffered;
                        }
                        // Only reachable with an inconsistent comparator.
                        if len_b == 0 {
                            break 'merge MergeEnd::Done;
                        }
                    }

                    dest -= 1;
                    cursor_a -= 1;
                    self.v[dest] = self.v[cursor_a];
                    len_a -= 1;
                    if len_a == 0 {
                        break 'merge MergeEnd::Done;
                    }
                }

                min_gallop += 1;
                self.min_gallop = min_gallop;
            }
        };

        match end {
            MergeEnd::Done => {
                self.v[dest - len_b..dest].copy_from_slice(&tmp[..len_b]);
            }
            MergeEnd::LastBuffered => {
                dest -= len_a;
                cursor_a -= len_a;
                self.v.copy_within(cursor_a..cursor_a + len_a, dest);
                self.v[dest - 1] = tmp[cursor_tmp - 1];
            }
        }
    }
}
