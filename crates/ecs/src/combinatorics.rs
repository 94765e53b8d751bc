//! Lexicographic index tuples over `0..n`.
//!
//! Both iterators yield `Vec<usize>` tuples of length `k` in lexicographic
//! order, matching the order in which the underlying items were supplied.
//! When `k > n` they yield nothing. A `k` of zero yields a single empty tuple.

/// Every `k`-subset of `0..n`, each as a strictly increasing tuple.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        // Rightmost slot that has not reached its maximum value n - k + i.
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

/// Every ordered `k`-tuple of distinct indices from `0..n`.
#[derive(Debug, Clone)]
pub struct Permutations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }

    /// Smallest index above `floor` not used in `indices[..slot]`.
    fn next_free(&self, slot: usize, floor: Option<usize>) -> Option<usize> {
        let start = floor.map_or(0, |f| f + 1);
        (start..self.n).find(|candidate| !self.indices[..slot].contains(candidate))
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        let mut advanced = false;
        for slot in (0..k).rev() {
            if let Some(bumped) = self.next_free(slot, Some(self.indices[slot])) {
                self.indices[slot] = bumped;
                for rest in slot + 1..k {
                    // k <= n, so a free index always remains for the tail.
                    let free = self.next_free(rest, None).unwrap_or_default();
                    self.indices[rest] = free;
                }
                advanced = true;
                break;
            }
        }
        self.done = !advanced;
        Some(current)
    }
}

/// `n! / (n - k)!`, or 0 when `k > n`.
pub fn permutation_count(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    (n - k + 1..=n).product()
}

/// `n! / (k! (n - k)!)`, or 0 when `k > n`.
pub fn combination_count(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
