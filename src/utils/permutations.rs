// Lazy permutation generation (Heap's algorithm)

/// Iterator over every ordering of `0..n`, produced one at a time.
///
/// Yields exactly `n!` items, the identity ordering first. Only the current
/// ordering and one counter per position are kept in memory.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    counters: Vec<usize>,
    position: usize,
    started: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            counters: vec![0; n],
            position: 1,
            started: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.current.clone());
        }

        let n = self.current.len();
        while self.position < n {
            let i = self.position;
            if self.counters[i] < i {
                if i % 2 == 0 {
                    self.current.swap(0, i);
                } else {
                    self.current.swap(self.counters[i], i);
                }
                self.counters[i] += 1;
                self.position = 1;
                return Some(self.current.clone());
            }
            self.counters[i] = 0;
            self.position += 1;
        }

        None
    }
}

/// `n!`, or `None` when it does not fit in a `usize`
pub fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}
