/// Linear probe over the slots of a table, starting at the home index.
///
/// Yields every index exactly once, `home, home + 1, ...`, wrapping to 0
/// past the last slot, then ends. Build a new one per lookup.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    next: usize,
    mask: usize,
    remaining: usize,
}

impl ProbeSequence {
    pub fn new(home: usize, capacity: usize) -> Self {
        let mask = capacity.wrapping_sub(1);
        Self {
            next: home & mask,
            mask,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let i = self.next;
        self.next = (self.next + 1) & self.mask;
        self.remaining -= 1;
        Some(i)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl std::iter::FusedIterator for ProbeSequence {}
