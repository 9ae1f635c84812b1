//! Batch accumulation for commit grouping.

/// Groups normalized rows into batches of a fixed capacity.
///
/// Rows are appended one at a time; once the accumulated count reaches the
/// capacity, [`push`](Batcher::push) hands the full batch back to the
/// caller and the accumulator resets to empty. [`finish`](Batcher::finish)
/// drains whatever partial batch remains at end-of-file.
///
/// A capacity of 1 makes the batcher a pass-through: every row flushes
/// immediately, which is how streaming (commit-per-row) mode is expressed.
#[derive(Debug)]
pub struct Batcher {
    capacity: usize,
    rows: Vec<Vec<String>>,
}

impl Batcher {
    /// Create a batcher that flushes every `capacity` rows. A capacity of
    /// zero is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            rows: Vec::new(),
        }
    }

    /// Append a row; returns the full batch once capacity is reached.
    pub fn push(&mut self, row: Vec<String>) -> Option<Vec<Vec<String>>> {
        self.rows.push(row);
        if self.rows.len() >= self.capacity {
            Some(std::mem::take(&mut self.rows))
        } else {
            None
        }
    }

    /// Drain the residual partial batch, if any.
    pub fn finish(&mut self) -> Option<Vec<Vec<String>>> {
        if self.rows.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.rows))
        }
    }

    /// Rows currently accumulated and not yet flushed.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: &str) -> Vec<String> {
        vec![value.to_string()]
    }

    #[test]
    fn test_flushes_once_capacity_is_reached() {
        let mut batcher = Batcher::new(2);
        assert!(batcher.push(row("1")).is_none());
        let flushed = batcher.push(row("2")).expect("second push flushes");
        assert_eq!(flushed, vec![row("1"), row("2")]);
        assert!(batcher.is_empty());
    }

    #[test]
    fn test_finish_drains_the_partial_batch() {
        let mut batcher = Batcher::new(2);
        batcher.push(row("1"));
        batcher.push(row("2"));
        batcher.push(row("3"));
        assert_eq!(batcher.finish(), Some(vec![row("3")]));
        assert_eq!(batcher.finish(), None);
    }

    #[test]
    fn test_exact_multiple_leaves_nothing_to_finish() {
        let mut batcher = Batcher::new(2);
        batcher.push(row("1"));
        assert!(batcher.push(row("2")).is_some());
        assert_eq!(batcher.finish(), None);
    }

    #[test]
    fn test_emits_ceil_n_over_capacity_flushes() {
        let mut batcher = Batcher::new(2);
        let mut flushes = 0;
        for i in 0..5 {
            if batcher.push(row(&i.to_string())).is_some() {
                flushes += 1;
            }
        }
        if let Some(last) = batcher.finish() {
            assert_eq!(last.len(), 1);
            flushes += 1;
        }
        assert_eq!(flushes, 3);
    }

    #[test]
    fn test_capacity_one_is_a_pass_through() {
        let mut batcher = Batcher::new(1);
        for i in 0..3 {
            let flushed = batcher.push(row(&i.to_string()));
            assert_eq!(flushed, Some(vec![row(&i.to_string())]));
        }
        assert_eq!(batcher.finish(), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped_to_one() {
        let mut batcher = Batcher::new(0);
        assert!(batcher.push(row("1")).is_some());
    }
}
