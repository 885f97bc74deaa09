//! bounded record of matrix operations for debugging long symbolic computations
use crate::symbolic::symbolic_matrix::Matrix;
use log::info;
use std::collections::VecDeque;
use std::fmt;

pub type TraceConsumer = Box<dyn Fn(&str) + Send>;

pub struct OpTrace {
    entries: VecDeque<String>,
    capacity: usize,
    consumer: Option<TraceConsumer>,
}

impl OpTrace {
    pub const DEFAULT_CAPACITY: usize = 100;
    /// entries kept back from the consumer until `drain_to_consumer`
    const KEEP_RECENT: usize = 2;

    /// Trace without a consumer: keeps the last `DEFAULT_CAPACITY` entries.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
            consumer: None,
        }
    }

    /// Trace that hands entries to `consumer`; only the most recent ones are held back.
    pub fn with_consumer<F>(consumer: F) -> Self
    where
        F: Fn(&str) + Send + 'static,
    {
        let mut trace = Self::new();
        trace.consumer = Some(Box::new(consumer));
        trace
    }

    pub fn record(&mut self, op: &str, matrix: &Matrix) {
        let entry = format!("\n Op: {} ->\n{}", op, matrix);
        self.entries.push_back(entry);
        match &self.consumer {
            Some(consumer) => {
                while self.entries.len() > Self::KEEP_RECENT {
                    if let Some(old) = self.entries.pop_front() {
                        consumer(&old);
                    }
                }
            }
            None => {
                while self.entries.len() > self.capacity {
                    self.entries.pop_front();
                }
            }
        }
    }

    /// pass every buffered entry to the consumer, or to the log if there is none
    pub fn drain_to_consumer(&mut self) {
        while let Some(entry) = self.entries.pop_front() {
            match &self.consumer {
                Some(consumer) => consumer(&entry),
                None => info!("{}", entry),
            }
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for OpTrace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpTrace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OpTrace")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("consumer", &self.consumer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_ring_buffer_is_bounded() {
        let mut trace = OpTrace::new();
        let m = Matrix::identity(1);
        for i in 0..150 {
            trace.record(&format!("op {}", i), &m);
        }
        assert_eq!(trace.len(), OpTrace::DEFAULT_CAPACITY);
        assert!(trace.entries().next().unwrap().contains("op 50"));
        trace.clear();
        assert!(trace.is_empty());
    }

    #[test]
    fn test_entry_contains_matrix_text() {
        let mut trace = OpTrace::with_capacity(3);
        trace.record("transpose", &Matrix::identity(2).with_label("I"));
        let entry = trace.entries().next().unwrap();
        assert!(entry.contains("Op: transpose"));
        assert!(entry.contains("Matrix{2x2 I}"));
    }

    #[test]
    fn test_consumer_gets_older_entries_first() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut trace = OpTrace::with_consumer(move |e: &str| sink.lock().unwrap().push(e.to_string()));
        let m = Matrix::identity(1);
        for op in ["a", "b", "c"] {
            trace.record(op, &m);
        }
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(seen.lock().unwrap()[0].contains("Op: a"));
        assert_eq!(trace.len(), 2);
        trace.drain_to_consumer();
        assert!(trace.is_empty());
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
