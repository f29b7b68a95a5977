//! Lock-Free Sample Queue
//!
//! A high-performance SPSC (Single Producer, Single Consumer) queue connecting
//! the platform input thread to the prediction session loop.
//!
//! Architecture:
//! - Producer (platform touch callback): never blocks, pushes events at up to
//!   the digitizer's report rate
//! - Consumer (session driver): drains events once per frame
//!
//! The design uses the `rtrb` crate for the core ring buffer implementation.

use super::types::TouchEvent;
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default queue capacity (must be power of 2)
pub const DEFAULT_CAPACITY: usize = 1024;

/// Queue statistics for monitoring
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total events pushed
    pub events_pushed: AtomicU64,
    /// Events dropped due to full queue
    pub events_dropped: AtomicU64,
    /// Events successfully consumed
    pub events_consumed: AtomicU64,
    /// Peak queue occupancy
    pub peak_occupancy: AtomicU64,
}

/// Lock-free SPSC queue for touch events
///
/// Split once into producer and consumer halves; the producer lives on the
/// platform input thread, the consumer on the session driver.
pub struct SampleQueue {
    producer: Option<Producer<TouchEvent>>,
    consumer: Option<Consumer<TouchEvent>>,
    stats: Arc<QueueStats>,
    capacity: usize,
}

impl SampleQueue {
    /// Create a queue with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a queue with the specified capacity
    ///
    /// # Panics
    /// Panics if capacity is not a power of 2
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Sample queue capacity must be a power of 2"
        );

        let (producer, consumer) = RingBuffer::new(capacity);

        Self {
            producer: Some(producer),
            consumer: Some(consumer),
            stats: Arc::new(QueueStats::default()),
            capacity,
        }
    }

    /// Split the queue into producer and consumer halves.
    ///
    /// Must be called once to separate the producer (input thread) from the
    /// consumer (session driver).
    pub fn split(mut self) -> (SampleProducer, SampleConsumer) {
        let producer = self.producer.take().expect("Producer already taken");
        let consumer = self.consumer.take().expect("Consumer already taken");

        (
            SampleProducer {
                inner: producer,
                stats: Arc::clone(&self.stats),
                capacity: self.capacity,
            },
            SampleConsumer {
                inner: consumer,
                stats: Arc::clone(&self.stats),
            },
        )
    }

    /// Get a handle on the statistics
    pub fn stats(&self) -> Arc<QueueStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half of the queue (platform input thread)
pub struct SampleProducer {
    inner: Producer<TouchEvent>,
    stats: Arc<QueueStats>,
    capacity: usize,
}

impl SampleProducer {
    /// Push an event into the queue.
    ///
    /// Lock-free and never blocks. If the queue is full the event is dropped
    /// and the drop counter is incremented.
    ///
    /// Returns true if the event was pushed, false if dropped.
    #[inline]
    pub fn push(&mut self, event: TouchEvent) -> bool {
        match self.inner.push(event) {
            Ok(()) => {
                self.stats.events_pushed.fetch_add(1, Ordering::Relaxed);

                // Update peak occupancy
                let free = self.inner.slots();
                let occupied = (self.capacity - free) as u64;
                let mut peak = self.stats.peak_occupancy.load(Ordering::Relaxed);
                while occupied > peak {
                    match self.stats.peak_occupancy.compare_exchange_weak(
                        peak,
                        occupied,
                        Ordering::Relaxed,
                        Ordering::Relaxed,
                    ) {
                        Ok(_) => break,
                        Err(p) => peak = p,
                    }
                }

                true
            }
            Err(_) => {
                self.stats.events_dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Remaining free slots
    pub fn free_slots(&self) -> usize {
        self.inner.slots()
    }
}

/// Consumer half of the queue (session driver)
pub struct SampleConsumer {
    inner: Consumer<TouchEvent>,
    stats: Arc<QueueStats>,
}

impl SampleConsumer {
    /// Pop one event if available
    #[inline]
    pub fn pop(&mut self) -> Option<TouchEvent> {
        match self.inner.pop() {
            Ok(event) => {
                self.stats.events_consumed.fetch_add(1, Ordering::Relaxed);
                Some(event)
            }
            Err(_) => None,
        }
    }

    /// Pop up to `max` events into a fresh vector
    pub fn pop_batch(&mut self, max: usize) -> Vec<TouchEvent> {
        let mut batch = Vec::with_capacity(max.min(self.inner.slots()));
        while batch.len() < max {
            match self.pop() {
                Some(event) => batch.push(event),
                None => break,
            }
        }
        batch
    }

    /// Number of events currently waiting
    pub fn pending(&self) -> usize {
        self.inner.slots()
    }
}
