//! Streaming buffer — bounded, mutex-guarded sample queue.
//!
//! Bridges a producer context (offline generation) and a consumer
//! context (a future streaming playback path). One coarse lock covers
//! each call; no call blocks waiting for data and no compound
//! write-then-read action is atomic across calls.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::STREAM_BUFFER_CAPACITY;

/// A bounded FIFO of samples with ring-overwrite discipline: once the
/// buffer is full, each new sample silently evicts the oldest one.
#[derive(Debug)]
pub struct StreamingBuffer {
    inner: Mutex<VecDeque<f64>>,
    capacity: usize,
}

impl StreamingBuffer {
    /// Create a buffer with the default capacity
    /// ([`STREAM_BUFFER_CAPACITY`], one second at 44.1 kHz).
    pub fn new() -> Self {
        Self::with_capacity(STREAM_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        StreamingBuffer {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append samples, evicting the oldest entries once over capacity.
    pub fn write(&self, samples: &[f64]) {
        let mut buf = self.inner.lock().unwrap();
        for &s in samples {
            if buf.len() == self.capacity {
                buf.pop_front();
            }
            buf.push_back(s);
        }
    }

    /// Remove and return exactly `frames` samples from the front.
    ///
    /// If fewer than `frames` samples are buffered, returns `frames`
    /// zeros immediately and leaves the buffer untouched — a zero-fill,
    /// never a short partial read, and never a blocking wait.
    pub fn read(&self, frames: usize) -> Vec<f64> {
        let mut buf = self.inner.lock().unwrap();
        if buf.len() < frames {
            return vec![0.0; frames];
        }
        buf.drain(..frames).collect()
    }

    /// Discard all buffered samples.
    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }

    /// Number of samples currently buffered.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StreamingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn write_then_read_fifo_order() {
        let buf = StreamingBuffer::with_capacity(16);
        buf.write(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.read(2), vec![1.0, 2.0]);
        assert_eq!(buf.read(2), vec![3.0, 4.0]);
    }

    #[test]
    fn short_read_returns_silence_and_drains_nothing() {
        let buf = StreamingBuffer::new();
        buf.write(&vec![0.5; 50]);
        let out = buf.read(100);
        assert_eq!(out.len(), 100);
        assert!(out.iter().all(|&s| s == 0.0));
        // The 50 buffered samples survive the failed read
        assert_eq!(buf.len(), 50);
        assert_eq!(buf.read(50), vec![0.5; 50]);
    }

    #[test]
    fn overwrites_oldest_when_full() {
        let buf = StreamingBuffer::with_capacity(4);
        buf.write(&[1.0, 2.0, 3.0, 4.0]);
        buf.write(&[5.0, 6.0]);
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.read(4), vec![3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn clear_discards_everything() {
        let buf = StreamingBuffer::with_capacity(8);
        buf.write(&[1.0; 8]);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.read(1), vec![0.0]);
    }

    #[test]
    fn read_zero_frames_is_empty() {
        let buf = StreamingBuffer::with_capacity(8);
        assert_eq!(buf.read(0), Vec::<f64>::new());
    }

    #[test]
    fn concurrent_writer_and_reader_serialize() {
        let buf = Arc::new(StreamingBuffer::with_capacity(1 << 16));
        let writer = {
            let buf = Arc::clone(&buf);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    buf.write(&[1.0; 64]);
                }
            })
        };
        let reader = {
            let buf = Arc::clone(&buf);
            std::thread::spawn(move || {
                let mut drained = 0usize;
                for _ in 0..200 {
                    let out = buf.read(32);
                    assert_eq!(out.len(), 32);
                    // Either a real read (all ones) or a zero-fill
                    if out[0] == 1.0 {
                        drained += 32;
                        assert!(out.iter().all(|&s| s == 1.0));
                    } else {
                        assert!(out.iter().all(|&s| s == 0.0));
                    }
                }
                drained
            })
        };
        writer.join().unwrap();
        let drained = reader.join().unwrap();
        assert_eq!(drained + buf.len(), 100 * 64);
    }
}
