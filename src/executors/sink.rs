// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 rust-buildpack contributors

//! Shared output sinks

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable writer over one underlying sink
///
/// Pass two clones as the output and error sinks to send both streams
/// to the same place. Each `write` call holds the lock for its duration,
/// so chunks from the two streams interleave but never tear.
#[derive(Debug, Default)]
pub struct SharedSink<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> SharedSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Lock the underlying sink
    pub fn lock(&self) -> MutexGuard<'_, W> {
        // A panic mid-write leaves the sink usable; keep going.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SharedSink<Vec<u8>> {
    /// Copy out everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }
}

impl<W> Clone for SharedSink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> Write for SharedSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_write_to_same_buffer() {
        let sink = SharedSink::new(Vec::new());
        let mut out = sink.clone();
        let mut err = sink.clone();

        out.write_all(b"out ").unwrap();
        err.write_all(b"err").unwrap();

        assert_eq!(sink.contents(), "out err");
    }
}
