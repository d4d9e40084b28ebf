//! Undo history.
//!
//! A last-in-first-out stack of buffer snapshots. Each entry is an owned
//! copy, so nothing pushed here can change when the session's current
//! buffer is replaced.

use std::collections::VecDeque;

use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Returned by [`HistoryStack::pop`] when there is nothing to restore.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("History is empty")]
pub struct EmptyHistory;

/// LIFO stack of prior buffers.
///
/// Unbounded unless created with [`HistoryStack::with_limit`], in which case
/// pushing onto a full stack discards the oldest snapshot.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: VecDeque<PixelBuffer>,
    limit: Option<usize>,
}

impl HistoryStack {
    /// Create an unbounded stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack holding at most `limit` snapshots.
    ///
    /// A limit of zero keeps no history at all.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Push a copy of `buffer` as the new top.
    pub fn push(&mut self, buffer: &PixelBuffer) {
        self.push_owned(buffer.clone());
    }

    /// Push an owned snapshot as the new top.
    pub fn push_owned(&mut self, buffer: PixelBuffer) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.entries.len() >= limit {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(buffer);
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Result<PixelBuffer, EmptyHistory> {
        self.entries.pop_back().ok_or(EmptyHistory)
    }

    /// Most recent snapshot, without removing it.
    pub fn peek(&self) -> Option<&PixelBuffer> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
