//! Rewindable line cursor.
//!
//! Supplies one line at a time and supports a single live mark. Lines read
//! after the mark are retained so that [`LineCursor::rewind`] can push them
//! back. The retained bytes are capped; once the cap is crossed the mark is
//! invalidated and a later rewind fails instead of replaying partial input.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::{PchrError, Result};

/// Default ceiling for bytes retained after a mark (8 KiB)
pub const DEFAULT_REWIND_LIMIT: usize = 8 * 1024;

#[derive(Debug, Default)]
struct MarkBuffer {
    lines: Vec<String>,
    bytes: usize,
    overflowed: bool,
}

pub struct LineCursor<R> {
    reader: R,
    pending: VecDeque<String>,
    mark: Option<MarkBuffer>,
    rewind_limit: usize,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self::with_rewind_limit(reader, DEFAULT_REWIND_LIMIT)
    }

    pub fn with_rewind_limit(reader: R, rewind_limit: usize) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            mark: None,
            rewind_limit,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Advance and return the next line without its terminator, or `None` at end of input
    pub fn next(&mut self) -> Result<Option<String>> {
        let line = match self.pending.pop_front() {
            Some(line) => line,
            None => match self.read_physical()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };
        self.line_number += 1;

        if let Some(mark) = self.mark.as_mut() {
            mark.bytes += line.len();
            if mark.bytes > self.rewind_limit {
                mark.overflowed = true;
                mark.lines.clear();
            } else if !mark.overflowed {
                mark.lines.push(line.clone());
            }
        }

        Ok(Some(line))
    }

    /// Record the current position, replacing any previous mark
    pub fn mark(&mut self) {
        self.mark = Some(MarkBuffer::default());
    }

    /// Return to the last mark. The mark stays live afterwards.
    pub fn rewind(&mut self) -> Result<()> {
        let mark = self.mark.as_mut().ok_or(PchrError::RewindWithoutMark)?;
        if mark.overflowed {
            return Err(PchrError::RewindLimitExceeded {
                limit: self.rewind_limit,
                buffered: mark.bytes,
            });
        }

        self.line_number -= mark.lines.len();
        for line in mark.lines.drain(..).rev() {
            self.pending.push_front(line);
        }
        mark.bytes = 0;
        Ok(())
    }

    /// 1-based number of the line most recently returned by [`next`](Self::next)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_physical(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
