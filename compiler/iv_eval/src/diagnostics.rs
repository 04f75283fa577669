//! Call depth tracking.
//!
//! Every closure call pushes a frame; the push fails once the configured
//! limit is reached, which turns runaway recursion into a
//! `StackOverflow` error instead of exhausting memory.

use iv_ir::GuardRange;
use iv_value::{recursion_limit_exceeded, EvalError};

/// Depth limit used when the builder does not set one.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// One active closure call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// Body of the closure being run.
    pub body: GuardRange,
}

#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing without pushing when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(recursion_limit_exceeded(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Innermost frame, if any call is active.
    pub fn current(&self) -> Option<&CallFrame> {
        self.frames.last()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests;
