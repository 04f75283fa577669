#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use iv_value::EvalErrorKind;

fn frame(at: u32) -> CallFrame {
    CallFrame {
        body: GuardRange::new(at, 1),
    }
}

#[test]
fn push_and_pop_track_depth() {
    let mut stack = CallStack::new(4);
    stack.push(frame(0)).unwrap();
    stack.push(frame(1)).unwrap();
    assert_eq!(stack.depth(), 2);
    assert_eq!(stack.current(), Some(&frame(1)));
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn push_past_limit_fails_without_pushing() {
    let mut stack = CallStack::new(2);
    stack.push(frame(0)).unwrap();
    stack.push(frame(1)).unwrap();
    let err = stack.push(frame(2)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn default_limit() {
    assert_eq!(CallStack::default().max_depth(), DEFAULT_MAX_DEPTH);
}
