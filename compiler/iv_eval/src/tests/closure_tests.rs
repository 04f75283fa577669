//! Closure calls: argument binding and scope chaining.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::harness::Program;
use iv_value::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

#[test]
fn arguments_bind_and_free_names_fall_through() {
    // Y←3 ⋄ 5 {⍺ ⍵ Y} 10
    let mut p = Program::new();
    let three = p.int(3);
    let set_y = p.assign("Y", three);
    let alpha = p.ident("⍺");
    let omega = p.ident("⍵");
    let y = p.ident("Y");
    let strand = p.vector(&[alpha, omega, y]);
    let f = p.lambda(&[(None, strand)]);
    let five = p.int(5);
    let ten = p.int(10);
    let call = p.call(Some(five), f, ten);

    assert_eq!(
        p.run(&[set_y, call]).unwrap(),
        Value::vector(vec![Value::int(5), Value::int(10), Value::int(3)])
    );
}

#[test]
fn parent_is_the_callers_scope() {
    // F←{Z} ⋄ {Z←7 ⋄ F 0} 0
    let mut p = Program::new();
    let z = p.ident("Z");
    let body = p.lambda(&[(None, z)]);
    let set_f = p.assign("F", body);
    let seven = p.int(7);
    let set_z = p.assign("Z", seven);
    let f = p.ident("F");
    let zero = p.int(0);
    let inner = p.call(None, f, zero);
    let outer = p.lambda(&[(None, set_z), (None, inner)]);
    let call = p.call(None, outer, zero);

    assert_eq!(p.run(&[set_f, call]).unwrap(), Value::int(7));
}

#[test]
fn monadic_alpha_does_not_see_outer_alpha() {
    // 1 {{⍺} ⍵} 2
    let mut p = Program::new();
    let alpha = p.ident("⍺");
    let inner = p.lambda(&[(None, alpha)]);
    let omega = p.ident("⍵");
    let inner_call = p.call(None, inner, omega);
    let outer = p.lambda(&[(None, inner_call)]);
    let one = p.int(1);
    let two = p.int(2);
    let call = p.call(Some(one), outer, two);

    let err = p.run(&[call]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: "⍺".into() });
}

#[test]
fn local_assignments_do_not_leak() {
    // {X←1 ⋄ X} 0 ⋄ X
    let mut p = Program::new();
    let one = p.int(1);
    let set_x = p.assign("X", one);
    let x = p.ident("X");
    let f = p.lambda(&[(None, set_x), (None, x)]);
    let zero = p.int(0);
    let call = p.call(None, f, zero);

    let mut interp = p.interpreter();
    assert_eq!(interp.eval(call).unwrap(), Value::int(1));
    let err = interp.eval(x).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedVariable { name: "X".into() });
}

#[test]
fn runaway_recursion_is_a_stack_overflow() {
    // F←{F ⍵} ⋄ F 1
    let mut p = Program::new();
    let f = p.ident("F");
    let omega = p.ident("⍵");
    let recurse = p.call(None, f, omega);
    let body = p.lambda(&[(None, recurse)]);
    let set_f = p.assign("F", body);
    let one = p.int(1);
    let call = p.call(None, f, one);

    let mut interp = crate::Interpreter::builder(p.arena.clone(), p.registry())
        .max_depth(8)
        .build();
    interp.eval(set_f).unwrap();
    let err = interp.eval(call).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 8 });
    assert_eq!(interp.call_depth(), 0);
}

#[test]
fn closure_values_render_as_source() {
    let mut p = Program::new();
    let omega = p.ident("⍵");
    let neg = p.monadic("-", omega);
    let f = p.lambda(&[(None, neg)]);

    let mut interp = p.interpreter();
    let value = interp.eval(f).unwrap();
    assert_eq!(interp.render(&value), "{- ⍵}");
}
