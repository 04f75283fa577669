//! Primitive dispatch and operator derivation through the evaluator.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::harness::Program;
use iv_value::{EvalErrorKind, Executor, FunctionValue, Value};
use pretty_assertions::assert_eq;

fn ints(ns: &[i64]) -> Value {
    Value::vector(ns.iter().map(|&n| Value::int(n)).collect())
}

#[test]
fn valence_selects_the_handler() {
    let mut p = Program::new();
    let five = p.int(5);
    let negate = p.monadic("-", five);
    let seven = p.int(7);
    let two = p.int(2);
    let subtract = p.dyadic(seven, "-", two);

    assert_eq!(p.run(&[negate]).unwrap(), Value::int(-5));
    assert_eq!(p.run(&[subtract]).unwrap(), Value::int(5));
}

#[test]
fn later_handler_catches_what_earlier_ones_reject() {
    // Monadic + falls through the number pair handler to identity.
    let mut p = Program::new();
    let text = p.string("abc");
    let conjugate = p.monadic("+", text);

    assert_eq!(p.run(&[conjugate]).unwrap(), Value::string("abc"));
}

#[test]
fn rejected_arguments_list_the_tried_domains() {
    let mut p = Program::new();
    let text = p.string("a");
    let one = p.int(1);
    let sum = p.dyadic(text, "+", one);

    let err = p.run(&[sum]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NoMatchingDomain {
            symbol: "+".into(),
            left: Some("string".into()),
            right: "int".into(),
            tried: vec!["both number".into(), "R any".into()],
        }
    );
}

#[test]
fn unknown_primitive_is_reported() {
    let mut p = Program::new();
    let one = p.int(1);
    let call = p.monadic("?", one);

    let err = p.run(&[call]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UnknownPrimitive { symbol: "?".into() });
}

#[test]
fn calling_a_non_function_fails() {
    let mut p = Program::new();
    let three = p.int(3);
    let one = p.int(1);
    let call = p.call(None, three, one);

    let err = p.run(&[call]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::NotCallable { kind: "int".into() });
}

#[test]
fn right_argument_is_evaluated_first() {
    // (X←1) + (X←2) leaves X at 1.
    let mut p = Program::new();
    let one = p.int(1);
    let left = p.assign("X", one);
    let two = p.int(2);
    let right = p.assign("X", two);
    let sum = p.dyadic(left, "+", right);
    let x = p.ident("X");

    let mut interp = p.interpreter();
    assert_eq!(interp.eval(sum).unwrap(), Value::int(3));
    assert_eq!(interp.eval(x).unwrap(), Value::int(1));
}

#[test]
fn operator_over_primitive() {
    // +/ 1 2 3
    let mut p = Program::new();
    let plus = p.prim("+");
    let reduce = p.derived("/", plus, None);
    let arg = p.ints(&[1, 2, 3]);
    let call = p.call(None, reduce, arg);

    assert_eq!(p.run(&[call]).unwrap(), Value::int(6));
}

#[test]
fn operator_calls_closure_in_the_callers_scope() {
    // {K←10 ⋄ {⍵+K}¨ ⍵} 1 2
    let mut p = Program::new();
    let ten = p.int(10);
    let set_k = p.assign("K", ten);
    let omega = p.ident("⍵");
    let k = p.ident("K");
    let add_k = p.dyadic(omega, "+", k);
    let inner = p.lambda(&[(None, add_k)]);
    let each = p.derived("¨", inner, None);
    let mapped = p.call(None, each, omega);
    let outer = p.lambda(&[(None, set_k), (None, mapped)]);
    let arg = p.ints(&[1, 2]);
    let call = p.call(None, outer, arg);

    assert_eq!(p.run(&[call]).unwrap(), ints(&[11, 12]));
}

#[test]
fn operand_outside_the_operator_domain_is_rejected() {
    // 1¨ 2
    let mut p = Program::new();
    let one = p.int(1);
    let each = p.derived("¨", one, None);
    let two = p.int(2);
    let call = p.call(None, each, two);

    let err = p.run(&[call]).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::NoMatchingDomain { ref symbol, .. } if symbol == "¨"
    ));
}

#[test]
fn unknown_operator_is_reported() {
    let mut p = Program::new();
    let plus = p.prim("+");
    let derived = p.derived("⍣", plus, None);

    let err = p.run(&[derived]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UnknownOperator { symbol: "⍣".into() });
}

#[test]
fn derived_functions_render_with_operands() {
    let mut p = Program::new();
    let plus = p.prim("+");
    let reduce = p.derived("/", plus, None);

    let mut interp = p.interpreter();
    let value = interp.eval(reduce).unwrap();
    assert_eq!(interp.render(&value), "+/");
}

#[test]
fn interpreter_is_an_executor() {
    let p = Program::new();
    let minus = p.interner.intern("-");

    let mut interp = p.interpreter();
    let out = interp
        .call(&FunctionValue::Primitive(minus), None, Value::int(3))
        .unwrap();
    assert_eq!(out, Value::int(-3));
}
