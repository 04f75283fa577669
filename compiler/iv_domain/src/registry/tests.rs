#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::SingleDomain;
use iv_value::{EvalErrorKind, StandardTower};
use pretty_assertions::assert_eq;

const TOWER: StandardTower = StandardTower;

/// Executor that cannot call anything; enough for bodies that don't
/// call back.
struct NoCalls;

impl Executor for NoCalls {
    fn tower(&self) -> &dyn NumericTower {
        &TOWER
    }

    fn call(&mut self, _func: &FunctionValue, _left: Option<Value>, _right: Value) -> EvalResult {
        Err(EvalError::new("no calls in this test"))
    }
}

fn tag(label: &'static str) -> impl Fn(&mut dyn Executor, Option<Value>, Value) -> EvalResult {
    move |_, _, _| Ok(Value::string(label))
}

fn registry() -> Registry {
    Registry::new(SharedInterner::new())
}

fn run(reg: &Registry, symbol: &str, left: Option<&Value>, right: &Value) -> EvalResult {
    let name = reg.interner().intern(symbol);
    reg.resolve_primitive(&TOWER, name, left, right)?
        .call(&mut NoCalls)
}

#[test]
fn first_accepting_handler_wins() {
    let mut reg = registry();
    reg.register_primitive("⍴", Domain::Monadic(Some(SingleDomain::is_number(None))), tag("number"));
    reg.register_primitive("⍴", Domain::Monadic(None), tag("any"));
    reg.register_primitive("⍴", Domain::Monadic(Some(SingleDomain::is_string(None))), tag("string"));

    assert_eq!(run(&reg, "⍴", None, &Value::int(1)).unwrap(), Value::string("number"));
    assert_eq!(run(&reg, "⍴", None, &Value::string("s")).unwrap(), Value::string("any"));
}

#[test]
fn body_receives_converted_arguments() {
    let mut reg = registry();
    reg.register_primitive(
        ",",
        Domain::Both(Some(SingleDomain::to_string_array(None))),
        |_: &mut dyn Executor, left: Option<Value>, right: Value| {
            let mut out: Vec<String> = Vec::new();
            for v in left.iter().chain(std::iter::once(&right)) {
                let Value::StringArray(a) = v else {
                    return Err(EvalError::new("expected string arrays"));
                };
                out.extend(a.strings().iter().cloned());
            }
            Ok(Value::string_vector(out))
        },
    );
    let out = run(&reg, ",", Some(&Value::string("a")), &Value::string("b")).unwrap();
    assert_eq!(
        out,
        Value::string_vector(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn body_errors_are_not_retried() {
    let mut reg = registry();
    reg.register_primitive("÷", Domain::Both(None), |_: &mut dyn Executor, _, _| {
        Err(EvalError::new("division by zero"))
    });
    reg.register_primitive("÷", Domain::Both(None), tag("second"));
    let err = run(&reg, "÷", Some(&Value::int(1)), &Value::int(0)).unwrap_err();
    assert_eq!(err.message, "division by zero");
}

#[test]
fn exhausted_handlers_report_tried_domains() {
    let mut reg = registry();
    reg.register_primitive("⍴", Domain::Monadic(Some(SingleDomain::is_string(None))), tag("s"));
    reg.register_primitive(
        "⍴",
        Domain::dyadic(Some(Domain::Split(None, Some(SingleDomain::is_array(None))))),
        tag("a"),
    );
    let err = run(&reg, "⍴", None, &Value::int(3)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NoMatchingDomain {
            symbol: "⍴".to_string(),
            left: None,
            right: "int".to_string(),
            tried: vec!["string".to_string(), "L any R array".to_string()],
        }
    );
}

#[test]
fn unknown_symbol() {
    let reg = registry();
    let err = run(&reg, "⌹", None, &Value::int(3)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownPrimitive {
            symbol: "⌹".to_string()
        }
    );
}

// Operators

fn register_reduce(reg: &mut Registry) -> Name {
    reg.register_operator(
        "/",
        OperatorArity::Monadic,
        Domain::Monadic(Some(SingleDomain::is_function(None))),
        |cx: &mut dyn Executor, lo: &Value, _ro: Option<&Value>, _left: Option<Value>, right: Value| {
            let Value::Function(f) = lo else {
                return Err(EvalError::new("operand is not a function"));
            };
            let elems = right.elements().unwrap_or_default();
            let mut items = elems.into_iter().rev();
            let Some(mut acc) = items.next() else {
                return Ok(Value::EmptyArray);
            };
            for item in items {
                acc = cx.call(f, Some(item), acc)?;
            }
            Ok(acc)
        },
    )
}

#[test]
fn derive_monadic_operator() {
    let mut reg = registry();
    let reduce = register_reduce(&mut reg);
    let plus = reg.interner().intern("+");
    let derived = reg
        .derive(&TOWER, reduce, &Value::primitive(plus), None)
        .unwrap();
    let FunctionValue::Derived(d) = derived else {
        panic!("expected derived function");
    };
    assert_eq!(d.operator, reduce);
    assert_eq!(d.left_operand, Value::primitive(plus));
    assert_eq!(d.right_operand, None);
    assert!(reg.is_operator(reduce));
    assert!(!reg.is_primitive(reduce));
}

#[test]
fn derive_rejects_wrong_operand_kind_and_arity() {
    let mut reg = registry();
    let reduce = register_reduce(&mut reg);
    let err = reg.derive(&TOWER, reduce, &Value::int(1), None).unwrap_err();
    assert_eq!(
        err.message,
        "domain error: / does not accept R int (tried: function)"
    );

    let plus = Value::primitive(reg.interner().intern("+"));
    assert!(reg.derive(&TOWER, reduce, &plus, Some(&plus)).is_err());
}

#[test]
fn derive_dyadic_operator_tests_both_operands() {
    let mut reg = registry();
    let jot = reg.register_operator(
        "∘",
        OperatorArity::Dyadic,
        Domain::Both(Some(SingleDomain::is_function(None))),
        |_: &mut dyn Executor, _: &Value, _: Option<&Value>, _: Option<Value>, right: Value| Ok(right),
    );
    let f = Value::primitive(reg.interner().intern("-"));
    let derived = reg.derive(&TOWER, jot, &f, Some(&f)).unwrap();
    let FunctionValue::Derived(d) = derived else {
        panic!("expected derived function");
    };
    assert_eq!(d.right_operand, Some(f.clone()));
    assert!(reg.derive(&TOWER, jot, &f, Some(&Value::int(1))).is_err());
    assert!(reg.derive(&TOWER, jot, &f, None).is_err());
}

#[test]
fn describe_lists_domains_in_order() {
    let mut reg = registry();
    reg.register_primitive("=", Domain::Both(Some(SingleDomain::is_number(None))), tag("n"));
    reg.register_primitive("=", Domain::Any(SingleDomain::to_string_array(None)), tag("s"));
    assert_eq!(
        reg.describe("="),
        vec!["both number".to_string(), "any to string array".to_string()]
    );
    assert!(reg.describe("?").is_empty());
}

#[test]
fn describe_leaves_interner_untouched() {
    let reg = registry();
    let before = reg.interner().len();
    assert!(reg.describe("⌹").is_empty());
    assert_eq!(reg.interner().len(), before);
    assert_eq!(reg.interner().get("⌹"), None);
}

#[test]
fn symbols_are_sorted_and_unique() {
    let mut reg = registry();
    reg.register_primitive("⍴", Domain::Both(None), tag("a"));
    reg.register_primitive("+", Domain::Both(None), tag("b"));
    reg.register_primitive("⍴", Domain::Both(None), tag("c"));
    register_reduce(&mut reg);
    assert_eq!(reg.symbols(), vec!["+", "/", "⍴"]);
}

#[allow(
    clippy::needless_pass_by_value,
    reason = "proptest macros expand to code with these patterns"
)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn leaf() -> impl Strategy<Value = SingleDomain> {
        prop_oneof![
            Just(SingleDomain::is_string(None)),
            Just(SingleDomain::is_number(None)),
            Just(SingleDomain::is_bool(None)),
            Just(SingleDomain::is_array(None)),
        ]
    }

    fn value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::int),
            any::<bool>().prop_map(Value::Bool),
            "[a-z]{1,4}".prop_map(Value::string),
            Just(Value::EmptyArray),
        ]
    }

    proptest! {
        #[test]
        fn resolve_picks_first_accepting_entry(
            domains in proptest::collection::vec(leaf(), 1..6),
            v in value(),
        ) {
            let mut reg = registry();
            for (i, d) in domains.iter().enumerate() {
                let label = i64::try_from(i).unwrap_or(i64::MAX);
                reg.register_primitive(
                    "f",
                    Domain::Monadic(Some(d.clone())),
                    move |_: &mut dyn Executor, _, _| Ok(Value::int(label)),
                );
            }
            let expected = domains
                .iter()
                .position(|d| d.to(&TOWER, &v).is_some())
                .map(|i| Value::int(i64::try_from(i).unwrap_or(i64::MAX)));
            prop_assert_eq!(run(&reg, "f", None, &v).ok(), expected);
        }
    }
}
