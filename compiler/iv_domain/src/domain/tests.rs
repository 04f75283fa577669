use super::*;
use iv_value::StandardTower;
use pretty_assertions::assert_eq;

const TOWER: StandardTower = StandardTower;

fn string() -> SingleDomain {
    SingleDomain::is_string(None)
}

fn promote() -> SingleDomain {
    SingleDomain::to_string_array(None)
}

fn strings(items: &[&str]) -> Value {
    Value::string_vector(items.iter().map(ToString::to_string).collect())
}

// Both

#[test]
fn both_converts_each_side() {
    let d = Domain::Both(Some(promote()));
    let out = d.to(&TOWER, Some(&Value::string("a")), &strings(&["b", "c"]));
    assert_eq!(out, Some((Some(strings(&["a"])), strings(&["b", "c"]))));
}

#[test]
fn both_without_child_accepts_anything() {
    let d = Domain::Both(None);
    assert_eq!(
        d.to(&TOWER, None, &Value::int(1)),
        Some((None, Value::int(1)))
    );
    assert_eq!(d.to_string(), "any");
}

#[test]
fn both_rejects_monadic_call() {
    let d = Domain::Both(Some(string()));
    assert_eq!(d.to(&TOWER, None, &Value::string("r")), None);
}

// Any

#[test]
fn any_prefers_left() {
    let d = Domain::Any(promote());
    let out = d.to(&TOWER, Some(&Value::string("l")), &Value::string("r"));
    assert_eq!(out, Some((Some(strings(&["l"])), Value::string("r"))));
}

#[test]
fn any_falls_back_to_right() {
    let d = Domain::Any(promote());
    let out = d.to(&TOWER, Some(&Value::int(1)), &Value::string("r"));
    assert_eq!(out, Some((Some(Value::int(1)), strings(&["r"]))));

    let out = d.to(&TOWER, None, &Value::string("r"));
    assert_eq!(out, Some((None, strings(&["r"]))));
}

// Split

#[test]
fn split_tests_sides_independently() {
    let d = Domain::Split(None, Some(promote()));
    let out = d.to(&TOWER, Some(&Value::int(1)), &Value::string("r"));
    assert_eq!(out, Some((Some(Value::int(1)), strings(&["r"]))));
    assert_eq!(d.to_string(), "L any R to string array");

    let d = Domain::Split(Some(string()), None);
    assert_eq!(d.to(&TOWER, None, &Value::int(1)), None);
    assert_eq!(d.to_string(), "L string R any");
}

// Monadic and Dyadic

#[test]
fn monadic_requires_absent_left() {
    let d = Domain::Monadic(Some(string()));
    assert_eq!(
        d.to(&TOWER, None, &Value::string("r")),
        Some((None, Value::string("r")))
    );
    assert_eq!(d.to(&TOWER, Some(&Value::int(1)), &Value::string("r")), None);
    assert_eq!(d.to(&TOWER, None, &Value::int(1)), None);
    assert_eq!(Domain::Monadic(None).to_string(), "R any");
    assert_eq!(d.to_string(), "string");
}

#[test]
fn dyadic_requires_left() {
    let d = Domain::dyadic(Some(Domain::Both(Some(string()))));
    assert_eq!(d.to(&TOWER, None, &Value::string("r")), None);
    assert!(d
        .to(&TOWER, Some(&Value::string("l")), &Value::string("r"))
        .is_some());
    assert!(d.is_dyadic());
    assert_eq!(d.to_string(), "both string");
    assert_eq!(Domain::dyadic(None).to_string(), "L any, R any");
}

#[test]
fn dyadic_without_child_accepts_any_pair() {
    let d = Domain::dyadic(None);
    assert_eq!(
        d.to(&TOWER, Some(&Value::int(1)), &Value::EmptyArray),
        Some((Some(Value::int(1)), Value::EmptyArray))
    );
}

#[allow(
    clippy::unwrap_used,
    clippy::needless_pass_by_value,
    reason = "proptest macros expand to code with these patterns"
)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    fn value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::int),
            any::<bool>().prop_map(Value::Bool),
            "[a-z]{0,6}".prop_map(Value::string),
            proptest::collection::vec("[a-z]{0,3}", 0..4).prop_map(Value::string_vector),
            Just(Value::EmptyArray),
        ]
    }

    fn single() -> impl Strategy<Value = SingleDomain> {
        prop_oneof![
            Just(SingleDomain::is_string(None)),
            Just(SingleDomain::to_string_array(None)),
            Just(SingleDomain::is_number(None)),
            Just(SingleDomain::is_array(None)),
            Just(SingleDomain::not(Some(SingleDomain::is_bool(None)))),
        ]
    }

    proptest! {
        #[test]
        fn both_accepts_iff_each_side_accepts(d in single(), l in value(), r in value()) {
            let expect = match (d.to(&TOWER, &l), d.to(&TOWER, &r)) {
                (Some(l), Some(r)) => Some((Some(l), r)),
                _ => None,
            };
            prop_assert_eq!(Domain::Both(Some(d)).to(&TOWER, Some(&l), &r), expect);
        }

        #[test]
        fn any_tries_left_first(d in single(), l in value(), r in value()) {
            let out = Domain::Any(d.clone()).to(&TOWER, Some(&l), &r);
            match d.to(&TOWER, &l) {
                Some(converted) => prop_assert_eq!(out, Some((Some(converted), r.clone()))),
                None => prop_assert_eq!(
                    out,
                    d.to(&TOWER, &r).map(|converted| (Some(l.clone()), converted))
                ),
            }
        }

        #[test]
        fn missing_children_reject_everything(v in value()) {
            prop_assert_eq!(SingleDomain::not(None).to(&TOWER, &v), None);
            prop_assert_eq!(SingleDomain::or(None, Some(string())).to(&TOWER, &v), None);
            prop_assert_eq!(SingleDomain::or(Some(string()), None).to(&TOWER, &v), None);
        }

        #[test]
        fn arity_guards(d in single(), l in value(), r in value()) {
            prop_assert_eq!(Domain::Monadic(Some(d.clone())).to(&TOWER, Some(&l), &r), None);
            prop_assert_eq!(Domain::Monadic(None).to(&TOWER, Some(&l), &r), None);
            prop_assert_eq!(Domain::dyadic(None).to(&TOWER, None, &r), None);
            prop_assert_eq!(
                Domain::dyadic(Some(Domain::Split(Some(d), None))).to(&TOWER, None, &r),
                None
            );
        }

        #[test]
        fn string_round_trips_through_string_array(s in "\\PC{0,12}") {
            let converted = promote().to(&TOWER, &Value::string(s.clone())).unwrap();
            let Value::StringArray(arr) = converted else {
                panic!("expected string array");
            };
            prop_assert_eq!(arr.shape(), &[1][..]);
            prop_assert_eq!(arr.strings(), &[s][..]);
        }
    }
}
