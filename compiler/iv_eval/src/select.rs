//! Selection indexes for selective assignment.
//!
//! `(L f X)←V` replaces the elements of `X` that `L f X` would select. To
//! find them, `f` runs on `1 2 3 ...` shaped like `X` instead of on `X`
//! itself; whatever comes back names the selected positions. Results are
//! converted to an index array and made zero-based. Fill elements come
//! back as `0` and so become `¯1`, which assignment skips.

use iv_domain::SingleDomain;
use iv_value::{
    conversion_error, index_out_of_bounds, length_error, not_an_array, ArrayValue, EvalError,
    EvalResult, Executor, FunctionValue, IndexArray, Number, StringArray, Value,
};

/// Selection through an operator: `derive` builds the selecting function
/// from the operands, which then runs on `(left, indexes)`.
pub fn selection<D>(
    cx: &mut dyn Executor,
    derive: D,
    left_operand: &Value,
    right_operand: Option<&Value>,
    left: Option<Value>,
    target: &Value,
) -> Result<IndexArray, EvalError>
where
    D: FnOnce(&Value, Option<&Value>) -> Result<FunctionValue, EvalError>,
{
    let derived = derive(left_operand, right_operand)?;
    select_simple(
        cx,
        |cx, left, indexes| cx.call(&derived, left, indexes),
        left,
        target,
    )
}

/// Selection through a plain function of `(left, indexes)`, for
/// primitives such as replicate and expand.
pub fn select_simple<F>(
    cx: &mut dyn Executor,
    select: F,
    left: Option<Value>,
    target: &Value,
) -> Result<IndexArray, EvalError>
where
    F: FnOnce(&mut dyn Executor, Option<Value>, Value) -> EvalResult,
{
    let shape = target.shape().ok_or_else(|| not_an_array(target))?;
    let indexes = IndexArray::iota(shape.to_vec());
    let selected = select(cx, left, Value::IndexArray(indexes))?;
    match SingleDomain::to_index_array(None).to(cx.tower(), &selected) {
        Some(Value::IndexArray(ints)) => Ok(ints.offset(-1)),
        _ => Err(conversion_error(&selected, "index array")),
    }
}

/// Copy of `target` with the positions in `indexes` replaced by `values`.
///
/// A scalar `values` is used for every position; an array must hold one
/// element per index. Negative indexes are skipped along with their value.
pub fn assign_selected(target: &Value, indexes: &IndexArray, values: &Value) -> EvalResult {
    let Some(shape) = target.shape() else {
        return Err(not_an_array(target));
    };
    let shape = shape.to_vec();
    let mut elems = target.elements().unwrap_or_default();

    let replacements = match values.elements() {
        Some(items) if values.is_array() => {
            if items.len() != indexes.size() {
                return Err(length_error(indexes.size(), items.len()));
            }
            items
        }
        _ => vec![values.clone(); indexes.size()],
    };

    let len = elems.len();
    for (&index, value) in indexes.ints().iter().zip(replacements) {
        if index < 0 {
            continue;
        }
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| elems.get_mut(i))
            .ok_or_else(|| index_out_of_bounds(index, len))?;
        *slot = value;
    }
    rebuild(target, shape, elems)
}

/// Array of the same kind as `like` when every element still fits it,
/// otherwise a generic array.
fn rebuild(like: &Value, shape: Vec<usize>, elems: Vec<Value>) -> EvalResult {
    match like {
        Value::EmptyArray if elems.is_empty() => return Ok(Value::EmptyArray),
        Value::StringArray(_) => {
            let strings: Option<Vec<String>> =
                elems.iter().map(|e| e.as_str().map(str::to_string)).collect();
            if let Some(strings) = strings {
                return Ok(Value::StringArray(StringArray::new(shape, strings)?));
            }
        }
        Value::IndexArray(_) => {
            let ints: Option<Vec<i64>> = elems
                .iter()
                .map(|e| match e {
                    Value::Number(Number::Int(i)) => Some(*i),
                    _ => None,
                })
                .collect();
            if let Some(ints) = ints {
                return Ok(Value::IndexArray(IndexArray::new(shape, ints)?));
            }
        }
        _ => {}
    }
    Ok(Value::Array(ArrayValue::new(shape, elems)?))
}
