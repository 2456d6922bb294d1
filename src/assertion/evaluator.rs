use assert_json_diff::{CompareMode, Config, assert_json_matches_no_panic};
use serde_json::{Number, Value};

use crate::assertion::subject::Subject;
use crate::assertion::types::{AssertionFailure, Predicate, ValueKind, render_value};
use crate::{CheckError, Result};

/// 对当前 subject 求值一个谓词
pub fn evaluate(subject: &Subject, predicate: &Predicate) -> Result<()> {
    let actual = subject.value();
    let kind = ValueKind::of(actual);

    let passed = match predicate {
        Predicate::Equals(expected) => {
            if kind.is_structured() {
                return Err(type_mismatch(subject, predicate, "scalar", kind));
            }
            values_equal(actual, expected)
        }

        Predicate::DeepEquals(expected) => {
            if !values_equal(actual, expected) {
                return Err(failure(subject, predicate, diff(actual, expected)).into());
            }
            true
        }

        Predicate::HasLength(expected) => {
            let length = match actual {
                Value::Array(items) => items.len(),
                Value::String(s) => s.chars().count(),
                _ => return Err(type_mismatch(subject, predicate, "array or string", kind)),
            };
            if length != *expected {
                return Err(AssertionFailure {
                    subject: subject.label().to_string(),
                    predicate: predicate.name().to_string(),
                    expected: expected.to_string(),
                    actual: format!("length {}", length),
                    detail: None,
                }
                .into());
            }
            true
        }

        Predicate::IsType(expected) => kind == *expected,

        Predicate::Includes(expected) => match (actual, expected) {
            (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
            (Value::String(_), _) => {
                let needle = ValueKind::of(expected);
                return Err(type_mismatch(subject, predicate, "string needle", needle));
            }
            (Value::Array(items), _) => items.iter().any(|item| values_equal(item, expected)),
            (Value::Object(map), Value::Object(subset)) => subset
                .iter()
                .all(|(key, value)| map.get(key).is_some_and(|v| values_equal(v, value))),
            (Value::Object(_), _) => {
                let subset = ValueKind::of(expected);
                return Err(type_mismatch(subject, predicate, "object subset", subset));
            }
            _ => {
                let expected = "string, array or object";
                return Err(type_mismatch(subject, predicate, expected, kind));
            }
        },

        Predicate::Satisfies { check, .. } => check(actual),
    };

    if passed {
        Ok(())
    } else {
        Err(failure(subject, predicate, None).into())
    }
}

/// 递归比较两个值
///
/// 对象键集合必须完全一致，数组逐项按顺序比较，数字按数值比较（1 == 1.0）。
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
        }
        _ => left == right,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn diff(actual: &Value, expected: &Value) -> Option<String> {
    assert_json_matches_no_panic(actual, expected, Config::new(CompareMode::Strict)).err()
}

fn failure(subject: &Subject, predicate: &Predicate, detail: Option<String>) -> AssertionFailure {
    AssertionFailure {
        subject: subject.label().to_string(),
        predicate: predicate.name().to_string(),
        expected: predicate.expected(),
        actual: render_value(subject.value()),
        detail,
    }
}

fn type_mismatch(
    subject: &Subject,
    predicate: &Predicate,
    expected: &str,
    actual: ValueKind,
) -> CheckError {
    CheckError::TypeMismatch {
        subject: subject.label().to_string(),
        predicate: predicate.name().to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
