use serde_json::Value;

use crate::assertion::evaluator::evaluate;
use crate::assertion::types::{Predicate, ValueKind};
use crate::http::Response;
use crate::{CheckError, Result};

/// 断言链上的当前值
///
/// 不可变：每次投影都产生新的 `Subject`，label 记录从根到当前值的路径，
/// 用于失败信息，例如 `@posts.body[3].userId`。
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    label: String,
    value: Value,
}

impl Subject {
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    pub fn from_response(label: impl Into<String>, response: &Response) -> Self {
        Self::new(label, response.to_value())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::of(&self.value)
    }

    /// 投影到对象字段
    pub fn its(&self, field: &str) -> Result<Subject> {
        match &self.value {
            Value::Object(map) => map
                .get(field)
                .map(|v| Subject::new(format!("{}.{}", self.label, field), v.clone()))
                .ok_or_else(|| self.projection_error(field, "no such field")),
            other => Err(self.projection_error(
                field,
                &format!("cannot read a field of {}", ValueKind::of(other)),
            )),
        }
    }

    /// 投影到数组下标
    pub fn at(&self, index: usize) -> Result<Subject> {
        let segment = format!("[{}]", index);
        match &self.value {
            Value::Array(items) => items
                .get(index)
                .map(|v| Subject::new(format!("{}{}", self.label, segment), v.clone()))
                .ok_or_else(|| {
                    self.projection_error(
                        &segment,
                        &format!("index out of bounds (length {})", items.len()),
                    )
                }),
            other => Err(self.projection_error(
                &segment,
                &format!("cannot index into {}", ValueKind::of(other)),
            )),
        }
    }

    /// 点号分隔的多段投影：数组上的数字段按下标处理
    ///
    /// `subject.path("body.0.title")` 等价于 `its("body")?.at(0)?.its("title")`
    pub fn path(&self, path: &str) -> Result<Subject> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(self.clone(), |current, segment| {
                match (&current.value, segment.parse::<usize>()) {
                    (Value::Array(_), Ok(index)) => current.at(index),
                    _ => current.its(segment),
                }
            })
    }

    /// 对当前值求值一个谓词，成功时返回自身以便继续链式调用
    pub fn should(&self, predicate: Predicate) -> Result<&Self> {
        evaluate(self, &predicate)?;
        Ok(self)
    }

    pub fn equals(&self, expected: impl Into<Value>) -> Result<&Self> {
        self.should(Predicate::equals(expected))
    }

    pub fn deep_equals(&self, expected: impl Into<Value>) -> Result<&Self> {
        self.should(Predicate::deep_equals(expected))
    }

    pub fn has_length(&self, expected: usize) -> Result<&Self> {
        self.should(Predicate::has_length(expected))
    }

    pub fn is_a(&self, kind: ValueKind) -> Result<&Self> {
        self.should(Predicate::is_a(kind))
    }

    pub fn includes(&self, expected: impl Into<Value>) -> Result<&Self> {
        self.should(Predicate::includes(expected))
    }

    /// 当前值作为序列展开成元素 subject
    pub fn elements(&self) -> Result<Vec<Subject>> {
        match &self.value {
            Value::Array(items) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, v)| Subject::new(format!("{}[{}]", self.label, i), v.clone()))
                .collect()),
            other => Err(CheckError::TypeMismatch {
                subject: self.label.clone(),
                predicate: "each".to_string(),
                expected: "array".to_string(),
                actual: ValueKind::of(other).to_string(),
            }),
        }
    }

    /// 按顺序对每个元素执行检查，遇到第一个失败立即返回
    ///
    /// 空序列直接通过。
    pub fn each<F>(&self, mut check: F) -> Result<&Self>
    where
        F: FnMut(&Subject) -> Result<()>,
    {
        for element in self.elements()? {
            check(&element)?;
        }
        Ok(self)
    }

    fn projection_error(&self, segment: &str, reason: &str) -> CheckError {
        CheckError::Projection {
            subject: self.label.clone(),
            segment: segment.to_string(),
            reason: reason.to_string(),
        }
    }
}
