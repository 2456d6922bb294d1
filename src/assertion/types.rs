use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::CheckError;

/// 与语言无关的值类型判别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Null => "null",
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(ValueKind::String),
            "number" => Ok(ValueKind::Number),
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "object" => Ok(ValueKind::Object),
            "array" => Ok(ValueKind::Array),
            "null" => Ok(ValueKind::Null),
            _ => Err(CheckError::ParseError(format!("Invalid value kind: {}", s))),
        }
    }
}

type CheckFn = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// 断言谓词
pub enum Predicate {
    /// 标量严格相等（数字按数值比较）
    Equals(Value),
    /// 结构递归相等：键集合必须一致，数组顺序敏感
    DeepEquals(Value),
    /// 数组元素个数或字符串字符数
    HasLength(usize),
    IsType(ValueKind),
    /// 子串 / 数组元素 / 对象子集
    Includes(Value),
    Satisfies { name: String, check: CheckFn },
}

impl Predicate {
    pub fn equals(expected: impl Into<Value>) -> Self {
        Predicate::Equals(expected.into())
    }

    pub fn deep_equals(expected: impl Into<Value>) -> Self {
        Predicate::DeepEquals(expected.into())
    }

    pub fn has_length(expected: usize) -> Self {
        Predicate::HasLength(expected)
    }

    pub fn is_a(kind: ValueKind) -> Self {
        Predicate::IsType(kind)
    }

    pub fn includes(expected: impl Into<Value>) -> Self {
        Predicate::Includes(expected.into())
    }

    pub fn satisfies<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Predicate::Satisfies {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Predicate::Equals(_) => "equal",
            Predicate::DeepEquals(_) => "deep equal",
            Predicate::HasLength(_) => "have length",
            Predicate::IsType(_) => "be a",
            Predicate::Includes(_) => "include",
            Predicate::Satisfies { name, .. } => name,
        }
    }

    /// 期望值的可读表示
    pub fn expected(&self) -> String {
        match self {
            Predicate::Equals(v) | Predicate::DeepEquals(v) | Predicate::Includes(v) => {
                render_value(v)
            }
            Predicate::HasLength(n) => n.to_string(),
            Predicate::IsType(kind) => kind.to_string(),
            Predicate::Satisfies { .. } => String::new(),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Satisfies { name, .. } => f
                .debug_struct("Satisfies")
                .field("name", name)
                .finish_non_exhaustive(),
            other => write!(f, "{} {}", other.name(), other.expected()),
        }
    }
}

/// 断言失败：期望与实际不符
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFailure {
    pub subject: String,
    pub predicate: String,
    pub expected: String,
    pub actual: String,
    /// 结构化差异（deep equal 时提供）
    pub detail: Option<String>,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} to {}", self.subject, self.predicate)?;
        if !self.expected.is_empty() {
            write!(f, " {}", self.expected)?;
        }
        write!(f, ", but got {}", self.actual)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n{}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionFailure {}

const MAX_RENDERED_LEN: usize = 120;

/// 将值渲染为紧凑 JSON，过长时截断
pub fn render_value(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= MAX_RENDERED_LEN {
        return rendered;
    }
    let truncated: String = rendered.chars().take(MAX_RENDERED_LEN).collect();
    format!("{}...", truncated)
}
