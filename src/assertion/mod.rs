/// 断言模块 - subject 投影、谓词求值与逐元素检查
mod evaluator;
mod subject;
mod types;

pub use evaluator::{evaluate, values_equal};
pub use subject::Subject;
pub use types::{AssertionFailure, Predicate, ValueKind, render_value};
