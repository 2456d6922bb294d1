use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// 单个用例的生命周期
///
/// `Idle -> Requesting -> (Asserting | Failed) -> Done`，`Asserting` 也可转入 `Failed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    Idle,
    Requesting,
    Asserting,
    Failed,
    Done,
    /// 被过滤条件排除，未执行
    Skipped,
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseState::Idle => "idle",
            CaseState::Requesting => "requesting",
            CaseState::Asserting => "asserting",
            CaseState::Failed => "failed",
            CaseState::Done => "done",
            CaseState::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// 单个用例的执行结果
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// 用例序号（从 1 开始）
    pub number: usize,

    pub name: String,

    /// 终态：Done / Failed / Skipped
    pub state: CaseState,

    /// 失败时所处阶段（Requesting 或 Asserting）
    pub failed_during: Option<CaseState>,

    /// 错误消息（如果失败）
    pub error: Option<String>,

    pub duration: Duration,

    /// 发出的请求数
    pub requests: usize,

    /// 诊断日志
    pub diagnostics: Vec<String>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.state == CaseState::Done
    }

    pub fn failed(&self) -> bool {
        self.state == CaseState::Failed
    }

    pub fn skipped(number: usize, name: String) -> Self {
        Self {
            number,
            name,
            state: CaseState::Skipped,
            failed_during: None,
            error: None,
            duration: Duration::ZERO,
            requests: 0,
            diagnostics: Vec::new(),
        }
    }
}

/// 测试摘要
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub requests: usize,
    pub total_duration: Duration,
}

impl SuiteSummary {
    pub fn from_results(results: &[CaseResult]) -> Self {
        Self {
            total: results.len(),
            passed: results.iter().filter(|r| r.passed()).count(),
            failed: results.iter().filter(|r| r.failed()).count(),
            skipped: results
                .iter()
                .filter(|r| r.state == CaseState::Skipped)
                .count(),
            requests: results.iter().map(|r| r.requests).sum(),
            total_duration: results.iter().map(|r| r.duration).sum(),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// 一次套件运行的完整报告
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub suite: String,
    pub started_at: DateTime<Local>,
    pub results: Vec<CaseResult>,
    pub summary: SuiteSummary,
}

impl SuiteReport {
    pub fn new(suite: String, started_at: DateTime<Local>, results: Vec<CaseResult>) -> Self {
        let summary = SuiteSummary::from_results(&results);
        Self {
            suite,
            started_at,
            results,
            summary,
        }
    }

    pub fn result(&self, name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == name)
    }
}
