use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use chrono::Local;
use tracing::{info, warn};

use crate::http::Client;
use crate::runner::context::CaseContext;
use crate::runner::types::{CaseResult, CaseState, SuiteReport};
use crate::Result;

/// 用例主体返回的 future，借用当前用例的上下文
pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

type CaseFn = Box<dyn for<'a> Fn(&'a mut CaseContext) -> CaseFuture<'a>>;

/// 一个具名用例
pub struct TestCase {
    name: String,
    body: CaseFn,
}

impl TestCase {
    /// ```ignore
    /// TestCase::new("returns posts", |ctx| Box::pin(async move {
    ///     let posts = ctx.request_as(Request::get("/posts")?, "posts").await?;
    ///     posts.its("status")?.equals(200)?;
    ///     Ok(())
    /// }))
    /// ```
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: for<'a> Fn(&'a mut CaseContext) -> CaseFuture<'a> + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 运行选项
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 只运行名称包含该子串的用例，其余记为跳过
    pub filter: Option<String>,
}

impl RunOptions {
    fn selects(&self, name: &str) -> bool {
        self.filter
            .as_deref()
            .is_none_or(|filter| name.to_lowercase().contains(&filter.to_lowercase()))
    }
}

/// 顺序执行的用例集合
pub struct Suite {
    name: String,
    before_each: Vec<CaseFn>,
    cases: Vec<TestCase>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            before_each: Vec::new(),
            cases: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 注册在每个用例主体之前运行的步骤，共享该用例的上下文
    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(&'a mut CaseContext) -> CaseFuture<'a> + 'static,
    {
        self.before_each.push(Box::new(hook));
        self
    }

    pub fn case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    pub fn cases(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// 按声明顺序逐个执行用例
    ///
    /// 每个用例使用全新的上下文；用例内第一个错误即终止该用例，
    /// 不影响后续用例。
    pub async fn run(&self, client: &Client, options: &RunOptions) -> SuiteReport {
        let started_at = Local::now();
        let mut results = Vec::with_capacity(self.cases.len());

        info!(suite = %self.name, cases = self.cases.len(), "running suite");

        for (index, case) in self.cases.iter().enumerate() {
            let number = index + 1;
            if !options.selects(&case.name) {
                results.push(CaseResult::skipped(number, case.name.clone()));
                continue;
            }
            results.push(self.run_case(number, case, client).await);
        }

        SuiteReport::new(self.name.clone(), started_at, results)
    }

    async fn run_case(&self, number: usize, case: &TestCase, client: &Client) -> CaseResult {
        let mut context = CaseContext::new(client.clone());
        let start = Instant::now();

        let outcome = self.run_steps(case, &mut context).await;
        let duration = start.elapsed();

        let (state, failed_during, error) = match outcome {
            Ok(()) => {
                info!(case = %case.name, elapsed_ms = duration.as_millis() as u64, "passed");
                (CaseState::Done, None, None)
            }
            Err(e) => {
                let phase = if e.is_request_failure() {
                    CaseState::Requesting
                } else {
                    CaseState::Asserting
                };
                warn!(case = %case.name, during = %phase, error = %e, "failed");
                (CaseState::Failed, Some(phase), Some(e.to_string()))
            }
        };

        CaseResult {
            number,
            name: case.name.clone(),
            state,
            failed_during,
            error,
            duration,
            requests: context.requests(),
            diagnostics: context.take_diagnostics(),
        }
    }

    async fn run_steps(&self, case: &TestCase, context: &mut CaseContext) -> Result<()> {
        for hook in &self.before_each {
            hook(&mut *context).await?;
        }
        (case.body)(&mut *context).await
    }
}
