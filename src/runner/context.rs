use tracing::{debug, info};

use crate::alias::AliasStore;
use crate::assertion::Subject;
use crate::http::{Client, Request, Response};
use crate::runner::types::CaseState;
use crate::Result;

/// 单个用例的执行上下文
///
/// 每个用例开始时新建，结束时丢弃；别名不会跨用例泄漏。
pub struct CaseContext {
    client: Client,
    aliases: AliasStore,
    state: CaseState,
    requests: usize,
    diagnostics: Vec<String>,
}

impl CaseContext {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            aliases: AliasStore::new(),
            state: CaseState::Idle,
            requests: 0,
            diagnostics: Vec::new(),
        }
    }

    /// 发送请求并等待结果
    ///
    /// 失败时状态停在 `Failed`；成功后进入 `Asserting`。
    pub async fn request(&mut self, request: Request) -> Result<Response> {
        self.state = CaseState::Requesting;
        self.requests += 1;

        match self.client.execute(request).await {
            Ok(response) => {
                self.state = CaseState::Asserting;
                Ok(response)
            }
            Err(e) => {
                self.state = CaseState::Failed;
                Err(e)
            }
        }
    }

    /// 发送请求，并把响应存到别名下（覆盖同名旧值）
    pub async fn request_as(&mut self, request: Request, alias: &str) -> Result<Subject> {
        let response = self.request(request).await?;
        debug!(alias, status = response.status.code(), "stored alias");
        Ok(self.aliases.set_response(alias, &response))
    }

    /// 读取别名，返回其 subject 的副本
    pub fn get(&self, alias: &str) -> Result<Subject> {
        self.aliases.get(alias).cloned()
    }

    /// 把一个投影后的值存为别名
    pub fn alias(&mut self, name: &str, subject: Subject) {
        self.aliases.set(name, subject);
    }

    /// 记录一条自由格式的诊断信息，出现在报告中
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.diagnostics.push(message);
    }

    pub fn state(&self) -> CaseState {
        self.state
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn aliases(&self) -> &AliasStore {
        &self.aliases
    }

    pub(crate) fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }
}
