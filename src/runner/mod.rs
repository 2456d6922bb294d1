pub mod context;
pub mod reporter;
pub mod suite;
pub mod types;

pub use context::CaseContext;
pub use reporter::TestReporter;
pub use suite::{CaseFuture, RunOptions, Suite, TestCase};
pub use types::{CaseResult, CaseState, SuiteReport, SuiteSummary};
