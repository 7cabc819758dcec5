use std::fmt::{self, Display};

use super::NetError;

/// 错误上报级别
///
/// 只决定错误“如何被呈现”，不影响错误是否被检测：
/// - `Silent`：仅以`Err`返回
/// - `Log`：以`Err`返回，同时通过`log::error!`输出
/// - `Panic`：直接以错误信息panic
///
/// 默认级别为`Silent`，`Network::new`创建的网络出错时只返回`Err`；
/// 出错即中断须显式指定`Panic`（如`Network::with_report_level(n, ReportLevel::Panic)`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLevel {
    #[default]
    Silent,
    Log,
    Panic,
}

impl ReportLevel {
    /// 按本级别呈现`result`中的错误，`Ok`原样返回
    pub fn surface<T>(self, result: Result<T, NetError>) -> Result<T, NetError> {
        if let Err(e) = &result {
            match self {
                ReportLevel::Silent => {}
                ReportLevel::Log => log::error!("{e}"),
                ReportLevel::Panic => panic!("{e}"),
            }
        }
        result
    }
}

impl Display for ReportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_name = match self {
            ReportLevel::Silent => "静默",
            ReportLevel::Log => "日志",
            ReportLevel::Panic => "中断",
        };
        write!(f, "{}", level_name)
    }
}
