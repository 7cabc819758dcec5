//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载相关错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// 数据源未找到
    #[error("数据源未找到: {0}")]
    SourceNotFound(PathBuf),

    /// 数据源无法读取（IO 错误或文件格式无法解码）
    #[error("数据源无法读取: {path}（{reason}）")]
    SourceUnreadable { path: PathBuf, reason: String },

    /// 数据源中没有任何数值
    #[error("数据源为空: {0}")]
    SourceEmpty(PathBuf),

    /// 含有无法解析为数值的内容
    #[error("数据源格式错误: {path}中的`{token}`无法解析为数值")]
    SourceMalformed { path: PathBuf, token: String },

    /// 数值个数少于期望
    #[error("数据源数据不足: {path}，期望 {expected} 个数值，实际 {got} 个")]
    SourceDataShortfall {
        path: PathBuf,
        expected: usize,
        got: usize,
    },
}
