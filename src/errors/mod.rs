use thiserror::Error;
mod ops;
mod report;
pub use self::ops::*;
pub use self::report::ReportLevel;

use crate::data::DataError;

#[derive(Error, Debug, PartialEq)]
pub enum NetError {
    // 构建期：形状校验
    #[error(
        "{kind}层（索引{layer}）形状不匹配，故无法加入网络：{constraint}应为{expected}，实际为{got}"
    )]
    BuildShapeMismatch {
        layer: usize,
        kind: &'static str,
        constraint: ShapeConstraint,
        expected: usize,
        got: usize,
    },
    #[error("索引为{layer}的层构建失败，网络已失效，无法继续扩展或完成构建")]
    BuildPriorLayerInvalid { layer: usize },
    #[error("网络已完成构建（finalize），不可再添加层")]
    BuildAfterFinalize,

    // 构建期：卷积配置
    #[error("卷积配置缺失：{0}")]
    ConvolutionConfigMissing(String),
    #[error("卷积配置无效：{0}")]
    ConvolutionConfigInvalid(String),

    // 运行期
    #[error("操作尚未就绪：{0}")]
    OperationNotReady(String),
    #[error(
        "{kind}层（索引{layer}）计算时除数为零{}",
        .element.map_or(String::new(), |i| format!("（元素索引{i}）"))
    )]
    DivisionByZero {
        layer: usize,
        kind: &'static str,
        element: Option<usize>,
    },
    #[error("数据长度不一致：期望{expected}，实际{got}")]
    LengthMismatch { expected: usize, got: usize },

    // 外部数据
    #[error("加载数据失败：{0}")]
    Load(#[from] DataError),
    #[error("网络描述无效：{0}")]
    Descriptor(String),
}
