use std::fmt::{self, Display};

/// 构建网络时可能被违反的形状约束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeConstraint {
    InputSize,
    NetworkInput,
    OutputSize,
    WeightCount,
    BiasCount,
    MeanCount,
    DeviationCount,
    GridArea,
    NetworkOutput,
    /// 元素个数上限（单块字节数不超过`isize::MAX`）
    ElementLimit,
}
impl Display for ShapeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraint_name = match self {
            ShapeConstraint::InputSize => "输入长度",
            ShapeConstraint::NetworkInput => "网络输入长度（至少为1）",
            ShapeConstraint::OutputSize => "输出长度（至少为1）",
            ShapeConstraint::WeightCount => "权重个数",
            ShapeConstraint::BiasCount => "偏置个数",
            ShapeConstraint::MeanCount => "均值个数",
            ShapeConstraint::DeviationCount => "标准差个数",
            ShapeConstraint::GridArea => "卷积形状的行列之积",
            ShapeConstraint::NetworkOutput => "网络输出长度",
            ShapeConstraint::ElementLimit => "元素个数上限",
        };
        write!(f, "{}", constraint_name)
    }
}
