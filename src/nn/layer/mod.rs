/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : Layer 模块 - 各种层的计算核
 *
 * 层的种类是封闭的，通过`enum_dispatch`静态分派到各自的实现，
 * 新增种类时编译器会检查所有`match`是否穷尽。
 * 层只负责“读输入块、写输出块”，缓冲区本身由网络的缓冲区池管理。
 */

mod conv2d;
mod dense;
mod lambda;
mod normalize;
mod relu;
mod sigmoid;
mod softmax;

pub use conv2d::{ConvKernel, GridShape, Padding};
pub use lambda::LayerFn;

pub(in crate::nn) use conv2d::Convolution;
pub(in crate::nn) use dense::Dense;
pub(in crate::nn) use lambda::Lambda;
pub(in crate::nn) use normalize::Normalize;
pub(in crate::nn) use relu::ReLU;
pub(in crate::nn) use sigmoid::Sigmoid;
pub(in crate::nn) use softmax::SoftMax;

use crate::errors::NetError;
use enum_dispatch::enum_dispatch;

#[enum_dispatch]
#[derive(Debug, Clone)]
pub(in crate::nn) enum LayerKind {
    Dense,
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓激活↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    ReLU,
    Sigmoid,
    SoftMax,
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑激活↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    Normalize,
    Convolution,
    Lambda,
}

#[enum_dispatch(LayerKind)]
pub(in crate::nn) trait TraitLayer {
    /// 层类型名，用于错误信息和网络摘要
    fn name(&self) -> &'static str;

    fn input_size(&self) -> usize;

    fn output_size(&self) -> usize;

    /// 读取`input`（长度为`input_size`），把结果写入`output`（长度为`output_size`）
    /// （注意：两块的长度由网络构建过程保证，实现时无需再校验）
    fn compute(&self, input: &[f32], output: &mut [f32]) -> Result<(), LayerFault>;
}

/// 层在计算过程中发现的问题，由网络补上层索引后转为[`NetError`]
#[derive(Debug, Clone, PartialEq)]
pub(in crate::nn) enum LayerFault {
    DivisionByZero { element: Option<usize> },
    NotReady(String),
}

impl LayerFault {
    pub(in crate::nn) fn into_error(self, layer: usize, kind: &'static str) -> NetError {
        match self {
            LayerFault::DivisionByZero { element } => NetError::DivisionByZero {
                layer,
                kind,
                element,
            },
            LayerFault::NotReady(reason) => {
                NetError::OperationNotReady(format!("{kind}层（索引{layer}）{reason}"))
            }
        }
    }
}
