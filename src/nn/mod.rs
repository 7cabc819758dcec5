/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 负责前馈推理网络（neural network）的构建与计算
 */

mod buffer;
mod descriptor;
mod display;
pub mod layer;
mod network;

pub use buffer::{BufferId, BufferOwner};
pub use descriptor::{KernelDescriptor, LayerDescriptor, NetworkDescriptor, ParamSource, load_network};
pub use layer::{ConvKernel, GridShape, LayerFn, Padding};
pub use network::{
    ConvolutionBuilder, DenseBuilder, LambdaBuilder, LayerId, Network, NormalizeBuilder,
};

#[cfg(test)]
mod tests;
