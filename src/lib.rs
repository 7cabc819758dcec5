//! # Only Infer
//!
//! `only_infer`是一个用纯rust实现的小型前馈神经网络推理引擎，面向嵌入式/边缘端，
//! 只做推理（不做训练）：参数来自预训练模型导出的扁平数值表。
//!
//! - [`nn::Network`]：按顺序串联的层，层间通过共享缓冲区零拷贝传递数据
//! - [`nn::NetworkDescriptor`]：JSON 网络描述，配合[`nn::load_network`]一次性构建网络
//! - [`data`]：分隔文本与`.npy`数值向量加载
//! - [`errors`]：错误类型与错误上报级别
//!

pub mod data;
pub mod errors;
pub mod nn;
pub mod utils;
