/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 网络描述符（Network Descriptor）
 *                 以 JSON 描述“输入长度 + 按顺序排列的层 + 各层参数（内联数组或文件路径）”，
 *                 据此逐层调用`add_*_layer`并返回已完成构建的网络
 */

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::layer::{Dense, GridShape, Normalize, Padding, ReLU, Sigmoid, SoftMax};
use super::network::Network;
use crate::data::DataError;
use crate::errors::{NetError, ReportLevel, ShapeConstraint};

/// 网络的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// 网络输入长度
    pub inputs: usize,
    /// 声明的网络输出长度；若给出，构建完成后会与最后一层的输出长度比对
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<usize>,
    /// 按顺序排列的层
    pub layers: Vec<LayerDescriptor>,
}

/// 层描述（包含类型特定参数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerDescriptor {
    Normalize {
        len: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        means: Option<ParamSource>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sd: Option<ParamSource>,
    },
    #[serde(alias = "WG")]
    Dense {
        inputs: usize,
        outputs: usize,
        weights: ParamSource,
        bias: ParamSource,
    },
    #[serde(alias = "ReLu")]
    ReLU { len: usize },
    Sigmoid { len: usize },
    #[serde(alias = "Softmax")]
    SoftMax { len: usize },
    Convolution {
        rows: usize,
        cols: usize,
        kernel: KernelDescriptor,
        #[serde(default)]
        padding: Padding,
    },
}

/// 参数来源：内联数组，或数据文件路径（相对路径以描述文件所在目录为基准）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamSource {
    Inline(Vec<f32>),
    File(PathBuf),
}

/// 卷积核描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelDescriptor {
    pub rows: usize,
    pub cols: usize,
    pub data: ParamSource,
}

impl NetworkDescriptor {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 读取并解析 JSON 描述文件
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NetError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::SourceNotFound(path.to_path_buf()).into());
        }
        let json = std::fs::read_to_string(path).map_err(|e| DataError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json).map_err(|e| NetError::Descriptor(format!("{}：{e}", path.display())))
    }

    /// 按描述逐层构建网络并完成构建（finalize）
    ///
    /// `base_dir`是相对参数路径的基准目录；构建过程中的错误按`level`上报
    pub fn build(&self, base_dir: &Path, level: ReportLevel) -> Result<Network, NetError> {
        let mut net = Network::try_with_report_level(self.inputs, level)?;
        for layer in &self.layers {
            layer.append_to(&mut net, base_dir)?;
        }
        net.finalize()?;

        if let (Some(declared), Some(actual)) = (self.outputs, net.output_size()) {
            if declared != actual {
                return level.surface(Err(NetError::BuildShapeMismatch {
                    layer: net.len(),
                    kind: Network::NAME,
                    constraint: ShapeConstraint::NetworkOutput,
                    expected: declared,
                    got: actual,
                }));
            }
        }
        Ok(net)
    }
}

impl LayerDescriptor {
    /// 把本层追加到`net`链尾
    fn append_to(&self, net: &mut Network, base_dir: &Path) -> Result<(), NetError> {
        match self {
            LayerDescriptor::Normalize { len, means, sd } => {
                net.expect_input_size(Normalize::NAME, *len)?;
                let mut builder = net.add_normalize_layer()?;
                builder = match means {
                    Some(ParamSource::Inline(values)) => builder.means(values)?,
                    Some(ParamSource::File(path)) => {
                        builder.load_means(base_dir.join(path))?
                    }
                    None => builder,
                };
                builder = match sd {
                    Some(ParamSource::Inline(values)) => builder.sd(values)?,
                    Some(ParamSource::File(path)) => {
                        builder.load_sd(base_dir.join(path))?
                    }
                    None => builder,
                };
                builder.commit()?;
            }
            LayerDescriptor::Dense {
                inputs,
                outputs,
                weights,
                bias,
            } => {
                net.expect_input_size(Dense::NAME, *inputs)?;
                let mut builder = net.add_dense_layer(*outputs)?;
                builder = match weights {
                    ParamSource::Inline(values) => builder.weights(values)?,
                    ParamSource::File(path) => {
                        builder.load_weights(base_dir.join(path))?
                    }
                };
                builder = match bias {
                    ParamSource::Inline(values) => builder.bias(values)?,
                    ParamSource::File(path) => {
                        builder.load_bias(base_dir.join(path))?
                    }
                };
                builder.commit()?;
            }
            LayerDescriptor::ReLU { len } => {
                net.expect_input_size(ReLU::NAME, *len)?;
                net.add_relu_layer()?;
            }
            LayerDescriptor::Sigmoid { len } => {
                net.expect_input_size(Sigmoid::NAME, *len)?;
                net.add_sigmoid_layer()?;
            }
            LayerDescriptor::SoftMax { len } => {
                net.expect_input_size(SoftMax::NAME, *len)?;
                net.add_softmax_layer()?;
            }
            LayerDescriptor::Convolution {
                rows,
                cols,
                kernel,
                padding,
            } => {
                let builder = net.add_convolution_layer(GridShape::new(*rows, *cols), *padding)?;
                let builder = match &kernel.data {
                    ParamSource::Inline(values) => {
                        builder.kernel_data(kernel.rows, kernel.cols, values.clone())?
                    }
                    ParamSource::File(path) => builder.load_kernel(
                        kernel.rows,
                        kernel.cols,
                        base_dir.join(path),
                    )?,
                };
                builder.commit()?;
            }
        }
        Ok(())
    }
}

/// 从 JSON 描述文件加载网络（已完成构建，可直接`compute`）
///
/// 参数文件的相对路径以描述文件所在目录为基准
pub fn load_network<P: AsRef<Path>>(path: P, level: ReportLevel) -> Result<Network, NetError> {
    let path = path.as_ref();
    let descriptor = level.surface(NetworkDescriptor::from_file(path))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let net = descriptor.build(base_dir, level)?;
    log::info!("已从{}加载网络：{net}", path.display());
    Ok(net)
}
