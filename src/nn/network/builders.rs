/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 各类层的追加入口与配置句柄
 *
 * 带参数的层（Dense/Normalize/Convolution/Lambda）先由`add_*_layer`返回一个配置句柄，
 * 句柄持有待追加的层和对网络的独占借用；参数设置完毕后调用`commit`才真正接入链尾。
 * 句柄上的任何校验失败都会令网络失效（之后的 add/finalize 均报`BuildPriorLayerInvalid`）。
 * 若句柄未`commit`就被丢弃，则网络保持原样。
 */

use std::path::Path;
use std::sync::Arc;

use super::{LayerId, Network};
use crate::data::read_vector;
use crate::nn::buffer::MAX_BLOCK_LEN;
use crate::errors::{NetError, ShapeConstraint};
use crate::nn::layer::{
    ConvKernel, Convolution, Dense, GridShape, Lambda, Normalize, Padding, ReLU, Sigmoid, SoftMax,
};

/// 从外部数据源读取恰好`len`个参数，失败时令网络失效
fn load_params(net: &mut Network, source: &Path, len: usize) -> Result<Vec<f32>, NetError> {
    match read_vector(source, len) {
        Ok(values) => Ok(values),
        Err(e) => net.reject(e.into()),
    }
}

impl Network {
    // ==================== 带参数的层 ====================

    /// 追加全连接层，输入长度取链尾输出长度
    pub fn add_dense_layer(&mut self, output_size: usize) -> Result<DenseBuilder<'_>, NetError> {
        let input_size = self.begin_layer()?;
        if output_size == 0 {
            let error = self.mismatch(Dense::NAME, ShapeConstraint::OutputSize, 1, 0);
            return self.reject(error);
        }
        // 权重矩阵 [output_size, input_size] 须能整体分配
        let weight_count = output_size.saturating_mul(input_size);
        if weight_count > MAX_BLOCK_LEN {
            let error = self.mismatch(
                Dense::NAME,
                ShapeConstraint::ElementLimit,
                MAX_BLOCK_LEN,
                weight_count,
            );
            return self.reject(error);
        }
        Ok(DenseBuilder {
            layer: Dense::new(input_size, output_size),
            net: self,
        })
    }

    /// 追加标准化层，长度取链尾输出长度
    pub fn add_normalize_layer(&mut self) -> Result<NormalizeBuilder<'_>, NetError> {
        let len = self.begin_layer()?;
        Ok(NormalizeBuilder {
            layer: Normalize::new(len),
            net: self,
        })
    }

    /// 追加卷积层，`shape.rows * shape.cols`须等于链尾输出长度
    pub fn add_convolution_layer(
        &mut self,
        shape: GridShape,
        padding: Padding,
    ) -> Result<ConvolutionBuilder<'_>, NetError> {
        let required = self.begin_layer()?;
        match shape.checked_area() {
            Some(area) if area == required => {}
            area => {
                let error = self.mismatch(
                    Convolution::NAME,
                    ShapeConstraint::GridArea,
                    required,
                    area.unwrap_or(usize::MAX),
                );
                return self.reject(error);
            }
        }
        Ok(ConvolutionBuilder {
            net: self,
            shape,
            padding,
            kernel: None,
        })
    }

    /// 追加自定义层，输入输出长度都取链尾输出长度
    pub fn add_lambda_layer(&mut self) -> Result<LambdaBuilder<'_>, NetError> {
        let len = self.begin_layer()?;
        Ok(LambdaBuilder {
            layer: Lambda::new(len),
            net: self,
        })
    }
}

// ==================== 激活层 ====================

macro_rules! impl_add_activation {
    ($($name:ident => $layer:ident),* $(,)?) => {
        paste::paste! {
            impl Network {
                $(
                    #[doc = concat!("追加", stringify!($layer), "激活层，长度取链尾输出长度")]
                    pub fn [<add_ $name _layer>](&mut self) -> Result<LayerId, NetError> {
                        let len = self.begin_layer()?;
                        Ok(self.push_layer($layer::new(len).into()))
                    }
                )*
            }
        }
    };
}

impl_add_activation!(relu => ReLU, sigmoid => Sigmoid, softmax => SoftMax);

// ==================== 配置句柄 ====================

/// 全连接层的配置句柄
#[derive(Debug)]
#[must_use = "配置句柄须调用`commit`才会把层接入网络"]
pub struct DenseBuilder<'a> {
    net: &'a mut Network,
    layer: Dense,
}

impl DenseBuilder<'_> {
    /// 按行优先顺序写入 [output_size, input_size] 的权重
    pub fn weights(mut self, values: &[f32]) -> Result<Self, NetError> {
        let expected = self.layer.weight_count();
        if values.len() != expected {
            let error =
                self.net
                    .mismatch(Dense::NAME, ShapeConstraint::WeightCount, expected, values.len());
            return self.net.reject(error);
        }
        self.layer.fill_weights(values);
        Ok(self)
    }

    pub fn bias(mut self, values: &[f32]) -> Result<Self, NetError> {
        let expected = self.layer.bias_count();
        if values.len() != expected {
            let error =
                self.net
                    .mismatch(Dense::NAME, ShapeConstraint::BiasCount, expected, values.len());
            return self.net.reject(error);
        }
        self.layer.fill_bias(values);
        Ok(self)
    }

    /// 从文件读取权重（见[`crate::data::load_vector`]）
    pub fn load_weights<P: AsRef<Path>>(self, source: P) -> Result<Self, NetError> {
        let values = load_params(self.net, source.as_ref(), self.layer.weight_count())?;
        self.weights(&values)
    }

    pub fn load_bias<P: AsRef<Path>>(self, source: P) -> Result<Self, NetError> {
        let values = load_params(self.net, source.as_ref(), self.layer.bias_count())?;
        self.bias(&values)
    }

    pub fn commit(self) -> Result<LayerId, NetError> {
        Ok(self.net.push_layer(self.layer.into()))
    }
}

/// 标准化层的配置句柄，未设置的参数保持默认值（均值 0、标准差 1）
#[derive(Debug)]
#[must_use = "配置句柄须调用`commit`才会把层接入网络"]
pub struct NormalizeBuilder<'a> {
    net: &'a mut Network,
    layer: Normalize,
}

impl NormalizeBuilder<'_> {
    pub fn means(mut self, values: &[f32]) -> Result<Self, NetError> {
        let expected = self.layer.len();
        if values.len() != expected {
            let error =
                self.net
                    .mismatch(Normalize::NAME, ShapeConstraint::MeanCount, expected, values.len());
            return self.net.reject(error);
        }
        self.layer.fill_means(values);
        Ok(self)
    }

    pub fn sd(mut self, values: &[f32]) -> Result<Self, NetError> {
        let expected = self.layer.len();
        if values.len() != expected {
            let error = self.net.mismatch(
                Normalize::NAME,
                ShapeConstraint::DeviationCount,
                expected,
                values.len(),
            );
            return self.net.reject(error);
        }
        self.layer.fill_sd(values);
        Ok(self)
    }

    pub fn load_means<P: AsRef<Path>>(self, source: P) -> Result<Self, NetError> {
        let values = load_params(self.net, source.as_ref(), self.layer.len())?;
        self.means(&values)
    }

    pub fn load_sd<P: AsRef<Path>>(self, source: P) -> Result<Self, NetError> {
        let values = load_params(self.net, source.as_ref(), self.layer.len())?;
        self.sd(&values)
    }

    pub fn commit(self) -> Result<LayerId, NetError> {
        Ok(self.net.push_layer(self.layer.into()))
    }
}

/// 卷积层的配置句柄，`commit`前必须设置卷积核
#[derive(Debug)]
#[must_use = "配置句柄须调用`commit`才会把层接入网络"]
pub struct ConvolutionBuilder<'a> {
    net: &'a mut Network,
    shape: GridShape,
    padding: Padding,
    kernel: Option<ConvKernel>,
}

impl ConvolutionBuilder<'_> {
    /// 设置卷积核；核过大以致层内没有内部格时报[`NetError::ConvolutionConfigInvalid`]
    pub fn kernel(mut self, kernel: ConvKernel) -> Result<Self, NetError> {
        if let Err(error) = kernel.check_fits(self.shape) {
            return self.net.reject(error);
        }
        self.kernel = Some(kernel);
        Ok(self)
    }

    /// 用`rows`×`cols`个行优先排列的数值设置卷积核，错误规则同[`ConvKernel::new`]
    pub fn kernel_data(self, rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, NetError> {
        match ConvKernel::new(rows, cols, data) {
            Ok(kernel) => self.kernel(kernel),
            Err(error) => self.net.reject(error),
        }
    }

    /// 从文件读取`rows`×`cols`个数值作为卷积核
    pub fn load_kernel<P: AsRef<Path>>(
        self,
        rows: usize,
        cols: usize,
        source: P,
    ) -> Result<Self, NetError> {
        let Some(len) = rows.checked_mul(cols) else {
            return self.net.reject(NetError::ConvolutionConfigInvalid(format!(
                "卷积核尺寸 {rows}x{cols} 的元素个数溢出"
            )));
        };
        let data = load_params(self.net, source.as_ref(), len)?;
        self.kernel_data(rows, cols, data)
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn commit(self) -> Result<LayerId, NetError> {
        let Self {
            net,
            shape,
            padding,
            kernel,
        } = self;
        let Some(kernel) = kernel else {
            let reason = format!("索引{}的卷积层尚未设置卷积核", net.len());
            return net.reject(NetError::ConvolutionConfigMissing(reason));
        };
        Ok(net.push_layer(Convolution::new(shape, kernel, padding).into()))
    }
}

/// 自定义层的配置句柄
///
/// 未设置函数也可以`commit`，但之后的`compute`会报[`NetError::OperationNotReady`]
#[derive(Debug)]
#[must_use = "配置句柄须调用`commit`才会把层接入网络"]
pub struct LambdaBuilder<'a> {
    net: &'a mut Network,
    layer: Lambda,
}

impl LambdaBuilder<'_> {
    /// 设置层函数：读第一个参数（输入块），写第二个参数（输出块），两块等长
    pub fn function<F>(mut self, function: F) -> Self
    where
        F: Fn(&[f32], &mut [f32]) + Send + Sync + 'static,
    {
        self.layer.set_function(Arc::new(function));
        self
    }

    pub fn commit(self) -> Result<LayerId, NetError> {
        Ok(self.net.push_layer(self.layer.into()))
    }
}
