/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 2D 卷积层（单通道、步长1、输出与输入同尺寸）
 *
 * 设计决策：
 * - 输入/输出块都按行优先解释为 [rows, cols] 的矩阵，rows*cols 即层长度
 * - 内部区域（i0 ≤ i < rows-i0 且 j0 ≤ j < cols-j0，其中 i0=kRows/2、j0=kCols/2）做互相关
 * - 边界区域按填充方式处理：
 *   - Valid：置 0
 *   - Same：取“最近内部格”处的输入值，行、列各自独立截断到内部范围（角点同样适用）
 */

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{LayerFault, TraitLayer};
use crate::errors::NetError;

/// 卷积层的二维逻辑形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// 1×`len`的形状，用于一维卷积
    pub const fn row(len: usize) -> Self {
        Self { rows: 1, cols: len }
    }

    /// 行列之积；溢出时为`None`
    pub const fn checked_area(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// 行列之积，仅用于已通过`checked_area`校验的形状
    pub(in crate::nn) const fn area(&self) -> usize {
        self.rows * self.cols
    }
}

/// 卷积边界的填充方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Padding {
    /// 边界输出置 0
    #[default]
    Valid,
    /// 边界输出延用最近内部格的输入值
    Same,
}

/// 卷积核：行优先的小型二维权重矩阵，创建后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct ConvKernel {
    weights: Array2<f32>,
}

impl ConvKernel {
    /// 用`rows`×`cols`个行优先排列的数值创建卷积核
    ///
    /// - `data`为空：[`NetError::ConvolutionConfigMissing`]
    /// - 尺寸含 0 或`data`长度与尺寸不符：[`NetError::ConvolutionConfigInvalid`]
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, NetError> {
        if data.is_empty() {
            return Err(NetError::ConvolutionConfigMissing(
                "卷积核数据未设置".to_string(),
            ));
        }
        if rows == 0 || cols == 0 {
            return Err(NetError::ConvolutionConfigInvalid(format!(
                "卷积核尺寸须为正，得到 {rows}x{cols}"
            )));
        }
        let len = data.len();
        let weights = Array2::from_shape_vec((rows, cols), data).map_err(|_| {
            NetError::ConvolutionConfigInvalid(format!(
                "卷积核数据长度 {len} 与尺寸 {rows}x{cols} 不符"
            ))
        })?;
        Ok(Self { weights })
    }

    /// 1×n 的一维卷积核
    pub fn row(data: Vec<f32>) -> Result<Self, NetError> {
        Self::new(1, data.len(), data)
    }

    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    pub fn cols(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    /// 检查本卷积核能否用于`shape`形状的层：内部区域至少要有一个格子
    pub(in crate::nn) fn check_fits(&self, shape: GridShape) -> Result<(), NetError> {
        let (i0, j0) = (self.rows() / 2, self.cols() / 2);
        if shape.rows <= 2 * i0 || shape.cols <= 2 * j0 {
            return Err(NetError::ConvolutionConfigInvalid(format!(
                "卷积核 {}x{} 对 {}x{} 的层过大，不存在内部区域",
                self.rows(),
                self.cols(),
                shape.rows,
                shape.cols
            )));
        }
        Ok(())
    }
}

/// 2D 卷积层
#[derive(Debug, Clone)]
pub(in crate::nn) struct Convolution {
    shape: GridShape,
    kernel: ConvKernel,
    padding: Padding,
}

impl Convolution {
    pub(in crate::nn) const NAME: &'static str = "Convolution";

    /// 调用方需保证`kernel`已通过`check_fits(shape)`
    pub(in crate::nn) fn new(shape: GridShape, kernel: ConvKernel, padding: Padding) -> Self {
        Self {
            shape,
            kernel,
            padding,
        }
    }

    /// 内部格的互相关
    fn correlate(&self, input: &[f32], i: usize, j: usize) -> f32 {
        let cols = self.shape.cols;
        let (i0, j0) = (self.kernel.rows() / 2, self.kernel.cols() / 2);
        self.kernel
            .weights
            .indexed_iter()
            .map(|((ki, kj), &w)| input[(i - i0 + ki) * cols + (j - j0 + kj)] * w)
            .sum()
    }
}

impl TraitLayer for Convolution {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn input_size(&self) -> usize {
        self.shape.area()
    }

    fn output_size(&self) -> usize {
        self.shape.area()
    }

    fn compute(&self, input: &[f32], output: &mut [f32]) -> Result<(), LayerFault> {
        let GridShape { rows, cols } = self.shape;
        let (i0, j0) = (self.kernel.rows() / 2, self.kernel.cols() / 2);
        let (i_end, j_end) = (rows - i0, cols - j0);

        for i in 0..rows {
            for j in 0..cols {
                let is_interior = (i0..i_end).contains(&i) && (j0..j_end).contains(&j);
                output[i * cols + j] = if is_interior {
                    self.correlate(input, i, j)
                } else {
                    match self.padding {
                        Padding::Valid => 0.0,
                        Padding::Same => {
                            let src_i = i.clamp(i0, i_end - 1);
                            let src_j = j.clamp(j0, j_end - 1);
                            input[src_i * cols + src_j]
                        }
                    }
                };
            }
        }
        Ok(())
    }
}
