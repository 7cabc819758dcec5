/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 全连接（Dense）层
 *                 y = W·x + b，其中 W 为[output_size, input_size]的行优先矩阵
 */

use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1};

use super::{LayerFault, TraitLayer};

/// 全连接层
///
/// 权重与偏置在创建时全部置 0，需通过网络的`DenseBuilder`写入实际参数
#[derive(Debug, Clone)]
pub(in crate::nn) struct Dense {
    /// [output_size, input_size]
    weights: Array2<f32>,
    /// [output_size]
    bias: Array1<f32>,
}

impl Dense {
    pub(in crate::nn) const NAME: &'static str = "Dense";

    pub(in crate::nn) fn new(input_size: usize, output_size: usize) -> Self {
        Self {
            weights: Array2::zeros((output_size, input_size)),
            bias: Array1::zeros(output_size),
        }
    }

    /// 权重个数：output_size × input_size
    pub(in crate::nn) fn weight_count(&self) -> usize {
        self.weights.len()
    }

    pub(in crate::nn) fn bias_count(&self) -> usize {
        self.bias.len()
    }

    /// 按行优先顺序写入权重，调用方需保证`values.len() == weight_count()`
    pub(in crate::nn) fn fill_weights(&mut self, values: &[f32]) {
        debug_assert_eq!(values.len(), self.weight_count());
        for (w, &v) in self.weights.iter_mut().zip(values) {
            *w = v;
        }
    }

    /// 写入偏置，调用方需保证`values.len() == bias_count()`
    pub(in crate::nn) fn fill_bias(&mut self, values: &[f32]) {
        debug_assert_eq!(values.len(), self.bias_count());
        for (b, &v) in self.bias.iter_mut().zip(values) {
            *b = v;
        }
    }
}

impl TraitLayer for Dense {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    fn compute(&self, input: &[f32], output: &mut [f32]) -> Result<(), LayerFault> {
        let x = ArrayView1::from(input);
        let mut y = ArrayViewMut1::from(output);

        // 先放入偏置，再累加 W·x（beta=1 即保留 y 原值）
        y.assign(&self.bias);
        general_mat_vec_mul(1.0, &self.weights, &x, 1.0, &mut y);
        Ok(())
    }
}
