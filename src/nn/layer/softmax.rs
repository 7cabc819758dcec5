/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : Softmax 激活层
 *                 softmax(x)_i = exp(x_i) / Σ exp(x_j)
 */

use super::{LayerFault, TraitLayer};

/// Softmax 激活层
///
/// 直接对每个元素取指数后再归一化（不做减最大值处理），
/// 因此指数和恰好为 0（例如输入全为`-inf`）时会报除零错误，此时输出块内容无意义。
#[derive(Debug, Clone)]
pub(in crate::nn) struct SoftMax {
    len: usize,
}

impl SoftMax {
    pub(in crate::nn) const NAME: &'static str = "SoftMax";

    pub(in crate::nn) const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl TraitLayer for SoftMax {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn input_size(&self) -> usize {
        self.len
    }

    fn output_size(&self) -> usize {
        self.len
    }

    fn compute(&self, input: &[f32], output: &mut [f32]) -> Result<(), LayerFault> {
        // 1. 取指数并累加
        let mut sum_exp = 0.0f32;
        for (y, &x) in output.iter_mut().zip(input) {
            *y = x.exp();
            sum_exp += *y;
        }

        // 2. 归一化
        if sum_exp == 0.0 {
            return Err(LayerFault::DivisionByZero { element: None });
        }
        for y in output.iter_mut() {
            *y /= sum_exp;
        }
        Ok(())
    }
}
