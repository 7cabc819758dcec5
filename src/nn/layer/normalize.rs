use super::{LayerFault, TraitLayer};

/// 标准化层
///
/// forward: y_i = (x_i - mean_i) / sd_i
///
/// 若某个`sd_i`为 0，该元素输出`NaN`，其余元素照常计算，整次计算以除零错误结束
/// （报告第一个出问题的元素索引）
#[derive(Debug, Clone)]
pub(in crate::nn) struct Normalize {
    means: Vec<f32>,
    sd: Vec<f32>,
}

impl Normalize {
    pub(in crate::nn) const NAME: &'static str = "Normalize";

    /// 默认均值为 0、标准差为 1，即恒等变换
    pub(in crate::nn) fn new(len: usize) -> Self {
        Self {
            means: vec![0.0; len],
            sd: vec![1.0; len],
        }
    }

    pub(in crate::nn) fn len(&self) -> usize {
        self.means.len()
    }

    pub(in crate::nn) fn fill_means(&mut self, values: &[f32]) {
        debug_assert_eq!(values.len(), self.len());
        self.means.copy_from_slice(values);
    }

    pub(in crate::nn) fn fill_sd(&mut self, values: &[f32]) {
        debug_assert_eq!(values.len(), self.len());
        self.sd.copy_from_slice(values);
    }
}

impl TraitLayer for Normalize {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn input_size(&self) -> usize {
        self.len()
    }

    fn output_size(&self) -> usize {
        self.len()
    }

    fn compute(&self, input: &[f32], output: &mut [f32]) -> Result<(), LayerFault> {
        let mut first_zero = None;
        let params = self.means.iter().zip(&self.sd);
        for (i, ((y, &x), (&mean, &sd))) in output.iter_mut().zip(input).zip(params).enumerate() {
            if sd == 0.0 {
                *y = f32::NAN;
                first_zero.get_or_insert(i);
                continue;
            }
            *y = (x - mean) / sd;
        }

        match first_zero {
            Some(element) => Err(LayerFault::DivisionByZero {
                element: Some(element),
            }),
            None => Ok(()),
        }
    }
}
