use super::{LayerFault, TraitLayer};

/// Sigmoid 激活层
///
/// forward: sigmoid(x) = 1 / (1 + e^(-x))
#[derive(Debug, Clone)]
pub(in crate::nn) struct Sigmoid {
    len: usize,
}

impl Sigmoid {
    pub(in crate::nn) const NAME: &'static str = "Sigmoid";

    pub(in crate::nn) const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl TraitLayer for Sigmoid {
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
        for (y, &x) in output.iter_mut().zip(input) {
            *y = 1.0 / (1.0 + (-x).exp());
        }
        Ok(())
    }
}
