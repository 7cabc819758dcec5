use super::{LayerFault, TraitLayer};

/// ReLU 激活层
///
/// forward: relu(x) = max(0, x)
#[derive(Debug, Clone)]
pub(in crate::nn) struct ReLU {
    len: usize,
}

impl ReLU {
    pub(in crate::nn) const NAME: &'static str = "ReLU";

    pub(in crate::nn) const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl TraitLayer for ReLU {
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
            *y = if x > 0.0 { x } else { 0.0 };
        }
        Ok(())
    }
}
