use std::fmt;
use std::sync::Arc;

use super::{LayerFault, TraitLayer};

/// 自定义层函数：`(输入块, 输出块)`，两块长度即层的输入、输出长度
pub type LayerFn = Arc<dyn Fn(&[f32], &mut [f32]) + Send + Sync>;

/// 自定义（Lambda）层，输入输出长度相同
#[derive(Clone)]
pub(in crate::nn) struct Lambda {
    len: usize,
    function: Option<LayerFn>,
}

impl Lambda {
    pub(in crate::nn) const NAME: &'static str = "Lambda";

    pub(in crate::nn) fn new(len: usize) -> Self {
        Self {
            len,
            function: None,
        }
    }

    pub(in crate::nn) fn set_function(&mut self, function: LayerFn) {
        self.function = Some(function);
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("len", &self.len)
            .field("function", &self.function.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl TraitLayer for Lambda {
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
        let function = self
            .function
            .as_ref()
            .ok_or_else(|| LayerFault::NotReady("尚未设置自定义函数".to_string()))?;
        function(input, output);
        Ok(())
    }
}
