
use crate::errors::NetError;
use crate::nn::{LayerId, Network};

/// 构建“单层 + finalize”的网络并对`input`计算一次，返回输出
fn compute_once(net: &mut Network, input: &[f32]) -> Result<Vec<f32>, NetError> {
    net.finalize()?;
    net.copy_to_input(input)?;
    net.compute()?;
    Ok(net.output()?.to_vec())
}

/// 取指定层的输出块内容
fn layer_output(net: &Network, id: LayerId) -> Vec<f32> {
    let buffer = net.layer_output_buffer(id).unwrap();
    net.buffer(buffer).unwrap().to_vec()
}
