/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : Network - 由若干层首尾相接组成的推理链
 *
 * 生命周期：
 * - Building：逐层追加，每次追加都校验新层的输入长度是否等于链尾输出长度
 * - Poisoned：任一构建步骤失败后进入，此后既不能追加也不能 finalize
 * - Finalized：`finalize`把链尾输出块绑定为网络输出（不可逆），此后才能`compute`
 *
 * 缓冲区：
 * - 网络独占头部输入块；每层在创建时分配并独占自己的输出块
 * - 第 k 层的输出块就是第 k+1 层的输入块（同一个`BufferId`），层间不做任何拷贝
 */

mod builders;

pub use builders::{ConvolutionBuilder, DenseBuilder, LambdaBuilder, NormalizeBuilder};

use std::fmt;

use super::buffer::{BufferArena, BufferId, BufferOwner, MAX_BLOCK_LEN};
use super::display::format_layer_display;
use super::layer::{LayerKind, TraitLayer};
use crate::errors::{NetError, ReportLevel, ShapeConstraint};

/// 层在网络中的索引（按追加顺序从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NetState {
    Building,
    Poisoned { layer: usize },
    Finalized { output: BufferId, output_size: usize },
}

#[derive(Debug, Clone)]
struct LayerSlot {
    layer: LayerKind,
    /// 共享：上一层的输出块或网络头部输入块
    input: BufferId,
    /// 独占
    output: BufferId,
}

/// 前馈推理网络
///
/// # 示例
/// ```ignore
/// let mut net = Network::new(4);
/// net.add_normalize_layer()?.means(&means)?.sd(&sd)?.commit()?;
/// net.add_dense_layer(8)?.weights(&w1)?.bias(&b1)?.commit()?;
/// net.add_relu_layer()?;
/// net.add_dense_layer(3)?.weights(&w2)?.bias(&b2)?.commit()?;
/// net.add_softmax_layer()?;
/// net.finalize()?;
///
/// net.copy_to_input(&sample)?;
/// net.compute()?;
/// net.copy_from_output(&mut result)?;
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    input_size: usize,
    buffers: BufferArena,
    input: BufferId,
    layers: Vec<LayerSlot>,
    state: NetState,
    report: ReportLevel,
}

impl Network {
    pub(in crate::nn) const NAME: &'static str = "Network";

    // ==================== 创建 ====================

    /// 创建输入长度为`input_size`的空网络（错误上报级别为默认的`Silent`）
    ///
    /// `input_size`必须大于 0，否则会 panic；需要以错误返回时用[`Network::try_new`]
    pub fn new(input_size: usize) -> Self {
        Self::with_report_level(input_size, ReportLevel::default())
    }

    /// 创建空网络并指定错误上报级别；`input_size`无效时 panic
    pub fn with_report_level(input_size: usize, report: ReportLevel) -> Self {
        match Self::try_with_report_level(input_size, ReportLevel::Silent) {
            Ok(mut net) => {
                net.report = report;
                net
            }
            Err(e) => panic!("{e}"),
        }
    }

    /// 同[`Network::new`]，但`input_size`无效时返回错误而非 panic
    pub fn try_new(input_size: usize) -> Result<Self, NetError> {
        Self::try_with_report_level(input_size, ReportLevel::default())
    }

    /// 创建空网络并指定错误上报级别
    ///
    /// `input_size`为 0 或超过单块上限时报[`NetError::BuildShapeMismatch`]，并按`report`上报
    pub fn try_with_report_level(input_size: usize, report: ReportLevel) -> Result<Self, NetError> {
        let checked = if input_size == 0 {
            Some((ShapeConstraint::NetworkInput, 1))
        } else if input_size > MAX_BLOCK_LEN {
            Some((ShapeConstraint::ElementLimit, MAX_BLOCK_LEN))
        } else {
            None
        };
        if let Some((constraint, expected)) = checked {
            return report.surface(Err(NetError::BuildShapeMismatch {
                layer: 0,
                kind: Self::NAME,
                constraint,
                expected,
                got: input_size,
            }));
        }
        Ok(Self::allocate(input_size, report))
    }

    fn allocate(input_size: usize, report: ReportLevel) -> Self {
        let mut buffers = BufferArena::default();
        let input = buffers.alloc(input_size, BufferOwner::Network);
        Self {
            input_size,
            buffers,
            input,
            layers: Vec::new(),
            state: NetState::Building,
            report,
        }
    }

    pub const fn report_level(&self) -> ReportLevel {
        self.report
    }

    pub fn set_report_level(&mut self, report: ReportLevel) {
        log::debug!("错误上报级别：{} -> {}", self.report, report);
        self.report = report;
    }

    // ==================== 构建 ====================

    /// 校验外部声明的输入长度（如网络描述文件中的`len`/`inputs`）是否等于链尾输出长度
    pub fn expect_input_size(&mut self, kind: &'static str, declared: usize) -> Result<(), NetError> {
        let required = self.begin_layer()?;
        if declared != required {
            let error = self.mismatch(kind, ShapeConstraint::InputSize, required, declared);
            return self.reject(error);
        }
        Ok(())
    }

    /// 完成构建：把链尾输出块绑定为网络输出。重复调用无副作用
    pub fn finalize(&mut self) -> Result<(), NetError> {
        let result = match self.state {
            NetState::Finalized { .. } => Ok(()),
            NetState::Poisoned { layer } => Err(NetError::BuildPriorLayerInvalid { layer }),
            NetState::Building => match self.layers.last() {
                None => Err(NetError::OperationNotReady(
                    "网络中还没有任何层，无法完成构建".to_string(),
                )),
                Some(tail) => {
                    self.state = NetState::Finalized {
                        output: tail.output,
                        output_size: tail.layer.output_size(),
                    };
                    log::debug!("网络构建完成：{self}");
                    Ok(())
                }
            },
        };
        self.surface(result)
    }

    pub const fn is_finalized(&self) -> bool {
        matches!(self.state, NetState::Finalized { .. })
    }

    // ==================== 计算 ====================

    /// 按追加顺序依次计算每一层，遇到第一个出错的层即停止
    pub fn compute(&mut self) -> Result<(), NetError> {
        let result = self.run_layers();
        self.surface(result)
    }

    fn run_layers(&mut self) -> Result<(), NetError> {
        if !self.is_finalized() {
            return Err(NetError::OperationNotReady(
                "网络尚未完成构建（finalize），无法计算".to_string(),
            ));
        }
        for (index, slot) in self.layers.iter().enumerate() {
            let (input, output) = self.buffers.split(slot.input, slot.output);
            slot.layer
                .compute(input, output)
                .map_err(|fault| fault.into_error(index, slot.layer.name()))?;
        }
        Ok(())
    }

    // ==================== 输入/输出 ====================

    /// 把一个样本拷贝进网络头部输入块，`src`长度须等于网络输入长度
    pub fn copy_to_input(&mut self, src: &[f32]) -> Result<(), NetError> {
        let result = if src.len() == self.input_size {
            self.input_mut().copy_from_slice(src);
            Ok(())
        } else {
            Err(NetError::LengthMismatch {
                expected: self.input_size,
                got: src.len(),
            })
        };
        self.surface(result)
    }

    /// 把网络输出块拷贝到`dst`，仅在 finalize 后可用，`dst`长度须等于网络输出长度
    pub fn copy_from_output(&self, dst: &mut [f32]) -> Result<(), NetError> {
        let result = self.bound_output().and_then(|output| {
            if dst.len() == output.len() {
                dst.copy_from_slice(output);
                Ok(())
            } else {
                Err(NetError::LengthMismatch {
                    expected: output.len(),
                    got: dst.len(),
                })
            }
        });
        self.surface(result)
    }

    pub fn input(&self) -> &[f32] {
        self.buffers.get(self.input).unwrap_or_default()
    }

    pub fn input_mut(&mut self) -> &mut [f32] {
        self.buffers.get_mut(self.input).unwrap_or_default()
    }

    /// 网络输出块（即最后一层的输出块），仅在 finalize 后可用
    ///
    /// 注意：每次`compute`都会覆写其内容
    pub fn output(&self) -> Result<&[f32], NetError> {
        self.surface(self.bound_output())
    }

    fn bound_output(&self) -> Result<&[f32], NetError> {
        match self.state {
            NetState::Finalized { output, .. } => Ok(self.buffers.get(output).unwrap_or_default()),
            _ => Err(NetError::OperationNotReady(
                "网络尚未完成构建（finalize），没有输出".to_string(),
            )),
        }
    }

    pub const fn input_size(&self) -> usize {
        self.input_size
    }

    /// 网络输出长度，finalize 前为`None`
    pub const fn output_size(&self) -> Option<usize> {
        match self.state {
            NetState::Finalized { output_size, .. } => Some(output_size),
            _ => None,
        }
    }

    // ==================== 层与缓冲区查询 ====================

    /// 层数
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        (0..self.layers.len()).map(LayerId)
    }

    pub fn layer_name(&self, id: LayerId) -> Option<&'static str> {
        self.slot(id).map(|s| s.layer.name())
    }

    /// (输入长度, 输出长度)
    pub fn layer_shape(&self, id: LayerId) -> Option<(usize, usize)> {
        self.slot(id)
            .map(|s| (s.layer.input_size(), s.layer.output_size()))
    }

    pub fn layer_input_buffer(&self, id: LayerId) -> Option<BufferId> {
        self.slot(id).map(|s| s.input)
    }

    pub fn layer_output_buffer(&self, id: LayerId) -> Option<BufferId> {
        self.slot(id).map(|s| s.output)
    }

    pub const fn input_buffer(&self) -> BufferId {
        self.input
    }

    /// 网络输出块的 id，finalize 前为`None`
    pub const fn output_buffer(&self) -> Option<BufferId> {
        match self.state {
            NetState::Finalized { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn buffer(&self, id: BufferId) -> Option<&[f32]> {
        self.buffers.get(id)
    }

    pub fn buffer_owner(&self, id: BufferId) -> Option<BufferOwner> {
        self.buffers.owner(id)
    }

    /// 缓冲区总数（= 层数 + 1）
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    #[cfg(test)]
    pub(in crate::nn) fn buffer_mut(&mut self, id: BufferId) -> Option<&mut [f32]> {
        self.buffers.get_mut(id)
    }

    fn slot(&self, id: LayerId) -> Option<&LayerSlot> {
        self.layers.get(id.0)
    }

    // ==================== 内部构建工具 ====================

    /// 开始追加一层：确认网络仍可扩展，并返回新层所需的输入长度
    fn begin_layer(&self) -> Result<usize, NetError> {
        let result = match self.state {
            NetState::Building => Ok(self.tail_size()),
            NetState::Poisoned { layer } => Err(NetError::BuildPriorLayerInvalid { layer }),
            NetState::Finalized { .. } => Err(NetError::BuildAfterFinalize),
        };
        self.surface(result)
    }

    /// 链尾输出长度（空链时为网络输入长度）
    fn tail_size(&self) -> usize {
        self.layers
            .last()
            .map_or(self.input_size, |tail| tail.layer.output_size())
    }

    fn tail_buffer(&self) -> BufferId {
        self.layers.last().map_or(self.input, |tail| tail.output)
    }

    /// 生成针对“下一个待追加层”的形状错误
    pub(in crate::nn) fn mismatch(
        &self,
        kind: &'static str,
        constraint: ShapeConstraint,
        expected: usize,
        got: usize,
    ) -> NetError {
        NetError::BuildShapeMismatch {
            layer: self.layers.len(),
            kind,
            constraint,
            expected,
            got,
        }
    }

    /// 构建失败：令网络失效，并按上报级别呈现错误
    pub(in crate::nn) fn reject<T>(&mut self, error: NetError) -> Result<T, NetError> {
        if self.state == NetState::Building {
            self.state = NetState::Poisoned {
                layer: self.layers.len(),
            };
        }
        self.surface(Err(error))
    }

    /// 把层接到链尾：共享链尾输出块作为输入，并为其分配独占的输出块
    fn push_layer(&mut self, layer: LayerKind) -> LayerId {
        let id = LayerId(self.layers.len());
        let input = self.tail_buffer();
        let output = self
            .buffers
            .alloc(layer.output_size(), BufferOwner::Layer(id));
        log::debug!(
            "追加{}",
            format_layer_display(id, layer.name(), layer.input_size(), layer.output_size())
        );
        self.layers.push(LayerSlot {
            layer,
            input,
            output,
        });
        id
    }

    fn surface<T>(&self, result: Result<T, NetError>) -> Result<T, NetError> {
        self.report.surface(result)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input({})", self.input_size)?;
        for slot in &self.layers {
            write!(
                f,
                " → {}({}→{})",
                slot.layer.name(),
                slot.layer.input_size(),
                slot.layer.output_size()
            )?;
        }
        match self.state {
            NetState::Building => write!(f, " [构建中]"),
            NetState::Poisoned { layer } => write!(f, " [失效：索引{layer}的层构建失败]"),
            NetState::Finalized { .. } => write!(f, " [已完成]"),
        }
    }
}
