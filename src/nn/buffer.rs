/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 缓冲区池（Buffer Arena）
 *                 网络中所有数值块都存放在这里，按`BufferId`寻址：
 *                 - 0 号块是网络头部的输入块，归网络所有
 *                 - 其余每块都是某一层的输出块，归该层独占，同时作为下一层的输入被共享
 */

use super::LayerId;

/// 单个缓冲区（以及单层参数矩阵）允许的最大元素个数：总字节数不得超过`isize::MAX`
pub(in crate::nn) const MAX_BLOCK_LEN: usize = isize::MAX as usize / std::mem::size_of::<f32>();

/// 缓冲区在池中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// 缓冲区的独占所有者（写入方）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferOwner {
    /// 网络头部输入块，由调用方通过`copy_to_input`/`input_mut`写入
    Network,
    /// 某层的输出块，只在该层`compute`时被写入
    Layer(LayerId),
}

#[derive(Debug, Clone)]
struct Block {
    values: Vec<f32>,
    owner: BufferOwner,
}

#[derive(Debug, Clone, Default)]
pub(in crate::nn) struct BufferArena {
    blocks: Vec<Block>,
}

impl BufferArena {
    /// 分配一块长度固定为`len`的新缓冲区（初始全为0）
    pub(in crate::nn) fn alloc(&mut self, len: usize, owner: BufferOwner) -> BufferId {
        let id = BufferId(self.blocks.len());
        self.blocks.push(Block {
            values: vec![0.0; len],
            owner,
        });
        id
    }

    pub(in crate::nn) fn get(&self, id: BufferId) -> Option<&[f32]> {
        self.blocks.get(id.0).map(|b| b.values.as_slice())
    }

    pub(in crate::nn) fn get_mut(&mut self, id: BufferId) -> Option<&mut [f32]> {
        self.blocks.get_mut(id.0).map(|b| b.values.as_mut_slice())
    }

    pub(in crate::nn) fn owner(&self, id: BufferId) -> Option<BufferOwner> {
        self.blocks.get(id.0).map(|b| b.owner)
    }

    pub(in crate::nn) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// 同时取得一块只读的输入和一块可写的输出
    ///
    /// 两者必须是不同的块且都存在（由网络构建过程保证），否则 panic
    pub(in crate::nn) fn split(&mut self, input: BufferId, output: BufferId) -> (&[f32], &mut [f32]) {
        assert_ne!(input, output, "输入块与输出块不能是同一块");
        if input.0 < output.0 {
            let (head, tail) = self.blocks.split_at_mut(output.0);
            (&head[input.0].values, &mut tail[0].values)
        } else {
            let (head, tail) = self.blocks.split_at_mut(input.0);
            (&tail[0].values, &mut head[output.0].values)
        }
    }
}
