//! 数据加载模块
//!
//! 为网络各层的参数（权重、偏置、均值、标准差等）提供数值向量加载功能。
//!
//! # 主要组件
//!
//! - [`load_vector`]: 将数据源中的数值填入预先分配好长度的目标切片
//! - [`read_vector`]: 便捷接口，按期望长度分配并返回`Vec<f32>`
//! - [`DataError`]: 数据加载错误类型
//!
//! # 支持的数据源
//!
//! - 分隔文本（逗号和/或任意空白分隔，如`.csv`、`.txt`）
//! - `NumPy`的`.npy`文件（任意维度，按行优先顺序展平）
//!
//! # 使用示例
//!
//! ```ignore
//! use only_infer::data::load_vector;
//!
//! let mut weights = vec![0.0; 4 * 8];
//! let count = load_vector("./data/w1.csv", &mut weights)?;
//! assert_eq!(count, 32);
//! ```

pub mod error;
mod loader;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::DataError;
pub use loader::{load_vector, read_vector};
