/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 网络中各层的显示格式化
 */

use super::LayerId;

/// 格式化单个层的显示
///
/// # Arguments
/// * `id` - 层索引
/// * `kind` - 层类型名
/// * `input` / `output` - 输入、输出长度
///
/// # Returns
/// 返回格式化后的字符串，格式为：`层[id={}, type={}, {}→{}]`
pub(in crate::nn) fn format_layer_display(
    id: LayerId,
    kind: &str,
    input: usize,
    output: usize,
) -> String {
    format!("层[id={}, type={}, {}→{}]", id.0, kind, input, output)
}
