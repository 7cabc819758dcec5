mod loader;

use std::path::PathBuf;

/// 在系统临时目录下写入一个测试用数据文件并返回其路径（文件名带进程号以免并行测试冲突）
pub(super) fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("only_infer_{}_{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}
