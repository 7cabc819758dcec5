/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 数值向量加载器
 *                 将分隔文本或`.npy`文件中的数值按顺序填入预先分配好长度的目标切片
 */

use std::path::Path;

use ndarray::ArrayD;

use super::error::DataError;

/// 从`source`中读取数值，按顺序填满`dest`，返回实际读取的个数（即`dest.len()`）
///
/// - 扩展名为`npy`的文件按`NumPy`格式读取，其余一律按分隔文本处理
/// - 数据源中的数值多于`dest`长度时，多余部分被忽略（会输出一条警告日志）
/// - 数值不足时返回[`DataError::SourceDataShortfall`]
pub fn load_vector<P: AsRef<Path>>(source: P, dest: &mut [f32]) -> Result<usize, DataError> {
    let path = source.as_ref();
    if !path.is_file() {
        return Err(DataError::SourceNotFound(path.to_path_buf()));
    }

    let is_npy = path.extension().is_some_and(|ext| ext == "npy");
    if is_npy {
        read_npy_into(path, dest)
    } else {
        read_delimited_into(path, dest)
    }
}

/// 便捷 API：读取`len`个数值并以`Vec<f32>`返回
pub fn read_vector<P: AsRef<Path>>(source: P, len: usize) -> Result<Vec<f32>, DataError> {
    let mut values = vec![0.0; len];
    load_vector(source, &mut values)?;
    Ok(values)
}

fn read_delimited_into(path: &Path, dest: &mut [f32]) -> Result<usize, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut tokens = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    let mut count = 0;
    for slot in dest.iter_mut() {
        let Some(token) = tokens.next() else {
            break;
        };
        *slot = token
            .parse::<f32>()
            .map_err(|_| DataError::SourceMalformed {
                path: path.to_path_buf(),
                token: token.to_string(),
            })?;
        count += 1;
    }

    let surplus = tokens.count();
    finish(path, dest.len(), count, surplus)
}

fn read_npy_into(path: &Path, dest: &mut [f32]) -> Result<usize, DataError> {
    let array: ArrayD<f32> =
        ndarray_npy::read_npy(path).map_err(|e| DataError::SourceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let count = array.len().min(dest.len());
    for (slot, value) in dest.iter_mut().zip(array.iter()) {
        *slot = *value;
    }

    finish(path, dest.len(), count, array.len() - count)
}

/// 统一处理读取结束后的数量校验
fn finish(path: &Path, expected: usize, got: usize, surplus: usize) -> Result<usize, DataError> {
    if got == 0 && expected > 0 {
        return Err(DataError::SourceEmpty(path.to_path_buf()));
    }
    if got < expected {
        return Err(DataError::SourceDataShortfall {
            path: path.to_path_buf(),
            expected,
            got,
        });
    }
    if surplus > 0 {
        log::warn!(
            "{}中多出{}个数值，已忽略（只需要{}个）",
            path.display(),
            surplus,
            expected
        );
    }
    Ok(got)
}
