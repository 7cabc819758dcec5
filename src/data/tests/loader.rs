//! 数值向量加载器单元测试

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use super::write_temp_file;
use crate::data::{DataError, load_vector, read_vector};

// ==================== 分隔文本 ====================

/// 逗号分隔
#[test]
fn test_load_comma_separated() {
    let path = write_temp_file("comma.csv", "1.5,-2,3e-1,+4\n");
    let mut dest = [0.0; 4];

    let count = load_vector(&path, &mut dest).unwrap();

    assert_eq!(count, 4);
    assert_abs_diff_eq!(dest[0], 1.5);
    assert_abs_diff_eq!(dest[1], -2.0);
    assert_abs_diff_eq!(dest[2], 0.3, epsilon = 1e-7);
    assert_abs_diff_eq!(dest[3], 4.0);
}

/// 逗号与空白混用、多行、行尾多余逗号
#[test]
fn test_load_mixed_separators() {
    let path = write_temp_file("mixed.csv", "1, 2,3\n4\t5 ,\r\n6,\n");
    let values = read_vector(&path, 6).unwrap();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

/// 数值多于所需时只读取前面部分
#[test]
fn test_load_surplus_is_ignored() {
    let path = write_temp_file("surplus.csv", "1,2,3,4,5");
    let mut dest = [0.0; 3];

    let count = load_vector(&path, &mut dest).unwrap();

    assert_eq!(count, 3);
    assert_eq!(dest, [1.0, 2.0, 3.0]);
}

// ==================== 错误情况 ====================

/// 文件不存在
#[test]
fn test_load_missing_source() {
    let path = std::env::temp_dir().join("only_infer_definitely_missing.csv");
    let mut dest = [0.0; 2];

    let result = load_vector(&path, &mut dest);
    assert_eq!(result, Err(DataError::SourceNotFound(path)));
}

/// 空文件（只有空白）
#[test]
fn test_load_empty_source() {
    let path = write_temp_file("empty.csv", " \n\n ");
    let mut dest = [0.0; 2];

    let result = load_vector(&path, &mut dest);
    assert_eq!(result, Err(DataError::SourceEmpty(path)));
}

/// 数值不足
#[test]
fn test_load_shortfall() {
    let path = write_temp_file("shortfall.csv", "1,2,3");
    let mut dest = [0.0; 5];

    let result = load_vector(&path, &mut dest);
    assert_eq!(
        result,
        Err(DataError::SourceDataShortfall {
            path,
            expected: 5,
            got: 3,
        })
    );
}

/// 无法解析的内容
#[test]
fn test_load_malformed_token() {
    let path = write_temp_file("malformed.csv", "1,2;3,4");
    let mut dest = [0.0; 3];

    let result = load_vector(&path, &mut dest);
    assert_eq!(
        result,
        Err(DataError::SourceMalformed {
            path,
            token: "2;3".to_string(),
        })
    );
}

// ==================== npy ====================

/// 二维`.npy`按行优先展平
#[test]
fn test_load_npy_row_major() {
    let path = std::env::temp_dir().join(format!("only_infer_{}_w.npy", std::process::id()));
    let array = Array2::from_shape_vec((2, 3), vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    ndarray_npy::write_npy(&path, &array).unwrap();

    let values = read_vector(&path, 6).unwrap();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let result = read_vector(&path, 7);
    assert_eq!(
        result,
        Err(DataError::SourceDataShortfall {
            path,
            expected: 7,
            got: 6,
        })
    );
}

/// 损坏的`.npy`
#[test]
fn test_load_npy_corrupted() {
    let path = write_temp_file("corrupted.npy", "not a numpy file");
    let result = read_vector(&path, 2);
    assert!(matches!(result, Err(DataError::SourceUnreadable { .. })));
}
