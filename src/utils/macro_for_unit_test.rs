/// 错误断言宏 - 灵活粒度验证 Result 错误
///
/// # 用法
/// - `assert_err!(expr)`：只验证是 Err
/// - `assert_err!(expr, Variant(literal))`：验证错误类型 + 精确消息（String 变体）
/// - `assert_err!(expr, NetError::BuildShapeMismatch(constraint, expected, got))`：验证形状错误的关键字段
/// - `assert_err!(expr, NetError::LengthMismatch(expected, got))`：验证拷贝长度错误
/// - `assert_err!(expr, Pattern { .. })`：验证错误类型
/// - `assert_err!(expr, Pattern { field, .. } if condition)`：验证类型 + 条件
///
/// # 示例
/// ```ignore
/// // 只验证是错误
/// assert_err!(result);
///
/// // 验证错误类型 + 精确消息
/// assert_err!(result, NetError::ConvolutionConfigMissing("卷积核数据未设置"));
///
/// // 形状错误简洁语法（按顺序：constraint, expected, got）
/// assert_err!(result, NetError::BuildShapeMismatch(ShapeConstraint::InputSize, 4, 3));
///
/// // 验证类型 + 关键字段
/// assert_err!(result, NetError::BuildPriorLayerInvalid { layer } if *layer == 1);
/// ```
#[macro_export]
macro_rules! assert_err {
    // 只验证是 Err
    ($expr:expr) => {
        assert!($expr.is_err(), "预期 Err，实际得到 {:?}", $expr);
    };
    // 简洁语法：Variant(字符串字面量) - 精确匹配 String 内容
    ($expr:expr, $err_type:ident :: $variant:ident ( $expected:literal )) => {
        match &$expr {
            Err($err_type::$variant(actual)) => assert_eq!(
                actual, $expected,
                "错误消息不匹配：预期 `{}`，实际得到 `{}`",
                $expected, actual
            ),
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::{}`，实际得到 `{:?}`",
                stringify!($err_type), stringify!($variant), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::{})，实际得到 Ok({:?})",
                stringify!($err_type), stringify!($variant), v
            ),
        }
    };
    // 简洁语法：BuildShapeMismatch(constraint, expected, got)
    ($expr:expr, $err_type:ident :: BuildShapeMismatch ( $constraint:expr, $exp:expr, $got:expr )) => {
        match &$expr {
            Err($err_type::BuildShapeMismatch { constraint, expected, got, .. }) => {
                assert_eq!(*constraint, $constraint, "constraint 不匹配");
                assert_eq!(*expected, $exp, "expected 不匹配");
                assert_eq!(*got, $got, "got 不匹配");
            }
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::BuildShapeMismatch`，实际得到 `{:?}`",
                stringify!($err_type), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::BuildShapeMismatch)，实际得到 Ok({:?})",
                stringify!($err_type), v
            ),
        }
    };
    // 简洁语法：LengthMismatch(expected, got)
    ($expr:expr, $err_type:ident :: LengthMismatch ( $exp:expr, $got:expr )) => {
        match &$expr {
            Err($err_type::LengthMismatch { expected, got }) => {
                assert_eq!(*expected, $exp, "expected 不匹配");
                assert_eq!(*got, $got, "got 不匹配");
            }
            Err(e) => panic!(
                "错误类型不匹配：预期 `{}::LengthMismatch`，实际得到 `{:?}`",
                stringify!($err_type), e
            ),
            Ok(v) => panic!(
                "预期 Err({}::LengthMismatch)，实际得到 Ok({:?})",
                stringify!($err_type), v
            ),
        }
    };
    // 通用模式匹配（带 if guard 或复杂 pattern）
    ($expr:expr, $($pattern:tt)+) => {
        match &$expr {
            Err(e) => assert!(
                matches!(e, $($pattern)+),
                "错误类型不匹配：预期 `{}`，实际得到 `{:?}`",
                stringify!($($pattern)+),
                e
            ),
            Ok(v) => panic!(
                "预期 Err 匹配 `{}`，实际得到 Ok({:?})",
                stringify!($($pattern)+),
                v
            ),
        }
    };
}

/// panic 断言宏
///
/// - `assert_panic!(expr)`：只验证会 panic
/// - `assert_panic!(expr, msg)`：验证 panic 消息与`msg.to_string()`完全一致
#[macro_export]
macro_rules! assert_panic {
    ($expr:expr) => {
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr));
        assert!(caught.is_err(), "表达式没有触发panic");
    };
    ($expr:expr, $expected_msg:expr) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $expr)) {
            Ok(_) => panic!("表达式没有触发panic"),
            Err(payload) => {
                let expected = $expected_msg.to_string();
                match $crate::utils::macro_for_unit_test::panic_message(payload.as_ref()) {
                    Some(actual) => assert_eq!(actual, expected, "panic消息与预期不符"),
                    None => panic!("未找到预期的panic消息，预期的panic消息为: {}", expected),
                }
            }
        }
    };
}

/// 从`catch_unwind`得到的载荷中取出 panic 消息
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&'static str>()
        .map(|msg| (*msg).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}
