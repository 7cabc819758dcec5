//! # 常用工具模块
//!
//! 本模块提供单元测试中常用的断言宏

pub mod macro_for_unit_test;
