//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，入口层（CLI）所有操作统一返回
//! `Result<T, AppError>`，各子系统错误通过 `#[from]` 自动上转。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `CubemapError` / `RenderError` 提供 `From` 转换，无需手动 map。

use crate::cubemap::CubemapError;
use crate::render::RenderError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 立方体贴图提取流水线错误（加载 / 解码 / 写出 / 预览）
    #[error("{0}")]
    Cubemap(#[from] CubemapError),

    /// 渲染驱动错误
    #[error("{0}")]
    Render(#[from] RenderError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件不可用
    #[error("设置文件错误: {0}")]
    Settings(String),
}
