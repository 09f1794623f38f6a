//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载立方体贴图提取链路中的所有致命错误来源。
//! 非致命情况（布局不匹配、退化裁剪、预览时缺失面文件）不走错误通道，
//! 而是由 `LayoutMode` / `FaceOutcome` 显式表达。

/// 立方体贴图处理统一错误类型。
///
/// 该类型会在入口层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum CubemapError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}
