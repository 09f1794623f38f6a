//! # 立方体贴图提取模块（cubemap）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载 → 布局判定 → 裁剪归一化 → 写出面文件 → 预览合成”
//! 按职责拆分为多个子模块：
//!
//! - `handler`：编排整条处理流水线（阶段耗时日志）
//! - `loader`：文件读取、签名/尺寸校验与解码
//! - `layout`：布局判定（`LayoutMode`）与裁剪矩形计算
//! - `pipeline`：裁剪、正方形归一化与重采样
//! - `writer`：面文件 JPEG 编码与落盘
//! - `preview`：十字布局预览合成
//! - `config/error/face/source`：配置、错误、面命名、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs / 调用方
//!    ↓
//! handler.rs（CubemapExtractor::process_file）
//!    ├─ loader.rs（读取 + 校验 + 解码 → SourceImage）
//!    ├─ layout.rs（classify_layout → crop_rects）
//!    ├─ pipeline.rs（normalize_face → FaceOutcome）
//!    ├─ writer.rs（<face>.jpg）
//!    └─ preview.rs（cubemap_preview.jpg）
//!    ↓
//! ExtractionReport / CubemapError
//! ```

mod config;
mod error;
mod face;
mod handler;
mod layout;
mod loader;
mod pipeline;
mod preview;
mod source;
mod writer;

pub use config::{
    DEFAULT_FACE_SIZE, ExtractConfig, MAX_FACE_SIZE, PREVIEW_FILE_NAME, ResampleProfile,
    validate_face_size,
};
pub use error::CubemapError;
pub use face::FaceName;
pub use handler::{CubemapExtractor, ExtractionReport};
pub use layout::{CropRect, LayoutMode, classify_layout, crop_rects, grid_rects, strip_rects, strip_width};
pub use pipeline::normalize_face;
pub use preview::{compose_preview, load_cubemap_from_dir, write_preview_from_dir};
pub use source::{CubemapSet, FaceImage, FaceOutcome, SourceImage};
pub use writer::write_cubemap;
pub(crate) use writer::ensure_dir;
