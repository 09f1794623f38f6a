//! # 数据源与中间模型
//!
//! - `SourceImage`：已解码、只读的源图
//! - `FaceImage`：某个面的正方形 RGB 结果
//! - `FaceOutcome`：单个面的显式结果（就绪 / 退化 / 缺失）
//! - `CubemapSet`：一次调用的最终产物，六个面始终齐全

use image::{DynamicImage, GenericImageView, RgbImage};

use super::{CropRect, FaceName, LayoutMode};

/// 已解码的源图。
///
/// 由单次调用独占，调用结束（包括出错路径）时随作用域释放。
pub struct SourceImage {
    pub(crate) image: DynamicImage,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

impl SourceImage {
    pub fn new(image: DynamicImage, source_hint: impl Into<String>) -> Self {
        Self {
            image,
            source_hint: source_hint.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn source_hint(&self) -> &str {
        &self.source_hint
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// 单个面的正方形图像。
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    pub face: FaceName,
    /// 该面在源图中的裁剪矩形。
    pub crop: CropRect,
    pub pixels: RgbImage,
}

impl FaceImage {
    /// 面边长。
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }
}

/// 单个面的处理结果。
#[derive(Debug, Clone, PartialEq)]
pub enum FaceOutcome {
    /// 已裁剪并归一化为 `face_size x face_size`。
    Ready(FaceImage),
    /// 钳制后的裁剪矩形面积为零，未生成图像。
    Degenerate(CropRect),
    /// 预览合成时存储中找不到该面的文件。
    Missing,
}

impl FaceOutcome {
    pub fn as_ready(&self) -> Option<&FaceImage> {
        match self {
            FaceOutcome::Ready(face) => Some(face),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FaceOutcome::Ready(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            FaceOutcome::Ready(_) => "ready",
            FaceOutcome::Degenerate(_) => "degenerate",
            FaceOutcome::Missing => "missing",
        }
    }
}

/// 一次提取调用的完整产物。
///
/// 以 `FaceName::index()` 为下标存放，六个面始终存在。
#[derive(Debug, Clone, PartialEq)]
pub struct CubemapSet {
    pub face_size: u32,
    /// 产生该结果的布局；从磁盘重建时为 `None`。
    pub layout: Option<LayoutMode>,
    faces: [FaceOutcome; 6],
}

impl CubemapSet {
    /// 所有面初始为 `Missing` 的空集合。
    pub fn empty(face_size: u32, layout: Option<LayoutMode>) -> Self {
        Self {
            face_size,
            layout,
            faces: std::array::from_fn(|_| FaceOutcome::Missing),
        }
    }

    pub fn set(&mut self, face: FaceName, outcome: FaceOutcome) {
        self.faces[face.index()] = outcome;
    }

    pub fn get(&self, face: FaceName) -> &FaceOutcome {
        &self.faces[face.index()]
    }

    /// 按 `FaceName::all()` 顺序遍历。
    pub fn iter(&self) -> impl Iterator<Item = (FaceName, &FaceOutcome)> {
        FaceName::all().into_iter().zip(self.faces.iter())
    }

    pub fn ready_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_ready()).count()
    }

    /// 非就绪的面及其状态。
    pub fn problems(&self) -> Vec<(FaceName, &'static str)> {
        self.iter()
            .filter(|(_, outcome)| !outcome.is_ready())
            .map(|(face, outcome)| (face, outcome.label()))
            .collect()
    }
}
