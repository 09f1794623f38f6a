//! 立方体面命名与十字布局模板。

use serde::{Deserialize, Serialize};

use super::CubemapError;

/// 立方体贴图的六个面。
///
/// 声明顺序即条带模式下的切分顺序（right, left, top, bottom, front, back）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceName {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl FaceName {
    /// 按固定顺序返回全部六个面。
    pub const fn all() -> [FaceName; 6] {
        [
            FaceName::Right,
            FaceName::Left,
            FaceName::Top,
            FaceName::Bottom,
            FaceName::Front,
            FaceName::Back,
        ]
    }

    /// 在 `all()` 中的下标（0-5）。
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 稳定的小写名称，同时用作输出文件名主干。
    pub const fn as_str(self) -> &'static str {
        match self {
            FaceName::Right => "right",
            FaceName::Left => "left",
            FaceName::Top => "top",
            FaceName::Bottom => "bottom",
            FaceName::Front => "front",
            FaceName::Back => "back",
        }
    }

    /// 从外部字符串解析面名称（忽略大小写与首尾空白）。
    pub fn parse(name: &str) -> Result<Self, CubemapError> {
        match name.trim().to_lowercase().as_str() {
            "right" => Ok(FaceName::Right),
            "left" => Ok(FaceName::Left),
            "top" => Ok(FaceName::Top),
            "bottom" => Ok(FaceName::Bottom),
            "front" => Ok(FaceName::Front),
            "back" => Ok(FaceName::Back),
            other => Err(CubemapError::InvalidConfig(format!(
                "未知面名称：{}（可选：right / left / top / bottom / front / back）",
                other
            ))),
        }
    }

    /// 面图片文件名，例如 `front.jpg`。
    pub fn file_name(self) -> String {
        format!("{}.jpg", self.as_str())
    }

    /// 4x3 十字布局中的 (列, 行)。
    ///
    /// ```text
    /// +-----+-----+-----+-----+
    /// |     | top |     |     |
    /// |left |front|right|back |
    /// |     |bottom     |     |
    /// +-----+-----+-----+-----+
    /// ```
    pub const fn grid_cell(self) -> (u32, u32) {
        match self {
            FaceName::Top => (1, 0),
            FaceName::Left => (0, 1),
            FaceName::Front => (1, 1),
            FaceName::Right => (2, 1),
            FaceName::Back => (3, 1),
            FaceName::Bottom => (1, 2),
        }
    }

    /// 十字布局中该面左上角的像素偏移。
    pub const fn grid_offset(self, face_size: u32) -> (u32, u32) {
        let (col, row) = self.grid_cell();
        (col * face_size, row * face_size)
    }
}

impl std::fmt::Display for FaceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
