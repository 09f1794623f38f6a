//! # 布局分类与裁剪矩形计算
//!
//! ## 设计思路
//!
//! 布局判定是一个纯函数：只依赖源图宽高与 `face_size`，返回显式的
//! `LayoutMode`，调用方可以查看或覆盖判定结果。
//!
//! - `Grid`：标准 4x3 十字布局，每个面占据 `face_size` 整数倍的格子
//! - `Strip`：十字布局放不下时的兜底，整图宽度等分为 6 条竖直条带
//!
//! 所有矩形最终都会被钳制到图像范围内。钳制可能产生零面积矩形，
//! 这种情况保留下来，由 `CropRect::is_degenerate` 暴露给下游。

use serde::{Deserialize, Serialize};

use super::FaceName;

/// 布局模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// 4 列 x 3 行十字布局。
    Grid,
    /// 6 条等宽竖直条带。
    Strip,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Grid => "grid",
            LayoutMode::Strip => "strip",
        }
    }
}

/// 源图中的像素矩形 `(left, top, right, bottom)`，右/下边界为开区间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// 由任意（可能越界、可能为负）的边界构造，并钳制到 `width x height` 内。
    ///
    /// 钳制后若右边界落到左边界左侧，则收缩为零宽度；上下边界同理。
    pub fn clamped(left: i64, top: i64, right: i64, bottom: i64, width: u32, height: u32) -> Self {
        let w = width as i64;
        let h = height as i64;

        let left = left.clamp(0, w);
        let top = top.clamp(0, h);
        let right = right.min(w).max(left);
        let bottom = bottom.min(h).max(top);

        Self {
            left: left as u32,
            top: top as u32,
            right: right as u32,
            bottom: bottom as u32,
        }
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// 宽或高为零。
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.left, self.top, self.right, self.bottom)
    }
}

/// 根据源图尺寸判定布局模式。
///
/// 当且仅当 `width >= 4 * face_size` 且 `height >= 3 * face_size` 时返回 `Grid`，
/// 否则静默回退为 `Strip`。
pub fn classify_layout(width: u32, height: u32, face_size: u32) -> LayoutMode {
    let fs = face_size as u64;
    if width as u64 >= fs * 4 && height as u64 >= fs * 3 {
        LayoutMode::Grid
    } else {
        LayoutMode::Strip
    }
}

/// 十字布局下六个面的原始（未钳制）矩形，只依赖 `face_size`。
pub fn grid_rects(face_size: u32) -> [(FaceName, [i64; 4]); 6] {
    let fs = face_size as i64;
    FaceName::all().map(|face| {
        let (col, row) = face.grid_cell();
        let (col, row) = (col as i64, row as i64);
        (face, [col * fs, row * fs, (col + 1) * fs, (row + 1) * fs])
    })
}

/// 条带宽度：整图宽度整除 6。
pub fn strip_width(width: u32) -> u32 {
    width / 6
}

/// 条带布局下六个面的原始矩形，按 `FaceName::all()` 的顺序从左到右排列。
pub fn strip_rects(width: u32, height: u32) -> [(FaceName, [i64; 4]); 6] {
    let sw = strip_width(width) as i64;
    let h = height as i64;
    FaceName::all().map(|face| {
        let i = face.index() as i64;
        (face, [i * sw, 0, (i + 1) * sw, h])
    })
}

/// 计算指定布局下六个面钳制后的裁剪矩形。
pub fn crop_rects(
    mode: LayoutMode,
    width: u32,
    height: u32,
    face_size: u32,
) -> [(FaceName, CropRect); 6] {
    let raw = match mode {
        LayoutMode::Grid => grid_rects(face_size),
        LayoutMode::Strip => strip_rects(width, height),
    };

    raw.map(|(face, [l, t, r, b])| (face, CropRect::clamped(l, t, r, b, width, height)))
}
