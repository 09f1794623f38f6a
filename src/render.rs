//! # 渲染驱动模块
//!
//! ## 设计思路
//!
//! 三维场景渲染本身由外部渲染引擎完成，本模块只负责驱动：
//! - `RenderConfig`：显式配置记录（输出目录、分辨率、采样数、色深），取代模块级常量
//! - `FaceOrientation`：六个固定的相机朝向（欧拉角，单位：度）
//! - `FaceRenderer`：渲染引擎需要实现的接口
//! - `render_cubemap`：按固定顺序逐面调用渲染器，输出 `<face>.exr`
//!
//! 渲染器失败视为不透明的致命错误，立即中止，不做重试。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::cubemap::FaceName;

/// 渲染管线默认面分辨率。
pub const DEFAULT_RENDER_RESOLUTION: u32 = 4096;
/// 默认路径追踪采样数。
pub const DEFAULT_RENDER_SAMPLES: u32 = 64;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("渲染配置错误：{0}")]
    InvalidConfig(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("渲染器错误：{0}")]
    Renderer(String),
}

/// 输出色深（每通道位数，浮点 EXR）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorDepth {
    #[serde(rename = "16")]
    Half,
    #[serde(rename = "32")]
    Full,
}

impl ColorDepth {
    pub fn bits(self) -> u8 {
        match self {
            ColorDepth::Half => 16,
            ColorDepth::Full => 32,
        }
    }
}

/// 渲染配置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    /// 正方形面的边长（像素）。
    pub resolution: u32,
    pub samples: u32,
    pub color_depth: ColorDepth,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("cubemap_render"),
            resolution: DEFAULT_RENDER_RESOLUTION,
            samples: DEFAULT_RENDER_SAMPLES,
            color_depth: ColorDepth::Full,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.resolution == 0 {
            return Err(RenderError::InvalidConfig("resolution 不能为 0".to_string()));
        }
        if self.samples == 0 {
            return Err(RenderError::InvalidConfig("samples 不能为 0".to_string()));
        }
        Ok(())
    }

    /// 某个面的输出路径：`<output_dir>/<face>.exr`。
    pub fn face_path(&self, face: FaceName) -> PathBuf {
        self.output_dir.join(format!("{}.exr", face.as_str()))
    }
}

/// 一个面的相机朝向。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOrientation {
    pub face: FaceName,
    /// 渲染器坐标系下的轴标签。
    pub axis: &'static str,
    /// XYZ 欧拉角（度）。
    pub euler_degrees: [f32; 3],
}

impl FaceOrientation {
    pub fn euler_radians(&self) -> [f32; 3] {
        self.euler_degrees.map(f32::to_radians)
    }
}

/// 六个固定朝向，按渲染顺序排列。
///
/// 相机位于原点，90° 视场角。
pub const FACE_ORIENTATIONS: [FaceOrientation; 6] = [
    FaceOrientation { face: FaceName::Front, axis: "+X", euler_degrees: [0.0, -90.0, 0.0] },
    FaceOrientation { face: FaceName::Back, axis: "-X", euler_degrees: [0.0, 90.0, 0.0] },
    FaceOrientation { face: FaceName::Right, axis: "+Y", euler_degrees: [-90.0, 0.0, 0.0] },
    FaceOrientation { face: FaceName::Left, axis: "-Y", euler_degrees: [90.0, 0.0, 0.0] },
    FaceOrientation { face: FaceName::Bottom, axis: "+Z", euler_degrees: [0.0, 0.0, 0.0] },
    FaceOrientation { face: FaceName::Top, axis: "-Z", euler_degrees: [0.0, 180.0, 0.0] },
];

/// 查找某个面的朝向。
pub fn orientation_for(face: FaceName) -> FaceOrientation {
    match face {
        FaceName::Front => FACE_ORIENTATIONS[0],
        FaceName::Back => FACE_ORIENTATIONS[1],
        FaceName::Right => FACE_ORIENTATIONS[2],
        FaceName::Left => FACE_ORIENTATIONS[3],
        FaceName::Bottom => FACE_ORIENTATIONS[4],
        FaceName::Top => FACE_ORIENTATIONS[5],
    }
}

/// 外部渲染引擎接口。
///
/// 实现方需在 `output_path` 写出 `config.resolution` 见方、
/// `config.color_depth` 位浮点的 EXR 图像。
pub trait FaceRenderer {
    fn render_face(
        &mut self,
        orientation: &FaceOrientation,
        config: &RenderConfig,
        output_path: &Path,
    ) -> Result<(), RenderError>;
}

/// 单个面的渲染结果。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFace {
    pub face: FaceName,
    pub path: PathBuf,
    pub elapsed_ms: u128,
}

/// 按固定顺序渲染六个面。
pub fn render_cubemap<R: FaceRenderer>(
    renderer: &mut R,
    config: &RenderConfig,
) -> Result<Vec<RenderedFace>, RenderError> {
    config.validate()?;

    fs::create_dir_all(&config.output_dir).map_err(|e| {
        RenderError::FileSystem(format!(
            "创建输出目录 '{}' 失败：{}",
            config.output_dir.display(),
            e
        ))
    })?;

    let mut rendered = Vec::with_capacity(FACE_ORIENTATIONS.len());
    for orientation in FACE_ORIENTATIONS.iter() {
        let path = config.face_path(orientation.face);
        log::info!(
            "🎥 渲染 {}（{}，euler={:?}）...",
            orientation.face,
            orientation.axis,
            orientation.euler_degrees
        );

        let start = Instant::now();
        renderer.render_face(orientation, config, &path)?;
        let elapsed_ms = start.elapsed().as_millis();

        log::info!("💾 已保存 {} -> {}（{}ms）", orientation.face, path.display(), elapsed_ms);
        rendered.push(RenderedFace {
            face: orientation.face,
            path,
            elapsed_ms,
        });
    }

    log::info!(
        "✅ 六个面渲染完成 - 输出目录: {} 分辨率: {} 采样: {} 色深: {}",
        config.output_dir.display(),
        config.resolution,
        config.samples,
        config.color_depth.bits()
    );

    Ok(rendered)
}
