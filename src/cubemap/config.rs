//! # 配置模块
//!
//! ## 设计思路
//!
//! 将一次提取调用需要的全部参数集中到 `ExtractConfig`，作为显式参数传入，
//! 不依赖任何模块级常量。重采样档位（quality / balanced / speed）作为高层语义，
//! 映射到底层滤镜选择。
//!
//! ## 实现思路
//!
//! - `Default` 提供与原始脚本一致的参数（`face_size = 1024`，Lanczos3）。
//! - `validate` 在流水线开始前拒绝无意义的参数组合。
//! - `ResampleProfile` 负责档位字符串解析与反向输出。

use std::path::PathBuf;

use image::imageops::FilterType;

use super::{CubemapError, LayoutMode};

/// 布局提取默认面尺寸。
pub const DEFAULT_FACE_SIZE: u32 = 1024;
/// 面尺寸上限：预览宽度 `4 * face_size` 不能超过 JPEG 的 65535 像素边长。
pub const MAX_FACE_SIZE: u32 = u16::MAX as u32 / 4;
/// 预览文件名。
pub const PREVIEW_FILE_NAME: &str = "cubemap_preview.jpg";

/// 立方体贴图提取配置。
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// 输出面的边长（像素）。
    pub face_size: u32,
    /// 输出目录，不存在时自动创建。
    pub output_dir: PathBuf,
    /// 强制指定布局；为 `None` 时按尺寸自动判定。
    pub layout_override: Option<LayoutMode>,
    /// 重采样滤镜。
    pub resize_filter: FilterType,
    /// JPEG 编码质量（1-100）。
    pub jpeg_quality: u8,
    /// 写出六个面后是否合成预览图。
    pub write_preview: bool,
    /// 源文件体积上限（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            face_size: DEFAULT_FACE_SIZE,
            output_dir: PathBuf::from("cubemap_output"),
            layout_override: None,
            resize_filter: FilterType::Lanczos3,
            jpeg_quality: 95,
            write_preview: true,
            max_file_size: 200 * 1024 * 1024,
            max_decoded_pixels: 400_000_000,
        }
    }
}

impl ExtractConfig {
    /// 校验参数组合。
    pub fn validate(&self) -> Result<(), CubemapError> {
        validate_face_size(self.face_size)?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(CubemapError::InvalidConfig(format!(
                "jpeg_quality 必须在 1~100 之间，当前：{}",
                self.jpeg_quality
            )));
        }
        if self.resize_filter == FilterType::Nearest {
            return Err(CubemapError::InvalidConfig(
                "resize_filter 不能为 Nearest，面缩放需要抗锯齿滤镜".to_string(),
            ));
        }
        if self.max_decoded_pixels == 0 || self.max_file_size == 0 {
            return Err(CubemapError::InvalidConfig(
                "max_decoded_pixels / max_file_size 不能为 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 基于当前滤镜反推重采样档位。
    pub fn infer_resample_profile(&self) -> ResampleProfile {
        match self.resize_filter {
            FilterType::Lanczos3 => ResampleProfile::Quality,
            FilterType::CatmullRom | FilterType::Gaussian => ResampleProfile::Balanced,
            FilterType::Triangle | FilterType::Nearest => ResampleProfile::Speed,
        }
    }

    /// 应用指定重采样档位。
    pub fn apply_resample_profile(&mut self, profile: ResampleProfile) {
        self.resize_filter = match profile {
            ResampleProfile::Quality => FilterType::Lanczos3,
            ResampleProfile::Balanced => FilterType::CatmullRom,
            ResampleProfile::Speed => FilterType::Triangle,
        };
    }
}

/// 校验面尺寸是否在 `1..=MAX_FACE_SIZE` 范围内。
pub fn validate_face_size(face_size: u32) -> Result<(), CubemapError> {
    if face_size == 0 || face_size > MAX_FACE_SIZE {
        return Err(CubemapError::InvalidConfig(format!(
            "face_size 必须在 1~{} 之间，当前：{}",
            MAX_FACE_SIZE, face_size
        )));
    }
    Ok(())
}

/// 重采样档位。
///
/// - `Quality`：Lanczos3，下采样伪影最少
/// - `Balanced`：CatmullRom
/// - `Speed`：双线性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleProfile {
    Quality,
    Balanced,
    Speed,
}

impl ResampleProfile {
    /// 从外部字符串解析档位。
    pub fn parse(profile: &str) -> Result<Self, CubemapError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(CubemapError::InvalidConfig(format!(
                "未知重采样档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExtractConfig::default();
        assert_eq!(config.face_size, 1024);
        assert!(config.validate().is_ok());
        assert_eq!(config.infer_resample_profile(), ResampleProfile::Quality);
    }

    #[test]
    fn validate_rejects_zero_and_oversized_faces() {
        let mut config = ExtractConfig::default();
        config.face_size = 0;
        assert!(matches!(config.validate(), Err(CubemapError::InvalidConfig(_))));

        config.face_size = MAX_FACE_SIZE + 1;
        assert!(matches!(config.validate(), Err(CubemapError::InvalidConfig(_))));
    }

    #[test]
    fn max_face_size_keeps_preview_within_jpeg_limit() {
        assert_eq!(MAX_FACE_SIZE, 16_383);
        assert!(MAX_FACE_SIZE * 4 <= u16::MAX as u32);

        let mut config = ExtractConfig::default();
        config.face_size = MAX_FACE_SIZE;
        assert!(config.validate().is_ok());

        config.face_size = 16_384;
        assert!(matches!(config.validate(), Err(CubemapError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_nearest_filter_and_bad_quality() {
        let mut config = ExtractConfig::default();
        config.resize_filter = FilterType::Nearest;
        assert!(config.validate().is_err());

        let mut config = ExtractConfig::default();
        config.jpeg_quality = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn profile_round_trip() {
        let mut config = ExtractConfig::default();
        for name in ["quality", "balanced", "speed"] {
            let profile = ResampleProfile::parse(name).unwrap();
            config.apply_resample_profile(profile);
            assert_eq!(config.infer_resample_profile(), profile);
            assert_eq!(profile.as_str(), name);
        }
        assert!(ResampleProfile::parse("ultra").is_err());
    }
}
