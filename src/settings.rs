//! 设置文件模块
//!
//! 可选的 JSON 设置文件，字段均可省略；省略的字段沿用 `ExtractConfig` /
//! `RenderConfig` 默认值，命令行参数再覆盖设置文件。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cubemap::{ExtractConfig, LayoutMode, ResampleProfile};
use crate::error::AppError;
use crate::render::{ColorDepth, RenderConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractSettings {
    pub face_size: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub layout: Option<LayoutMode>,
    pub resample_profile: Option<String>,
    pub jpeg_quality: Option<u8>,
    pub write_preview: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    pub output_dir: Option<PathBuf>,
    pub resolution: Option<u32>,
    pub samples: Option<u32>,
    pub color_depth: Option<ColorDepth>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSettings {
    #[serde(default)]
    pub extract: ExtractSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

/// 读取设置文件；文件不存在时返回 `Ok(None)`。
pub fn load_settings(path: &Path) -> Result<Option<AppSettings>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let parsed = serde_json::from_str::<AppSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    Ok(Some(parsed))
}

impl ExtractSettings {
    /// 将设置合并进提取配置。
    pub fn apply_to(&self, config: &mut ExtractConfig) -> Result<(), AppError> {
        if let Some(face_size) = self.face_size {
            config.face_size = face_size;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(layout) = self.layout {
            config.layout_override = Some(layout);
        }
        if let Some(profile) = &self.resample_profile {
            config.apply_resample_profile(ResampleProfile::parse(profile)?);
        }
        if let Some(quality) = self.jpeg_quality {
            config.jpeg_quality = quality;
        }
        if let Some(write_preview) = self.write_preview {
            config.write_preview = write_preview;
        }
        Ok(())
    }
}

impl RenderSettings {
    /// 将设置合并进渲染配置。
    pub fn apply_to(&self, config: &mut RenderConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(depth) = self.color_depth {
            config.color_depth = depth;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::imageops::FilterType;

    #[test]
    fn partial_settings_override_only_given_fields() {
        let settings: AppSettings = serde_json::from_str(
            r#"{ "extract": { "face_size": 512, "layout": "strip", "resample_profile": "speed" } }"#,
        )
        .unwrap();

        let mut config = ExtractConfig::default();
        settings.extract.apply_to(&mut config).unwrap();
        assert_eq!(config.face_size, 512);
        assert_eq!(config.layout_override, Some(LayoutMode::Strip));
        assert_eq!(config.resize_filter, FilterType::Triangle);
        assert_eq!(config.jpeg_quality, 95);
        assert!(config.write_preview);
    }

    #[test]
    fn render_settings_apply() {
        let settings: AppSettings = serde_json::from_str(
            r#"{ "render": { "resolution": 2048, "samples": 16, "color_depth": "16" } }"#,
        )
        .unwrap();

        let mut config = RenderConfig::default();
        settings.render.apply_to(&mut config);
        assert_eq!(config.resolution, 2048);
        assert_eq!(config.samples, 16);
        assert_eq!(config.color_depth, ColorDepth::Half);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = std::env::temp_dir().join(format!("cubemap-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, r#"{ "extract": { "mipmaps": true } }"#).unwrap();

        assert!(matches!(load_settings(&path), Err(AppError::Settings(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_is_none() {
        let result = load_settings(Path::new("/no/such/settings.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_profile_is_config_error() {
        let settings = ExtractSettings {
            resample_profile: Some("ultra".to_string()),
            ..ExtractSettings::default()
        };
        let mut config = ExtractConfig::default();
        assert!(matches!(
            settings.apply_to(&mut config),
            Err(AppError::Cubemap(_))
        ));
    }
}
