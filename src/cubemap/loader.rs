//! # 源图加载模块
//!
//! ## 设计思路
//!
//! 加载阶段先做廉价校验（存在性、体积、文件签名、头部尺寸），
//! 通过后才进行完整解码，避免超大输入触发高内存开销。
//! 任一校验或解码失败都会直接中止本次调用，不做重试。

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::{CubemapError, CubemapExtractor, ExtractConfig, SourceImage};

impl CubemapExtractor {
    /// 从本地文件加载并解码源图。
    pub fn load_source(&self, path: &Path) -> Result<SourceImage, CubemapError> {
        log::info!("📁 开始读取源图 - 路径: {}", path.display());

        if !path.exists() {
            return Err(CubemapError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| CubemapError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > self.config.max_file_size {
            return Err(CubemapError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| CubemapError::FileSystem(format!("无法读取图片文件：{}", e)))?;

        Self::decode_source(bytes, &path.display().to_string(), &self.config)
    }

    /// 将内存中的图片字节解码为 `SourceImage`。
    pub fn decode_source(
        bytes: Vec<u8>,
        source_hint: &str,
        config: &ExtractConfig,
    ) -> Result<SourceImage, CubemapError> {
        Self::validate_image_signature(&bytes)?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CubemapError::InvalidFormat(format!("无法识别图片格式：{}", e)))?
            .decode()
            .map_err(|e| CubemapError::Decode(format!("图片解码失败：{}", e)))?;

        log::info!(
            "✅ 源图解码成功 - 来源: {} 尺寸: {}x{} 颜色: {:?}",
            source_hint,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(SourceImage::new(decoded, source_hint))
    }

    /// 仅通过图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), CubemapError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CubemapError::InvalidFormat(format!("无法识别图片格式：{}", e)))?
            .into_dimensions()
            .map_err(|e| CubemapError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &ExtractConfig,
        width: u32,
        height: u32,
    ) -> Result<(), CubemapError> {
        let pixels = (width as u64) * (height as u64);

        if pixels > config.max_decoded_pixels {
            return Err(CubemapError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), CubemapError> {
        if bytes.is_empty() {
            return Err(CubemapError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| CubemapError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(CubemapError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}
