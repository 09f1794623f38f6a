//! # 面文件持久化
//!
//! 每个就绪面写为 `<face_name>.jpg`；退化或缺失的面不写文件，只记录警告。
//! 目录中同名的旧面文件会被删除，保证磁盘上的面集合与本次结果一致。

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use super::{CubemapError, CubemapSet, FaceOutcome};

/// 确保输出目录存在。
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), CubemapError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            CubemapError::FileSystem(format!("创建输出目录 '{}' 失败：{}", dir.display(), e))
        })?;
    }
    Ok(())
}

/// 以指定质量将 RGB 图像编码为 JPEG 文件。
pub(crate) fn write_jpeg(path: &Path, image: &RgbImage, quality: u8) -> Result<(), CubemapError> {
    let file = File::create(path).map_err(|e| {
        CubemapError::FileSystem(format!("无法创建文件 '{}'：{}", path.display(), e))
    })?;
    let writer = BufWriter::new(file);

    JpegEncoder::new_with_quality(writer, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| CubemapError::Encode(format!("写入 '{}' 失败：{}", path.display(), e)))
}

/// 删除上一次运行遗留的面文件。
fn remove_stale_face(path: &Path) -> Result<(), CubemapError> {
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(path).map_err(|e| {
        CubemapError::FileSystem(format!("删除旧面文件 '{}' 失败：{}", path.display(), e))
    })?;
    log::warn!("🗑️ 已删除旧面文件：{}", path.display());
    Ok(())
}

/// 将集合中的就绪面写入 `output_dir`，返回写出的文件路径。
pub fn write_cubemap(
    set: &CubemapSet,
    output_dir: &Path,
    quality: u8,
) -> Result<Vec<PathBuf>, CubemapError> {
    ensure_dir(output_dir)?;

    let mut written = Vec::with_capacity(6);
    for (face, outcome) in set.iter() {
        let path = output_dir.join(face.file_name());
        match outcome {
            FaceOutcome::Ready(image) => {
                write_jpeg(&path, &image.pixels, quality)?;
                log::info!("💾 已保存面 {} -> {}", face, path.display());
                written.push(path);
            }
            FaceOutcome::Degenerate(rect) => {
                log::warn!("⚠️ 面 {} 裁剪区域退化 {}，未写出文件", face, rect);
                remove_stale_face(&path)?;
            }
            FaceOutcome::Missing => {
                log::warn!("⚠️ 面 {} 缺失，未写出文件", face);
                remove_stale_face(&path)?;
            }
        }
    }

    Ok(written)
}
