//! # 十字布局预览合成
//!
//! ## 设计思路
//!
//! 预览画布固定为 `(4 * face_size) x (3 * face_size)`，背景为黑色。
//! 每个就绪面按 `FaceName::grid_offset` 贴到对应格子；
//! 退化或缺失的面对应格子保持空白，合成照常进行。
//!
//! 从磁盘合成时，先把 `<face>.jpg` 重建为 `CubemapSet`（找不到的文件记为
//! `FaceOutcome::Missing`），再走与内存路径相同的合成逻辑。

use std::path::{Path, PathBuf};

use image::RgbImage;

use super::config::{PREVIEW_FILE_NAME, validate_face_size};
use super::writer::write_jpeg;
use super::{CropRect, CubemapError, CubemapSet, FaceImage, FaceName, FaceOutcome};

/// 将集合合成为十字布局预览图。
pub fn compose_preview(set: &CubemapSet) -> RgbImage {
    let fs = set.face_size;
    let mut canvas = RgbImage::new(fs * 4, fs * 3);

    for (face, outcome) in set.iter() {
        if let FaceOutcome::Ready(image) = outcome {
            let (x, y) = face.grid_offset(fs);
            image::imageops::replace(&mut canvas, &image.pixels, x as i64, y as i64);
        }
    }

    canvas
}

/// 从目录中的 `<face>.jpg` 重建集合；缺失的文件记为 `Missing`。
///
/// `face_size` 超出 `1..=MAX_FACE_SIZE` 或文件存在但无法解码时视为致命错误。
pub fn load_cubemap_from_dir(dir: &Path, face_size: u32) -> Result<CubemapSet, CubemapError> {
    validate_face_size(face_size)?;
    let mut set = CubemapSet::empty(face_size, None);

    for face in FaceName::all() {
        let path = dir.join(face.file_name());
        if !path.exists() {
            log::warn!("⚠️ 预览合成缺少面文件：{}，该格子留空", path.display());
            continue;
        }

        let pixels = image::open(&path)
            .map_err(|e| CubemapError::Decode(format!("无法解码面文件 '{}'：{}", path.display(), e)))?
            .into_rgb8();

        if pixels.dimensions() != (face_size, face_size) {
            log::warn!(
                "⚠️ 面文件 {} 尺寸为 {}x{}，与 face_size={} 不一致，按原尺寸粘贴",
                path.display(),
                pixels.width(),
                pixels.height(),
                face_size
            );
        }

        let crop = CropRect {
            left: 0,
            top: 0,
            right: pixels.width(),
            bottom: pixels.height(),
        };
        set.set(face, FaceOutcome::Ready(FaceImage { face, crop, pixels }));
    }

    Ok(set)
}

/// 从目录合成预览并写出 `cubemap_preview.jpg`。
pub fn write_preview_from_dir(
    dir: &Path,
    face_size: u32,
    quality: u8,
) -> Result<(PathBuf, CubemapSet), CubemapError> {
    let set = load_cubemap_from_dir(dir, face_size)?;
    let preview = compose_preview(&set);

    let path = dir.join(PREVIEW_FILE_NAME);
    write_jpeg(&path, &preview, quality)?;

    log::info!(
        "🖼️ 已生成预览：{}（{}/6 个面）",
        path.display(),
        set.ready_count()
    );

    Ok((path, set))
}
