//! # 裁剪与归一化流水线
//!
//! ## 设计思路
//!
//! 每个面固定走“裁剪 → 转 RGB → 必要时重采样到正方形”三步：
//!
//! 1. 退化矩形（零宽或零高）直接返回 `FaceOutcome::Degenerate`，不尝试重采样
//! 2. 裁剪区域不是正方形：直接拉伸到 `face_size x face_size`，不保持宽高比
//! 3. 已是正方形但边长不等于 `face_size`：同样重采样到 `face_size`
//! 4. 已是 `face_size` 正方形：原样使用
//!
//! 重采样优先使用 `fast_image_resize` 卷积（抗锯齿），失败时回退到
//! `image::imageops::resize`。

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use super::{CropRect, CubemapError, FaceImage, FaceName, FaceOutcome};

/// 从源图裁剪出一个面并归一化到 `face_size x face_size`。
pub fn normalize_face(
    image: &DynamicImage,
    face: FaceName,
    rect: CropRect,
    face_size: u32,
    filter: FilterType,
) -> FaceOutcome {
    if rect.is_degenerate() || face_size == 0 {
        log::warn!("⚠️ 面 {} 裁剪区域退化：{}，跳过", face, rect);
        return FaceOutcome::Degenerate(rect);
    }

    let cropped = image
        .crop_imm(rect.left, rect.top, rect.width(), rect.height())
        .into_rgb8();

    let needs_resample = !rect.is_square() || rect.width() != face_size;
    let pixels = if needs_resample {
        log::debug!(
            "🧩 面 {} 重采样：{}x{} -> {}x{}（filter={:?}）",
            face,
            rect.width(),
            rect.height(),
            face_size,
            face_size,
            filter
        );
        resize_exact(cropped, face_size, face_size, filter)
    } else {
        cropped
    };

    FaceOutcome::Ready(FaceImage {
        face,
        crop: rect,
        pixels,
    })
}

/// 精确缩放到目标尺寸，`fast_image_resize` 失败时回退到 `image` 自带实现。
pub(crate) fn resize_exact(
    image: RgbImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> RgbImage {
    match resize_with_fast_image_resize(&image, target_width, target_height, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 重采样失败，回退 image::imageops::resize：{}",
                err
            );
            image::imageops::resize(&image, target_width, target_height, filter)
        }
    }
}

fn resize_with_fast_image_resize(
    image: &RgbImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbImage, CubemapError> {
    let (src_width, src_height) = image.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        image.as_raw().clone(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| CubemapError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x3);

    let mut resizer = fr::Resizer::new();
    let options =
        fr::ResizeOptions::new().resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| CubemapError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

    RgbImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| CubemapError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
