//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `CubemapExtractor` 只负责流程编排，处理链路固定为：
//! 1. 加载并解码源图
//! 2. 判定布局（或使用调用方覆盖的布局）
//! 3. 计算六个裁剪矩形并逐面归一化
//! 4. 写出六个面文件
//! 5. （可选）从磁盘合成十字预览
//!
//! 全程单线程同步执行；任一致命错误立即中止，源图随作用域释放。
//! 记录 `load/extract/write/preview/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::layout::{crop_rects, strip_width};
use super::pipeline::normalize_face;
use super::preview::write_preview_from_dir;
use super::writer::write_cubemap;
use super::{
    classify_layout, CropRect, CubemapError, CubemapSet, ExtractConfig, FaceName, FaceOutcome,
    LayoutMode, SourceImage,
};

/// 立方体贴图提取器。
pub struct CubemapExtractor {
    pub(super) config: ExtractConfig,
}

/// 一次完整调用的结果摘要。
#[derive(Debug)]
pub struct ExtractionReport {
    pub source_dimensions: (u32, u32),
    pub set: CubemapSet,
    pub written: Vec<PathBuf>,
    pub preview: Option<PathBuf>,
}

impl CubemapExtractor {
    /// 校验配置并创建提取器。
    pub fn new(config: ExtractConfig) -> Result<Self, CubemapError> {
        config.validate()?;
        log::debug!(
            "⚙️ 提取器初始化 - face_size={} 重采样档位={} 质量={}",
            config.face_size,
            config.infer_resample_profile().as_str(),
            config.jpeg_quality
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// 实际使用的布局：优先取覆盖值，否则按尺寸判定。
    pub fn resolve_layout(&self, width: u32, height: u32) -> LayoutMode {
        match self.config.layout_override {
            Some(mode) => {
                log::info!("📐 使用指定布局：{}", mode.as_str());
                mode
            }
            None => {
                let mode = classify_layout(width, height, self.config.face_size);
                if mode == LayoutMode::Strip {
                    log::info!(
                        "📐 源图 {}x{} 放不下 {}px 十字布局，回退为 6 条带模式",
                        width,
                        height,
                        self.config.face_size
                    );
                }
                mode
            }
        }
    }

    /// 按整图布局提取六个面。
    pub fn extract(&self, source: &SourceImage) -> CubemapSet {
        let (width, height) = source.dimensions();
        let face_size = self.config.face_size;
        let mode = self.resolve_layout(width, height);

        let mut set = CubemapSet::empty(face_size, Some(mode));
        for (face, rect) in crop_rects(mode, width, height, face_size) {
            let outcome = normalize_face(
                source.image(),
                face,
                rect,
                face_size,
                self.config.resize_filter,
            );
            set.set(face, outcome);
        }

        log::info!(
            "✅ 提取完成 - 布局: {} 就绪: {}/6",
            mode.as_str(),
            set.ready_count()
        );
        set
    }

    /// 在指定区域内按 6 条带切分提取。
    ///
    /// 面尺寸取 `min(条带宽度, 区域高度)`；区域为 `None` 时使用整图。
    /// 返回的裁剪矩形均为源图坐标。
    pub fn extract_region(&self, source: &SourceImage, region: Option<[i64; 4]>) -> CubemapSet {
        let (width, height) = source.dimensions();
        let [l, t, r, b] = region.unwrap_or([0, 0, width as i64, height as i64]);
        let region = CropRect::clamped(l, t, r, b, width, height);

        let sw = strip_width(region.width());
        let face_size = sw.min(region.height());
        log::info!(
            "📐 区域模式 - 区域: {} 条带宽度: {} 面尺寸: {}",
            region,
            sw,
            face_size
        );

        let mut set = CubemapSet::empty(face_size, Some(LayoutMode::Strip));
        for face in FaceName::all() {
            let i = face.index() as u32;
            let rect = CropRect {
                left: region.left + i * sw,
                top: region.top,
                right: region.left + (i + 1) * sw,
                bottom: region.bottom,
            };
            let outcome = if face_size == 0 {
                FaceOutcome::Degenerate(rect)
            } else {
                normalize_face(source.image(), face, rect, face_size, self.config.resize_filter)
            };
            set.set(face, outcome);
        }

        set
    }

    /// 处理主入口：加载源图、提取、写出面文件，并按配置合成预览。
    pub fn process_file(&self, source_path: &Path) -> Result<ExtractionReport, CubemapError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let source = self.load_source(source_path)?;
        let load_elapsed = load_start.elapsed();

        let extract_start = Instant::now();
        let set = self.extract(&source);
        let extract_elapsed = extract_start.elapsed();
        let source_dimensions = source.dimensions();
        drop(source);

        let write_start = Instant::now();
        let written = write_cubemap(&set, &self.config.output_dir, self.config.jpeg_quality)?;
        let write_elapsed = write_start.elapsed();

        let preview_start = Instant::now();
        let preview = if self.config.write_preview {
            let (path, _) = write_preview_from_dir(
                &self.config.output_dir,
                self.config.face_size,
                self.config.jpeg_quality,
            )?;
            Some(path)
        } else {
            None
        };
        let preview_elapsed = preview_start.elapsed();

        log::info!(
            "✅ 立方体贴图生成完成 - load={}ms extract={}ms write={}ms preview={}ms total={}ms 输出目录: {}",
            load_elapsed.as_millis(),
            extract_elapsed.as_millis(),
            write_elapsed.as_millis(),
            preview_elapsed.as_millis(),
            total_start.elapsed().as_millis(),
            self.config.output_dir.display()
        );

        Ok(ExtractionReport {
            source_dimensions,
            set,
            written,
            preview,
        })
    }

    /// 区域模式入口：不生成预览。
    pub fn process_region_file(
        &self,
        source_path: &Path,
        region: Option<[i64; 4]>,
    ) -> Result<ExtractionReport, CubemapError> {
        let total_start = Instant::now();

        let source = self.load_source(source_path)?;
        let source_dimensions = source.dimensions();
        let set = self.extract_region(&source, region);
        drop(source);

        let written = write_cubemap(&set, &self.config.output_dir, self.config.jpeg_quality)?;

        log::info!(
            "✅ 区域立方体贴图生成完成 - face_size={} 写出 {} 个面 total={}ms",
            set.face_size,
            written.len(),
            total_start.elapsed().as_millis()
        );

        Ok(ExtractionReport {
            source_dimensions,
            set,
            written,
            preview: None,
        })
    }
}
