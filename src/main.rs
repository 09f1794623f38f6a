//! # 立方体贴图工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与结果摘要输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use cubemap_tool::cubemap::{
    CubemapExtractor, ExtractConfig, ExtractionReport, FaceName, LayoutMode, ResampleProfile,
    write_preview_from_dir,
};
use cubemap_tool::error::AppError;
use cubemap_tool::render::{FACE_ORIENTATIONS, RenderConfig, orientation_for};
use cubemap_tool::settings::{AppSettings, load_settings};
use cubemap_tool::storage::output_dir_info;

/// 将全景或网格源图拆分为立方体贴图六个面。
#[derive(Parser)]
#[command(name = "cubemap-tool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON 设置文件（可选，命令行参数优先）。
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 按 4x3 十字布局（或 6 条带兜底）提取六个面并生成预览。
    Extract {
        /// 源图路径。
        source: PathBuf,

        /// 输出目录。
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 每个面的边长（像素）。
        #[arg(short = 's', long)]
        face_size: Option<u32>,

        /// 强制布局，省略时按尺寸自动判定。
        #[arg(short, long)]
        layout: Option<LayoutArg>,

        /// 重采样档位：quality / balanced / speed。
        #[arg(long)]
        profile: Option<String>,

        /// JPEG 质量（1-100）。
        #[arg(short, long)]
        quality: Option<u8>,

        /// 不生成 cubemap_preview.jpg。
        #[arg(long)]
        no_preview: bool,
    },

    /// 在指定矩形区域内按 6 条带切分提取（不生成预览）。
    Region {
        /// 源图路径。
        source: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        left: i64,

        #[arg(long, allow_hyphen_values = true)]
        top: i64,

        #[arg(long, allow_hyphen_values = true)]
        right: i64,

        #[arg(long, allow_hyphen_values = true)]
        bottom: i64,

        /// 输出目录。
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 从目录中已有的面文件重新合成预览。
    Preview {
        /// 包含 <face>.jpg 的目录。
        dir: PathBuf,

        /// 每个面的边长（像素）。
        #[arg(short = 's', long)]
        face_size: Option<u32>,
    },

    /// 输出渲染驱动的六个相机朝向与输出路径（JSON）。
    RenderPlan {
        /// 输出目录。
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 面分辨率。
        #[arg(short, long)]
        resolution: Option<u32>,

        /// 采样数。
        #[arg(long)]
        samples: Option<u32>,

        /// 只输出指定的面（front/back/left/right/top/bottom），可重复。
        #[arg(short, long)]
        face: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Grid,
    Strip,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Grid => LayoutMode::Grid,
            LayoutArg::Strip => LayoutMode::Strip,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match &cli.config {
        Some(path) => load_settings(path)?.unwrap_or_else(|| {
            log::warn!("设置文件 {} 不存在，使用默认值", path.display());
            AppSettings::default()
        }),
        None => AppSettings::default(),
    };

    match cli.command {
        Commands::Extract {
            source,
            output,
            face_size,
            layout,
            profile,
            quality,
            no_preview,
        } => {
            let mut config = base_extract_config(&settings)?;
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(face_size) = face_size {
                config.face_size = face_size;
            }
            if let Some(layout) = layout {
                config.layout_override = Some(layout.into());
            }
            if let Some(profile) = profile {
                config.apply_resample_profile(ResampleProfile::parse(&profile)?);
            }
            if let Some(quality) = quality {
                config.jpeg_quality = quality;
            }
            if no_preview {
                config.write_preview = false;
            }

            let extractor = CubemapExtractor::new(config)?;
            let report = extractor.process_file(&source)?;
            print_summary(&report, &extractor.config().output_dir)
        }
        Commands::Region {
            source,
            left,
            top,
            right,
            bottom,
            output,
        } => {
            let mut config = base_extract_config(&settings)?;
            if let Some(output) = output {
                config.output_dir = output;
            }

            let extractor = CubemapExtractor::new(config)?;
            let report = extractor.process_region_file(&source, Some([left, top, right, bottom]))?;
            print_summary(&report, &extractor.config().output_dir)
        }
        Commands::Preview { dir, face_size } => {
            let config = base_extract_config(&settings)?;
            let face_size = face_size.unwrap_or(config.face_size);
            let (path, set) = write_preview_from_dir(&dir, face_size, config.jpeg_quality)?;
            for (face, state) in set.problems() {
                println!("  {face}: {state}");
            }
            println!("预览已生成: {}", path.display());
            Ok(())
        }
        Commands::RenderPlan {
            output,
            resolution,
            samples,
            face,
        } => {
            let mut config = RenderConfig::default();
            settings.render.apply_to(&mut config);
            if let Some(output) = output {
                config.output_dir = output;
            }
            if let Some(resolution) = resolution {
                config.resolution = resolution;
            }
            if let Some(samples) = samples {
                config.samples = samples;
            }
            config.validate()?;

            let orientations = if face.is_empty() {
                FACE_ORIENTATIONS.to_vec()
            } else {
                face.iter()
                    .map(|name| FaceName::parse(name).map(orientation_for))
                    .collect::<Result<Vec<_>, _>>()?
            };

            let faces: Vec<_> = orientations
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "face": o.face,
                        "axis": o.axis,
                        "euler_degrees": o.euler_degrees,
                        "path": config.face_path(o.face),
                    })
                })
                .collect();
            let plan = serde_json::json!({ "config": config, "faces": faces });

            let text = serde_json::to_string_pretty(&plan)
                .map_err(|e| AppError::Settings(format!("序列化渲染计划失败: {}", e)))?;
            println!("{text}");
            Ok(())
        }
    }
}

fn base_extract_config(settings: &AppSettings) -> Result<ExtractConfig, AppError> {
    let mut config = ExtractConfig::default();
    settings.extract.apply_to(&mut config)?;
    Ok(config)
}

fn print_summary(report: &ExtractionReport, output_dir: &Path) -> Result<(), AppError> {
    let (w, h) = report.source_dimensions;
    println!("源图尺寸: {w}x{h}");
    if let Some(layout) = report.set.layout {
        println!("布局: {}", layout.as_str());
    }
    println!("面尺寸: {}", report.set.face_size);
    for path in &report.written {
        println!("  已保存: {}", path.display());
    }
    for (face, state) in report.set.problems() {
        println!("  {face}: {state}");
    }
    if let Some(preview) = &report.preview {
        println!("预览: {}", preview.display());
    }

    let info = output_dir_info(output_dir)?;
    println!(
        "输出目录: {}（{} 个文件，{:.2} MB）",
        info.path,
        info.file_count,
        info.total_size as f64 / 1024.0 / 1024.0
    );
    Ok(())
}
