//! 输出目录管理模块
//!
//! # 设计思路
//!
//! 统一管理输出目录：不存在时自动创建，并在运行结束后汇总目录占用，
//! 供 CLI 打印结果摘要。

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::cubemap::ensure_dir;
use crate::error::AppError;

/// 输出目录信息
#[derive(Debug, Clone, Serialize)]
pub struct OutputDirInfo {
    pub path: String,
    pub total_size: u64,
    pub file_count: u64,
}

/// 获取输出目录信息（路径 + 占用大小 + 文件数），目录不存在时自动创建。
pub fn output_dir_info(dir: &Path) -> Result<OutputDirInfo, AppError> {
    ensure_dir(dir)?;
    let mut total_size: u64 = 0;
    let mut file_count: u64 = 0;

    for entry in fs::read_dir(dir)?.flatten() {
        if let Ok(metadata) = entry.metadata() {
            if metadata.is_file() {
                total_size += metadata.len();
                file_count += 1;
            }
        }
    }

    Ok(OutputDirInfo {
        path: dir.to_string_lossy().to_string(),
        total_size,
        file_count,
    })
}
