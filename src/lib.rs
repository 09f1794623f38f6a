//! # 立方体贴图工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  main.rs (clap CLI)                      │
//! │   extract ── region ── preview                           │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<T, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  ├─ cubemap ──── 布局判定 · 裁剪归一化 · 写出 · 预览      │
//! │  ├─ render ───── 渲染驱动（外部渲染引擎接口）             │
//! │  ├─ settings ─── JSON 设置文件                            │
//! │  └─ storage ──── 输出目录创建与统计                       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`cubemap`] | 从十字布局或条带布局源图提取六个面并合成预览 |
//! | [`render`] | 六个固定朝向的渲染驱动与 `FaceRenderer` 接口 |
//! | [`settings`] | 可选 JSON 设置文件的读取与合并 |
//! | [`storage`] | 输出目录的获取、自动创建与占用统计 |

pub mod error;
pub mod cubemap;
pub mod render;
pub mod settings;
pub mod storage;
