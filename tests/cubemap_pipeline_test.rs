// End-to-end tests for layout extraction, persistence and preview composition
use std::fs;
use std::path::PathBuf;

use cubemap_tool::cubemap::{
    CubemapExtractor, ExtractConfig, FaceName, FaceOutcome, LayoutMode, PREVIEW_FILE_NAME,
    SourceImage, compose_preview, load_cubemap_from_dir, write_cubemap, write_preview_from_dir,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cubemap-it-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn face_color(face: FaceName) -> Rgb<u8> {
    match face {
        FaceName::Right => Rgb([255, 0, 0]),
        FaceName::Left => Rgb([0, 255, 0]),
        FaceName::Top => Rgb([0, 0, 255]),
        FaceName::Bottom => Rgb([255, 255, 0]),
        FaceName::Front => Rgb([0, 255, 255]),
        FaceName::Back => Rgb([255, 0, 255]),
    }
}

/// 十字布局合成图：每个面位置填充纯色，其余格子为灰色。
fn cross_source(face_size: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(face_size * 4, face_size * 3, Rgb([128, 128, 128]));
    for face in FaceName::all() {
        let (ox, oy) = face.grid_offset(face_size);
        for y in oy..oy + face_size {
            for x in ox..ox + face_size {
                image.put_pixel(x, y, face_color(face));
            }
        }
    }
    image
}

fn assert_close(actual: &Rgb<u8>, expected: &Rgb<u8>, tolerance: i16) {
    for (a, e) in actual.0.iter().zip(expected.0.iter()) {
        assert!(
            (*a as i16 - *e as i16).abs() <= tolerance,
            "pixel {:?} differs from {:?}",
            actual,
            expected
        );
    }
}

#[test]
fn grid_round_trip_produces_uniform_faces() {
    let source = SourceImage::new(DynamicImage::ImageRgb8(cross_source(1024)), "synthetic");
    assert_eq!(source.dimensions(), (4096, 3072));

    let extractor = CubemapExtractor::new(ExtractConfig::default()).unwrap();
    let set = extractor.extract(&source);
    assert_eq!(set.layout, Some(LayoutMode::Grid));

    for (face, outcome) in set.iter() {
        let image = outcome.as_ready().expect("every face should be ready");
        assert_eq!(image.pixels.dimensions(), (1024, 1024));
        let expected = face_color(face);
        assert!(image.pixels.pixels().all(|p| *p == expected), "face {face} is not uniform");
    }
}

#[test]
fn process_file_writes_faces_and_preview() {
    let dir = temp_dir("process");
    fs::create_dir_all(&dir).unwrap();
    let source_path = dir.join("source.png");
    DynamicImage::ImageRgb8(cross_source(32))
        .save_with_format(&source_path, ImageFormat::Png)
        .unwrap();

    let config = ExtractConfig {
        face_size: 32,
        output_dir: dir.join("out"),
        ..ExtractConfig::default()
    };
    let extractor = CubemapExtractor::new(config).unwrap();
    let report = extractor.process_file(&source_path).expect("pipeline should succeed");

    assert_eq!(report.source_dimensions, (128, 96));
    assert_eq!(report.written.len(), 6);
    for face in FaceName::all() {
        let path = dir.join("out").join(face.file_name());
        assert!(path.exists(), "{} missing", path.display());
        let decoded = image::open(&path).unwrap().into_rgb8();
        assert_eq!(decoded.dimensions(), (32, 32));
        assert_close(decoded.get_pixel(16, 16), &face_color(face), 8);
    }

    let preview_path = report.preview.expect("preview should be written");
    assert_eq!(preview_path, dir.join("out").join(PREVIEW_FILE_NAME));
    let preview = image::open(&preview_path).unwrap();
    assert_eq!((preview.width(), preview.height()), (128, 96));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strip_source_is_split_into_six_faces() {
    let width = 600;
    let height = 100;
    let source = RgbImage::from_fn(width, height, |x, _| {
        face_color(FaceName::all()[(x / 100) as usize])
    });
    let source = SourceImage::new(DynamicImage::ImageRgb8(source), "strip");

    let config = ExtractConfig {
        face_size: 64,
        ..ExtractConfig::default()
    };
    let set = CubemapExtractor::new(config).unwrap().extract(&source);
    assert_eq!(set.layout, Some(LayoutMode::Strip));

    for (face, outcome) in set.iter() {
        let image = outcome.as_ready().unwrap();
        assert_eq!(image.crop.left, face.index() as u32 * 100);
        assert_eq!(image.crop.height(), 100);
        assert_eq!(image.pixels.dimensions(), (64, 64));
        assert_close(image.pixels.get_pixel(32, 32), &face_color(face), 1);
    }
}

#[test]
fn preview_from_dir_is_deterministic() {
    let dir = temp_dir("idempotent");
    let source = SourceImage::new(DynamicImage::ImageRgb8(cross_source(16)), "synthetic");
    let config = ExtractConfig {
        face_size: 16,
        ..ExtractConfig::default()
    };
    let set = CubemapExtractor::new(config).unwrap().extract(&source);
    write_cubemap(&set, &dir, 95).unwrap();

    let first = compose_preview(&load_cubemap_from_dir(&dir, 16).unwrap());
    let second = compose_preview(&load_cubemap_from_dir(&dir, 16).unwrap());
    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_face_file_leaves_only_that_cell_blank() {
    let fs_px = 16;
    let dir = temp_dir("missing");
    let source = SourceImage::new(DynamicImage::ImageRgb8(cross_source(fs_px)), "synthetic");
    let config = ExtractConfig {
        face_size: fs_px,
        ..ExtractConfig::default()
    };
    let set = CubemapExtractor::new(config).unwrap().extract(&source);
    write_cubemap(&set, &dir, 95).unwrap();

    let full = compose_preview(&load_cubemap_from_dir(&dir, fs_px).unwrap());

    fs::remove_file(dir.join(FaceName::Back.file_name())).unwrap();
    let (preview_path, partial_set) =
        write_preview_from_dir(&dir, fs_px, 95).expect("missing face must not fail");
    assert!(preview_path.exists());
    assert_eq!(*partial_set.get(FaceName::Back), FaceOutcome::Missing);
    assert_eq!(partial_set.ready_count(), 5);

    let partial = compose_preview(&partial_set);
    let (bx, by) = FaceName::Back.grid_offset(fs_px);
    for (x, y, pixel) in partial.enumerate_pixels() {
        let in_back_cell = x >= bx && x < bx + fs_px && y >= by && y < by + fs_px;
        if in_back_cell {
            assert_eq!(*pixel, Rgb([0, 0, 0]));
        } else {
            assert_eq!(pixel, full.get_pixel(x, y));
        }
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn region_pipeline_writes_faces_without_preview() {
    let dir = temp_dir("region");
    fs::create_dir_all(&dir).unwrap();
    let source_path = dir.join("source.png");
    DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 200, Rgb([10, 20, 30])))
        .save_with_format(&source_path, ImageFormat::Png)
        .unwrap();

    let config = ExtractConfig {
        output_dir: dir.join("out"),
        ..ExtractConfig::default()
    };
    let extractor = CubemapExtractor::new(config).unwrap();
    let report = extractor
        .process_region_file(&source_path, Some([0, 0, 360, 40]))
        .unwrap();

    assert_eq!(report.set.face_size, 40);
    assert_eq!(report.written.len(), 6);
    assert!(report.preview.is_none());
    assert!(!dir.join("out").join(PREVIEW_FILE_NAME).exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_source_aborts_invocation() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let source_path = dir.join("broken.png");
    fs::write(&source_path, b"not an image at all").unwrap();

    let config = ExtractConfig {
        output_dir: dir.join("out"),
        ..ExtractConfig::default()
    };
    let extractor = CubemapExtractor::new(config).unwrap();
    assert!(extractor.process_file(&source_path).is_err());
    assert!(!dir.join("out").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rerun_into_same_dir_does_not_reuse_stale_faces() {
    let dir = temp_dir("rerun");
    fs::create_dir_all(&dir).unwrap();
    let red_path = dir.join("red.png");
    let blue_path = dir.join("blue.png");
    DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([255, 0, 0])))
        .save_with_format(&red_path, ImageFormat::Png)
        .unwrap();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 48, Rgb([0, 0, 255])))
        .save_with_format(&blue_path, ImageFormat::Png)
        .unwrap();

    let config = ExtractConfig {
        face_size: 16,
        output_dir: dir.join("out"),
        layout_override: Some(LayoutMode::Grid),
        ..ExtractConfig::default()
    };
    let extractor = CubemapExtractor::new(config).unwrap();

    let first = extractor.process_file(&red_path).unwrap();
    assert_eq!(first.written.len(), 6);
    assert!(dir.join("out").join(FaceName::Back.file_name()).exists());

    let second = extractor.process_file(&blue_path).unwrap();
    assert!(matches!(second.set.get(FaceName::Back), FaceOutcome::Degenerate(_)));
    assert_eq!(second.written.len(), 5);
    assert!(!dir.join("out").join(FaceName::Back.file_name()).exists());

    let preview = image::open(second.preview.unwrap()).unwrap().into_rgb8();
    let (bx, by) = FaceName::Back.grid_offset(16);
    assert_close(preview.get_pixel(bx + 8, by + 8), &Rgb([0, 0, 0]), 10);
    let (fx, fy) = FaceName::Front.grid_offset(16);
    assert_close(preview.get_pixel(fx + 8, fy + 8), &Rgb([0, 0, 255]), 10);

    let _ = fs::remove_dir_all(&dir);
}
