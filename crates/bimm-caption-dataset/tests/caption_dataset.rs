use bimm_caption_dataset::burn_support::signed_unit_to_u8;
use bimm_caption_dataset::loader::center_crop;
use bimm_caption_dataset::test_util::{generate_gradient_pattern, write_example};
use bimm_caption_dataset::{
    CaptionDatasetConfig, CaptionImageDataset, DatasetError, ImageShape, Interpolation,
};
use image::{DynamicImage, Rgb, RgbImage};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gradient(
    width: u32,
    height: u32,
) -> DynamicImage {
    generate_gradient_pattern(ImageShape { width, height }).into()
}

#[test]
fn every_index_is_well_formed_or_absent() -> anyhow::Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;

    let shapes = [(16, 16), (40, 10), (9, 31), (3, 2), (64, 17)];
    for (i, &(w, h)) in shapes.iter().enumerate() {
        write_example(
            dir.path(),
            &format!("shape_{i}"),
            "png",
            &gradient(w, h),
            Some(&format!("shape {w}x{h}")),
        )?;
    }
    write_example(dir.path(), "uncaptioned", "bmp", &gradient(8, 8), None)?;

    for interpolation in Interpolation::ALL {
        for crop in [true, false] {
            let ds = CaptionImageDataset::new(
                CaptionDatasetConfig::new(dir.path())
                    .with_size(Some(12))
                    .with_crop(crop)
                    .with_interpolation(interpolation),
            )?;
            assert_eq!(ds.len(), shapes.len() + 1);
            assert_eq!(ds.len(), ds.stems().len());

            let mut present = 0;
            for i in 0..ds.len() {
                if let Some(item) = ds.get(i)? {
                    present += 1;
                    assert_eq!(item.image.shape, vec![12, 12, 3]);
                    assert!(item.caption.starts_with("shape "));
                }
            }
            assert_eq!(present, shapes.len());

            assert!(matches!(
                ds.get(ds.len()),
                Err(DatasetError::IndexOutOfRange { .. })
            ));
        }
    }

    Ok(())
}

#[test]
fn crop_without_resize_keeps_the_centered_square() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = gradient(21, 8);
    write_example(dir.path(), "wide", "png", &source, Some("wide"))?;

    let ds = CaptionImageDataset::new(
        CaptionDatasetConfig::new(dir.path())
            .with_size(None)
            .with_flip_p(0.0),
    )?;

    let image = ds.get_image(0)?.expect("image");
    assert_eq!((image.width(), image.height()), (8, 8));
    assert_eq!(image, center_crop(&source));
    assert_eq!(
        image.to_rgb8().get_pixel(0, 0),
        source.to_rgb8().get_pixel(6, 0)
    );

    Ok(())
}

#[test]
fn normalized_pixels_recover_source_values() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    // 256 pixels covering every channel value.
    let source = RgbImage::from_fn(16, 16, |x, y| {
        let v = (y * 16 + x) as u8;
        Rgb([v, 255 - v, v / 2])
    });
    write_example(
        dir.path(),
        "ramp",
        "png",
        &DynamicImage::from(source.clone()),
        Some("ramp"),
    )?;

    let ds = CaptionImageDataset::new(
        CaptionDatasetConfig::new(dir.path())
            .with_size(None)
            .with_flip_p(0.0),
    )?;
    let item = ds.get(0)?.expect("item");
    let values = item.image.as_slice::<f32>().unwrap();

    let recovered: Vec<u8> = values.iter().map(|&x| signed_unit_to_u8(x)).collect();
    assert_eq!(recovered, source.into_raw());

    Ok(())
}

#[test]
fn extension_order_and_duplicate_stems() -> anyhow::Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;
    let image = gradient(4, 4);

    write_example(dir.path(), "b", "jpg", &image, Some("b"))?;
    write_example(dir.path(), "a", "bmp", &image, Some("a"))?;
    write_example(dir.path(), "c", "png", &image, Some("c"))?;
    let dup = write_example(dir.path(), "c", "jpeg", &image, None)?;

    let ds = CaptionImageDataset::new(CaptionDatasetConfig::new(dir.path()))?;
    assert_eq!(ds.stems(), &["c", "b", "c", "a"]);

    // Both positions of the duplicate resolve to the later file.
    assert_eq!(ds.example(0).unwrap().image, dup);
    assert_eq!(ds.example(2).unwrap().image, dup);
    assert_eq!(ds.get(0)?.expect("item").caption, "c");

    Ok(())
}

#[test]
fn sequential_sample_wraps_to_first() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for (stem, caption) in [("x", "first"), ("y", "second"), ("z", "third")] {
        write_example(dir.path(), stem, "png", &gradient(6, 6), Some(caption))?;
    }

    let ds = CaptionImageDataset::new(
        CaptionDatasetConfig::new(dir.path())
            .with_size(Some(4))
            .with_flip_p(0.0),
    )?;

    let last = ds.sequential_sample(ds.len() - 1)?.expect("item");
    let first = ds.get(0)?.expect("item");
    assert_eq!(last.caption, first.caption);
    last.image.assert_eq(&first.image, true);

    Ok(())
}

#[test]
fn config_file_drives_construction() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for i in 0..10 {
        write_example(
            dir.path(),
            &format!("{i:02}"),
            "png",
            &gradient(5, 7),
            Some("x"),
        )?;
    }

    let config_path = dir.path().join("dataset.json");
    std::fs::write(
        &config_path,
        serde_json::json!({
            "data_root": dir.path(),
            "size": 3,
            "interpolation": "lanczos",
            "mode": "val",
            "val_split": 3,
        })
        .to_string(),
    )?;

    let ds = CaptionImageDataset::new(CaptionDatasetConfig::load_json(&config_path)?)?;
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.stems(), &["00", "01", "02"]);
    assert_eq!(ds.config().interpolation, Interpolation::Lanczos);
    assert_eq!(ds.get(2)?.expect("item").image.shape, vec![3, 3, 3]);

    Ok(())
}
