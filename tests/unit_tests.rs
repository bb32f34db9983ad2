use mat2yolo::config::{Args, Mode};
use mat2yolo::conversion::{contour_to_absolute, to_detection_label, to_segmentation_label};
use mat2yolo::dataset::process_dataset;
use mat2yolo::error::RecordError;
use mat2yolo::io::{discover_annotations, setup_output_directories, write_label_file};
use mat2yolo::mask::{apply_mask, draw_box_overlay, rasterize_contour};
use mat2yolo::types::{BoxCoord, BoxOrigin, Contour, ImageDescriptor};
use mat2yolo::utils::{class_id_for_stem, find_paired_image};

use image::{GrayImage, Rgb, RgbImage};
use std::fs::{self, File};

fn image_200x100() -> ImageDescriptor {
    ImageDescriptor {
        width: 200,
        height: 100,
    }
}

#[test]
fn test_detection_label_full_image_box() {
    let box_coord = BoxCoord {
        top: 0.0,
        bottom: 100.0,
        left: 0.0,
        right: 200.0,
    };

    let (label, origin) = to_detection_label(&box_coord, &image_200x100(), 0);

    assert_eq!(label.to_string(), "0 0.500000 0.500000 1.000000 1.000000");
    assert_eq!(origin.x, 0.0);
    assert_eq!(origin.y, 0.0);
}

#[test]
fn test_detection_label_returns_box_origin_x_first() {
    // box_coord stores (y1, y2, x1, x2); the origin comes back as (x, y)
    let box_coord = BoxCoord {
        top: 10.0,
        bottom: 50.0,
        left: 20.0,
        right: 80.0,
    };
    let image = ImageDescriptor {
        width: 100,
        height: 200,
    };

    let (label, origin) = to_detection_label(&box_coord, &image, 0);

    assert_eq!(origin.x, 20.0);
    assert_eq!(origin.y, 10.0);
    for value in [label.x_center, label.y_center, label.width, label.height] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn test_detection_label_round_trip() {
    let box_coord = BoxCoord {
        top: 13.0,
        bottom: 77.0,
        left: 29.0,
        right: 111.0,
    };
    let image = ImageDescriptor {
        width: 640,
        height: 480,
    };

    let (label, _) = to_detection_label(&box_coord, &image, 3);

    let w = image.width as f64;
    let h = image.height as f64;
    let left = (label.x_center - label.width / 2.0) * w;
    let right = (label.x_center + label.width / 2.0) * w;
    let top = (label.y_center - label.height / 2.0) * h;
    let bottom = (label.y_center + label.height / 2.0) * h;

    let tolerance = 1e-6 * w;
    assert!((left - box_coord.left).abs() < tolerance);
    assert!((right - box_coord.right).abs() < tolerance);
    assert!((top - box_coord.top).abs() < tolerance);
    assert!((bottom - box_coord.bottom).abs() < tolerance);
}

#[test]
fn test_detection_label_does_not_clamp() {
    // A box wider than the image signals bad upstream data; the value must
    // propagate verbatim instead of being corrected.
    let box_coord = BoxCoord {
        top: 0.0,
        bottom: 50.0,
        left: 0.0,
        right: 300.0,
    };

    let (label, _) = to_detection_label(&box_coord, &image_200x100(), 0);

    assert!(label.width > 1.0);
    assert_eq!(label.width, 1.5);
}

#[test]
fn test_segmentation_label_shifts_and_normalizes() {
    let contour = Contour {
        xs: vec![0.0, 10.0, 10.0],
        ys: vec![0.0, 0.0, 20.0],
    };
    let origin = BoxOrigin { x: 20.0, y: 10.0 };
    let image = ImageDescriptor {
        width: 100,
        height: 100,
    };

    let label = to_segmentation_label(&contour, &origin, 1, &image).unwrap();

    assert_eq!(
        label.to_string(),
        "1 0.200000 0.100000 0.300000 0.100000 0.300000 0.300000"
    );
}

#[test]
fn test_segmentation_label_preserves_point_count_and_order() {
    let xs: Vec<f64> = (0..17).map(|i| i as f64).collect();
    let ys: Vec<f64> = (0..17).map(|i| (i * 2) as f64).collect();
    let contour = Contour {
        xs: xs.clone(),
        ys: ys.clone(),
    };
    let origin = BoxOrigin { x: 5.0, y: 7.0 };
    let image = ImageDescriptor {
        width: 100,
        height: 100,
    };

    let label = to_segmentation_label(&contour, &origin, 0, &image).unwrap();

    assert_eq!(label.points.len(), 17);
    for (i, &(x, y)) in label.points.iter().enumerate() {
        assert_eq!(x, (xs[i] + 5.0) / 100.0);
        assert_eq!(y, (ys[i] + 7.0) / 100.0);
    }
}

#[test]
fn test_segmentation_label_rejects_mismatched_lengths() {
    let contour = Contour {
        xs: vec![0.0, 1.0, 2.0, 3.0, 4.0],
        ys: vec![0.0, 1.0, 2.0, 3.0],
    };
    let origin = BoxOrigin { x: 0.0, y: 0.0 };
    let image = ImageDescriptor {
        width: 100,
        height: 100,
    };

    let err = to_segmentation_label(&contour, &origin, 0, &image).unwrap_err();
    assert!(matches!(err, RecordError::MalformedContour { xs: 5, ys: 4 }));

    // The detection transform for the same record is unaffected
    let box_coord = BoxCoord {
        top: 0.0,
        bottom: 10.0,
        left: 0.0,
        right: 10.0,
    };
    let (label, _) = to_detection_label(&box_coord, &image, 0);
    assert_eq!(label.width, 0.1);
}

#[test]
fn test_contour_to_absolute() {
    let contour = Contour {
        xs: vec![1.0, 2.0],
        ys: vec![3.0, 4.0],
    };
    let origin = BoxOrigin { x: 10.0, y: 20.0 };

    let points = contour_to_absolute(&contour, &origin).unwrap();
    assert_eq!(points, vec![(11.0, 23.0), (12.0, 24.0)]);
}

#[test]
fn test_class_id_for_stem() {
    let label_list = vec!["cannon".to_string()];

    assert_eq!(class_id_for_stem("cannon_003", &label_list), 0);
    assert_eq!(class_id_for_stem("carrier_007", &label_list), 1);
    assert_eq!(class_id_for_stem("cannon", &label_list), 0);
    // Any unknown prefix falls back to the second class
    assert_eq!(class_id_for_stem("zebra_001", &label_list), 1);

    let extended = vec!["cannon".to_string(), "carrier".to_string()];
    assert_eq!(class_id_for_stem("carrier_007", &extended), 1);
    assert_eq!(class_id_for_stem("cannon_003", &extended), 0);
}

#[test]
fn test_rasterize_contour_fills_interior() {
    let square = [(2.0, 2.0), (7.0, 2.0), (7.0, 7.0), (2.0, 7.0)];
    let mask = rasterize_contour(&square, 10, 10);

    assert_eq!(mask.dimensions(), (10, 10));
    assert_eq!(mask.get_pixel(4, 4).0[0], 255);
    assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    assert_eq!(mask.get_pixel(9, 9).0[0], 0);
}

#[test]
fn test_rasterize_contour_accepts_closed_polygon() {
    // An explicit closing vertex repeating the first must not break the fill
    let square = [
        (2.0, 2.0),
        (7.0, 2.0),
        (7.0, 7.0),
        (2.0, 7.0),
        (2.0, 2.0),
    ];
    let mask = rasterize_contour(&square, 10, 10);

    assert_eq!(mask.get_pixel(4, 4).0[0], 255);
}

#[test]
fn test_rasterize_contour_degenerate_is_empty() {
    let segment = [(1.0, 1.0), (5.0, 5.0)];
    let mask = rasterize_contour(&segment, 10, 10);

    assert!(mask.pixels().all(|p| p.0[0] == 0));
}

#[test]
fn test_draw_box_overlay() {
    let image = RgbImage::new(10, 10);
    let box_coord = BoxCoord {
        top: 1.0,
        bottom: 8.0,
        left: 1.0,
        right: 8.0,
    };

    let overlay = draw_box_overlay(&image, &box_coord);

    assert_eq!(*overlay.get_pixel(1, 1), Rgb([0, 255, 0]));
    assert_eq!(*overlay.get_pixel(4, 4), Rgb([0, 0, 0]));
    // The source image is untouched
    assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
}

#[test]
fn test_apply_mask() {
    let mut image = RgbImage::new(4, 4);
    for pixel in image.pixels_mut() {
        *pixel = Rgb([10, 20, 30]);
    }
    let mut mask = GrayImage::new(4, 4);
    mask.get_pixel_mut(1, 1).0[0] = 255;

    let segmented = apply_mask(&image, &mask);

    assert_eq!(*segmented.get_pixel(1, 1), Rgb([10, 20, 30]));
    assert_eq!(*segmented.get_pixel(0, 0), Rgb([0, 0, 0]));
}

#[test]
fn test_setup_output_directories() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output_root = temp_dir.path().join("yolo_labels");

    let dirs = setup_output_directories(&output_root).unwrap();

    assert!(dirs.detection_dir.is_dir());
    assert!(dirs.segmentation_dir.is_dir());
    assert!(dirs.detection_dir.ends_with("detection"));
    assert!(dirs.segmentation_dir.ends_with("segmentation"));

    // Idempotent: existing directories are left alone
    fs::write(dirs.detection_dir.join("keep.txt"), "x").unwrap();
    setup_output_directories(&output_root).unwrap();
    assert!(dirs.detection_dir.join("keep.txt").exists());
}

#[test]
fn test_write_label_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("cannon_003.txt");

    write_label_file(&path, "0 0.500000 0.500000 1.000000 1.000000").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "0 0.500000 0.500000 1.000000 1.000000\n");
}

#[test]
fn test_discover_annotations_sorted_mat_only() {
    let temp_dir = tempfile::tempdir().unwrap();
    File::create(temp_dir.path().join("carrier_002.mat")).unwrap();
    File::create(temp_dir.path().join("cannon_001.mat")).unwrap();
    File::create(temp_dir.path().join("notes.txt")).unwrap();

    let found = discover_annotations(temp_dir.path());

    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["cannon_001.mat", "carrier_002.mat"]);
}

#[test]
fn test_process_dataset_continues_past_bad_records() {
    let temp_dir = tempfile::tempdir().unwrap();
    let annotation_dir = temp_dir.path().join("labels");
    let image_dir = temp_dir.path().join("images");
    let output_dir = temp_dir.path().join("out");
    fs::create_dir_all(&annotation_dir).unwrap();
    fs::create_dir_all(&image_dir).unwrap();

    // A record whose .mat payload is garbage, but whose image exists
    fs::write(annotation_dir.join("cannon_001.mat"), b"not a mat file").unwrap();
    RgbImage::new(8, 8)
        .save(image_dir.join("cannon_001.jpg"))
        .unwrap();
    // A record with no paired image at all
    fs::write(annotation_dir.join("carrier_002.mat"), b"also not a mat file").unwrap();

    let args = Args {
        image_dir: image_dir.to_str().unwrap().to_string(),
        annotation_dir: annotation_dir.to_str().unwrap().to_string(),
        output_dir: output_dir.to_str().unwrap().to_string(),
        preview_dir: temp_dir.path().join("inspection").to_str().unwrap().to_string(),
        mode: Mode::Convert,
        label_list: vec!["cannon".to_string()],
    };

    // Both records fail, neither aborts the batch
    let stats = process_dataset(&args).unwrap();
    assert_eq!(stats.total_records, 2);
    assert_eq!(stats.detection_labels, 0);
    assert_eq!(stats.segmentation_labels, 0);
    assert_eq!(stats.skipped_malformed_record, 1);
    assert_eq!(stats.skipped_missing_file, 1);
    assert!(output_dir.join("detection").is_dir());
    assert!(output_dir.join("segmentation").is_dir());
}

#[test]
fn test_find_paired_image_by_stem() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image_path = temp_dir.path().join("cannon_003.png");
    RgbImage::new(4, 4).save(&image_path).unwrap();

    let found = find_paired_image(temp_dir.path(), "cannon_003");
    assert_eq!(found, Some(image_path.clone()));

    // The converter reads only the dimensions from the paired image
    let (width, height) = image::image_dimensions(&image_path).unwrap();
    assert_eq!((width, height), (4, 4));

    assert_eq!(find_paired_image(temp_dir.path(), "cannon_999"), None);
}
