use image::{Rgb32FImage, Rgba, RgbaImage};
use kvtools::NodeManager;
use kvtools_image_plugin::{
    ImageLookup, ImageRequest, KvImagePath, KvLoadImage, find_image, load_image, placeholder,
    resolve_image_path,
};
use kvtools_store_plugin::KvPaths;
use std::fs;
use std::path::Path;

fn write_png(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 128]));
    img.put_pixel(1, 0, Rgba([0, 51, 255, 255]));
    img.save(path).expect("save png");
}

fn assert_placeholder(image: &Rgb32FImage) {
    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image, placeholder());
}

#[test]
fn placeholder_is_one_black_rgb_pixel() {
    let image = placeholder();
    assert_eq!(image.dimensions(), (1, 1));
    assert_eq!(image.get_pixel(0, 0).0, [0.0, 0.0, 0.0]);
}

#[test]
fn resolves_store_folder_and_key_file() {
    let root = Path::new("/srv/images");
    assert_eq!(
        resolve_image_path(root, "voices.json", "Tom", "png"),
        "/srv/images/voices/Tom.png"
    );
    assert_eq!(
        resolve_image_path(root, "/stores/voices.json", "Tom Smith", "jpg"),
        "/srv/images/voices/Tom Smith.jpg"
    );
    assert_eq!(
        resolve_image_path(root, "voices.json", "Tom", ""),
        "/srv/images/voices/Tom.png"
    );
}

#[test]
fn blank_inputs_resolve_to_empty() {
    let root = Path::new("/srv/images");
    assert_eq!(resolve_image_path(root, "", "Tom", "png"), "");
    assert_eq!(resolve_image_path(root, "voices.json", "  ", "png"), "");
}

#[test]
fn adversarial_names_stay_inside_the_root() {
    let root = Path::new("/srv/images");
    let path = resolve_image_path(root, "../../etc/passwd.json", "../secret", "png");
    assert_eq!(path, "/srv/images/passwd/secret.png");

    let relative = path.strip_prefix("/srv/images/").expect("inside root");
    let segments: Vec<&str> = relative.split('/').collect();
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(|s| *s != ".." && *s != "."));

    let path = resolve_image_path(root, "..", "..", "png");
    assert!(!path.split('/').any(|s| s == ".."), "{path}");

    let path = resolve_image_path(root, "a:b*c.json", "x<y>|z", "png");
    assert_eq!(path, "/srv/images/a_b_c/x_y_z.png");
}

#[test]
fn missing_image_gives_placeholder_and_empty_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lookup = load_image(dir.path(), "mystore.json", "missing_key", "png");

    assert!(lookup.is_placeholder());
    assert_eq!(lookup.path(), "");
    let (image, path) = lookup.into_parts();
    assert_placeholder(&image);
    assert!(path.is_empty());
}

#[test]
fn blank_key_or_store_gives_placeholder() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(load_image(dir.path(), "", "k", "png").is_placeholder());
    assert!(load_image(dir.path(), "store.json", "", "png").is_placeholder());
}

#[test]
fn decodes_existing_image_to_unit_range_rgb() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("voices").join("Tom.png");
    write_png(&file);

    let lookup = load_image(dir.path(), "voices.json", "Tom", "png");
    let ImageLookup::Found { image, path } = lookup else {
        panic!("expected a decoded image");
    };

    assert_eq!(path, file.to_string_lossy());
    assert_eq!(image.dimensions(), (2, 1));
    assert_eq!(image.get_pixel(0, 0).0, [1.0, 0.0, 0.0]);
    let [r, g, b] = image.get_pixel(1, 0).0;
    assert_eq!(r, 0.0);
    assert!((g - 0.2).abs() < 1e-6);
    assert_eq!(b, 1.0);
}

#[test]
fn corrupt_image_gives_placeholder() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("voices").join("Tom.png");
    fs::create_dir_all(file.parent().expect("parent")).expect("mkdir");
    fs::write(&file, b"definitely not a png").expect("write");

    assert!(find_image(dir.path(), "voices.json", "Tom", "png").is_some());
    let lookup = load_image(dir.path(), "voices.json", "Tom", "png");
    assert!(lookup.is_placeholder());
    assert_placeholder(lookup.image());
}

#[test]
fn directory_in_place_of_image_gives_placeholder() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("voices").join("Tom.png")).expect("mkdir");

    assert!(find_image(dir.path(), "voices.json", "Tom", "png").is_none());
    assert!(load_image(dir.path(), "voices.json", "Tom", "png").is_placeholder());
}

#[test]
fn image_nodes_never_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let paths = KvPaths::new(dir.path());
    write_png(&paths.images_root.join("voices").join("Tom.png"));

    let mut nodes = NodeManager::new();
    let load = nodes.install(KvLoadImage::new(paths.clone()));
    let build_path = nodes.install(KvImagePath::new(paths.clone()));

    let (image, path) = load
        .invoke(&nodes, ImageRequest::new("Tom", "/anywhere/voices.json"))
        .expect("load");
    assert_eq!(image.dimensions(), (2, 1));
    assert!(path.ends_with("Tom.png"));

    let (image, path) = load
        .invoke(&nodes, ImageRequest::new("Jerry", "voices.json"))
        .expect("load missing");
    assert_placeholder(&image);
    assert_eq!(path, "");

    let expected = paths.images_root.join("voices").join("Jerry.jpg");
    let built = build_path
        .invoke(&nodes, ImageRequest::new("Jerry", "voices.json").with_ext("jpg"))
        .expect("path");
    assert_eq!(built, expected.to_string_lossy());
}
