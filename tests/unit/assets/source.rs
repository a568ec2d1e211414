use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rankcard_source_{tag}_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn fs_source_reads_plain_and_file_urls() {
    let dir = temp_dir("read");
    let path = dir.join("a.bin");
    std::fs::write(&path, b"hello").unwrap();

    let src = FsImageSource::new();
    assert_eq!(src.fetch(path.to_str().unwrap()).unwrap(), b"hello");
    let url = format!("file://{}", path.display());
    assert_eq!(src.fetch(&url).unwrap(), b"hello");

    let rooted = FsImageSource::with_root(&dir);
    assert_eq!(rooted.fetch("a.bin").unwrap(), b"hello");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_a_fetch_error() {
    let err = FsImageSource::new()
        .fetch("/definitely/not/here/avatar.png")
        .unwrap_err();
    assert!(matches!(err, CardError::Fetch(_)));
    assert!(err.to_string().starts_with("fetch error:"));
}

#[test]
fn unreachable_host_fails_quickly() {
    let src = HttpImageSource::new(Duration::from_millis(500));
    let err = src.fetch("http://127.0.0.1:9/avatar.png").unwrap_err();
    assert!(matches!(err, CardError::Fetch(_)));
}

#[test]
fn scheme_detection() {
    assert!(is_http("https://cdn.example/a.png"));
    assert!(is_http("HTTP://cdn.example/a.png"));
    assert!(!is_http("file:///tmp/a.png"));
    assert!(!is_http("avatars/http.png"));
    assert!(!is_http("h"));
}

#[test]
fn auto_source_routes_paths_to_disk() {
    let dir = temp_dir("auto");
    let path = dir.join("b.bin");
    std::fs::write(&path, b"xyz").unwrap();
    let src = AutoImageSource::default();
    assert_eq!(src.fetch(path.to_str().unwrap()).unwrap(), b"xyz");
    let _ = std::fs::remove_dir_all(&dir);
}
