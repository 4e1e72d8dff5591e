// ==========================================================================
// Integration Test - image assembly
//
// Builds a fake multi-arch target tree in a temp dir and runs the whole
// select → assemble → declare → verify pipeline against it.
// ==========================================================================

use polar_image::{
    verify, ArtifactMatrix, ImageBuilder, ImageConfig, ImageError, Platform, CONFIG_FILE,
    ROOTFS_DIR,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A target tree holding a distinct fake binary for every platform.
fn multi_arch_context() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let matrix = ArtifactMatrix::default();
    for (platform, _) in matrix.entries() {
        let path = matrix.artifact_path(tmp.path(), platform, "polars");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("binary for {platform}")).unwrap();
        // Build leftovers that must never reach the image
        fs::write(path.with_file_name("polars.d"), b"deps").unwrap();
    }
    tmp
}

fn builder(context: &Path, output: &Path) -> ImageBuilder {
    ImageBuilder::new().context(context).output(output)
}

#[test]
fn supported_platforms_produce_executable_entrypoint() {
    for id in ["linux/amd64", "linux/arm64"] {
        let context = multi_arch_context();
        let output = context.path().join("dist");

        let image = builder(context.path(), &output).build_for(id).unwrap();

        assert_eq!(image.platform.as_str(), id);
        let meta = fs::symlink_metadata(&image.entrypoint).unwrap();
        assert!(meta.file_type().is_file());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            assert_eq!(meta.permissions().mode() & 0o777, 0o755);
        }
    }
}

#[test]
fn unsupported_platform_fails_closed_and_writes_nothing() {
    let context = multi_arch_context();
    let output = context.path().join("dist");

    for id in ["linux/386", "linux/arm/v7", "linux/riscv64", "darwin/arm64", ""] {
        let err = builder(context.path(), &output).build_for(id).unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedPlatform(_)), "{id:?}");
        assert!(!output.exists(), "{id:?} must not create output");
    }
}

#[test]
fn rootfs_holds_only_the_selected_artifact() {
    let context = multi_arch_context();
    let output = context.path().join("dist");

    builder(context.path(), &output)
        .build(Platform::LinuxArm64)
        .unwrap();

    let entries: Vec<_> = fs::read_dir(output.join(ROOTFS_DIR))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["polars"]);
    assert_eq!(
        fs::read_to_string(output.join(ROOTFS_DIR).join("polars")).unwrap(),
        "binary for linux/arm64"
    );

    // Only the rootfs and the config sit in the output
    let mut top: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    top.sort();
    assert_eq!(top, vec![CONFIG_FILE.to_string(), ROOTFS_DIR.to_string()]);
}

#[test]
fn config_runs_binary_directly_without_arguments() {
    let context = multi_arch_context();
    let output = context.path().join("dist");

    builder(context.path(), &output)
        .build(Platform::LinuxAmd64)
        .unwrap();

    let config = ImageConfig::read(&output).unwrap();
    assert_eq!(config.config.entrypoint, vec!["/polars".to_string()]);
    assert!(config.config.cmd.is_empty());
    assert_eq!(config.architecture, "amd64");
    assert_eq!(config.os, "linux");
}

#[test]
fn missing_artifact_for_platform_fails() {
    let context = TempDir::new().unwrap();
    let output = context.path().join("dist");

    let err = builder(context.path(), &output)
        .build(Platform::LinuxAmd64)
        .unwrap_err();
    assert!(matches!(err, ImageError::ArtifactMissing(_)));
    assert!(!output.exists());
}

#[test]
fn second_assembly_into_same_output_is_refused() {
    let context = multi_arch_context();
    let output = context.path().join("dist");

    builder(context.path(), &output)
        .build(Platform::LinuxAmd64)
        .unwrap();
    let err = builder(context.path(), &output)
        .build(Platform::LinuxArm64)
        .unwrap_err();
    assert!(matches!(err, ImageError::OutputNotEmpty(_)));

    // The first image is untouched
    assert_eq!(verify(&output).unwrap().platform, Platform::LinuxAmd64);
}

#[test]
fn custom_triple_and_binary_name() {
    let context = TempDir::new().unwrap();
    let matrix = ArtifactMatrix::default().with_triple(Platform::LinuxAmd64, "x86_64-unknown-linux-gnu");
    let path = matrix.artifact_path(context.path(), Platform::LinuxAmd64, "polard");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"gnu build").unwrap();

    let output = context.path().join("out");
    let image = ImageBuilder::new()
        .matrix(matrix)
        .context(context.path())
        .output(&output)
        .binary("polard")
        .build(Platform::LinuxAmd64)
        .unwrap();

    assert_eq!(image.config.config.entrypoint, vec!["/polard".to_string()]);
}

#[test]
fn tampered_image_fails_verification() {
    let context = multi_arch_context();
    let output = context.path().join("dist");
    builder(context.path(), &output)
        .build(Platform::LinuxAmd64)
        .unwrap();

    fs::write(output.join(ROOTFS_DIR).join("sh"), b"shell").unwrap();
    assert!(matches!(
        verify(&output),
        Err(ImageError::UnexpectedRootfsEntry(_))
    ));
}
