//! Temporary workspaces and request payloads for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Two POIs in opposite corners of a 60 × 60 urban square, plus a third
/// one the weighted draw can pick.
pub(super) const SAMPLE_REQUEST: &str = r#"{
    "zones": [{
        "id": 1,
        "region": [
            {"x": 0, "y": 0}, {"x": 60, "y": 0},
            {"x": 60, "y": 60}, {"x": 0, "y": 60}
        ],
        "type": "Urban"
    }],
    "poi": [
        {"id": 10, "point": {"x": 5, "y": 5}, "weight": 1},
        {"id": 20, "point": {"x": 55, "y": 55}, "weight": 2},
        {"id": 30, "point": {"x": 5, "y": 55}, "weight": 3}
    ],
    "start": 10,
    "end": 20,
    "seed": 3
}"#;

pub(crate) fn temp_root() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(crate) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}
