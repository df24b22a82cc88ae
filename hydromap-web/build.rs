use flate2::write::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

const EMPTY_COLLECTION: &str = r#"{"type": "FeatureCollection", "features": []}"#;

/// Gzip one area fixture into OUT_DIR for include_bytes. A missing fixture
/// becomes an empty collection.
fn compress_fixture(out_dir: &str, name: &str) {
    let src = Path::new("../fixtures").join(name);
    let text = if src.exists() {
        fs::read_to_string(&src).unwrap()
    } else {
        EMPTY_COLLECTION.to_string()
    };

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(text.as_bytes()).unwrap();
    let bytes = encoder.finish().unwrap();
    fs::write(Path::new(out_dir).join(format!("{}.gz", name)), bytes).unwrap();

    println!("cargo:rerun-if-changed=../fixtures/{}", name);
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    compress_fixture(&out_dir, "huc8.geojson");
    compress_fixture(&out_dir, "climate_divisions.geojson");

    println!("cargo:rerun-if-changed=build.rs");
}
