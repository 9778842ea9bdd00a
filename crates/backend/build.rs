use std::env;
use std::fs;
use std::path::Path;

/// Files shipped next to the binary, relative to the workspace root
const SHIPPED_FILES: &[&str] = &["config.toml", "data/orders_customers.csv"];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR is target/<profile>/build/backend-xxx/out, binaries live in target/<profile>
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory")
        .to_path_buf();

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root")
        .to_path_buf();

    for file in SHIPPED_FILES {
        println!("cargo:rerun-if-changed=../../{}", file);
        ship(&workspace_root.join(file), &target_dir.join(file));
    }
}

fn ship(source: &Path, dest: &Path) {
    if !source.exists() {
        println!("cargo:warning={:?} not found, skipping", source);
        return;
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {}", parent, e));
    }
    fs::copy(source, dest).unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", source, e));
}
