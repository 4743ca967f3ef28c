use std::{env, fs, path::PathBuf};

fn add_linker_scripts() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Put the linker scripts somewhere the linker can find them.
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x")).unwrap();
    fs::write(out_dir.join("link.x"), include_bytes!("link.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=link.x");
}

fn main() {
    add_linker_scripts();

    println!("cargo:rerun-if-changed=build.rs");
}
