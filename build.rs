use std::env;

fn main() {
    println!("cargo:rerun-if-changed=script.ld");
    println!("cargo:rerun-if-changed=near-small.gif");
    println!("cargo:rerun-if-changed=near_64x64.gif");

    if let Ok(path) = env::var("NEWLIB_LIB_PATH") {
        println!("cargo:rustc-link-search={path}");
    }
}
