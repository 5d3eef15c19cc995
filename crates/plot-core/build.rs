// File: crates/plot-core/build.rs
// Summary: Build script to link required Windows system libraries for Skia/ICU.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager pulls in registry calls on Windows.
        println!("cargo:rustc-link-lib=advapi32");
    }
}
