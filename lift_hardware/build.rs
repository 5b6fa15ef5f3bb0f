//! Copies `memory.x` from the workspace root next to the build output so the linker finds it for
//! the bring-up examples. Link scripts are only passed when building for bare metal, host builds of
//! the workspace stay untouched.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=../memory.x");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
        return;
    }

    println!("cargo:rustc-link-arg-examples=--nmagic");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");
    println!("cargo:rustc-link-arg-examples=-Tdefmt.x");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("memory.x"), include_bytes!("../memory.x")).expect("writing memory.x");
    println!("cargo:rustc-link-search={}", out.display());
}
