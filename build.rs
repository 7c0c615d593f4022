use std::{env, path::PathBuf};

const HEADER: &str = "libraw/libraw.h";

/// Prefixes probed for `include/libraw/libraw.h` when no env override is set.
const PREFIXES: &[&str] = &["/usr", "/usr/local", "/opt/homebrew", "/opt/local"];

fn find_libraw() -> Option<(PathBuf, Option<PathBuf>)> {
    if let Ok(include) = env::var("LIBRAW_INCLUDE_DIR") {
        let include = PathBuf::from(include);
        let lib = env::var("LIBRAW_LIB_DIR").ok().map(PathBuf::from);
        return include.join(HEADER).exists().then_some((include, lib));
    }

    PREFIXES.iter().map(PathBuf::from).find_map(|prefix| {
        let include = prefix.join("include");
        include
            .join(HEADER)
            .exists()
            .then(|| (include, Some(prefix.join("lib"))))
    })
}

fn main() {
    println!("cargo::rustc-check-cfg=cfg(has_libraw)");
    println!("cargo:rerun-if-env-changed=LIBRAW_INCLUDE_DIR");
    println!("cargo:rerun-if-env-changed=LIBRAW_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LIBRAW_NO_NATIVE");

    if env::var_os("LIBRAW_NO_NATIVE").is_some() {
        println!("cargo:warning=LIBRAW_NO_NATIVE set, building without LibRaw");
        return;
    }

    let Some((include_dir, lib_dir)) = find_libraw() else {
        println!("cargo:warning=Building without LibRaw (libraw/libraw.h not found)");
        return;
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    //
    // ---- Generate LibRaw bindings ----
    //
    let bindings = match bindgen::Builder::default()
        .header_contents("libraw_wrapper.h", "#include <libraw/libraw.h>\n")
        .clang_arg(format!("-I{}", include_dir.display()))
        // Session lifecycle
        .allowlist_function("libraw_init")
        .allowlist_function("libraw_open_file")
        .allowlist_function("libraw_unpack")
        .allowlist_function("libraw_unpack_thumb")
        .allowlist_function("libraw_dcraw_process")
        .allowlist_function("libraw_dcraw_make_mem_image")
        .allowlist_function("libraw_dcraw_make_mem_thumb")
        .allowlist_function("libraw_dcraw_clear_mem")
        .allowlist_function("libraw_recycle")
        .allowlist_function("libraw_close")
        // Diagnostics
        .allowlist_function("libraw_strerror")
        .allowlist_function("libraw_version")
        // Types
        .allowlist_type("libraw_data_t")
        .allowlist_type("libraw_processed_image_t")
        .allowlist_type("libraw_output_params_t")
        .raw_line("// Mark extern blocks as unsafe for Rust 2024")
        .generate()
    {
        Ok(bindings) => bindings,
        Err(e) => {
            // libclang missing is not fatal: the crate falls back to the stub backend.
            println!("cargo:warning=Building without LibRaw (bindgen failed: {e})");
            return;
        }
    };

    let out_path = out_dir.join("libraw_bindings.rs");
    bindings
        .write_to_file(&out_path)
        .expect("Couldn't write LibRaw bindings!");

    // Read the generated file and add unsafe to extern blocks
    let contents = std::fs::read_to_string(&out_path).unwrap();
    let fixed = contents.replace("extern \"C\" {", "unsafe extern \"C\" {");
    std::fs::write(&out_path, fixed).unwrap();

    //
    // ---- Link the reentrant LibRaw build ----
    //
    if let Some(lib_dir) = lib_dir {
        println!("cargo:rustc-link-search=native={}", lib_dir.display());
    }
    println!("cargo:rustc-link-lib=dylib=raw_r");
    println!("cargo:rustc-cfg=has_libraw");
}
