#[cfg(test)]
mod tests {
    use std::ffi::CStr;
    use std::path::PathBuf;

    use crate::raw_processing::common::error::ProcessorError;
    use crate::raw_processing::native::mock::CountingAllocator;
    use crate::raw_processing::native::types::CBLACK_UNSET;
    use crate::raw_processing::native::OutputParams;
    use crate::raw_processing::options::{
        CameraMatrix, HighlightMode, Interpolation, OutputBitDepth, OutputColor, ProcessorOptions,
        Region,
    };
    use crate::raw_processing::params::{apply, path_to_cstring};

    fn param_str(ptr: *mut std::os::raw::c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    #[test]
    fn test_unset_regions_keep_native_defaults() {
        let allocator = CountingAllocator::default();
        let base = OutputParams::default();

        let (params, _strings) = apply(&base, &ProcessorOptions::default(), &allocator).unwrap();

        assert_eq!(params.greybox, base.greybox);
        assert_eq!(params.cropbox, base.cropbox);
    }

    #[test]
    fn test_set_regions_are_copied() {
        let allocator = CountingAllocator::default();
        let options = ProcessorOptions::builder()
            .greybox(Region::new(10, 10, 50, 50))
            .cropbox(Region::new(0, 0, 1920, 1080))
            .build();

        let (params, _strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();

        assert_eq!(params.greybox, [10, 10, 50, 50]);
        assert_eq!(params.cropbox, [0, 0, 1920, 1080]);
    }

    #[test]
    fn test_defaults_reproduce_native_block() {
        let allocator = CountingAllocator::default();
        let base = OutputParams::default();

        let (params, strings) = apply(&base, &ProcessorOptions::default(), &allocator).unwrap();

        assert!(strings.is_empty());
        assert_eq!(params.aber, base.aber);
        assert_eq!(params.gamm, base.gamm);
        assert_eq!(params.use_camera_matrix, 1);
        assert_eq!(params.output_color, 1);
        assert_eq!(params.output_bps, 8);
        assert_eq!(params.user_flip, -1);
        assert_eq!(params.user_qual, -1);
        assert_eq!(params.user_black, -1);
        assert_eq!(params.user_sat, -1);
        assert_eq!(params.user_cblack, [CBLACK_UNSET; 4]);
        assert_eq!(params.use_fuji_rotate, 1);
        assert_eq!(params.exp_correc, 0);
        assert_eq!(params.dcb_iterations, 0);
        assert_eq!(OutputParams::default().dcb_iterations, -1);
        assert!(params.output_profile.is_null());
        assert!(params.camera_profile.is_null());
        assert!(params.bad_pixels.is_null());
        assert!(params.dark_frame.is_null());
    }

    #[test]
    fn test_fields_are_encoded() {
        let allocator = CountingAllocator::default();
        let options = ProcessorOptions::builder()
            .half_size(true)
            .four_color_rgb(true)
            .highlight(HighlightMode::Rebuild(7))
            .use_camera_wb(true)
            .camera_matrix(CameraMatrix::Always)
            .output_color(OutputColor::Aces)
            .output_bps(OutputBitDepth::Sixteen)
            .user_flip(Some(6))
            .interpolation(Some(Interpolation::Dcb))
            .user_black(Some(256))
            .user_cblack(Some([1, 2, 3, 4]))
            .user_sat(Some(16000))
            .median_passes(u32::MAX)
            .dcb(2, true)
            .exposure(2.0, 0.8)
            .brightness(1.25)
            .build();

        let (params, _strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();

        assert_eq!(params.half_size, 1);
        assert_eq!(params.four_color_rgb, 1);
        assert_eq!(params.highlight, 7);
        assert_eq!(params.use_camera_wb, 1);
        assert_eq!(params.use_auto_wb, 0);
        assert_eq!(params.use_camera_matrix, 3);
        assert_eq!(params.output_color, 6);
        assert_eq!(params.output_bps, 16);
        assert_eq!(params.user_flip, 6);
        assert_eq!(params.user_qual, 4);
        assert_eq!(params.user_black, 256);
        assert_eq!(params.user_cblack, [1, 2, 3, 4]);
        assert_eq!(params.user_sat, 16000);
        assert_eq!(params.med_passes, i32::MAX);
        assert_eq!(params.dcb_iterations, 2);
        assert_eq!(params.dcb_enhance_fl, 1);
        assert_eq!(params.exp_correc, 1);
        assert_eq!(params.exp_shift, 2.0);
        assert_eq!(params.exp_preser, 0.8);
        assert_eq!(params.bright, 1.25);
    }

    #[test]
    fn test_highlight_level_is_not_clamped() {
        let allocator = CountingAllocator::default();

        for level in [0u8, 2, 10, 20] {
            let options = ProcessorOptions::builder()
                .highlight(HighlightMode::Rebuild(level))
                .build();

            let (params, _strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();

            assert_eq!(params.highlight, i32::from(level));
        }
    }

    #[test]
    fn test_paths_allocated_and_released() {
        let allocator = CountingAllocator::default();
        let options = ProcessorOptions::builder()
            .output_profile("/profiles/srgb.icc")
            .camera_profile("embed")
            .dark_frame("/frames/dark.pgm")
            .build();

        {
            let (params, strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();

            assert_eq!(strings.len(), 3);
            assert_eq!(allocator.outstanding(), 3);
            assert_eq!(param_str(params.output_profile), "/profiles/srgb.icc");
            assert_eq!(param_str(params.camera_profile), "embed");
            assert_eq!(param_str(params.dark_frame), "/frames/dark.pgm");
            assert!(params.bad_pixels.is_null());
        }

        assert_eq!(allocator.allocs(), 3);
        assert_eq!(allocator.outstanding(), 0);
    }

    #[test]
    fn test_empty_path_is_not_allocated() {
        let allocator = CountingAllocator::default();
        let mut options = ProcessorOptions::default();
        options.bad_pixels = Some(PathBuf::new());

        let (params, strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();

        assert!(strings.is_empty());
        assert!(params.bad_pixels.is_null());
        assert_eq!(allocator.allocs(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let allocator = CountingAllocator::default();
        let options = ProcessorOptions::builder()
            .bad_pixels("/maps/bad.txt")
            .dark_frame("/frames/dark.pgm")
            .build();

        let (_params, mut strings) = apply(&OutputParams::default(), &options, &allocator).unwrap();
        strings.release();
        strings.release();
        drop(strings);

        assert_eq!(allocator.allocs(), 2);
        assert_eq!(allocator.frees(), 2);
    }

    #[test]
    fn test_preexisting_strings_are_not_freed() {
        let allocator = CountingAllocator::default();
        let mut foreign = *b"/native/owned.icc\0";
        let mut base = OutputParams::default();
        base.output_profile = foreign.as_mut_ptr().cast();

        let (params, strings) = apply(&base, &ProcessorOptions::default(), &allocator).unwrap();
        drop(strings);

        assert_eq!(params.output_profile, base.output_profile);
        assert_eq!(allocator.frees(), 0);
    }

    #[test]
    fn test_interior_nul_releases_earlier_strings() {
        let allocator = CountingAllocator::default();
        let options = ProcessorOptions::builder()
            .output_profile("/profiles/out.icc")
            .camera_profile("/profiles/in.icc")
            .dark_frame("bad\0path")
            .build();

        let result = apply(&OutputParams::default(), &options, &allocator);

        assert!(matches!(result.err(), Some(ProcessorError::InvalidPath(_))));
        assert_eq!(allocator.allocs(), 2);
        assert_eq!(allocator.outstanding(), 0);
    }

    #[test]
    fn test_path_to_cstring() {
        let path = PathBuf::from("/data/IMG_0001.CR2");
        assert_eq!(path_to_cstring(&path).unwrap().as_bytes(), b"/data/IMG_0001.CR2");
        assert!(path_to_cstring(&PathBuf::from("a\0b")).is_err());
    }
}
