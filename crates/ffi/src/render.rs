use perlin_texture_core::{
    apply_jitter, random_identifier, JitterPolicy, PerlinTexture, PropertyBag,
};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{DefaultPerlinTextureError, PerlinTextureErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};

/// C-compatible jitter policy.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerlinTextureJitterPolicy {
    /// Rounded, unclamped.
    Plain = 0,
    /// Rounded and clamped to [0, 100].
    Percent = 1,
    /// Rounded and wrapped once into [0, 360).
    Angular = 2,
}

impl From<PerlinTextureJitterPolicy> for JitterPolicy {
    fn from(policy: PerlinTextureJitterPolicy) -> Self {
        match policy {
            PerlinTextureJitterPolicy::Plain => JitterPolicy::Plain,
            PerlinTextureJitterPolicy::Percent => JitterPolicy::Percent,
            PerlinTextureJitterPolicy::Angular => JitterPolicy::Angular,
        }
    }
}

/// Render JSON properties to markup. `Ok(None)` when the effect selector
/// is not recognized.
fn render_json(json: &str) -> Result<Option<CString>, DefaultPerlinTextureError> {
    let props = PropertyBag::from_json(json)?;

    let Some(rendered) = PerlinTexture::render_props(&props, &mut rand::rng()) else {
        return Ok(None);
    };

    CString::new(rendered.markup())
        .map(Some)
        .map_err(|_| DefaultPerlinTextureError::interior_nul("markup"))
}

/// Render a property bag (JSON, host field names) into SVG markup.
///
/// On success `*out_markup` receives a newly allocated string holding the
/// `<filter>` and `<rect>` fragment. If `effectToggle` is not one of the six
/// known selectors nothing is rendered: the call returns `Ok` and
/// `*out_markup` is set to null.
///
/// # Errors
/// - `NullPointer` if `props_json` or `out_markup` is null
/// - `InvalidUtf8` if `props_json` is not UTF-8
/// - `InvalidParameter` if the JSON cannot be parsed
///
/// # Safety
/// - `props_json` must be null or point to a NUL-terminated string.
/// - `out_markup` must be null or point to writable storage for a pointer.
/// - The returned string must be released with `perlin_texture_string_free`.
#[no_mangle]
pub unsafe extern "C" fn perlin_texture_render_json(
    props_json: *const c_char,
    out_markup: *mut *mut c_char,
) -> PerlinTextureErrorCode {
    if out_markup.is_null() {
        return track_error(&DefaultPerlinTextureError::null_pointer("out_markup"));
    }

    // SAFETY: `out_markup` is non-null and the caller guarantees it is writable.
    unsafe {
        *out_markup = ptr::null_mut();
    }

    if props_json.is_null() {
        return track_error(&DefaultPerlinTextureError::null_pointer("props_json"));
    }

    // SAFETY: non-null and NUL-terminated per the caller contract.
    let Ok(json) = unsafe { CStr::from_ptr(props_json) }.to_str() else {
        return track_error(&DefaultPerlinTextureError::invalid_utf8("props_json"));
    };

    match track_result(render_json(json)) {
        Ok(markup) => {
            clear_last_error();
            // SAFETY: checked non-null above.
            unsafe {
                *out_markup = markup.map_or(ptr::null_mut(), CString::into_raw);
            }
            PerlinTextureErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Jitter a control value for hosts that expose "random" controls.
///
/// Draws from the calling thread's random generator.
#[no_mangle]
pub extern "C" fn perlin_texture_jitter(
    value: f64,
    spread: f64,
    policy: PerlinTextureJitterPolicy,
) -> f64 {
    apply_jitter(value, spread, policy.into(), &mut rand::rng())
}

/// Random alphanumeric identifier of `length` characters.
///
/// Returns a newly allocated string to be released with
/// `perlin_texture_string_free`, or null on failure.
#[no_mangle]
pub extern "C" fn perlin_texture_random_identifier(length: usize) -> *mut c_char {
    let id = random_identifier(length, &mut rand::rng());
    match CString::new(id) {
        Ok(cs) => {
            clear_last_error();
            cs.into_raw()
        }
        Err(_) => {
            track_error(&DefaultPerlinTextureError::interior_nul("identifier"));
            ptr::null_mut()
        }
    }
}

/// Release a string returned by this library.
///
/// Passing null is a no-op.
///
/// # Safety
/// - `ptr` must have been returned by `perlin_texture_render_json` or
///   `perlin_texture_random_identifier` and not freed already.
/// - The pointer must not be used after this call.
#[no_mangle]
pub unsafe extern "C" fn perlin_texture_string_free(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer was created by `CString::into_raw` in this crate
    // and ownership is handed back here exactly once.
    unsafe {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{perlin_texture_get_last_error, perlin_texture_get_last_error_code};

    fn render(json: &str) -> (PerlinTextureErrorCode, Option<String>) {
        let json = CString::new(json).unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        let code = unsafe { perlin_texture_render_json(json.as_ptr(), &mut out) };
        if out.is_null() {
            return (code, None);
        }
        let markup = unsafe { CStr::from_ptr(out) }.to_str().unwrap().to_string();
        unsafe { perlin_texture_string_free(out) };
        (code, Some(markup))
    }

    #[test]
    fn test_render_lighting_json() {
        let json = r#"{"effectToggle": 6, "seedToggle": false, "seedTurb": 3}"#;
        let (code, markup) = render(json);
        assert_eq!(code, PerlinTextureErrorCode::Ok);
        let markup = markup.unwrap();
        assert!(markup.contains("feDiffuseLighting"));
        assert!(markup.contains("seed=\"3\""));
        assert_eq!(perlin_texture_get_last_error_code(), PerlinTextureErrorCode::Ok);
        assert!(perlin_texture_get_last_error().is_null());
    }

    #[test]
    fn test_unknown_selector_is_ok_and_empty() {
        let (code, markup) = render(r#"{"effectToggle": 7}"#);
        assert_eq!(code, PerlinTextureErrorCode::Ok);
        assert!(markup.is_none());
    }

    #[test]
    fn test_malformed_json_sets_last_error() {
        let (code, markup) = render("{not json");
        assert_eq!(code, PerlinTextureErrorCode::InvalidParameter);
        assert!(markup.is_none());
        assert_eq!(
            perlin_texture_get_last_error_code(),
            PerlinTextureErrorCode::InvalidParameter
        );
        let msg = unsafe { CStr::from_ptr(perlin_texture_get_last_error()) };
        assert!(msg.to_str().unwrap().starts_with("Failed to parse properties"));
    }

    #[test]
    fn test_null_arguments() {
        let mut out: *mut c_char = ptr::null_mut();
        let code = unsafe { perlin_texture_render_json(ptr::null(), &mut out) };
        assert_eq!(code, PerlinTextureErrorCode::NullPointer);
        assert!(out.is_null());

        let json = CString::new("{}").unwrap();
        let code = unsafe { perlin_texture_render_json(json.as_ptr(), ptr::null_mut()) };
        assert_eq!(code, PerlinTextureErrorCode::NullPointer);
    }

    #[test]
    fn test_jitter_policies() {
        for _ in 0..200 {
            let v = perlin_texture_jitter(98.0, 10.0, PerlinTextureJitterPolicy::Percent);
            assert!((0.0..=100.0).contains(&v));
            let a = perlin_texture_jitter(355.0, 20.0, PerlinTextureJitterPolicy::Angular);
            assert!((0.0..360.0).contains(&a));
        }
    }

    #[test]
    fn test_random_identifier_round_trip() {
        let raw = perlin_texture_random_identifier(6);
        assert!(!raw.is_null());
        let id = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_string();
        unsafe { perlin_texture_string_free(raw) };
        assert_eq!(id.len(), 6);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
