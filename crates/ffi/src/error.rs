use perlin_texture_core::ConfigError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait PerlinTextureError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> PerlinTextureErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `PerlinTextureError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultPerlinTextureError {
    code: PerlinTextureErrorCode,
    msg: String,
}

impl DefaultPerlinTextureError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_markup"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PerlinTextureErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a C string argument that is not valid UTF-8.
    pub fn invalid_utf8(param_name: &str) -> Self {
        Self {
            code: PerlinTextureErrorCode::InvalidUtf8,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: PerlinTextureErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for output that cannot be handed back as a C string.
    pub fn interior_nul(what: &str) -> Self {
        Self {
            code: PerlinTextureErrorCode::InteriorNul,
            msg: format!("Generated {what} contains an interior NUL byte"),
        }
    }
}

impl PerlinTextureError for DefaultPerlinTextureError {
    fn code(&self) -> PerlinTextureErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<ConfigError> for DefaultPerlinTextureError {
    fn from(error: ConfigError) -> Self {
        Self::invalid_parameter(error.to_string())
    }
}

/// FFI error codes returned by texture functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerlinTextureErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A string argument was not valid UTF-8.
    InvalidUtf8 = 2,

    /// Invalid parameter passed to function (e.g. malformed property JSON).
    InvalidParameter = 3,

    /// Output contained a NUL byte and could not be returned as a C string.
    InteriorNul = 4,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, PerlinTextureErrorCode)> = const { RefCell::new((None, PerlinTextureErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PerlinTextureErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PerlinTextureErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread
/// that sets or clears the error.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// char* markup = NULL;
/// if (perlin_texture_render_json(json, &markup) != Ok) {
///     const char* error = perlin_texture_get_last_error();
///     if (error) {
///         printf("Render failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn perlin_texture_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `PerlinTextureErrorCode::Ok` (0) if the last call on this thread
/// succeeded.
#[no_mangle]
pub extern "C" fn perlin_texture_get_last_error_code() -> PerlinTextureErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
