use crate::error::{
    with_last_error_mut, DefaultPerlinTextureError, PerlinTextureError, PerlinTextureErrorCode,
};
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl PerlinTextureError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl PerlinTextureError) -> PerlinTextureErrorCode {
    tracing::debug!(code = ?error.code(), msg = error.msg(), "FFI call failed");
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result and reduce it to its code.
pub(crate) fn track_result<T>(
    result: Result<T, DefaultPerlinTextureError>,
) -> Result<T, PerlinTextureErrorCode> {
    result.map_err(|e| track_error(&e))
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PerlinTextureErrorCode::Ok;
    });
}
