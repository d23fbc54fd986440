/// GL error checks
///
/// With the `gl-error-checks` feature every checked call site drains
/// glGetError and logs what it finds. Without it the check compiles to
/// nothing.

#[cfg(feature = "gl-error-checks")]
use glow::HasContext;
#[cfg(feature = "gl-error-checks")]
use prism_3d_engine::engine_error;

/// Log every pending GL error, tagged with the call that preceded it
#[cfg(feature = "gl-error-checks")]
pub(crate) fn check_errors(gl: &glow::Context, call: &str) {
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        engine_error!("prism3d::gl", "{} raised {} (0x{:04X})",
            call, crate::gl_format::error_name(code), code);
    }
}

#[cfg(not(feature = "gl-error-checks"))]
#[inline(always)]
pub(crate) fn check_errors(_gl: &glow::Context, _call: &str) {}
