/* Bindings for wasm-sysroot/stdio.h, restricted to its linkable symbols. */

extern "C" {
    pub static mut stderr: *mut FILE;
}
extern "C" {
    pub fn fprintf(
        stream: *mut FILE,
        format: *const ::core::ffi::c_char,
        ...
    ) -> ::core::ffi::c_int;
}
