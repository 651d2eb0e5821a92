use std::cell::Cell;

use test_log::test;
use tracing::debug;
use wasm_sysroot::stdio::{self, c_char, c_int, size_t, FILE, NULL};
use wasm_sysroot::{fclose, fdopen, fputc, fputs, snprintf, vsnprintf};

// Only ever passed to macros that drop it unexpanded.
#[allow(dead_code)]
fn never_called() -> *mut FILE {
    panic!("argument of a substituted macro was evaluated")
}

#[test]
fn fputc_discards_its_arguments() {
    let evaluated = Cell::new(0);
    let r: c_int = fputc!(
        {
            evaluated.set(evaluated.get() + 1);
            b'x' as c_int
        },
        never_called()
    );
    debug!("fputc expanded to {}", r);
    assert_eq!(r, 0);
    assert_eq!(evaluated.get(), 0);
}

#[test]
fn buffer_writes_are_zero() {
    let buf = [0 as c_char; 16];
    let written = snprintf!(buf.as_mut_ptr(), buf.len(), b"%d %s\0".as_ptr(), 42, never_called());
    assert_eq!(written, 0);
    assert_eq!(snprintf!(buf.as_mut_ptr(), buf.len(), b"plain\0".as_ptr()), 0);
    assert_eq!(vsnprintf!(buf.as_mut_ptr(), buf.len(), b"%d\0".as_ptr(), never_called()), 0);
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn stream_lifecycle_is_inert() {
    let stream = fdopen!(2, b"w\0".as_ptr());
    assert!(stream.is_null());
    assert_eq!(stream, NULL);
    assert_eq!(fputs!(b"hello\0".as_ptr(), stream), 0);
    assert_eq!(fclose!(never_called()), 0);
}

#[test]
fn null_is_a_stream_pointer() {
    let streams: [*mut FILE; 2] = [NULL, stdio::NULL];
    assert_eq!(streams[0], streams[1]);
    assert!(streams.iter().all(|s| s.is_null()));
}

#[test]
fn size_t_matches_pointer_width() {
    assert_eq!(std::mem::size_of::<size_t>(), std::mem::size_of::<*const u8>());
    assert_eq!(size_t::MIN, 0);
}
