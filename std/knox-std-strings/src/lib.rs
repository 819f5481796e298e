//!
//! knox-std-strings - String Helper Functions
//!
//! Provides string helpers for knox programs:
//!
//! - `concat(a: string, b: string) -> string` - New string holding `a` then `b`
//! - `copy(s: string) -> string` - New, independent copy of `s`
//!
//! The Rust functions work on byte slices and return an owned `KnoxString`.
//! The `knox_*` exports take and return NUL-terminated C strings; a null
//! return means the allocation failed. Strings returned by the exports must
//! be released with `knox_string_free`, never with C `free`.
//!

use std::ffi::{CStr, CString, c_char};

use knox_std_core::{KnoxString, Result};

/// Join `a` and `b` end to end into a newly allocated string.
pub fn concat(a: &[u8], b: &[u8]) -> Result<KnoxString> {
    let len = a.len() + b.len();
    let mut result = KnoxString::with_capacity(len)?;
    result.push_bytes(a)?;
    result.push_bytes(b)?;
    tracing::trace!(len, "concat");
    Ok(result)
}

/// Duplicate `s` into a newly allocated string.
pub fn copy(s: &[u8]) -> Result<KnoxString> {
    let mut result = KnoxString::with_capacity(s.len())?;
    result.push_bytes(s)?;
    Ok(result)
}

unsafe fn bytes_from_c<'a>(s: *const c_char) -> &'a [u8] {
    if s.is_null() {
        return &[];
    }
    unsafe { CStr::from_ptr(s).to_bytes() }
}

fn into_raw(result: Result<KnoxString>) -> *mut c_char {
    match result.and_then(KnoxString::into_c_string) {
        Ok(c) => c.into_raw(),
        Err(err) => {
            tracing::warn!(%err, "returning null string");
            std::ptr::null_mut()
        }
    }
}

/// Concatenate two C strings. A null argument is treated as empty.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knox_concat(s1: *const c_char, s2: *const c_char) -> *mut c_char {
    unsafe { into_raw(concat(bytes_from_c(s1), bytes_from_c(s2))) }
}

/// Copy a C string. A null argument yields an empty string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knox_copy(s: *const c_char) -> *mut c_char {
    unsafe { into_raw(copy(bytes_from_c(s))) }
}

/// Release a string returned by `knox_concat` or `knox_copy`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn knox_string_free(s: *mut c_char) {
    if !s.is_null() {
        unsafe { drop(CString::from_raw(s)) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat() {
        let s = concat(b"foo", b"bar").unwrap();
        assert_eq!(s.len(), 6);
        assert_eq!(s, "foobar");
    }

    #[test]
    fn test_concat_empty_inputs() {
        assert!(concat(b"", b"").unwrap().is_empty());
        assert_eq!(concat(b"foo", b"").unwrap(), "foo");
        assert_eq!(concat(b"", b"bar").unwrap(), "bar");
    }

    #[test]
    fn test_concat_length_and_order() {
        let cases: &[(&[u8], &[u8])] = &[
            (b"a", b"b"),
            (b"hello, ", b"world"),
            (&[0xff, 0x00, 0x01], &[0x02]),
            (b"", b"\xe2\x82\xac"),
        ];
        for (a, b) in cases {
            let s = concat(a, b).unwrap();
            assert_eq!(s.len(), a.len() + b.len());
            assert_eq!(&s.as_bytes()[..a.len()], *a);
            assert_eq!(&s.as_bytes()[a.len()..], *b);
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let original = b"knox".to_vec();
        let mut dup = copy(&original).unwrap();
        assert_eq!(dup.as_bytes(), original.as_slice());

        dup.as_mut_bytes()[0] = b'K';
        assert_eq!(dup, "Knox");
        assert_eq!(original, b"knox");
        assert_ne!(dup.as_bytes().as_ptr(), original.as_ptr());
    }

    #[test]
    fn test_copy_empty() {
        assert!(copy(b"").unwrap().is_empty());
    }

    #[test]
    fn test_c_concat_and_copy() {
        let a = CString::new("foo").unwrap();
        let b = CString::new("bar").unwrap();
        unsafe {
            let joined = knox_concat(a.as_ptr(), b.as_ptr());
            assert!(!joined.is_null());
            assert_eq!(CStr::from_ptr(joined).to_bytes_with_nul(), b"foobar\0");

            let dup = knox_copy(joined);
            assert!(!dup.is_null());
            assert_ne!(dup, joined);
            assert_eq!(CStr::from_ptr(dup).to_bytes(), b"foobar");

            knox_string_free(joined);
            knox_string_free(dup);
        }
    }

    #[test]
    fn test_c_null_arguments() {
        let a = CString::new("foo").unwrap();
        unsafe {
            let s = knox_concat(a.as_ptr(), std::ptr::null());
            assert_eq!(CStr::from_ptr(s).to_bytes(), b"foo");
            knox_string_free(s);

            let s = knox_copy(std::ptr::null());
            assert_eq!(CStr::from_ptr(s).to_bytes(), b"");
            knox_string_free(s);

            knox_string_free(std::ptr::null_mut());
        }
    }
}
