///
/// KnoxString - Core String Type
///
/// An owned, length-tracked byte sequence. Unlike the C strings handed to
/// compiled programs it carries no terminator; the NUL is added only when the
/// value crosses the C boundary through `into_c_string`.
///
/// Growth goes through `try_reserve_exact`, so running out of memory surfaces
/// as `KnoxError::AllocationFailed` rather than an abort.
///

use std::ffi::CString;
use std::fmt;

use crate::error::{KnoxError, Result};

#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct KnoxString {
    data: Vec<u8>,
}

impl KnoxString {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Allocate an empty string able to hold exactly `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut s = Self::new();
        s.reserve_exact(capacity)?;
        Ok(s)
    }

    /// Append `bytes`, reserving exactly the extra space needed.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve_exact(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn reserve_exact(&mut self, additional: usize) -> Result<()> {
        self.data.try_reserve_exact(additional).map_err(|_| {
            let requested = self.data.len().saturating_add(additional);
            tracing::warn!(requested, "string allocation failed");
            KnoxError::AllocationFailed { requested }
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// The contents as `&str`, or `None` if they are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Convert into a NUL-terminated C string.
    pub fn into_c_string(mut self) -> Result<CString> {
        if let Some(position) = self.data.iter().position(|&b| b == 0) {
            return Err(KnoxError::InteriorNul { position });
        }
        // Room for the terminator, so CString::new does not grow infallibly.
        self.reserve_exact(1)?;
        CString::new(self.data).map_err(|e| KnoxError::InteriorNul {
            position: e.nul_position(),
        })
    }
}

impl From<Vec<u8>> for KnoxString {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<String> for KnoxString {
    fn from(s: String) -> Self {
        Self { data: s.into_bytes() }
    }
}

impl AsRef<[u8]> for KnoxString {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl PartialEq<[u8]> for KnoxString {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<&str> for KnoxString {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl fmt::Display for KnoxString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.data))
    }
}
