//! A small output-sink abstraction, so `Format::format` can write into a
//! `String`, a `Vec<u8>`, or a fixed-size buffer without allocating when
//! the caller doesn't need to.

use core::fmt;

use crate::error::Error;

/// A minimal writer trait, independent of [`std::io::Write`] so that a
/// fixed `&mut [u8]` buffer (which has no `io::Write` impl without the
/// `std::io` feature surface) can participate the same way a `String`
/// does.
pub(crate) trait Write {
    /// Appends `data` to this sink in full, or fails.
    fn write_all(&mut self, data: &str) -> Result<(), Error>;
}

impl Write for String {
    fn write_all(&mut self, data: &str) -> Result<(), Error> {
        self.try_reserve(data.len())
            .map_err(|_| Error::FormattedStringTooLarge)?;
        self.push_str(data);
        Ok(())
    }
}

impl Write for Vec<u8> {
    fn write_all(&mut self, data: &str) -> Result<(), Error> {
        self.try_reserve(data.len())
            .map_err(|_| Error::FormattedStringTooLarge)?;
        self.extend_from_slice(data.as_bytes());
        Ok(())
    }
}

/// Writes into a fixed `&mut [u8]` buffer, overwriting its data and
/// advancing past what was written (mirroring `std::io::Write` for
/// `&mut [u8]`).
impl Write for &mut [u8] {
    fn write_all(&mut self, data: &str) -> Result<(), Error> {
        let bytes = data.as_bytes();
        let size = bytes.len().min(self.len());
        let (a, b) = core::mem::take(self).split_at_mut(size);
        a.copy_from_slice(&bytes[..size]);
        *self = b;

        if size == bytes.len() {
            Ok(())
        } else {
            Err(Error::WriteZero)
        }
    }
}

/// Adapts a [`Write`] sink to [`core::fmt::Write`], preserving the
/// original [`Error`] across the `fmt::Error`-only signature of
/// [`fmt::Write::write_str`].
pub(crate) struct Adapter<'a, T: ?Sized> {
    inner: &'a mut T,
    error: Result<(), Error>,
}

impl<'a, T: Write + ?Sized> Adapter<'a, T> {
    pub(crate) fn new(inner: &'a mut T) -> Self {
        Self { inner, error: Ok(()) }
    }

    pub(crate) fn finish(self) -> Result<(), Error> {
        self.error
    }
}

impl<T: Write + ?Sized> fmt::Write for Adapter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.inner.write_all(s) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Err(e);
                Err(fmt::Error)
            }
        }
    }
}
