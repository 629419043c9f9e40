use std::{fmt::Display, mem};

pub use dasp_sample::{FromSample, Sample, I24, U24};

/// Format that each sample has.
///
/// These are the sample formats a native audio subsystem negotiates for a stream. A device
/// session defaults to [`SampleFormat::F32`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SampleFormat {
    /// `i8` with a valid range of `i8::MIN..=i8::MAX` with `0` being the origin.
    I8,

    /// `i16` with a valid range of `i16::MIN..=i16::MAX` with `0` being the origin.
    I16,

    /// `I24` with a valid range of `-(1 << 23)..(1 << 23)` with `0` being the origin.
    I24,

    /// `i32` with a valid range of `i32::MIN..=i32::MAX` with `0` being the origin.
    I32,

    /// `u8` with a valid range of `u8::MIN..=u8::MAX` with `1 << 7 == 128` being the origin.
    U8,

    /// `f32` with a valid range of `-1.0..=1.0` with `0.0` being the origin.
    #[default]
    F32,
}

impl SampleFormat {
    /// Returns the size in bytes of a sample of this format.
    ///
    /// 24-bit samples are reported packed, i.e. as three bytes.
    #[inline]
    #[must_use]
    pub fn sample_size(&self) -> usize {
        match *self {
            SampleFormat::I8 | SampleFormat::U8 => mem::size_of::<i8>(),
            SampleFormat::I16 => mem::size_of::<i16>(),
            SampleFormat::I24 => 3,
            SampleFormat::I32 => mem::size_of::<i32>(),
            SampleFormat::F32 => mem::size_of::<f32>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(
            *self,
            SampleFormat::I8 | SampleFormat::I16 | SampleFormat::I24 | SampleFormat::I32
        )
    }

    #[inline]
    #[must_use]
    pub fn is_uint(&self) -> bool {
        matches!(*self, SampleFormat::U8)
    }

    #[inline]
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(*self, SampleFormat::F32)
    }
}

impl Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            SampleFormat::I8 => "i8",
            SampleFormat::I16 => "i16",
            SampleFormat::I24 => "i24",
            SampleFormat::I32 => "i32",
            SampleFormat::U8 => "u8",
            SampleFormat::F32 => "f32",
        }
        .fmt(f)
    }
}

/// A [`Sample`] type with a known [`SampleFormat`].
pub trait SizedSample: Sample {
    const FORMAT: SampleFormat;
}

impl SizedSample for i8 {
    const FORMAT: SampleFormat = SampleFormat::I8;
}

impl SizedSample for i16 {
    const FORMAT: SampleFormat = SampleFormat::I16;
}

impl SizedSample for I24 {
    const FORMAT: SampleFormat = SampleFormat::I24;
}

impl SizedSample for i32 {
    const FORMAT: SampleFormat = SampleFormat::I32;
}

impl SizedSample for u8 {
    const FORMAT: SampleFormat = SampleFormat::U8;
}

impl SizedSample for f32 {
    const FORMAT: SampleFormat = SampleFormat::F32;
}
