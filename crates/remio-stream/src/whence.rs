use std::io::SeekFrom;

use crate::error::StreamError;

/// Reference point for [`StreamReader::seek_to`](crate::StreamReader::seek_to).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Whence {
    #[default]
    Start,
    Current,
    End,
}

impl Whence {
    pub const START: i32 = 0;
    pub const CURRENT: i32 = 1;
    pub const END: i32 = 2;
}

impl TryFrom<i32> for Whence {
    type Error = StreamError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            Self::START => Ok(Whence::Start),
            Self::CURRENT => Ok(Whence::Current),
            Self::END => Ok(Whence::End),
            other => Err(StreamError::InvalidWhence(other)),
        }
    }
}

impl From<Whence> for i32 {
    fn from(whence: Whence) -> Self {
        match whence {
            Whence::Start => Whence::START,
            Whence::Current => Whence::CURRENT,
            Whence::End => Whence::END,
        }
    }
}

/// Split a [`SeekFrom`] into the `(offset, whence)` pair readers take.
///
/// `SeekFrom::Start` offsets beyond `i64::MAX` saturate; they get clamped to
/// the content length anyway.
pub(crate) fn split_seek_from(pos: SeekFrom) -> (i64, Whence) {
    match pos {
        SeekFrom::Start(p) => (i64::try_from(p).unwrap_or(i64::MAX), Whence::Start),
        SeekFrom::Current(delta) => (delta, Whence::Current),
        SeekFrom::End(delta) => (delta, Whence::End),
    }
}
