//! Delimited-text reading.

mod read;

pub(crate) use read::*;
