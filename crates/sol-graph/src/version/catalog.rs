//! Released solc versions.
//!
//! Each entry is `(major, minor, highest patch)`; every patch from 0 up to
//! the highest was published, except for 0.4 which starts at 0.4.11 (the
//! first release with a working `pragma solidity`).

pub(crate) const FIRST_04_PATCH: u64 = 11;

pub(crate) const SOLC_RELEASES: &[(u64, u64, u64)] = &[
    (0, 4, 26),
    (0, 5, 17),
    (0, 6, 12),
    (0, 7, 6),
    (0, 8, 30),
];
