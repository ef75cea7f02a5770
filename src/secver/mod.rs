//! The three in-share signature-verification recipes (C9, §4.9). Each
//! rewrites its scheme's public verify equation so secret inputs live
//! inside shares, then opens an all-zero check in `G_T` (BLS, AIBS) or `E`
//! (ECDSA).

pub mod aibs;
pub mod bls;
pub mod ecdsa;
