//! Cryptographic primitives behind the hasher.
//!
//! Provides salt generation, key derivation, keyed digests and constant-time
//! comparison.

pub mod compare;
pub mod kdf;
pub mod random;

pub use compare::constant_time_eq;
pub use kdf::keyed_digest;
pub use random::generate_salt;
