//! # SPHINCS-256
//!
//! A stateless hash-based digital signature scheme at the 128-bit
//! post-quantum security level.
//!
//! The scheme stacks twelve height-5 certification subtrees of one-time
//! (WOTS+) signatures above a few-time (HORST) signature, for a hypertree
//! of total height 60. A pseudorandom 60-bit leaf index selects which
//! HORST instance signs a given message, so no signing state has to be
//! kept between calls; signatures are deterministic for a fixed key and
//! message.
//!
//! ## Usage
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sphincs256::Sphincs256;
//!
//! let (pk, sk) = Sphincs256::keygen(&mut OsRng).expect("key generation failed");
//!
//! let message = b"stateless hash-based signatures";
//! let signature = Sphincs256::sign(&sk, message);
//! assert!(Sphincs256::verify(&pk, message, &signature));
//! ```
//!
//! A signature can also travel attached to its message as one blob, to be
//! split and checked in one step:
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sphincs256::Sphincs256;
//!
//! let (pk, sk) = Sphincs256::keygen(&mut OsRng).unwrap();
//! let signature = Sphincs256::sign(&sk, b"body");
//!
//! let mut combined = signature.as_ref().to_vec();
//! combined.extend_from_slice(b"body");
//! assert_eq!(Sphincs256::open(&pk, &combined).unwrap(), b"body");
//! ```
//!
//! ## Sizes
//!
//! Public keys are 1056 bytes, secret keys 1088 bytes, and signatures
//! 41000 bytes ([`params::SIGNATURE_BYTES`]). All sizes are fixed; the
//! serialized forms carry no framing.
//!
//! ## Security notes
//!
//! - Verification ends in a single constant-time comparison of the
//!   reconstructed root against the public root; inner components never
//!   signal acceptance or rejection on their own.
//! - Secret keys and signatures are zeroized on drop, and all
//!   secret-derived per-call scratch is wiped before the call returns.
//! - Key generation consumes the caller's randomness source exactly once;
//!   signing needs no randomness at all.
//!
//! ## Feature flags
//!
//! - `serialization`: `serde` support for the key and signature types.

mod address;
mod hash;
mod horst;
mod subtree;
mod utils;
mod wots;

pub mod error;
pub mod params;
pub mod scheme;

pub use error::{Error, Result};
pub use scheme::{PublicKey, SecretKey, Signature, Sphincs256};
