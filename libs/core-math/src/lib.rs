// [libs/core-math/src/lib.rs]
//! `puzzle71-core-math`: aritmética de campo Montgomery, geometría
//! Jacobiana y pipeline de hashing especializado para secp256k1.
//!
//! Este crate no sabe nada sobre hilos, CLI, ni formatos de archivo: es
//! puro cómputo determinista sobre bytes y escalares. El crate `scanner`
//! lo orquesta.

pub mod context;
pub mod curve;
pub mod errors;
pub mod field;
pub mod generator;
pub mod hashing;
pub mod point;
pub mod scalar;
pub mod selftest;

/// Reexporta los tipos de uso más frecuente para los consumidores del crate.
pub mod prelude {
    pub use crate::curve::UnifiedCurveEngine;
    pub use crate::errors::MathError;
    pub use crate::field::FieldElement;
    pub use crate::generator::seed_mul;
    pub use crate::hashing::hash160_of_compressed_pubkey;
    pub use crate::point::JacobianPoint;
    pub use crate::scalar::Scalar;
    pub use crate::selftest::run_correctness_selftest;
}
