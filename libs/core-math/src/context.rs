// [libs/core-math/src/context.rs]
//! Singleton del contexto criptográfico `secp256k1`.

use secp256k1::{All, Secp256k1};
use std::sync::LazyLock;

/// Instancia global del contexto de curva elíptica.
///
/// Pre-computa las tablas de multiplicación escalar en el primer acceso, de
/// modo que `seed_mul` amortiza ese coste a lo largo de toda la ejecución.
static GLOBAL_CONTEXT: LazyLock<Secp256k1<All>> = LazyLock::new(Secp256k1::new);

/// Provee acceso al contexto global de `secp256k1`.
#[inline]
#[must_use]
pub fn global_context() -> &'static Secp256k1<All> {
    &GLOBAL_CONTEXT
}
