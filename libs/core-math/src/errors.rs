// [libs/core-math/src/errors.rs]
//! Catálogo de fallos matemáticos y geométricos del motor de campo/curva.

use thiserror::Error;

/// Errores posibles durante la aritmética de campo, la geometría de curva,
/// o el ensamblado de una clave escalar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// El escalar recibido es cero o no cabe en `[1, n)`, el orden de la curva.
    #[error("scalar is zero or out of the curve order range")]
    InvalidScalar,

    /// Se intentó proyectar a afín un punto en el infinito (Z = 0).
    #[error("cannot project the point at infinity to affine coordinates")]
    PointAtInfinity,

    /// La inversión por lote (Montgomery) recibió una coordenada Z nula.
    #[error("batch inversion collapsed: a zero field element was present")]
    BatchInversionCollapse,

    /// Bytes de entrada con longitud incorrecta para la operación solicitada.
    #[error("invalid byte length: expected {expected}, got {got}")]
    InvalidLength {
        /// Longitud esperada en bytes.
        expected: usize,
        /// Longitud observada en bytes.
        got: usize,
    },

    /// La librería `secp256k1` subyacente rechazó el material criptográfico.
    #[error("secp256k1 rejected the key material: {0}")]
    EllipticCurveError(#[from] secp256k1::Error),
}
