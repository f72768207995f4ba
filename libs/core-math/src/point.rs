// [libs/core-math/src/point.rs]
//! Puntos de la curva secp256k1 en coordenadas Jacobianas (`X, Y, Z`).

use crate::errors::MathError;
use crate::field::FieldElement;

/// Un punto de secp256k1 en coordenadas proyectivas Jacobianas.
///
/// La coordenada afín correspondiente es `(X/Z^2, Y/Z^3)`. El punto en el
/// infinito se representa con `Z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JacobianPoint {
    pub x_coordinate: FieldElement,
    pub y_coordinate: FieldElement,
    pub z_coordinate: FieldElement,
}

impl JacobianPoint {
    /// El punto en el infinito, elemento neutro del grupo.
    #[must_use]
    pub const fn infinity() -> Self {
        Self {
            x_coordinate: FieldElement::from_u64(1),
            y_coordinate: FieldElement::from_u64(1),
            z_coordinate: FieldElement::from_u64(0),
        }
    }

    /// Construye un punto Jacobiano a partir de coordenadas afines (`Z = 1`).
    #[must_use]
    pub fn from_affine(x_coordinate: FieldElement, y_coordinate: FieldElement) -> Self {
        Self { x_coordinate, y_coordinate, z_coordinate: FieldElement::from_u64(1) }
    }

    /// Construye un punto Jacobiano a partir de una clave pública comprimida
    /// de 33 bytes en formato SEC1 (`0x02`/`0x03` + X de 32 bytes).
    ///
    /// # Errors
    /// Retorna [`MathError::InvalidLength`] si `compressed_bytes` no mide 33
    /// bytes, o [`MathError::EllipticCurveError`] si la librería subyacente
    /// rechaza el punto (no está en la curva).
    pub fn from_compressed_sec1(compressed_bytes: &[u8]) -> Result<Self, MathError> {
        if compressed_bytes.len() != 33 {
            return Err(MathError::InvalidLength { expected: 33, got: compressed_bytes.len() });
        }
        let public_key = secp256k1::PublicKey::from_slice(compressed_bytes)?;
        let uncompressed = public_key.serialize_uncompressed();
        let x_bytes: [u8; 32] = uncompressed[1..33].try_into().unwrap();
        let y_bytes: [u8; 32] = uncompressed[33..65].try_into().unwrap();
        Ok(Self::from_affine(
            FieldElement::from_bytes_be(&x_bytes),
            FieldElement::from_bytes_be(&y_bytes),
        ))
    }

    /// `true` si el punto es el punto en el infinito.
    #[inline(always)]
    #[must_use]
    pub fn is_infinity(&self) -> bool {
        self.z_coordinate.is_zero()
    }

    /// Proyecta un punto a su clave pública comprimida SEC1 de 33 bytes
    /// (`0x02` si `Y` es par, `0x03` si es impar, seguido de `X` afín).
    ///
    /// Toma `z_inverse`, el inverso de `Z` ya calculado (típicamente vía
    /// [`FieldElement::batch_invert_into`]), en vez de invertir internamente:
    /// esto es lo que permite amortizar la inversión sobre un lote entero de
    /// puntos caminados secuencialmente.
    ///
    /// # Errors
    /// Retorna [`MathError::PointAtInfinity`] si el punto es el infinito.
    pub fn to_compressed_sec1_with_inverse(
        &self,
        z_inverse: &FieldElement,
    ) -> Result<[u8; 33], MathError> {
        if self.is_infinity() {
            return Err(MathError::PointAtInfinity);
        }
        let z_inverse_squared = z_inverse.square_modular();
        let z_inverse_cubed = z_inverse_squared.multiply_modular(z_inverse);

        let affine_x = self.x_coordinate.multiply_modular(&z_inverse_squared);
        let affine_y = self.y_coordinate.multiply_modular(&z_inverse_cubed);

        let mut output = [0u8; 33];
        output[0] = if affine_y.is_odd() { 0x03 } else { 0x02 };
        output[1..].copy_from_slice(&affine_x.to_bytes_be());
        Ok(output)
    }
}
