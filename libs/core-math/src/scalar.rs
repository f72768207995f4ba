// [libs/core-math/src/scalar.rs]
//! El escalar de curva `k`: un entero de 256 bits reducido módulo el orden
//! `n` del grupo secp256k1.

use crate::errors::MathError;

/// El orden del grupo secp256k1, en palabras little-endian de 64 bits.
pub const SECP256K1_CURVE_ORDER_N: [u64; 4] = [
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
];

/// Un escalar de curva, siempre mantenido en `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scalar {
    /// Palabras de 64 bits en orden little-endian.
    pub private_scalar_limbs: [u64; 4],
}

impl Scalar {
    /// Construye un escalar a partir de 32 bytes big-endian.
    ///
    /// # Errors
    /// Retorna [`MathError::InvalidScalar`] si el valor es cero o `>= n`.
    pub fn from_u256_be(bytes_input: &[u8; 32]) -> Result<Self, MathError> {
        let mut limbs = [0u64; 4];
        for (index, limb) in limbs.iter_mut().enumerate() {
            let byte_start_offset = (3 - index) * 8;
            *limb = u64::from_be_bytes(bytes_input[byte_start_offset..byte_start_offset + 8].try_into().unwrap());
        }
        let candidate = Self { private_scalar_limbs: limbs };
        if candidate.is_zero() || candidate.is_greater_than_or_equal_to_order() {
            return Err(MathError::InvalidScalar);
        }
        Ok(candidate)
    }

    /// Construye un escalar a partir de un `u64`, sin validar contra `n`
    /// (siempre seguro: cualquier `u64` es menor que `n`).
    #[inline(always)]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self { private_scalar_limbs: [value, 0, 0, 0] }
    }

    /// Serializa el escalar a 32 bytes big-endian.
    #[must_use]
    pub fn to_u256_be(&self) -> [u8; 32] {
        let mut bytes_output = [0u8; 32];
        for (index, limb) in self.private_scalar_limbs.iter().enumerate() {
            let byte_start_offset = (3 - index) * 8;
            bytes_output[byte_start_offset..byte_start_offset + 8].copy_from_slice(&limb.to_be_bytes());
        }
        bytes_output
    }

    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.private_scalar_limbs.iter().all(|&word| word == 0)
    }

    /// `true` si `self >= n`, el orden de la curva.
    #[must_use]
    pub fn is_greater_than_or_equal_to_order(&self) -> bool {
        for i in (0..4).rev() {
            if self.private_scalar_limbs[i] > SECP256K1_CURVE_ORDER_N[i] {
                return true;
            }
            if self.private_scalar_limbs[i] < SECP256K1_CURVE_ORDER_N[i] {
                return false;
            }
        }
        true
    }

    /// Incrementa el escalar en `delta`, envolviendo módulo `n` si excede.
    ///
    /// Usado por el trabajador del escáner para avanzar el escalar base de
    /// un lote tras cada ráfaga completada.
    #[must_use]
    pub fn add_u64(&self, delta: u64) -> Self {
        let mut result_limbs = [0u64; 4];
        let mut carry: u128 = delta as u128;
        for i in 0..4 {
            let sum = (self.private_scalar_limbs[i] as u128) + carry;
            result_limbs[i] = sum as u64;
            carry = sum >> 64;
        }
        let result_scalar = Self { private_scalar_limbs: result_limbs };
        if carry != 0 || result_scalar.is_greater_than_or_equal_to_order() {
            result_scalar.subtract_order()
        } else {
            result_scalar
        }
    }

    fn subtract_order(&self) -> Self {
        let mut result_limbs = [0u64; 4];
        let mut borrow: i128 = 0;
        for i in 0..4 {
            let difference = (self.private_scalar_limbs[i] as i128)
                - (SECP256K1_CURVE_ORDER_N[i] as i128)
                - borrow;
            if difference < 0 {
                result_limbs[i] = (difference + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result_limbs[i] = difference as u64;
                borrow = 0;
            }
        }
        Self { private_scalar_limbs: result_limbs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        let zero_bytes = [0u8; 32];
        assert_eq!(Scalar::from_u256_be(&zero_bytes), Err(MathError::InvalidScalar));
    }

    #[test]
    fn order_itself_is_rejected() {
        let mut bytes = [0u8; 32];
        for (index, limb) in SECP256K1_CURVE_ORDER_N.iter().enumerate() {
            let byte_start_offset = (3 - index) * 8;
            bytes[byte_start_offset..byte_start_offset + 8].copy_from_slice(&limb.to_be_bytes());
        }
        assert_eq!(Scalar::from_u256_be(&bytes), Err(MathError::InvalidScalar));
    }

    #[test]
    fn add_u64_round_trips_through_bytes() {
        let base = Scalar::from_u64(1_000_000);
        let advanced = base.add_u64(42);
        assert_eq!(advanced.private_scalar_limbs[0], 1_000_042);
    }

    #[test]
    fn add_u64_wraps_on_order_overflow() {
        // `n - 1`: the curve order's low limb is nonzero, so subtracting one
        // from it alone needs no borrow propagation.
        let mut near_order_limbs = SECP256K1_CURVE_ORDER_N;
        near_order_limbs[0] -= 1;
        let near_order = Scalar { private_scalar_limbs: near_order_limbs };

        let wrapped = near_order.add_u64(1);
        assert_eq!(wrapped, Scalar::from_u64(0));
    }
}
