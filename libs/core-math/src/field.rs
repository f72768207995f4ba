// [libs/core-math/src/field.rs]
//! Aritmética modular sobre el cuerpo finito de secp256k1.
//!
//! El primo de campo es `p = 2^256 - 2^32 - 977`. La representación interna
//! usa cuatro palabras de 64 bits en orden little-endian; toda la aritmética
//! pasa por el dominio de Montgomery para evitar la división de precisión
//! múltiple en el camino caliente.

use crate::errors::MathError;
use tracing::trace;

/// El primo de campo secp256k1, en palabras little-endian de 64 bits.
pub const SECP256K1_FIELD_PRIME: [u64; 4] = [
    0xFFFFFFFEFFFFFC2F,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
];

/// `m = -p^-1 mod 2^64`, la constante de reducción de Montgomery (REDC).
const MONTGOMERY_NEG_INV_P: u64 = 0xD838091DD2253531;

/// `R^2 mod p`, usada para entrar al dominio de Montgomery.
const MONTGOMERY_R2_MOD_P: [u64; 4] = [0x000007A2000E90A1, 0x0000000000000001, 0, 0];

/// Un elemento del cuerpo finito `F_p`. Siempre reside en `[0, p-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldElement {
    /// Palabras de 64 bits en orden little-endian.
    pub internal_words: [u64; 4],
}

impl FieldElement {
    /// Construye un elemento a partir de un escalar de 64 bits.
    #[inline(always)]
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self { internal_words: [value, 0, 0, 0] }
    }

    /// Construye un elemento directamente desde sus limbs little-endian.
    #[inline(always)]
    #[must_use]
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self { internal_words: limbs }
    }

    /// Construye un elemento a partir de 32 bytes big-endian.
    ///
    /// No realiza reducción modular: asume que el valor ya es `< p`, que es
    /// el caso para cualquier coordenada producida por este motor.
    #[must_use]
    pub fn from_bytes_be(bytes_input: &[u8; 32]) -> Self {
        let mut limbs_output = [0u64; 4];
        for (index, limb) in limbs_output.iter_mut().enumerate() {
            let byte_start_offset = (3 - index) * 8;
            *limb = u64::from_be_bytes(
                bytes_input[byte_start_offset..byte_start_offset + 8]
                    .try_into()
                    .unwrap(),
            );
        }
        Self { internal_words: limbs_output }
    }

    /// Serializa el elemento a 32 bytes big-endian (formato Bitcoin).
    #[inline(always)]
    #[must_use]
    pub fn to_bytes_be(&self) -> [u8; 32] {
        let mut bytes_output = [0u8; 32];
        for (index, limb) in self.internal_words.iter().enumerate() {
            let byte_start_offset = (3 - index) * 8;
            bytes_output[byte_start_offset..byte_start_offset + 8]
                .copy_from_slice(&limb.to_be_bytes());
        }
        bytes_output
    }

    /// Multiplicación modular: `(self * other) mod p`.
    #[inline(always)]
    #[must_use]
    pub fn multiply_modular(&self, other: &Self) -> Self {
        let a_montgomery = self.to_montgomery_domain();
        let b_montgomery = other.to_montgomery_domain();
        a_montgomery
            .multiply_modular_montgomery(&b_montgomery)
            .from_montgomery_domain()
    }

    /// Cuadrado modular: `(self^2) mod p`.
    #[inline(always)]
    #[must_use]
    pub fn square_modular(&self) -> Self {
        self.multiply_modular(self)
    }

    /// Sustracción modular: `(self - other) mod p`.
    #[inline(always)]
    #[must_use]
    pub fn subtract_modular(&self, other: &Self) -> Self {
        let mut result_limbs = [0u64; 4];
        let mut borrow: i128 = 0;

        for i in 0..4 {
            let difference =
                (self.internal_words[i] as i128) - (other.internal_words[i] as i128) - borrow;
            if difference < 0 {
                result_limbs[i] = (difference + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result_limbs[i] = difference as u64;
                borrow = 0;
            }
        }

        let result_element = Self { internal_words: result_limbs };
        if borrow != 0 {
            result_element.add_prime()
        } else {
            result_element
        }
    }

    /// Adición modular: `(self + other) mod p`.
    #[inline(always)]
    #[must_use]
    pub fn add_modular(&self, other: &Self) -> Self {
        let mut result_limbs = [0u64; 4];
        let mut carry: u128 = 0;

        for i in 0..4 {
            let sum = (self.internal_words[i] as u128) + (other.internal_words[i] as u128) + carry;
            result_limbs[i] = sum as u64;
            carry = sum >> 64;
        }

        let result_element = Self { internal_words: result_limbs };
        if carry != 0 || result_element.is_greater_than_or_equal_to_prime() {
            result_element.subtract_prime()
        } else {
            result_element
        }
    }

    /// Multiplicación por un escalar pequeño (`u64`), reducida vía Solinas.
    #[inline(always)]
    #[must_use]
    pub fn multiply_by_u64(&self, multiplier: u64) -> Self {
        let mut product_512 = [0u64; 8];
        let mut carry: u128 = 0;

        for i in 0..4 {
            let product = (self.internal_words[i] as u128) * (multiplier as u128) + carry;
            product_512[i] = product as u64;
            carry = product >> 64;
        }
        product_512[4] = carry as u64;

        self.fold_solinas_reduction(product_512)
    }

    #[inline(always)]
    fn to_montgomery_domain(&self) -> Self {
        let r2_constant = Self { internal_words: MONTGOMERY_R2_MOD_P };
        let (low, high) = self.multiply_256x256_to_512(&r2_constant);
        self.execute_redc(low, high)
    }

    #[inline(always)]
    fn from_montgomery_domain(&self) -> Self {
        self.execute_redc(self.internal_words, [0u64; 4])
    }

    #[inline(always)]
    fn multiply_modular_montgomery(&self, other: &Self) -> Self {
        let (low_words, high_words) = self.multiply_256x256_to_512(other);
        self.execute_redc(low_words, high_words)
    }

    /// Reducción de Montgomery (REDC) sobre un producto de 512 bits.
    #[inline(always)]
    fn execute_redc(&self, low: [u64; 4], high: [u64; 4]) -> Self {
        let mut accumulator = [0u64; 9];
        accumulator[0..4].copy_from_slice(&low);
        accumulator[4..8].copy_from_slice(&high);

        for i in 0..4 {
            let multiplier_m = accumulator[i].wrapping_mul(MONTGOMERY_NEG_INV_P);
            let mut carry: u128 = 0;

            for j in 0..4 {
                let product = (multiplier_m as u128) * (SECP256K1_FIELD_PRIME[j] as u128)
                    + (accumulator[i + j] as u128)
                    + carry;
                accumulator[i + j] = product as u64;
                carry = product >> 64;
            }

            let mut lookahead = i + 4;
            while carry > 0 && lookahead < 9 {
                let sum = (accumulator[lookahead] as u128) + carry;
                accumulator[lookahead] = sum as u64;
                carry = sum >> 64;
                lookahead += 1;
            }
        }

        let mut final_words = [0u64; 4];
        final_words.copy_from_slice(&accumulator[4..8]);
        let mut result_element = Self { internal_words: final_words };

        // `accumulator[8]` carries the 257th bit of the reduced result (the
        // REDC bound is `< 2p < 2^257`). Fold it back via the Solinas
        // identity `2^256 = 2^32 + 977 (mod p)` rather than truncating it.
        if accumulator[8] != 0 {
            result_element = result_element.add_modular(&Self::from_limbs([0x1000003D1, 0, 0, 0]));
        }

        if result_element.is_greater_than_or_equal_to_prime() {
            result_element.subtract_prime()
        } else {
            result_element
        }
    }

    fn multiply_256x256_to_512(&self, other: &Self) -> ([u64; 4], [u64; 4]) {
        let mut product = [0u64; 8];
        for i in 0..4 {
            let mut carry: u128 = 0;
            for j in 0..4 {
                let term = (self.internal_words[i] as u128) * (other.internal_words[j] as u128)
                    + (product[i + j] as u128)
                    + carry;
                product[i + j] = term as u64;
                carry = term >> 64;
            }
            product[i + 4] = carry as u64;
        }
        let mut low = [0u64; 4];
        let mut high = [0u64; 4];
        low.copy_from_slice(&product[0..4]);
        high.copy_from_slice(&product[4..8]);
        (low, high)
    }

    #[inline(always)]
    fn is_greater_than_or_equal_to_prime(&self) -> bool {
        for i in (0..4).rev() {
            if self.internal_words[i] > SECP256K1_FIELD_PRIME[i] {
                return true;
            }
            if self.internal_words[i] < SECP256K1_FIELD_PRIME[i] {
                return false;
            }
        }
        true
    }

    fn subtract_prime(&self) -> Self {
        let mut result_words = [0u64; 4];
        let mut borrow: i128 = 0;
        for i in 0..4 {
            let difference =
                (self.internal_words[i] as i128) - (SECP256K1_FIELD_PRIME[i] as i128) - borrow;
            if difference < 0 {
                result_words[i] = (difference + (1i128 << 64)) as u64;
                borrow = 1;
            } else {
                result_words[i] = difference as u64;
                borrow = 0;
            }
        }
        Self { internal_words: result_words }
    }

    fn add_prime(&self) -> Self {
        let mut result_words = [0u64; 4];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let sum = (self.internal_words[i] as u128) + (SECP256K1_FIELD_PRIME[i] as u128) + carry;
            result_words[i] = sum as u64;
            carry = sum >> 64;
        }
        Self { internal_words: result_words }
    }

    /// Reducción del Primo de Solinas (`2^256 = 2^32 + 977 mod p`) sobre un
    /// producto parcial de 320 bits (usado solo por `multiply_by_u64`).
    fn fold_solinas_reduction(&self, product_320: [u64; 8]) -> Self {
        let low_element = Self {
            internal_words: [product_320[0], product_320[1], product_320[2], product_320[3]],
        };
        let high_words = [product_320[4], product_320[5], product_320[6], product_320[7]];
        let mut folded_limbs = [0u64; 4];
        let mut carry: u128 = 0;
        for i in 0..4 {
            let term = (high_words[i] as u128) * 0x1000003D1u128 + carry;
            folded_limbs[i] = term as u64;
            carry = term >> 64;
        }
        low_element.add_modular(&Self { internal_words: folded_limbs })
    }

    /// `true` si el elemento es cero.
    #[inline(always)]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.internal_words.iter().all(|&word| word == 0)
    }

    /// `true` si el elemento es impar (usado para el byte de paridad SEC1).
    #[inline(always)]
    #[must_use]
    pub fn is_odd(&self) -> bool {
        (self.internal_words[0] & 1) == 1
    }

    /// Inversión modular vía el pequeño teorema de Fermat (`self^(p-2)`).
    ///
    /// Costosa (~256 cuadrados + ~128 multiplicaciones); solo debe llamarse
    /// una vez por lote a través de [`Self::batch_invert_into`].
    pub fn invert(&self) -> Result<Self, MathError> {
        if self.is_zero() {
            return Err(MathError::BatchInversionCollapse);
        }
        trace!("computing modular inverse via Fermat exponentiation");

        let mut base_montgomery = self.to_montgomery_domain();
        let mut result_montgomery = FieldElement::from_u64(1).to_montgomery_domain();
        let mut exponent = SECP256K1_FIELD_PRIME;
        exponent[0] -= 2;

        for &word in &exponent {
            let mut bits = word;
            for _ in 0..64 {
                if bits & 1 == 1 {
                    result_montgomery = result_montgomery.multiply_modular_montgomery(&base_montgomery);
                }
                base_montgomery = base_montgomery.multiply_modular_montgomery(&base_montgomery);
                bits >>= 1;
            }
        }
        Ok(result_montgomery.from_montgomery_domain())
    }

    /// Inversión simultánea de Montgomery: invierte `elements_collection` con
    /// un único `invert()`, amortizado sobre `O(n)` multiplicaciones.
    ///
    /// `results_output` y `scratch_memory` deben tener la misma longitud que
    /// `elements_collection`; `scratch_memory` se usa como almacén temporal
    /// de productos parciales y su contenido final no tiene significado.
    ///
    /// # Errors
    /// Retorna [`MathError::BatchInversionCollapse`] si cualquier elemento de
    /// entrada es cero.
    pub fn batch_invert_into(
        elements_collection: &[FieldElement],
        results_output: &mut [FieldElement],
        scratch_memory: &mut [FieldElement],
    ) -> Result<(), MathError> {
        let elements_count = elements_collection.len();
        if elements_count == 0 {
            return Ok(());
        }

        let mut cumulative_product = FieldElement::from_u64(1);
        for (index, element) in elements_collection.iter().enumerate() {
            if element.is_zero() {
                return Err(MathError::BatchInversionCollapse);
            }
            cumulative_product = cumulative_product.multiply_modular(element);
            scratch_memory[index] = cumulative_product;
        }

        let mut current_inverse = cumulative_product.invert()?;
        for index in (1..elements_count).rev() {
            results_output[index] = current_inverse.multiply_modular(&scratch_memory[index - 1]);
            current_inverse = current_inverse.multiply_modular(&elements_collection[index]);
        }
        results_output[0] = current_inverse;

        Ok(())
    }
}
