// [libs/core-math/src/curve.rs]
//! Operaciones geométricas sobre secp256k1 en coordenadas Jacobianas.
//!
//! secp256k1 tiene `a = 0`, lo que simplifica las fórmulas de duplicado
//! frente al caso general de Weierstrass.

use crate::errors::MathError;
use crate::field::FieldElement;
use crate::generator::generator_affine_coordinates;
use crate::point::JacobianPoint;

/// Motor de operaciones geométricas puras sobre [`JacobianPoint`].
///
/// No mantiene estado: cada operación es una función pura de sus entradas,
/// lo que permite llamarla desde múltiples hilos trabajadores sin
/// sincronización.
pub struct UnifiedCurveEngine;

impl UnifiedCurveEngine {
    /// Suma un punto Jacobiano con un punto afín fijo (típicamente el
    /// generador `G`), usando fórmulas de adición mixta (`Z2 = 1`).
    ///
    /// Si las coordenadas X proyectadas coinciden (`H = 0`), el resultado
    /// degenera: delega en [`Self::double_point_jacobian`] cuando las Y
    /// también coinciden (el punto se está sumando consigo mismo), o
    /// retorna el infinito cuando son inversos aditivos.
    #[must_use]
    pub fn add_mixed_deterministic(
        jacobian_point: &JacobianPoint,
        affine_x: &FieldElement,
        affine_y: &FieldElement,
    ) -> JacobianPoint {
        if jacobian_point.is_infinity() {
            return JacobianPoint::from_affine(*affine_x, *affine_y);
        }

        let z1_squared = jacobian_point.z_coordinate.square_modular();
        let z1_cubed = z1_squared.multiply_modular(&jacobian_point.z_coordinate);

        let u1 = jacobian_point.x_coordinate;
        let u2 = affine_x.multiply_modular(&z1_squared);
        let s1 = jacobian_point.y_coordinate;
        let s2 = affine_y.multiply_modular(&z1_cubed);

        let h_delta = u2.subtract_modular(&u1);
        let r_delta = s2.subtract_modular(&s1);

        if h_delta.is_zero() {
            if r_delta.is_zero() {
                return Self::double_point_jacobian(jacobian_point);
            }
            return JacobianPoint::infinity();
        }

        let h_squared = h_delta.square_modular();
        let h_cubed = h_squared.multiply_modular(&h_delta);
        let u1_h_squared = u1.multiply_modular(&h_squared);

        let x3 = r_delta
            .square_modular()
            .subtract_modular(&h_cubed)
            .subtract_modular(&u1_h_squared.multiply_by_u64(2));
        let y3 = r_delta
            .multiply_modular(&u1_h_squared.subtract_modular(&x3))
            .subtract_modular(&s1.multiply_modular(&h_cubed));
        let z3 = jacobian_point.z_coordinate.multiply_modular(&h_delta);

        JacobianPoint { x_coordinate: x3, y_coordinate: y3, z_coordinate: z3 }
    }

    /// Duplica un punto Jacobiano (`2P`), usando las fórmulas simplificadas
    /// para `a = 0`.
    #[must_use]
    pub fn double_point_jacobian(jacobian_point: &JacobianPoint) -> JacobianPoint {
        if jacobian_point.is_infinity() || jacobian_point.y_coordinate.is_zero() {
            return JacobianPoint::infinity();
        }

        let a_term = jacobian_point.x_coordinate.square_modular();
        let b_term = jacobian_point.y_coordinate.square_modular();
        let c_term = b_term.square_modular();

        let xb_sum_squared = jacobian_point.x_coordinate.add_modular(&b_term).square_modular();
        let d_term = xb_sum_squared
            .subtract_modular(&a_term)
            .subtract_modular(&c_term)
            .multiply_by_u64(2);

        let e_term = a_term.multiply_by_u64(3);
        let f_term = e_term.square_modular();

        let x3 = f_term.subtract_modular(&d_term.multiply_by_u64(2));
        let y3 = e_term
            .multiply_modular(&d_term.subtract_modular(&x3))
            .subtract_modular(&c_term.multiply_by_u64(8));
        let z3 = jacobian_point
            .y_coordinate
            .multiply_by_u64(2)
            .multiply_modular(&jacobian_point.z_coordinate);

        JacobianPoint { x_coordinate: x3, y_coordinate: y3, z_coordinate: z3 }
    }

    /// Motor de ráfagas (§4.2 "Batch EC engine"): camina `n` puntos
    /// Jacobianos sumando el generador secuencialmente a partir de `start`,
    /// produciendo `{start, start+G, start+2G, ..., start+(n-1)G}`.
    ///
    /// `n == 0` produce un lote vacío.
    #[must_use]
    pub fn walk_batch(start: JacobianPoint, n: usize) -> Vec<JacobianPoint> {
        let mut batch = Vec::with_capacity(n);
        if n == 0 {
            return batch;
        }

        let (generator_affine_x, generator_affine_y) = generator_affine_coordinates();
        let mut walking_point = start;
        batch.push(walking_point);
        for _ in 1..n {
            walking_point = Self::add_mixed_deterministic(&walking_point, &generator_affine_x, &generator_affine_y);
            batch.push(walking_point);
        }
        batch
    }

    /// Motor de ráfagas (§4.2 "Batch EC engine"): convierte un lote
    /// Jacobiano entero a claves públicas comprimidas SEC1, amortizando la
    /// inversión modular de las coordenadas `Z` con una única inversión
    /// simultánea ([`FieldElement::batch_invert_into`]) en vez de una
    /// inversión por punto.
    ///
    /// # Errors
    /// Retorna [`MathError`] si alguna coordenada `Z` del lote es cero, o si
    /// algún punto del lote es el infinito.
    pub fn to_affine_batch(jacobian_batch: &[JacobianPoint]) -> Result<Vec<[u8; 33]>, MathError> {
        let z_coordinates: Vec<FieldElement> = jacobian_batch.iter().map(|point| point.z_coordinate).collect();
        let mut z_inverses = vec![FieldElement::default(); jacobian_batch.len()];
        let mut scratch = vec![FieldElement::default(); jacobian_batch.len()];
        FieldElement::batch_invert_into(&z_coordinates, &mut z_inverses, &mut scratch)?;

        jacobian_batch
            .iter()
            .zip(z_inverses.iter())
            .map(|(point, z_inverse)| point.to_compressed_sec1_with_inverse(z_inverse))
            .collect()
    }
}
