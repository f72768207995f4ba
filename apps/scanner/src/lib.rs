// [apps/scanner/src/lib.rs]
//! Escáner de fuerza bruta para el rompecabezas Bitcoin #71: expone los
//! módulos de la aplicación como biblioteca para que `main.rs` y las
//! pruebas de integración los compartan.

pub mod cli;
pub mod coordinator;
pub mod errors;
pub mod found_record;
pub mod rng;
pub mod stats;
pub mod target;
pub mod telemetry;
pub mod worker;
