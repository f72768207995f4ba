// [apps/scanner/src/errors.rs]
//! Catálogo de fallos a nivel de aplicación del escáner.

use crate::found_record::FoundRecord;
use thiserror::Error;

/// Errores que pueden detener el escáner antes de, o durante, la búsqueda.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// El auto-test de correctud del motor matemático falló al arrancar
    /// (§4.7, §7 "Fatal init errors").
    #[error("engine self-test failed, refusing to start: {0}")]
    SelfTestFailed(#[from] puzzle71_core_math::errors::MathError),

    /// No se pudo escribir el registro de hallazgo a disco. Carga el
    /// registro ya construido para que el llamador pueda imprimirlo a
    /// `stderr`: §7 "Found-but-write-fails" exige que la clave privada
    /// aparezca en la salida del proceso incluso si el archivo falla.
    #[error("found the key but failed to persist the found-key record: {io_error}")]
    FoundRecordWriteFailed {
        /// El registro de hallazgo ya construido, nunca perdido.
        record: Box<FoundRecord>,
        /// El error de E/S subyacente.
        #[source]
        io_error: std::io::Error,
    },

    /// El sistema operativo no entregó entropía utilizable para sembrar un
    /// generador de semillas (§7 "Entropy unavailable").
    #[error("operating system entropy source is unavailable")]
    EntropyUnavailable,

    /// El número de trabajadores solicitado cae fuera de `[1, 256]` (§6).
    #[error("worker count {requested} is out of the allowed range [1, 256]")]
    WorkerCountOutOfRange {
        /// El valor solicitado por el usuario.
        requested: u16,
    },
}
