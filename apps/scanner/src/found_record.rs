// [apps/scanner/src/found_record.rs]
//! El registro de hallazgo: el artefacto de texto plano escrito a disco en
//! el instante en que un trabajador encuentra la clave privada objetivo
//! (§6 "Found-key file" — el único protocolo de intercambio con el
//! vigía de blockchain que consume este archivo).

use crate::errors::ScannerError;
use chrono::Utc;
use std::fs;
use std::path::Path;

/// Recorta los ceros a la izquierda de una clave privada de 32 bytes
/// big-endian, produciendo la forma hexadecimal compacta de "hasta 18
/// dígitos" que pide §6 (el rango del rompecabezas #71 cabe en 71 bits,
/// o 18 nibbles).
#[must_use]
fn compact_private_key_hex(private_key_bytes_be: &[u8; 32]) -> String {
    let full_hex = hex::encode(private_key_bytes_be);
    let trimmed = full_hex.trim_start_matches('0');
    if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
}

/// Un hallazgo de clave privada, listo para serializarse a disco.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundRecord {
    /// La clave privada encontrada, en hexadecimal compacto (sin ceros a la
    /// izquierda, sin el prefijo `0x`).
    pub private_key_hex: String,
    /// La dirección Base58Check P2PKH derivada de la clave.
    pub address: String,
    /// El hash160 de 20 bytes, en hexadecimal.
    pub hash160_hex: String,
    /// El total aproximado de claves examinadas por todos los
    /// trabajadores hasta el momento del hallazgo (§3 "shared counters").
    pub keys_checked: u64,
    /// Marca de tiempo del hallazgo, en el formato de `ctime` que pide §6.
    pub found_at: String,
}

impl FoundRecord {
    /// Construye un registro de hallazgo con la marca de tiempo actual.
    #[must_use]
    pub fn new(private_key_bytes_be: [u8; 32], address: String, hash160_hex: String, keys_checked: u64) -> Self {
        Self {
            private_key_hex: compact_private_key_hex(&private_key_bytes_be),
            address,
            hash160_hex,
            keys_checked,
            found_at: Utc::now().format("%a %b %e %H:%M:%S %Y").to_string(),
        }
    }

    /// Serializa el registro al formato de archivo de hallazgo exacto que
    /// exige §6, consumido por el vigía de blockchain externo.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        format!(
            "PUZZLE #71 SOLUTION\nPrivate Key: 0x{}\nTarget: {}\nHash160: {}\nFound: {}\nTotal keys checked: {}\n",
            self.private_key_hex, self.address, self.hash160_hex, self.found_at, self.keys_checked
        )
    }

    /// Escribe el registro en `primary_path` y lo copia a cada ruta de
    /// `backup_paths` (§4.5 "copy the found-key record to additional backup
    /// locations if it exists").
    ///
    /// # Errors
    /// Retorna [`ScannerError::FoundRecordWriteFailed`] si la escritura a la
    /// ruta primaria falla. Los fallos al escribir una ruta de respaldo se
    /// registran como advertencia pero no hacen fallar la operación: el
    /// registro primario ya está a salvo.
    pub fn write_to_path(&self, primary_path: &Path, backup_paths: &[std::path::PathBuf]) -> Result<(), ScannerError> {
        let serialized = self.to_plain_text();
        fs::write(primary_path, &serialized)
            .map_err(|io_error| ScannerError::FoundRecordWriteFailed { record: Box::new(self.clone()), io_error })?;

        for backup_path in backup_paths {
            if let Err(io_error) = fs::write(backup_path, &serialized) {
                tracing::warn!(path = %backup_path.display(), error = %io_error, "failed to write found-record backup copy");
            }
        }
        Ok(())
    }
}
