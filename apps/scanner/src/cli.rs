// [apps/scanner/src/cli.rs]
//! Argumentos de línea de comandos del escáner (§6).

use crate::errors::ScannerError;
use clap::Parser;
use std::path::PathBuf;

/// Motor de búsqueda por fuerza bruta para el rompecabezas Bitcoin #71.
#[derive(Debug, Parser)]
#[command(name = "puzzle71-scanner", about, long_about = None)]
pub struct ScannerArgs {
    /// Número de hilos trabajadores. Por defecto, el número de CPUs lógicos
    /// disponibles. Debe caer en `[1, 256]`.
    #[arg(long, env = "PUZZLE71_WORKERS")]
    pub workers: Option<u16>,

    /// Ruta donde se escribe el registro de hallazgo.
    #[arg(long, env = "PUZZLE71_FOUND_PATH", default_value = "puzzle71_found.txt")]
    pub found_path: PathBuf,

    /// Rutas adicionales de respaldo a las que también se copia el registro
    /// de hallazgo (§4.5). Puede repetirse.
    #[arg(long = "backup-path")]
    pub backup_paths: Vec<PathBuf>,
}

impl ScannerArgs {
    /// Resuelve el número de trabajadores efectivo, validando el rango
    /// permitido `[1, 256]` (§6).
    ///
    /// # Errors
    /// Retorna [`ScannerError::WorkerCountOutOfRange`] si el valor solicitado
    /// (explícito o detectado) cae fuera de `[1, 256]`.
    pub fn resolve_worker_count(&self) -> Result<u16, ScannerError> {
        let requested = self.workers.unwrap_or_else(|| {
            u16::try_from(num_cpus::get()).unwrap_or(u16::MAX)
        });
        if requested == 0 || requested > 256 {
            return Err(ScannerError::WorkerCountOutOfRange { requested });
        }
        Ok(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_worker_count_within_range_is_accepted() {
        let args = ScannerArgs { workers: Some(8), found_path: PathBuf::from("x"), backup_paths: vec![] };
        assert_eq!(args.resolve_worker_count().unwrap(), 8);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let args = ScannerArgs { workers: Some(0), found_path: PathBuf::from("x"), backup_paths: vec![] };
        assert!(matches!(args.resolve_worker_count(), Err(ScannerError::WorkerCountOutOfRange { requested: 0 })));
    }

    #[test]
    fn excessive_worker_count_is_rejected() {
        let args = ScannerArgs { workers: Some(257), found_path: PathBuf::from("x"), backup_paths: vec![] };
        assert!(matches!(
            args.resolve_worker_count(),
            Err(ScannerError::WorkerCountOutOfRange { requested: 257 })
        ));
    }

    #[test]
    fn default_worker_count_falls_back_to_cpu_count() {
        let args = ScannerArgs { workers: None, found_path: PathBuf::from("x"), backup_paths: vec![] };
        assert!(args.resolve_worker_count().unwrap() >= 1);
    }
}
