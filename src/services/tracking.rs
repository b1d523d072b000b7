//! Generador de números de tracking
//!
//! Formato: `TRK` + 8 caracteres en [A-Z0-9]. La variante única consulta el
//! repositorio y reintenta un número acotado de veces.

use rand::Rng;
use tracing::warn;

use crate::repositories::TransportRepository;
use crate::utils::errors::{AppError, AppResult};

const TRACKING_PREFIX: &str = "TRK";
const TRACKING_SUFFIX_LEN: usize = 8;
const TRACKING_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const MAX_TRACKING_ATTEMPTS: usize = 5;

pub fn generate_tracking_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TRACKING_SUFFIX_LEN)
        .map(|_| TRACKING_CHARSET[rng.gen_range(0..TRACKING_CHARSET.len())] as char)
        .collect();
    format!("{}{}", TRACKING_PREFIX, suffix)
}

/// Número de tracking que no existe todavía en el repositorio
pub async fn generate_unique_tracking_number(repository: &dyn TransportRepository) -> AppResult<String> {
    generate_unique_with(repository, generate_tracking_number).await
}

async fn generate_unique_with<F>(repository: &dyn TransportRepository, mut generate: F) -> AppResult<String>
where
    F: FnMut() -> String + Send,
{
    for attempt in 1..=MAX_TRACKING_ATTEMPTS {
        let candidate = generate();
        if !repository.tracking_number_exists(&candidate).await? {
            return Ok(candidate);
        }
        warn!("⚠️ Colisión de tracking {} (intento {}/{})", candidate, attempt, MAX_TRACKING_ATTEMPTS);
    }

    Err(AppError::TrackingGeneration(format!(
        "no unique tracking number after {} attempts",
        MAX_TRACKING_ATTEMPTS
    )))
}
