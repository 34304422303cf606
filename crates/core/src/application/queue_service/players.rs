// Player Registration Use Cases

use crate::domain::{Player, PlayerId, PlayerName};
use crate::error::{AppError, Result};
use crate::port::{IdProvider, PlayerRepository};
use tracing::{info, warn};

/// Register a new player under a freshly generated ID
///
/// # Arguments
///
/// * `player_repo` - Player registry
/// * `id_provider` - ID generator (injected for determinism)
/// * `name` - Raw display name (trimmed and validated here)
pub async fn register(
    player_repo: &dyn PlayerRepository,
    id_provider: &dyn IdProvider,
    name: &str,
) -> Result<Player> {
    let name = PlayerName::parse(name).map_err(|e| {
        warn!(error = %e, "Rejected player registration");
        AppError::Validation(e.to_string())
    })?;

    let player = Player::new(id_provider.generate_id(), name);
    player_repo.insert(&player).await?;

    info!(player_id = %player.id, name = %player.name, "Player registered");
    Ok(player)
}

/// Resolve a registered player or fail with NotFound
pub async fn find(player_repo: &dyn PlayerRepository, player_id: &PlayerId) -> Result<Player> {
    player_repo
        .find_by_id(player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))
}
