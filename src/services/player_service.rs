// src/services/player_service.rs
use crate::{
    error::{AppError, AppResult},
    models::player::{Player, PlayerInput},
    models::user::User,
    services::auth_service,
};
use sqlx::SqlitePool;

const SELECT_PLAYER: &str =
    "SELECT id, name, position, age, height, weight, image_url FROM players";

pub async fn create_player(pool: &SqlitePool, actor: &User, input: &PlayerInput) -> AppResult<Player> {
    auth_service::ensure_admin(actor)?;

    let id = sqlx::query(
        "INSERT INTO players (name, position, age, height, weight, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(&input.name)
    .bind(&input.position)
    .bind(input.age)
    .bind(input.height)
    .bind(input.weight)
    .bind(&input.image_url)
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::info!("Jogador '{}' adicionado ao plantel por '{}'.", input.name, actor.username);
    find_player_by_id(pool, id).await
}

pub async fn find_player_by_id(pool: &SqlitePool, id: i64) -> AppResult<Player> {
    sqlx::query_as::<_, Player>(&format!("{SELECT_PLAYER} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// Plantel por ordem de inscrição.
pub async fn list_players(pool: &SqlitePool) -> AppResult<Vec<Player>> {
    let players = sqlx::query_as::<_, Player>(&format!("{SELECT_PLAYER} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;
    Ok(players)
}

pub async fn update_player(
    pool: &SqlitePool,
    actor: &User,
    id: i64,
    input: &PlayerInput,
) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query(
        "UPDATE players
         SET name = ?1, position = ?2, age = ?3, height = ?4, weight = ?5, image_url = ?6
         WHERE id = ?7",
    )
    .bind(&input.name)
    .bind(&input.position)
    .bind(input.age)
    .bind(input.height)
    .bind(input.weight)
    .bind(&input.image_url)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete_player(pool: &SqlitePool, actor: &User, id: i64) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query("DELETE FROM players WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth_service::{register_user, seed_user};

    fn input_base() -> PlayerInput {
        PlayerInput {
            name: "Rui Costa".to_string(),
            position: "Médio".to_string(),
            age: 28,
            height: 180,
            weight: 75,
            image_url: "https://cdn.leaonegro.pt/rui.jpg".to_string(),
        }
    }

    // O cenário completo: alice regista-se primeiro (admin), bob depois (comum);
    // bob é barrado, alice cria e o jogador aparece na listagem.
    #[tokio::test]
    async fn so_a_primeira_conta_gere_o_plantel() {
        let pool = test_pool().await;
        let alice = register_user(&pool, None, "alice", "alice@x.com", "pw")
            .await
            .unwrap();
        let bob = register_user(&pool, None, "bob", "bob@x.com", "pw")
            .await
            .unwrap();

        let erro = create_player(&pool, &bob, &input_base()).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert!(list_players(&pool).await.unwrap().is_empty());

        let jogador = create_player(&pool, &alice, &input_base()).await.unwrap();
        let plantel = list_players(&pool).await.unwrap();
        assert_eq!(plantel.len(), 1);
        assert_eq!(plantel[0].id, jogador.id);
    }

    #[tokio::test]
    async fn plantel_sai_por_ordem_de_inscricao() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        let mut primeiro = input_base();
        primeiro.name = "Primeiro".to_string();
        let mut segundo = input_base();
        segundo.name = "Segundo".to_string();

        create_player(&pool, &admin, &primeiro).await.unwrap();
        create_player(&pool, &admin, &segundo).await.unwrap();

        let nomes: Vec<String> = list_players(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(nomes, vec!["Primeiro".to_string(), "Segundo".to_string()]);
    }

    #[tokio::test]
    async fn atualizar_e_apagar_exigem_admin_e_registo_existente() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let jogador = create_player(&pool, &admin, &input_base()).await.unwrap();

        let mut novo = input_base();
        novo.position = "Avançado".to_string();
        let erro = update_player(&pool, &bob, jogador.id, &novo).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));

        update_player(&pool, &admin, jogador.id, &novo).await.unwrap();
        assert_eq!(
            find_player_by_id(&pool, jogador.id).await.unwrap().position,
            "Avançado"
        );

        let erro = update_player(&pool, &admin, 999, &novo).await.unwrap_err();
        assert!(matches!(erro, AppError::NotFound));

        delete_player(&pool, &admin, jogador.id).await.unwrap();
        let erro = find_player_by_id(&pool, jogador.id).await.unwrap_err();
        assert!(matches!(erro, AppError::NotFound));
    }
}
