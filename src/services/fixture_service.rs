// src/services/fixture_service.rs
use crate::{
    error::{AppError, AppResult},
    models::fixture::{Match, MatchInput, Standing, StandingInput},
    models::user::User,
    services::auth_service,
};
use sqlx::SqlitePool;

const SELECT_MATCH: &str = "SELECT id, home_team, away_team, date, venue, ticket_link, \
                            is_played, home_score, away_score, outcome FROM matches";

const SELECT_STANDING: &str = "SELECT id, position, team_name, played, points FROM standings";

// --- Jogos ---

pub async fn create_match(pool: &SqlitePool, actor: &User, input: &MatchInput) -> AppResult<Match> {
    auth_service::ensure_admin(actor)?;

    let id = sqlx::query(
        "INSERT INTO matches (home_team, away_team, date, venue, ticket_link,
                              is_played, home_score, away_score, outcome)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&input.home_team)
    .bind(&input.away_team)
    .bind(input.date)
    .bind(&input.venue)
    .bind(&input.ticket_link)
    .bind(input.is_played)
    .bind(input.home_score)
    .bind(input.away_score)
    .bind(&input.outcome)
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::info!("⚽ Jogo #{} agendado por '{}'.", id, actor.username);
    find_match_by_id(pool, id).await
}

pub async fn find_match_by_id(pool: &SqlitePool, id: i64) -> AppResult<Match> {
    sqlx::query_as::<_, Match>(&format!("{SELECT_MATCH} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_match(
    pool: &SqlitePool,
    actor: &User,
    id: i64,
    input: &MatchInput,
) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query(
        "UPDATE matches
         SET home_team = ?1, away_team = ?2, date = ?3, venue = ?4, ticket_link = ?5,
             is_played = ?6, home_score = ?7, away_score = ?8, outcome = ?9
         WHERE id = ?10",
    )
    .bind(&input.home_team)
    .bind(&input.away_team)
    .bind(input.date)
    .bind(&input.venue)
    .bind(&input.ticket_link)
    .bind(input.is_played)
    .bind(input.home_score)
    .bind(input.away_score)
    .bind(&input.outcome)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete_match(pool: &SqlitePool, actor: &User, id: i64) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query("DELETE FROM matches WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Jogos por disputar, do mais próximo para o mais distante.
/// `limit` None devolve todos (LIMIT -1 é "sem limite" no SQLite).
pub async fn upcoming_matches(pool: &SqlitePool, limit: Option<i64>) -> AppResult<Vec<Match>> {
    let matches = sqlx::query_as::<_, Match>(&format!(
        "{SELECT_MATCH} WHERE is_played = 0 ORDER BY date ASC, id ASC LIMIT ?1"
    ))
    .bind(limit.unwrap_or(-1))
    .fetch_all(pool)
    .await?;
    Ok(matches)
}

/// Resultados: jogos disputados, do mais recente para o mais antigo.
pub async fn played_matches(pool: &SqlitePool) -> AppResult<Vec<Match>> {
    let matches = sqlx::query_as::<_, Match>(&format!(
        "{SELECT_MATCH} WHERE is_played = 1 ORDER BY date DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(matches)
}

/// O próximo jogo é o primeiro da vista de jogos por disputar.
pub async fn next_match(pool: &SqlitePool) -> AppResult<Option<Match>> {
    let proximo = upcoming_matches(pool, Some(1)).await?.into_iter().next();
    Ok(proximo)
}

// --- Classificação ---

pub async fn create_standing(
    pool: &SqlitePool,
    actor: &User,
    input: &StandingInput,
) -> AppResult<Standing> {
    auth_service::ensure_admin(actor)?;
    ensure_position_free(pool, input.position, None).await?;

    let id = sqlx::query(
        "INSERT INTO standings (position, team_name, played, points) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(input.position)
    .bind(&input.team_name)
    .bind(input.played)
    .bind(input.points)
    .execute(pool)
    .await?
    .last_insert_rowid();

    find_standing_by_id(pool, id).await
}

pub async fn find_standing_by_id(pool: &SqlitePool, id: i64) -> AppResult<Standing> {
    sqlx::query_as::<_, Standing>(&format!("{SELECT_STANDING} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// Tabela classificativa por posição crescente.
pub async fn list_standings(pool: &SqlitePool) -> AppResult<Vec<Standing>> {
    let standings =
        sqlx::query_as::<_, Standing>(&format!("{SELECT_STANDING} ORDER BY position ASC"))
            .fetch_all(pool)
            .await?;
    Ok(standings)
}

pub async fn update_standing(
    pool: &SqlitePool,
    actor: &User,
    id: i64,
    input: &StandingInput,
) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;
    ensure_position_free(pool, input.position, Some(id)).await?;

    let rows = sqlx::query(
        "UPDATE standings SET position = ?1, team_name = ?2, played = ?3, points = ?4 WHERE id = ?5",
    )
    .bind(input.position)
    .bind(&input.team_name)
    .bind(input.played)
    .bind(input.points)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub async fn delete_standing(pool: &SqlitePool, actor: &User, id: i64) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query("DELETE FROM standings WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Cada posição da tabela só pode pertencer a uma equipa. Na edição, a
/// própria linha fica de fora da verificação.
async fn ensure_position_free(
    pool: &SqlitePool,
    position: i64,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let ocupada: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM standings WHERE position = ?1 AND id != ?2",
    )
    .bind(position)
    .bind(exclude_id.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    if ocupada > 0 {
        return Err(AppError::DuplicatePosition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth_service::seed_user;
    use chrono::NaiveDate;

    fn jogo(data: &str, disputado: bool) -> MatchInput {
        let date = NaiveDate::parse_from_str(data, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(16, 0, 0)
            .unwrap();
        MatchInput {
            home_team: "Leão Negro FC".to_string(),
            away_team: "Adversário".to_string(),
            date,
            venue: "Estádio da Mata".to_string(),
            ticket_link: None,
            is_played: disputado,
            home_score: disputado.then_some(1),
            away_score: disputado.then_some(0),
            outcome: disputado.then(|| "win".to_string()),
        }
    }

    fn linha(posicao: i64, equipa: &str) -> StandingInput {
        StandingInput {
            position: posicao,
            team_name: equipa.to_string(),
            played: 10,
            points: 20,
        }
    }

    #[tokio::test]
    async fn proximos_jogos_por_data_crescente_e_next_e_o_primeiro() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        // inseridos fora de ordem de propósito
        let d2 = create_match(&pool, &admin, &jogo("2026-09-20", false)).await.unwrap();
        let d1 = create_match(&pool, &admin, &jogo("2026-09-12", false)).await.unwrap();
        create_match(&pool, &admin, &jogo("2026-08-01", true)).await.unwrap();

        let upcoming = upcoming_matches(&pool, None).await.unwrap();
        let ids: Vec<i64> = upcoming.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![d1.id, d2.id]);

        let proximo = next_match(&pool).await.unwrap().unwrap();
        assert_eq!(proximo.id, d1.id);
    }

    #[tokio::test]
    async fn resultados_por_data_decrescente() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        let antigo = create_match(&pool, &admin, &jogo("2026-03-01", true)).await.unwrap();
        let recente = create_match(&pool, &admin, &jogo("2026-05-01", true)).await.unwrap();
        create_match(&pool, &admin, &jogo("2026-09-12", false)).await.unwrap();

        let played = played_matches(&pool).await.unwrap();
        let ids: Vec<i64> = played.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![recente.id, antigo.id]);
    }

    #[tokio::test]
    async fn sem_jogos_por_disputar_nao_ha_proximo() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        create_match(&pool, &admin, &jogo("2026-03-01", true)).await.unwrap();

        assert!(next_match(&pool).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn limite_da_pagina_inicial_respeitado() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        for dia in ["2026-09-05", "2026-09-12", "2026-09-19", "2026-09-26"] {
            create_match(&pool, &admin, &jogo(dia, false)).await.unwrap();
        }

        assert_eq!(upcoming_matches(&pool, Some(3)).await.unwrap().len(), 3);
        assert_eq!(upcoming_matches(&pool, None).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn mutacoes_de_jogos_exigem_admin() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let erro = create_match(&pool, &bob, &jogo("2026-09-12", false)).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert!(upcoming_matches(&pool, None).await.unwrap().is_empty());

        let m = create_match(&pool, &admin, &jogo("2026-09-12", false)).await.unwrap();
        let erro = delete_match(&pool, &bob, m.id).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert!(find_match_by_id(&pool, m.id).await.is_ok());
    }

    #[tokio::test]
    async fn tabela_sai_por_posicao_crescente() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        create_standing(&pool, &admin, &linha(3, "Terceiros")).await.unwrap();
        create_standing(&pool, &admin, &linha(1, "Leão Negro FC")).await.unwrap();
        create_standing(&pool, &admin, &linha(2, "Segundos")).await.unwrap();

        let tabela = list_standings(&pool).await.unwrap();
        let posicoes: Vec<i64> = tabela.iter().map(|s| s.position).collect();
        assert_eq!(posicoes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn posicao_repetida_e_recusada_mas_editar_a_propria_linha_passa() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        let primeira = create_standing(&pool, &admin, &linha(1, "Leão Negro FC")).await.unwrap();
        let erro = create_standing(&pool, &admin, &linha(1, "Intruso")).await.unwrap_err();
        assert!(matches!(erro, AppError::DuplicatePosition));
        assert_eq!(list_standings(&pool).await.unwrap().len(), 1);

        // atualizar a linha mantendo a sua posição não conta como conflito
        let mut mesma = linha(1, "Leão Negro FC");
        mesma.points = 23;
        update_standing(&pool, &admin, primeira.id, &mesma).await.unwrap();

        let segunda = create_standing(&pool, &admin, &linha(2, "Segundos")).await.unwrap();
        let erro = update_standing(&pool, &admin, segunda.id, &linha(1, "Segundos"))
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::DuplicatePosition));
    }

    #[tokio::test]
    async fn mutacoes_da_tabela_exigem_admin() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let erro = create_standing(&pool, &bob, &linha(1, "Leão Negro FC")).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert!(list_standings(&pool).await.unwrap().is_empty());

        let s = create_standing(&pool, &admin, &linha(1, "Leão Negro FC")).await.unwrap();
        let erro = delete_standing(&pool, &bob, s.id).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert_eq!(list_standings(&pool).await.unwrap().len(), 1);
    }
}
