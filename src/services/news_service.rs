// src/services/news_service.rs
use crate::{
    error::{AppError, AppResult},
    models::news::{Comment, CommentWithAuthor, News},
    models::user::User,
    services::auth_service,
};
use chrono::Utc;
use sqlx::SqlitePool;

const SELECT_NEWS: &str = "SELECT id, title, content, image_url, date_posted FROM news";

// --- Notícias ---

pub async fn create_news(
    pool: &SqlitePool,
    actor: &User,
    title: &str,
    content: &str,
    image_url: &str,
) -> AppResult<News> {
    auth_service::ensure_admin(actor)?;

    let date_posted = Utc::now().naive_utc();
    let id = sqlx::query(
        "INSERT INTO news (title, content, image_url, date_posted) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(title)
    .bind(content)
    .bind(image_url)
    .bind(date_posted)
    .execute(pool)
    .await?
    .last_insert_rowid();

    tracing::info!("📰 Notícia #{} publicada por '{}'.", id, actor.username);
    find_news_by_id(pool, id).await
}

pub async fn find_news_by_id(pool: &SqlitePool, id: i64) -> AppResult<News> {
    sqlx::query_as::<_, News>(&format!("{SELECT_NEWS} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// Listagem pública: mais recente primeiro, com o id a desempatar.
pub async fn list_news(pool: &SqlitePool) -> AppResult<Vec<News>> {
    let news = sqlx::query_as::<_, News>(&format!(
        "{SELECT_NEWS} ORDER BY date_posted DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(news)
}

/// Atualiza título, conteúdo e imagem. A data de publicação nunca muda.
pub async fn update_news(
    pool: &SqlitePool,
    actor: &User,
    id: i64,
    title: &str,
    content: &str,
    image_url: &str,
) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let rows = sqlx::query("UPDATE news SET title = ?1, content = ?2, image_url = ?3 WHERE id = ?4")
        .bind(title)
        .bind(content)
        .bind(image_url)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Apaga a notícia e todos os comentários dela, na mesma transação.
pub async fn delete_news(pool: &SqlitePool, actor: &User, id: i64) -> AppResult<()> {
    auth_service::ensure_admin(actor)?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE news_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM news WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if rows == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound);
    }
    tx.commit().await?;

    tracing::info!("🗑️ Notícia #{} apagada por '{}'.", id, actor.username);
    Ok(())
}

// --- Comentários ---

/// Qualquer utilizador autenticado pode comentar uma notícia existente.
pub async fn create_comment(
    pool: &SqlitePool,
    author: &User,
    news_id: i64,
    text: &str,
) -> AppResult<Comment> {
    find_news_by_id(pool, news_id).await?;

    let date_posted = Utc::now().naive_utc();
    let id = sqlx::query(
        "INSERT INTO comments (text, date_posted, user_id, news_id) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(text)
    .bind(date_posted)
    .bind(author.id)
    .bind(news_id)
    .execute(pool)
    .await?
    .last_insert_rowid();

    find_comment_by_id(pool, id).await
}

pub async fn find_comment_by_id(pool: &SqlitePool, id: i64) -> AppResult<Comment> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, text, date_posted, user_id, news_id FROM comments WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Comentários de uma notícia por ordem de chegada, com o nome do autor.
pub async fn list_comments(pool: &SqlitePool, news_id: i64) -> AppResult<Vec<CommentWithAuthor>> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        "SELECT c.id, c.text, c.date_posted, u.username
         FROM comments c
         JOIN users u ON u.id = c.user_id
         WHERE c.news_id = ?1
         ORDER BY c.id ASC",
    )
    .bind(news_id)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}

/// Remoção de um comentário individual, reservada a administradores.
/// Devolve o comentário removido para o chamador saber a notícia de origem.
pub async fn delete_comment(pool: &SqlitePool, actor: &User, id: i64) -> AppResult<Comment> {
    auth_service::ensure_admin(actor)?;

    let comment = find_comment_by_id(pool, id).await?;
    sqlx::query("DELETE FROM comments WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::auth_service::seed_user;

    #[tokio::test]
    async fn listagem_vem_da_mais_recente_para_a_mais_antiga() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        let primeira = create_news(&pool, &admin, "Primeira", "a", "u1").await.unwrap();
        let segunda = create_news(&pool, &admin, "Segunda", "b", "u2").await.unwrap();
        let terceira = create_news(&pool, &admin, "Terceira", "c", "u3").await.unwrap();

        let news = list_news(&pool).await.unwrap();
        let ids: Vec<i64> = news.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![terceira.id, segunda.id, primeira.id]);

        // ordem não crescente da data de publicação
        for par in news.windows(2) {
            assert!(par[0].date_posted >= par[1].date_posted);
        }
    }

    #[tokio::test]
    async fn nao_admin_nao_muta_e_nada_fica_gravado() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let erro = create_news(&pool, &bob, "Título", "Texto", "url").await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert!(list_news(&pool).await.unwrap().is_empty());

        let post = create_news(&pool, &admin, "Título", "Texto", "url").await.unwrap();
        let erro = update_news(&pool, &bob, post.id, "Novo", "Texto", "url")
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert_eq!(find_news_by_id(&pool, post.id).await.unwrap().title, "Título");

        let erro = delete_news(&pool, &bob, post.id).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert_eq!(list_news(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn atualizar_preserva_a_data_de_publicacao() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;

        let post = create_news(&pool, &admin, "Título", "Texto", "url").await.unwrap();
        update_news(&pool, &admin, post.id, "Novo título", "Outro texto", "url2")
            .await
            .unwrap();

        let atualizada = find_news_by_id(&pool, post.id).await.unwrap();
        assert_eq!(atualizada.title, "Novo título");
        assert_eq!(atualizada.date_posted, post.date_posted);
    }

    #[tokio::test]
    async fn apagar_noticia_leva_os_comentarios_junto() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let post = create_news(&pool, &admin, "Título", "Texto", "url").await.unwrap();
        let outra = create_news(&pool, &admin, "Outra", "Texto", "url").await.unwrap();

        create_comment(&pool, &bob, post.id, "Primeiro!").await.unwrap();
        create_comment(&pool, &admin, post.id, "Bem visto.").await.unwrap();
        create_comment(&pool, &bob, outra.id, "Noutra notícia.").await.unwrap();

        delete_news(&pool, &admin, post.id).await.unwrap();

        let orfaos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE news_id = ?1")
            .bind(post.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orfaos, 0);

        // os comentários da outra notícia continuam lá
        assert_eq!(list_comments(&pool, outra.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn comentarios_saem_por_ordem_de_chegada_com_autor() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let post = create_news(&pool, &admin, "Título", "Texto", "url").await.unwrap();
        create_comment(&pool, &bob, post.id, "Primeiro!").await.unwrap();
        create_comment(&pool, &admin, post.id, "Segundo.").await.unwrap();

        let comments = list_comments(&pool, post.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].username, "bob");
        assert_eq!(comments[1].username, "alice");
    }

    #[tokio::test]
    async fn comentar_noticia_inexistente_da_not_found() {
        let pool = test_pool().await;
        let bob = seed_user(&pool, "bob", false).await;

        let erro = create_comment(&pool, &bob, 999, "Olá?").await.unwrap_err();
        assert!(matches!(erro, AppError::NotFound));
    }

    #[tokio::test]
    async fn apagar_comentario_e_so_para_admins() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let bob = seed_user(&pool, "bob", false).await;

        let post = create_news(&pool, &admin, "Título", "Texto", "url").await.unwrap();
        let comment = create_comment(&pool, &bob, post.id, "Apaguem-me.").await.unwrap();

        let erro = delete_comment(&pool, &bob, comment.id).await.unwrap_err();
        assert!(matches!(erro, AppError::Forbidden));
        assert_eq!(list_comments(&pool, post.id).await.unwrap().len(), 1);

        let removido = delete_comment(&pool, &admin, comment.id).await.unwrap();
        assert_eq!(removido.news_id, post.id);
        assert!(list_comments(&pool, post.id).await.unwrap().is_empty());
    }
}
