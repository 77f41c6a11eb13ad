// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tower_sessions::Session;

/// Chave única usada na sessão para guardar a identidade autenticada.
pub const SESSION_USER_KEY: &str = "user_id";

const SELECT_USER: &str =
    "SELECT id, username, email, password_hash, is_admin, created_at FROM users";

// --- Passwords (bcrypt fora do runtime async) ---

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("Task bloqueante de verificação falhou: {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
            AppError::PasswordHashingError
        })
}

/// Gera um hash bcrypt (com salt) para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| {
            tracing::error!("Task bloqueante de hashing falhou: {:?}", e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
            AppError::PasswordHashingError
        })
}

// --- Consultas de utilizadores ---

pub async fn find_user_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE email = ?1"))
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE username = ?1"))
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn count_users(pool: &SqlitePool) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

// --- Registo e autenticação ---

/// Cria um novo utilizador. O primeiro registo de sempre torna-se
/// administrador; o mesmo vale para emails com o prefixo configurado.
pub async fn register_user(
    pool: &SqlitePool,
    admin_email_prefix: Option<&str>,
    username: &str,
    email: &str,
    raw_password: &str,
) -> AppResult<User> {
    tracing::info!("Tentando registar utilizador: {}", username);

    // Pré-verificação para devolver o campo em conflito; a constraint UNIQUE
    // continua a decidir em caso de corrida.
    if find_user_by_username(pool, username).await?.is_some() {
        return Err(AppError::DuplicateUsername);
    }
    if find_user_by_email(pool, email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = hash_password(raw_password).await?;

    let primeiro_registo = count_users(pool).await? == 0;
    let email_de_admin = admin_email_prefix.is_some_and(|p| email.starts_with(p));
    let is_admin = primeiro_registo || email_de_admin;

    let created_at = Utc::now().naive_utc();
    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, is_admin, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .bind(is_admin)
    .bind(created_at)
    .execute(pool)
    .await;

    if let Err(sqlx::Error::Database(db_err)) = &result {
        if db_err.is_unique_violation() {
            tracing::warn!("Registo em corrida perdeu para um duplicado: {}", username);
            if db_err.message().contains("users.email") {
                return Err(AppError::DuplicateEmail);
            }
            return Err(AppError::DuplicateUsername);
        }
    }
    let id = result?.last_insert_rowid();

    let user = find_user_by_id(pool, id)
        .await?
        .ok_or(AppError::InternalServerError)?;
    tracing::info!("✅ Utilizador '{}' registado (admin: {}).", user.username, user.is_admin);
    Ok(user)
}

/// Valida um par email/senha e devolve o utilizador correspondente.
pub async fn authenticate(pool: &SqlitePool, email: &str, password: &str) -> AppResult<User> {
    let Some(user) = find_user_by_email(pool, email).await? else {
        tracing::warn!("Login falhou: email desconhecido.");
        return Err(AppError::InvalidCredentials);
    };
    if verify_password(password, &user.password_hash).await? {
        Ok(user)
    } else {
        tracing::warn!("Login falhou: senha incorreta para '{}'.", user.username);
        Err(AppError::InvalidCredentials)
    }
}

// --- Identidade da sessão ---

/// Resolve a identidade do pedido atual. `None` é um visitante anónimo.
pub async fn current_user(session: &Session, pool: &SqlitePool) -> AppResult<Option<User>> {
    let user_id: Option<i64> = session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao ler sessão: {e}")))?;

    match user_id {
        Some(id) => find_user_by_id(pool, id).await,
        None => Ok(None),
    }
}

/// Variante para handlers protegidos: a sessão já foi validada, por isso o
/// utilizador tem de existir na base.
pub async fn require_user(pool: &SqlitePool, user_id: i64) -> AppResult<User> {
    find_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::error!("user_id '{}' autenticado já não existe na base!", user_id);
        AppError::SessionError("A conta da sessão já não existe.".to_string())
    })
}

// --- Política de autorização ---

/// Regra única: só administradores mutam Notícias/Jogadores/Jogos/Classificação.
pub fn ensure_admin(user: &User) -> AppResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        tracing::warn!("Acesso negado a '{}' (não é admin).", user.username);
        Err(AppError::Forbidden)
    }
}

/// Insere um utilizador diretamente, sem passar pelo registo (hash falso).
#[cfg(test)]
pub async fn seed_user(pool: &SqlitePool, username: &str, is_admin: bool) -> User {
    let email = format!("{username}@leaonegro.pt");
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, is_admin, created_at)
         VALUES (?1, ?2, 'hash-de-teste', ?3, ?4)",
    )
    .bind(username)
    .bind(&email)
    .bind(is_admin)
    .bind(Utc::now().naive_utc())
    .execute(pool)
    .await
    .expect("inserir utilizador de teste");

    find_user_by_email(pool, &email)
        .await
        .expect("ler utilizador de teste")
        .expect("utilizador de teste existe")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn primeiro_registo_vira_admin_os_seguintes_nao() {
        let pool = test_pool().await;

        let alice = register_user(&pool, None, "alice", "alice@x.com", "pw")
            .await
            .unwrap();
        assert!(alice.is_admin);

        let bob = register_user(&pool, None, "bob", "bob@x.com", "pw")
            .await
            .unwrap();
        assert!(!bob.is_admin);
    }

    #[tokio::test]
    async fn prefixo_de_email_configurado_tambem_concede_admin() {
        let pool = test_pool().await;
        register_user(&pool, Some("admin."), "alice", "alice@x.com", "pw")
            .await
            .unwrap();

        let gestor = register_user(&pool, Some("admin."), "gestor", "admin.gestor@x.com", "pw")
            .await
            .unwrap();
        assert!(gestor.is_admin);

        // Sem prefixo configurado, o mesmo email não concede nada.
        let pool2 = test_pool().await;
        register_user(&pool2, None, "alice", "alice@x.com", "pw")
            .await
            .unwrap();
        let gestor2 = register_user(&pool2, None, "gestor", "admin.gestor@x.com", "pw")
            .await
            .unwrap();
        assert!(!gestor2.is_admin);
    }

    #[tokio::test]
    async fn registo_duplicado_falha_e_nao_cria_linha() {
        let pool = test_pool().await;
        register_user(&pool, None, "alice", "alice@x.com", "pw")
            .await
            .unwrap();

        let erro = register_user(&pool, None, "alice", "outra@x.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::DuplicateUsername));

        let erro = register_user(&pool, None, "alice2", "alice@x.com", "pw")
            .await
            .unwrap_err();
        assert!(matches!(erro, AppError::DuplicateEmail));

        assert_eq!(count_users(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn autenticacao_verifica_o_hash() {
        let pool = test_pool().await;
        register_user(&pool, None, "alice", "alice@x.com", "segredo")
            .await
            .unwrap();

        let user = authenticate(&pool, "alice@x.com", "segredo").await.unwrap();
        assert_eq!(user.username, "alice");

        let erro = authenticate(&pool, "alice@x.com", "errada").await.unwrap_err();
        assert!(matches!(erro, AppError::InvalidCredentials));

        let erro = authenticate(&pool, "ninguem@x.com", "segredo").await.unwrap_err();
        assert!(matches!(erro, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn politica_nega_quem_nao_e_admin() {
        let pool = test_pool().await;
        let admin = seed_user(&pool, "alice", true).await;
        let comum = seed_user(&pool, "bob", false).await;

        assert!(ensure_admin(&admin).is_ok());
        assert!(matches!(ensure_admin(&comum).unwrap_err(), AppError::Forbidden));
    }
}
