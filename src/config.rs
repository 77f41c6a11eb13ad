// src/config.rs
use crate::error::AppResult;

/// Configuração fornecida pelo ambiente, resolvida uma única vez no arranque.
/// Nada de segredos ou ligações embutidos no código.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    /// Prefixo de email que também concede o estatuto de administrador no
    /// registo (ex: "admin."). Sem valor, só o primeiro utilizador é admin.
    pub admin_email_prefix: Option<String>,
}

impl Config {
    pub fn from_env() -> AppResult<Config> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session_secret = std::env::var("SESSION_SECRET")?;
        let admin_email_prefix = std::env::var("ADMIN_EMAIL_PREFIX")
            .ok()
            .filter(|p| !p.trim().is_empty());

        Ok(Config {
            database_url,
            session_secret,
            admin_email_prefix,
        })
    }
}
