// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao renderizar página: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Nome de utilizador já registado")]
    DuplicateUsername,

    #[error("Email já registado")]
    DuplicateEmail,

    #[error("Posição já ocupada na tabela classificativa")]
    DuplicatePosition,

    #[error("Registo não encontrado")]
    NotFound,

    #[error("Ação reservada a administradores")]
    Forbidden,

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // O detalhe fica no log do servidor; o utilizador vê a mensagem genérica.
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Página ou registo não encontrado."),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Esta ação é reservada a administradores do clube.",
            ),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Email ou senha inválidos."),
            AppError::DuplicateUsername | AppError::DuplicateEmail | AppError::DuplicatePosition => {
                (StatusCode::CONFLICT, "Já existe um registo com esses dados.")
            }
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::EnvVarError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração."),
            AppError::PasswordHashingError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.",
            ),
            AppError::SessionError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro na gestão da sua sessão.",
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado."),
        };

        (
            status,
            Html(format!(
                r#"<!DOCTYPE html><html lang="pt"><head><title>Erro {status_code}</title><style>body{{font-family:sans-serif;margin:3rem;}}</style></head>
<body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar ao início</a></body></html>"#,
                status_code = status.as_u16(),
                message = user_message
            )),
        )
            .into_response()
    }
}

// Tipo Result padrão da aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
