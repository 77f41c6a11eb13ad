// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut erros = Vec::new();

        let username = self.username.trim();
        if username.len() < 2 || username.len() > 20 {
            erros.push("O nome de utilizador deve ter entre 2 e 20 caracteres.".to_string());
        }
        if !email_valido(self.email.trim()) {
            erros.push("Indique um email válido.".to_string());
        }
        if self.password.len() < 4 {
            erros.push("A senha deve ter pelo menos 4 caracteres.".to_string());
        }

        if erros.is_empty() {
            Ok(())
        } else {
            Err(erros)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Verificação simples de forma: parte local, '@' e um domínio com ponto.
fn email_valido(email: &str) -> bool {
    let Some((local, dominio)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && dominio.contains('.')
        && !dominio.starts_with('.')
        && !dominio.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registo_valido_passa() {
        let form = RegisterForm {
            username: "alice".to_string(),
            email: "alice@leaonegro.pt".to_string(),
            password: "senha".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn registo_invalido_acumula_erros_por_campo() {
        let form = RegisterForm {
            username: "a".to_string(),
            email: "sem-arroba".to_string(),
            password: "ab".to_string(),
        };
        let erros = form.validate().unwrap_err();
        assert_eq!(erros.len(), 3);
    }

    #[test]
    fn email_sem_dominio_com_ponto_rejeitado() {
        assert!(!email_valido("alice@local"));
        assert!(!email_valido("@dominio.pt"));
        assert!(!email_valido("alice@.pt"));
        assert!(email_valido("alice@leaonegro.pt"));
    }
}
