// src/models/news.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: String,
    // atribuída pelo servidor na criação; o update nunca lhe toca
    pub date_posted: NaiveDateTime,
}

impl News {
    pub fn date_display(&self) -> String {
        self.date_posted.format("%d/%m/%Y %H:%M").to_string()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub date_posted: NaiveDateTime,
    pub user_id: i64,
    pub news_id: i64,
}

/// Comentário já juntado ao nome do autor, para exibição na página da notícia.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub text: String,
    pub date_posted: NaiveDateTime,
    pub username: String,
}

impl CommentWithAuthor {
    pub fn date_display(&self) -> String {
        self.date_posted.format("%d/%m/%Y %H:%M").to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsForm {
    pub title: String,
    pub image_url: String,
    pub content: String,
}

impl NewsForm {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut erros = Vec::new();

        let title = self.title.trim();
        if title.is_empty() || title.len() > 100 {
            erros.push("O título é obrigatório (máx. 100 caracteres).".to_string());
        }
        let image_url = self.image_url.trim();
        if image_url.is_empty() || image_url.len() > 500 {
            erros.push("O link da imagem é obrigatório (máx. 500 caracteres).".to_string());
        }
        if self.content.trim().is_empty() {
            erros.push("O conteúdo é obrigatório.".to_string());
        }

        if erros.is_empty() {
            Ok(())
        } else {
            Err(erros)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let text = self.text.trim();
        if text.is_empty() {
            Err(vec!["Escreva o comentário antes de publicar.".to_string()])
        } else if text.len() > 1000 {
            Err(vec!["O comentário não pode passar de 1000 caracteres.".to_string()])
        } else {
            Ok(())
        }
    }
}
