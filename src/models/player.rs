// src/models/player.rs
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub age: i64,
    pub height: i64, // cm
    pub weight: i64, // kg
    pub image_url: String,
}

/// Campos do formulário como chegam do HTML (tudo texto); a validação
/// converte para os tipos finais.
#[derive(Debug, Deserialize)]
pub struct PlayerForm {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub name: String,
    pub position: String,
    pub age: i64,
    pub height: i64,
    pub weight: i64,
    pub image_url: String,
}

impl PlayerForm {
    pub fn validate(&self) -> Result<PlayerInput, Vec<String>> {
        let mut erros = Vec::new();

        let name = self.name.trim();
        if name.is_empty() || name.len() > 100 {
            erros.push("O nome é obrigatório (máx. 100 caracteres).".to_string());
        }
        let position = self.position.trim();
        if position.is_empty() || position.len() > 50 {
            erros.push("A posição é obrigatória (máx. 50 caracteres).".to_string());
        }
        let age = inteiro_positivo(&self.age, "idade", &mut erros);
        let height = inteiro_positivo(&self.height, "altura (cm)", &mut erros);
        let weight = inteiro_positivo(&self.weight, "peso (kg)", &mut erros);
        let image_url = self.image_url.trim();
        if image_url.is_empty() || image_url.len() > 500 {
            erros.push("O link da foto é obrigatório (máx. 500 caracteres).".to_string());
        }

        if !erros.is_empty() {
            return Err(erros);
        }
        Ok(PlayerInput {
            name: name.to_string(),
            position: position.to_string(),
            age: age.unwrap_or_default(),
            height: height.unwrap_or_default(),
            weight: weight.unwrap_or_default(),
            image_url: image_url.to_string(),
        })
    }
}

fn inteiro_positivo(valor: &str, campo: &str, erros: &mut Vec<String>) -> Option<i64> {
    match valor.trim().parse::<i64>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            erros.push(format!("Indique a {} como número inteiro positivo.", campo));
            None
        }
    }
}
