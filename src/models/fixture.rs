// src/models/fixture.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// --- Estruturas que espelham as Tabelas da DB ---

#[derive(Debug, Clone, FromRow)]
pub struct Match {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDateTime,
    pub venue: String,
    pub ticket_link: Option<String>,
    pub is_played: bool,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    // 'win' | 'loss' | 'draw'; serve apenas para o estilo do resultado
    pub outcome: Option<String>,
}

pub const OUTCOMES: &[&str] = &["win", "loss", "draw"];

impl Match {
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y %H:%M").to_string()
    }

    /// Valor para repovoar um `<input type="datetime-local">`.
    pub fn date_input(&self) -> String {
        self.date.format("%Y-%m-%dT%H:%M").to_string()
    }

    pub fn score_display(&self) -> String {
        match (self.home_score, self.away_score) {
            (Some(casa), Some(fora)) => format!("{} - {}", casa, fora),
            _ => "—".to_string(),
        }
    }

    /// Classe CSS do resultado na listagem.
    pub fn outcome_class(&self) -> &'static str {
        match self.outcome.as_deref() {
            Some("win") => "resultado-vitoria",
            Some("loss") => "resultado-derrota",
            Some("draw") => "resultado-empate",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Standing {
    pub id: i64,
    pub position: i64,
    pub team_name: String,
    pub played: i64,
    pub points: i64,
}

// --- Formulários ---

#[derive(Debug, Deserialize)]
pub struct MatchForm {
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub venue: String,
    #[serde(default)]
    pub ticket_link: String,
    // checkbox: presente quando marcado
    #[serde(default)]
    pub is_played: Option<String>,
    #[serde(default)]
    pub home_score: String,
    #[serde(default)]
    pub away_score: String,
    #[serde(default)]
    pub outcome: String,
}

#[derive(Debug, Clone)]
pub struct MatchInput {
    pub home_team: String,
    pub away_team: String,
    pub date: NaiveDateTime,
    pub venue: String,
    pub ticket_link: Option<String>,
    pub is_played: bool,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub outcome: Option<String>,
}

impl MatchForm {
    pub fn is_played_flag(&self) -> bool {
        self.is_played.is_some()
    }

    pub fn validate(&self) -> Result<MatchInput, Vec<String>> {
        let mut erros = Vec::new();

        let home_team = texto_obrigatorio(&self.home_team, "equipa da casa", 100, &mut erros);
        let away_team = texto_obrigatorio(&self.away_team, "equipa visitante", 100, &mut erros);
        let venue = texto_obrigatorio(&self.venue, "estádio", 100, &mut erros);

        let date = NaiveDateTime::parse_from_str(self.date.trim(), "%Y-%m-%dT%H:%M").ok();
        if date.is_none() {
            erros.push("Indique a data no formato AAAA-MM-DDTHH:MM.".to_string());
        }

        let ticket_link = self.ticket_link.trim();
        if ticket_link.len() > 500 {
            erros.push("O link de bilhetes não pode passar de 500 caracteres.".to_string());
        }
        let ticket_link = (!ticket_link.is_empty()).then(|| ticket_link.to_string());

        let is_played = self.is_played_flag();
        let home_score = resultado_opcional(&self.home_score, "golos da casa", &mut erros);
        let away_score = resultado_opcional(&self.away_score, "golos de fora", &mut erros);
        let outcome = self.outcome.trim();

        // Jogo disputado exige resultado completo; jogo por disputar não pode ter nenhum.
        if is_played {
            if home_score.is_none() || away_score.is_none() {
                erros.push("Um jogo disputado precisa dos golos de ambas as equipas.".to_string());
            }
            if !OUTCOMES.contains(&outcome) {
                erros.push("Escolha o desfecho do jogo: vitória, derrota ou empate.".to_string());
            }
        } else if home_score.is_some() || away_score.is_some() || !outcome.is_empty() {
            erros.push("Um jogo ainda por disputar não pode ter resultado nem desfecho.".to_string());
        }

        let Some(date) = date else {
            return Err(erros);
        };
        if !erros.is_empty() {
            return Err(erros);
        }
        Ok(MatchInput {
            home_team,
            away_team,
            date,
            venue,
            ticket_link,
            is_played,
            home_score,
            away_score,
            outcome: is_played.then(|| outcome.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StandingForm {
    #[serde(default)]
    pub position: String,
    pub team_name: String,
    #[serde(default)]
    pub played: String,
    #[serde(default)]
    pub points: String,
}

#[derive(Debug, Clone)]
pub struct StandingInput {
    pub position: i64,
    pub team_name: String,
    pub played: i64,
    pub points: i64,
}

impl StandingForm {
    pub fn validate(&self) -> Result<StandingInput, Vec<String>> {
        let mut erros = Vec::new();

        let position = match self.position.trim().parse::<i64>() {
            Ok(p) if p >= 1 => Some(p),
            _ => {
                erros.push("A posição deve ser um número inteiro a partir de 1.".to_string());
                None
            }
        };
        let team_name = texto_obrigatorio(&self.team_name, "nome da equipa", 100, &mut erros);
        let played = contador(&self.played, "jogos disputados", &mut erros);
        let points = contador(&self.points, "pontos", &mut erros);

        if !erros.is_empty() {
            return Err(erros);
        }
        Ok(StandingInput {
            position: position.unwrap_or_default(),
            team_name,
            played: played.unwrap_or_default(),
            points: points.unwrap_or_default(),
        })
    }
}

fn texto_obrigatorio(valor: &str, campo: &str, max: usize, erros: &mut Vec<String>) -> String {
    let valor = valor.trim();
    if valor.is_empty() || valor.len() > max {
        erros.push(format!(
            "O campo {} é obrigatório (máx. {} caracteres).",
            campo, max
        ));
    }
    valor.to_string()
}

/// Campo numérico opcional: vazio vale None, caso contrário inteiro >= 0.
fn resultado_opcional(valor: &str, campo: &str, erros: &mut Vec<String>) -> Option<i64> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }
    match valor.parse::<i64>() {
        Ok(n) if n >= 0 => Some(n),
        _ => {
            erros.push(format!("Os {} devem ser um número inteiro não negativo.", campo));
            None
        }
    }
}

fn contador(valor: &str, campo: &str, erros: &mut Vec<String>) -> Option<i64> {
    match valor.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Some(n),
        _ => {
            erros.push(format!("Indique {} como número inteiro não negativo.", campo));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_base() -> MatchForm {
        MatchForm {
            home_team: "Leão Negro FC".to_string(),
            away_team: "Águias do Norte".to_string(),
            date: "2026-09-12T16:00".to_string(),
            venue: "Estádio da Mata".to_string(),
            ticket_link: String::new(),
            is_played: None,
            home_score: String::new(),
            away_score: String::new(),
            outcome: String::new(),
        }
    }

    #[test]
    fn jogo_por_disputar_sem_resultado_passa() {
        let input = form_base().validate().unwrap();
        assert!(!input.is_played);
        assert_eq!(input.home_score, None);
        assert_eq!(input.outcome, None);
    }

    #[test]
    fn jogo_disputado_exige_golos_e_desfecho() {
        let mut form = form_base();
        form.is_played = Some("on".to_string());
        let erros = form.validate().unwrap_err();
        assert_eq!(erros.len(), 2);

        form.home_score = "2".to_string();
        form.away_score = "1".to_string();
        form.outcome = "win".to_string();
        let input = form.validate().unwrap();
        assert_eq!(input.home_score, Some(2));
        assert_eq!(input.outcome.as_deref(), Some("win"));
    }

    #[test]
    fn jogo_por_disputar_com_golos_rejeitado() {
        let mut form = form_base();
        form.home_score = "3".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn desfecho_desconhecido_rejeitado() {
        let mut form = form_base();
        form.is_played = Some("on".to_string());
        form.home_score = "1".to_string();
        form.away_score = "1".to_string();
        form.outcome = "goleada".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn data_mal_formada_rejeitada() {
        let mut form = form_base();
        form.date = "12/09/2026 16h".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn classificacao_valida_converte() {
        let form = StandingForm {
            position: "1".to_string(),
            team_name: "Leão Negro FC".to_string(),
            played: "10".to_string(),
            points: "24".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.position, 1);
        assert_eq!(input.points, 24);
    }

    #[test]
    fn posicao_zero_rejeitada() {
        let form = StandingForm {
            position: "0".to_string(),
            team_name: "Leão Negro FC".to_string(),
            played: "0".to_string(),
            points: "0".to_string(),
        };
        assert!(form.validate().is_err());
    }
}
