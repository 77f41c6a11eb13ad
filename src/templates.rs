// src/templates.rs
use askama::Template;

use crate::models::{
    fixture::{Match, MatchForm, Standing, StandingForm},
    news::{CommentWithAuthor, News},
    player::{Player, PlayerForm},
};

// --- Páginas públicas ---

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub upcoming: Vec<Match>,
    pub next_match: Option<Match>,
}

#[derive(Template)]
#[template(path = "matches.html")]
pub struct MatchesPage {
    pub upcoming: Vec<Match>,
    pub played: Vec<Match>,
    pub table: Vec<Standing>,
    pub is_admin: bool,
}

#[derive(Template)]
#[template(path = "news.html")]
pub struct NewsListPage {
    pub news: Vec<News>,
    pub is_admin: bool,
}

#[derive(Template)]
#[template(path = "news_detail.html")]
pub struct NewsDetailPage {
    pub post: News,
    pub comments: Vec<CommentWithAuthor>,
    pub logged_in: bool,
    pub is_admin: bool,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "players.html")]
pub struct PlayersPage {
    pub players: Vec<Player>,
    pub is_admin: bool,
}

// --- Autenticação ---

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub errors: Vec<String>,
    pub username: String,
    pub email: String,
}

impl RegisterPage {
    pub fn blank() -> Self {
        RegisterPage {
            errors: Vec::new(),
            username: String::new(),
            email: String::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: Option<String>,
    pub notice: Option<String>,
}

// --- Formulários de administração ---
// Criação e edição partilham o template; `legend` e `action` distinguem-nas.

#[derive(Template)]
#[template(path = "news_form.html")]
pub struct NewsFormPage {
    pub legend: &'static str,
    pub action: String,
    pub errors: Vec<String>,
    pub title: String,
    pub image_url: String,
    pub content: String,
}

impl NewsFormPage {
    pub fn blank(legend: &'static str, action: String) -> Self {
        NewsFormPage {
            legend,
            action,
            errors: Vec::new(),
            title: String::new(),
            image_url: String::new(),
            content: String::new(),
        }
    }

    pub fn from_news(legend: &'static str, action: String, post: &News) -> Self {
        NewsFormPage {
            title: post.title.clone(),
            image_url: post.image_url.clone(),
            content: post.content.clone(),
            ..NewsFormPage::blank(legend, action)
        }
    }
}

#[derive(Template)]
#[template(path = "player_form.html")]
pub struct PlayerFormPage {
    pub legend: &'static str,
    pub action: String,
    pub errors: Vec<String>,
    pub name: String,
    pub position: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub image_url: String,
}

impl PlayerFormPage {
    pub fn blank(legend: &'static str, action: String) -> Self {
        PlayerFormPage {
            legend,
            action,
            errors: Vec::new(),
            name: String::new(),
            position: String::new(),
            age: String::new(),
            height: String::new(),
            weight: String::new(),
            image_url: String::new(),
        }
    }

    pub fn from_player(legend: &'static str, action: String, player: &Player) -> Self {
        PlayerFormPage {
            name: player.name.clone(),
            position: player.position.clone(),
            age: player.age.to_string(),
            height: player.height.to_string(),
            weight: player.weight.to_string(),
            image_url: player.image_url.clone(),
            ..PlayerFormPage::blank(legend, action)
        }
    }

    /// Repõe os valores submetidos quando a validação falha.
    pub fn from_form(
        legend: &'static str,
        action: String,
        form: &PlayerForm,
        errors: Vec<String>,
    ) -> Self {
        PlayerFormPage {
            legend,
            action,
            errors,
            name: form.name.clone(),
            position: form.position.clone(),
            age: form.age.clone(),
            height: form.height.clone(),
            weight: form.weight.clone(),
            image_url: form.image_url.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "match_form.html")]
pub struct MatchFormPage {
    pub legend: &'static str,
    pub action: String,
    pub errors: Vec<String>,
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub venue: String,
    pub ticket_link: String,
    pub is_played: bool,
    pub home_score: String,
    pub away_score: String,
    pub outcome: String,
}

impl MatchFormPage {
    pub fn blank(legend: &'static str, action: String) -> Self {
        MatchFormPage {
            legend,
            action,
            errors: Vec::new(),
            home_team: String::new(),
            away_team: String::new(),
            date: String::new(),
            venue: String::new(),
            ticket_link: String::new(),
            is_played: false,
            home_score: String::new(),
            away_score: String::new(),
            outcome: String::new(),
        }
    }

    pub fn from_match(legend: &'static str, action: String, m: &Match) -> Self {
        MatchFormPage {
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            date: m.date_input(),
            venue: m.venue.clone(),
            ticket_link: m.ticket_link.clone().unwrap_or_default(),
            is_played: m.is_played,
            home_score: m.home_score.map(|n| n.to_string()).unwrap_or_default(),
            away_score: m.away_score.map(|n| n.to_string()).unwrap_or_default(),
            outcome: m.outcome.clone().unwrap_or_default(),
            ..MatchFormPage::blank(legend, action)
        }
    }

    pub fn from_form(
        legend: &'static str,
        action: String,
        form: &MatchForm,
        errors: Vec<String>,
    ) -> Self {
        MatchFormPage {
            legend,
            action,
            errors,
            home_team: form.home_team.clone(),
            away_team: form.away_team.clone(),
            date: form.date.clone(),
            venue: form.venue.clone(),
            ticket_link: form.ticket_link.clone(),
            is_played: form.is_played_flag(),
            home_score: form.home_score.clone(),
            away_score: form.away_score.clone(),
            outcome: form.outcome.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "standing_form.html")]
pub struct StandingFormPage {
    pub legend: &'static str,
    pub action: String,
    pub errors: Vec<String>,
    pub position: String,
    pub team_name: String,
    pub played: String,
    pub points: String,
}

impl StandingFormPage {
    pub fn blank(legend: &'static str, action: String) -> Self {
        StandingFormPage {
            legend,
            action,
            errors: Vec::new(),
            position: String::new(),
            team_name: String::new(),
            played: String::new(),
            points: String::new(),
        }
    }

    pub fn from_standing(legend: &'static str, action: String, linha: &Standing) -> Self {
        StandingFormPage {
            position: linha.position.to_string(),
            team_name: linha.team_name.clone(),
            played: linha.played.to_string(),
            points: linha.points.to_string(),
            ..StandingFormPage::blank(legend, action)
        }
    }

    pub fn from_form(
        legend: &'static str,
        action: String,
        form: &StandingForm,
        errors: Vec<String>,
    ) -> Self {
        StandingFormPage {
            legend,
            action,
            errors,
            position: form.position.clone(),
            team_name: form.team_name.clone(),
            played: form.played.clone(),
            points: form.points.clone(),
        }
    }
}
