use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use toast::types::Placement;

#[derive(Parser, Debug)]
#[command(author, version, about = "Affiche des toasts dans le terminal", long_about = None)]
pub struct Cli {
    /// Messages à afficher, dans l'ordre. Sans message, joue la galerie de démo.
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// Chemin du fichier de configuration TOML.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Durée d'affichage par défaut (ex. "1s", "2s 500ms").
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<Duration>,

    /// Position verticale par défaut (top, middle, bottom).
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Simule l'apparition du clavier après ce délai.
    #[arg(long, value_parser = parse_duration, value_name = "DELAY")]
    pub keyboard_at: Option<Duration>,

    /// Simule un tap sur le toast visible après ce délai.
    #[arg(long, value_parser = parse_duration, value_name = "DELAY")]
    pub tap_after: Option<Duration>,

    /// Ferme tous les toasts après ce délai.
    #[arg(long, value_parser = parse_duration, value_name = "DELAY")]
    pub dismiss_after: Option<Duration>,

    /// Affiche la configuration effective en JSON puis quitte.
    #[arg(long, action = ArgAction::SetTrue)]
    pub print_config: bool,

    /// Utilise un layer JSON pour les logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Filtre de logs explicite (ex. "toast=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
