use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

const FALLBACK_FILTER: &str = "info";

/// Initialise le subscriber tracing global.
///
/// Le filtre vient de `explicit_filter`, puis de `RUST_LOG`, puis retombe sur
/// `info` ; le premier candidat valide l'emporte.
///
/// # Errors
///
/// Retourne une erreur si aucun filtre n'est valide, si la sortie JSON est
/// demandée alors que la fonctionnalité `json-logs` n'est pas compilée, ou si
/// un subscriber global est déjà installé.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let filter = pick_filter(explicit_filter, std::env::var("RUST_LOG").ok())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        );
        return tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()));
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn pick_filter(explicit: Option<&str>, from_env: Option<String>) -> Result<EnvFilter> {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(from_env)
        .chain(std::iter::once(FALLBACK_FILTER.to_string()))
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::pick_filter;

    #[test]
    fn explicit_filter_wins_over_environment() {
        let filter = match pick_filter(Some("toast=debug"), Some("warn".to_string())) {
            Ok(filter) => filter,
            Err(err) => panic!("filter should parse: {err}"),
        };
        assert_eq!(filter.to_string(), "toast=debug");
    }

    #[test]
    fn invalid_candidates_fall_through_to_default() {
        let filter = match pick_filter(Some("toast=loud"), Some("toast=verbose".to_string())) {
            Ok(filter) => filter,
            Err(err) => panic!("fallback should parse: {err}"),
        };
        assert_eq!(filter.to_string(), "info");
    }
}
