//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

/// TOML-like rendering for table output. Expects an already redacted config.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "backend = \"{}\"", p.backend);
        let _ = writeln!(out, "auth_scheme = \"{}\"", p.auth_scheme);
        if let Some(ref token) = p.token {
            let _ = writeln!(out, "token = \"{token}\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref u) = p.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_token() -> Result<String, CliError> {
    let token = rpassword::prompt_password("API token: ").map_err(prompt_err)?;
    if token.trim().is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(token.trim().to_owned())
}

fn profile_names(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let mut cfg = config::load_config()?;
            eprintln!("Switchboard configuration");
            eprintln!("   Config path: {}\n", config::config_path().display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let backend: String = Input::new()
                .with_prompt("Backend API URL")
                .default("http://localhost:8000/api/".into())
                .validate_with(|input: &String| {
                    url::Url::parse(input)
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(prompt_err)?;

            let schemes = &["bearer", "token"];
            let scheme = Select::new()
                .with_prompt("Authorization scheme")
                .items(schemes)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let token = prompt_token()?;
            let storage = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let plaintext = Select::new()
                .with_prompt("Where to store the token?")
                .items(storage)
                .default(0)
                .interact()
                .map_err(prompt_err)?
                == 1;

            let token_field = if plaintext {
                Some(token)
            } else {
                switchboard_config::store_token(&profile_name, &token)?;
                eprintln!("   Token stored in system keyring");
                None
            };

            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    auth_scheme: schemes[scheme].into(),
                    token: token_field,
                    ..Profile::new(backend)
                },
            );
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: switchboard bots list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = config::active_profile_name(global, &cfg);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: switchboard config init");
                return Ok(());
            }
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let lines: Vec<String> = names
                .into_iter()
                .map(|name| {
                    let marker = if *name == default { " *" } else { "" };
                    format!("{name}{marker}")
                })
                .collect();
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: profile_names(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }

        // ── Set token ──────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: profile_names(&cfg),
                    name: profile_name,
                });
            }
            let token = match global.token {
                Some(ref token) => token.clone(),
                None => prompt_token()?,
            };
            switchboard_config::store_token(&profile_name, &token)?;
            eprintln!("Token for profile '{profile_name}' stored in system keyring");
            Ok(())
        }

        // ── Path ───────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_masks_plaintext_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                token: Some("s3cret".into()),
                ..Profile::new("http://localhost:8000/api/")
            },
        );

        let shown = format_config(&redacted(&cfg));
        assert!(shown.contains("token = \"****\""));
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("backend = \"http://localhost:8000/api/\""));
    }
}
