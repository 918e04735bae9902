use crate::cli::actions::Action;
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let dsn = matches
        .get_one("dsn")
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow!("missing required argument: --dsn"))?;

    if let Some(sub) = matches.subcommand_matches("create-admin") {
        return Ok(Action::CreateAdmin {
            dsn,
            name: sub
                .get_one("name")
                .map(|s: &String| s.to_string())
                .unwrap_or_else(|| "Admin".to_string()),
            email: sub
                .get_one("email")
                .map(|s: &String| s.to_string())
                .ok_or_else(|| anyhow!("missing required argument: --email"))?,
            password: sub
                .get_one("password")
                .map(|s: &String| SecretString::from(s.to_string()))
                .ok_or_else(|| anyhow!("missing required argument: --password"))?,
        });
    }

    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        dsn,
        jwt_secret: matches
            .get_one("jwt-secret")
            .map(|s: &String| SecretString::from(s.to_string()))
            .ok_or_else(|| anyhow!("missing required argument: --jwt-secret"))?,
        base_url: matches
            .get_one("base-url")
            .map(|s: &String| s.to_string())
            .unwrap_or_else(|| "http://localhost:8080".to_string()),
        uploads_dir: matches
            .get_one("uploads-dir")
            .map(|s: &String| s.to_string())
            .unwrap_or_else(|| "uploads".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn dispatches_server_action() {
        let matches = commands::new().get_matches_from(vec![
            "reelist",
            "--dsn",
            "postgres://localhost/reelist",
            "--jwt-secret",
            "fixture-secret",
        ]);
        let action = handler(&matches).unwrap();
        match action {
            Action::Server {
                port,
                dsn,
                jwt_secret,
                base_url,
                uploads_dir,
            } => {
                assert_eq!(port, 8080);
                assert_eq!(dsn, "postgres://localhost/reelist");
                assert_eq!(jwt_secret.expose_secret(), "fixture-secret");
                assert_eq!(base_url, "http://localhost:8080");
                assert_eq!(uploads_dir, "uploads");
            }
            Action::CreateAdmin { .. } => panic!("expected server action"),
        }
    }

    #[test]
    fn server_action_requires_jwt_secret() {
        let matches = commands::new().get_matches_from(vec![
            "reelist",
            "--dsn",
            "postgres://localhost/reelist",
        ]);
        assert!(handler(&matches).is_err());
    }

    #[test]
    fn dispatches_create_admin_action() {
        let matches = commands::new().get_matches_from(vec![
            "reelist",
            "--dsn",
            "postgres://localhost/reelist",
            "create-admin",
            "--email",
            "admin@reelist.dev",
            "--password",
            "hunter2hunter2",
        ]);
        let action = handler(&matches).unwrap();
        match action {
            Action::CreateAdmin {
                dsn, name, email, ..
            } => {
                assert_eq!(dsn, "postgres://localhost/reelist");
                assert_eq!(name, "Admin");
                assert_eq!(email, "admin@reelist.dev");
            }
            Action::Server { .. } => panic!("expected create-admin action"),
        }
    }
}
