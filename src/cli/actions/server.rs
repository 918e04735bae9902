use crate::api;
use crate::api::email::LogEmailSender;
use crate::api::handlers::auth::{AuthConfig, AuthState, TokenIssuer};
use crate::cli::actions::Action;
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            jwt_secret,
            base_url,
            uploads_dir,
        } => {
            // Fail fast on an unusable reset-link base URL.
            Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

            let config = AuthConfig::new(base_url).with_uploads_dir(uploads_dir);
            let tokens = TokenIssuer::new(&jwt_secret, config.session_ttl_seconds());
            let state = Arc::new(AuthState::new(config, tokens, Arc::new(LogEmailSender)));

            api::new(port, dsn, state).await?;

            Ok(())
        }
        Action::CreateAdmin { .. } => Err(anyhow!("not a server action")),
    }
}
