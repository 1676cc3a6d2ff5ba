//! # Connection Context
//!
//! Resolves the global flags into a backend, a session, and a loaded
//! [`GovernanceService`].
//!
//! The backend is the HTTP client unless `--offline` is given, in which
//! case the in-memory demo backend is used. The session comes from a
//! login when `--email` and `--password` are both present; otherwise the
//! first demo user with the `--as` role is used without credentials.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, ValueEnum};

use bastion_client::{GovernanceApi, GovernanceApiConfig, GovernanceClient};
use bastion_core::{Role, User};
use bastion_service::{GovernanceService, InMemoryApi, Session};
use bastion_store::{fixtures, ResourceStore};

/// Global connection flags. Flags take precedence over the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Base URL of the governance API.
    #[arg(long, env = "BASTION_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "BASTION_API_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", env = "BASTION_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Use the built-in demo data instead of the API.
    #[arg(long, global = true)]
    pub offline: bool,

    /// Role to act as when not logging in.
    #[arg(long = "as", value_enum, default_value_t = RoleArg::User, global = true)]
    pub role: RoleArg,

    /// Login email.
    #[arg(long, env = "BASTION_EMAIL", global = true)]
    pub email: Option<String>,

    /// Login password.
    #[arg(long, env = "BASTION_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    /// Both login credentials, if given.
    pub fn credentials(&self) -> Result<Option<(&str, &str)>> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Ok(Some((email.as_str(), password.as_str()))),
            (None, None) => Ok(None),
            _ => bail!("--email and --password must be given together"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    #[default]
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Where requests go.
#[derive(Debug)]
pub enum Backend {
    Offline(InMemoryApi),
    Remote(GovernanceClient),
}

impl Backend {
    pub fn open(args: &ConnectionArgs) -> Result<Self> {
        if args.offline {
            tracing::info!("offline mode, using the demo data");
            let api = InMemoryApi::demo().context("loading demo fixtures")?;
            return Ok(Self::Offline(api));
        }

        let config = remote_config(args)?;
        tracing::debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "using governance API"
        );
        Ok(Self::Remote(GovernanceClient::new(config)?))
    }

    pub fn api(&self) -> &dyn GovernanceApi {
        match self {
            Self::Offline(api) => api,
            Self::Remote(client) => client,
        }
    }

    /// The backend as a shared handle, carrying `token` if one was issued.
    pub fn into_shared(self, token: Option<&str>) -> Result<Arc<dyn GovernanceApi>> {
        Ok(match (self, token) {
            (Self::Remote(client), Some(token)) => Arc::new(client.with_token(token)?),
            (Self::Remote(client), None) => Arc::new(client),
            (Self::Offline(api), _) => Arc::new(api),
        })
    }
}

/// Client configuration: the environment, overridden by the flags.
pub fn remote_config(args: &ConnectionArgs) -> Result<GovernanceApiConfig> {
    let mut config = GovernanceApiConfig::from_env()?;
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    if let Some(token) = &args.token {
        config = config.with_token(token.as_str());
    }
    Ok(config)
}

/// The first demo user holding `role`.
pub fn demo_user(role: Role) -> Result<User> {
    fixtures::demo_users()
        .context("loading demo users")?
        .into_iter()
        .find(|u| u.role == role)
        .ok_or_else(|| anyhow!("no demo user with role {role}"))
}

pub async fn open_session(backend: &Backend, args: &ConnectionArgs) -> Result<Session> {
    match args.credentials()? {
        Some((email, password)) => Session::login(backend.api(), email, password)
            .await
            .context("login failed"),
        None => Ok(Session::mock(demo_user(args.role.into())?)),
    }
}

/// Build the service and load the resources.
pub async fn connect(args: &ConnectionArgs) -> Result<GovernanceService> {
    let backend = Backend::open(args)?;
    let session = open_session(&backend, args).await?;
    let api = backend.into_shared(session.token())?;
    let service = GovernanceService::new(api, ResourceStore::new(), session);

    let snapshot = service.refresh().await;
    if let Some(error) = snapshot.error {
        bail!("could not load resources: {error}");
    }
    tracing::debug!(
        count = snapshot.resources.len(),
        role = %service.role(),
        "resources loaded"
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline(role: RoleArg) -> ConnectionArgs {
        ConnectionArgs {
            offline: true,
            role,
            ..Default::default()
        }
    }

    #[test]
    fn credentials_must_come_in_pairs() {
        let mut args = ConnectionArgs::default();
        assert!(args.credentials().unwrap().is_none());

        args.email = Some("jean.martin@exemple.fr".into());
        assert!(args.credentials().is_err());

        args.password = Some("pw".into());
        assert_eq!(
            args.credentials().unwrap(),
            Some(("jean.martin@exemple.fr", "pw"))
        );
    }

    #[test]
    fn demo_user_per_role() {
        assert_eq!(demo_user(Role::User).unwrap().name, "Jean Martin");
        assert!(demo_user(Role::Admin).unwrap().is_admin());
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let args = ConnectionArgs {
            api_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(Backend::open(&args).is_err());
    }

    #[tokio::test]
    async fn offline_connect_loads_demo_data() {
        let svc = connect(&offline(RoleArg::Admin)).await.unwrap();
        assert_eq!(svc.role(), Role::Admin);
        assert_eq!(svc.resources().len(), 5);
    }

    #[tokio::test]
    async fn offline_login_uses_credentials() {
        let args = ConnectionArgs {
            email: Some("marie.dubois@exemple.fr".into()),
            password: Some("pw".into()),
            ..offline(RoleArg::Admin)
        };
        let svc = connect(&args).await.unwrap();
        assert_eq!(svc.session().user().name, "Marie Dubois");
        assert_eq!(svc.role(), Role::User);
    }

    #[tokio::test]
    async fn unknown_login_fails() {
        let args = ConnectionArgs {
            email: Some("nobody@exemple.fr".into()),
            password: Some("pw".into()),
            ..offline(RoleArg::User)
        };
        assert!(connect(&args).await.is_err());
    }

    #[test]
    fn api_url_flag_keeps_timeout_from_environment() {
        std::env::set_var("BASTION_TIMEOUT_SECS", "3");
        let args = ConnectionArgs {
            api_url: Some("http://governance.internal/api".into()),
            ..Default::default()
        };
        let config = remote_config(&args);
        std::env::remove_var("BASTION_TIMEOUT_SECS");

        let config = config.unwrap();
        assert_eq!(config.base_url.as_str(), "http://governance.internal/api");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn timeout_flag_overrides_default() {
        let args = ConnectionArgs {
            api_url: Some("http://governance.internal/api".into()),
            timeout_secs: Some(7),
            ..Default::default()
        };
        assert_eq!(remote_config(&args).unwrap().timeout_secs, 7);
    }

    #[tokio::test]
    async fn silent_api_times_out() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let args = ConnectionArgs {
            api_url: Some(format!("http://{addr}/api")),
            timeout_secs: Some(1),
            ..Default::default()
        };
        let result = tokio::time::timeout(std::time::Duration::from_secs(6), connect(&args))
            .await
            .expect("request timeout not applied");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unreachable_api_fails_to_connect() {
        let args = ConnectionArgs {
            api_url: Some("http://127.0.0.1:1/api".into()),
            ..Default::default()
        };
        let err = connect(&args).await.unwrap_err();
        assert!(err.to_string().contains("could not load resources"));
    }
}
