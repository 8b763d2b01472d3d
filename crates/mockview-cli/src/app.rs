//! Shared application state for CLI commands.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use mockview_core::coach::Coach;
use mockview_providers::{create_provider, load_config_from, MockviewConfig};
use mockview_store::{Accounts, FileStore, HistoryStore, KeyValueStore, ProgressStore, User};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Which screen the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Home,
    /// Waiting for interview questions.
    Loading,
    Interview,
    Results,
    History,
}

impl Screen {
    /// Whether the app may move from `self` to `next`.
    pub fn can_transition(self, next: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, next),
            (Login, Signup)
                | (Signup, Login)
                | (Login, Home)
                | (Signup, Home)
                | (Home, Loading)
                | (Home, Interview)
                | (Home, History)
                | (Home, Login)
                | (Loading, Interview)
                | (Loading, Home)
                | (Interview, Results)
                | (Interview, Home)
                | (Results, Home)
                | (Results, History)
                | (History, Home)
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Login => "login",
            Screen::Signup => "signup",
            Screen::Home => "home",
            Screen::Loading => "loading",
            Screen::Interview => "interview",
            Screen::Results => "results",
            Screen::History => "history",
        };
        f.write_str(name)
    }
}

/// Loaded configuration, stores, and the current screen.
pub struct App {
    pub config: MockviewConfig,
    pub data_dir: PathBuf,
    pub accounts: Accounts,
    pub progress: ProgressStore,
    pub history: HistoryStore,
    screen: Screen,
}

impl App {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config = load_config_from(args.config.as_deref())?;
        let data_dir = args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.data_dir.clone());
        tracing::debug!(data_dir = %data_dir.display(), "opening data store");

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&data_dir));
        Ok(Self {
            config,
            data_dir,
            accounts: Accounts::new(store.clone()),
            progress: ProgressStore::new(store.clone()),
            history: HistoryStore::new(store),
            screen: Screen::Login,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Move to `next`, refusing transitions the app does not support.
    pub fn goto(&mut self, next: Screen) -> Result<()> {
        anyhow::ensure!(
            self.screen.can_transition(next),
            "cannot go from the {} screen to the {} screen",
            self.screen,
            next
        );
        tracing::debug!(from = %self.screen, to = %next, "screen change");
        self.screen = next;
        Ok(())
    }

    /// The signed-in user; lands on the home screen.
    pub fn require_user(&mut self) -> Result<User> {
        let user = self
            .accounts
            .current_user()?
            .context("not signed in. Run `mockview login` or `mockview signup` first")?;
        if self.screen != Screen::Home {
            self.goto(Screen::Home)?;
        }
        Ok(user)
    }

    /// A coach backed by the configured provider, or an offline coach when
    /// no provider is configured or it cannot be built.
    pub fn coach(&self) -> Coach {
        let coach_config = self.config.coach_config();
        if let Some((name, provider_config)) = self.config.active_provider() {
            match create_provider(name, provider_config) {
                Ok(provider) => {
                    tracing::info!(provider = name, model = %coach_config.model, "coaching online");
                    return Coach::new(Arc::from(provider), coach_config);
                }
                Err(e) => tracing::warn!("provider '{name}' unavailable: {e:#}"),
            }
        }
        eprintln!(
            "No language model available: using the built-in question bank and quick feedback."
        );
        Coach::offline(coach_config)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.data_dir.join("reports")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_flow_transitions() {
        let path = [
            Screen::Login,
            Screen::Home,
            Screen::Loading,
            Screen::Interview,
            Screen::Results,
            Screen::Home,
            Screen::History,
            Screen::Home,
            Screen::Login,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn invalid_transitions() {
        assert!(!Screen::Login.can_transition(Screen::Interview));
        assert!(!Screen::Results.can_transition(Screen::Interview));
        assert!(!Screen::Loading.can_transition(Screen::Results));
        assert!(!Screen::Home.can_transition(Screen::Home));
    }

    #[test]
    fn goto_enforces_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("mockview.toml");
        std::fs::write(&config_path, "").unwrap();
        let mut app = App::load(&GlobalArgs {
            config: Some(config_path),
            data_dir: Some(dir.path().join("data")),
        })
        .unwrap();

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.goto(Screen::Results).is_err());
        app.goto(Screen::Signup).unwrap();
        app.goto(Screen::Home).unwrap();
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.reports_dir(), dir.path().join("data/reports"));
    }

    #[test]
    fn require_user_needs_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("mockview.toml");
        std::fs::write(&config_path, "").unwrap();
        let mut app = App::load(&GlobalArgs {
            config: Some(config_path),
            data_dir: Some(dir.path().to_path_buf()),
        })
        .unwrap();
        let err = app.require_user().unwrap_err();
        assert!(err.to_string().contains("not signed in"));
    }
}
