//! CLI Command Tests
//!
//! Argument parsing, exit codes and command handlers run against
//! in-memory preferences.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use lazismu::cli::{Cli, Command, ThemeAction};

    #[test]
    fn test_no_args_is_viewer_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
        assert_eq!(cli.page, "index.html");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lazismu",
            "programs",
            "--json",
            "--lang",
            "ar",
            "--feed-url",
            "http://localhost:9/feed",
            "--ephemeral",
        ]);
        assert!(cli.json);
        assert!(cli.ephemeral);
        assert_eq!(cli.lang.as_deref(), Some("ar"));
        assert_eq!(cli.feed_url.as_deref(), Some("http://localhost:9/feed"));
        assert!(matches!(cli.command, Some(Command::Programs(ref cmd)) if !cmd.offline));
    }

    #[test]
    fn test_news_all_flag() {
        let cli = Cli::parse_from(["lazismu", "news", "--all"]);
        match cli.command {
            Some(Command::News(cmd)) => assert!(cmd.all),
            _ => panic!("Expected News command"),
        }
    }

    #[test]
    fn test_article_id_conflicts_with_url() {
        let result = Cli::try_parse_from([
            "lazismu",
            "article",
            "--id",
            "a",
            "--url",
            "artikel-detail.html?id=b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_theme_defaults_to_show() {
        let cli = Cli::parse_from(["lazismu", "theme"]);
        match cli.command {
            Some(Command::Theme(cmd)) => assert_eq!(cmd.action, ThemeAction::Show),
            _ => panic!("Expected Theme command"),
        }
        let cli = Cli::parse_from(["lazismu", "theme", "toggle"]);
        match cli.command {
            Some(Command::Theme(cmd)) => assert_eq!(cmd.action, ThemeAction::Toggle),
            _ => panic!("Expected Theme command"),
        }
    }

    #[test]
    fn test_lang_requires_code() {
        assert!(Cli::try_parse_from(["lazismu", "lang"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use lazismu::cli::{ArticleCmd, ExitCode, NewsCmd, Output, ProgramsCmd, ThemeAction, ThemeCmd};
    use lazismu::commands::{self, Context};
    use lazismu::config::Config;
    use lazismu::page::Page;
    use lazismu::store::{FileStore, PreferenceStore};
    use lazismu::{Language, Theme};
    use tempfile::TempDir;

    fn ctx() -> Context {
        Context {
            config: Config::default(),
            ephemeral: true,
            lang: None,
        }
    }

    fn quiet() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    #[tokio::test]
    async fn test_programs_offline_succeeds() {
        let code = commands::programs_cmd(ProgramsCmd { offline: true }, &ctx(), &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_programs_feed_failure_still_succeeds() {
        let ctx = Context {
            config: Config {
                feed_url: Some("http://127.0.0.1:1/feed".into()),
                ..Config::default()
            },
            ..ctx()
        };
        let code = commands::programs_cmd(ProgramsCmd { offline: false }, &ctx, &quiet()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_news_and_article() {
        assert_eq!(
            commands::news_cmd(NewsCmd { all: false }, &ctx(), &quiet()),
            ExitCode::Success
        );
        assert_eq!(
            commands::news_cmd(NewsCmd { all: true }, &ctx(), &quiet()),
            ExitCode::Success
        );
        assert_eq!(
            commands::article_cmd(
                ArticleCmd {
                    id: None,
                    url: Some("artikel-detail.html?id=iftaar-kolaborasi".into()),
                },
                &ctx(),
                &quiet()
            ),
            ExitCode::Success
        );
    }

    #[test]
    fn test_article_bad_url_is_invalid_args() {
        let code = commands::article_cmd(
            ArticleCmd {
                id: None,
                url: Some("http://[broken".into()),
            },
            &ctx(),
            &quiet(),
        );
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.toml");

        let app = ctx().open_with(
            Page::news(),
            PreferenceStore::new(FileStore::open(&path)),
        );
        assert_eq!(app.theme(), Theme::Light);
        drop(app);

        let mut app = ctx().open_with(Page::news(), PreferenceStore::new(FileStore::open(&path)));
        app.toggle_theme();
        drop(app);

        let prefs = PreferenceStore::new(FileStore::open(&path)).load();
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_lang_override_is_not_stored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.toml");
        let ctx = Context {
            lang: Some("ar".into()),
            ..ctx()
        };

        let app = ctx.open_with(Page::news(), PreferenceStore::new(FileStore::open(&path)));
        assert_eq!(app.language, Language::Ar);
        assert_eq!(app.page.text("nav-news"), Some("الأخبار"));
        drop(app);

        let prefs = PreferenceStore::new(FileStore::open(&path)).load();
        assert_eq!(prefs.language, Language::Tr);
    }

    #[test]
    fn test_theme_show_succeeds() {
        let code = commands::theme_cmd(
            ThemeCmd {
                action: ThemeAction::Show,
            },
            &ctx(),
            &quiet(),
        );
        assert_eq!(code, ExitCode::Success);
    }
}
