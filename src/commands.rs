//! CLI Command Handlers
//!
//! Each handler opens the page its operation lives on, runs the page setup
//! and prints the resulting fragments. Handlers take CLI args and Output,
//! and return an ExitCode.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::api::FeedClient;
use crate::app::App;
use crate::cli::{
    ArticleCmd, Cli, ExitCode, LangCmd, NewsCmd, Output, ProgramsCmd, ThemeAction, ThemeCmd,
};
use crate::config::Config;
use crate::models::{Language, Preferences, Theme};
use crate::page::{resolve_url, Container, Fragment, Page};
use crate::programs;
use crate::store::{FileStore, PreferenceStore};

// =============================================================================
// Session Context
// =============================================================================

/// Settings shared by every command of one invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub ephemeral: bool,
    pub lang: Option<String>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = match cli.config {
            Some(ref path) => Config::load_from(path),
            None => Config::load(),
        };
        if let Some(ref url) = cli.feed_url {
            config.feed_url = Some(url.clone());
        }
        Self {
            config,
            ephemeral: cli.ephemeral,
            lang: cli.lang.clone(),
        }
    }

    /// Durable store unless running ephemeral or no config dir exists
    pub fn preference_store(&self) -> PreferenceStore {
        match FileStore::default_path() {
            Some(path) if !self.ephemeral => PreferenceStore::new(FileStore::open(path)),
            _ => PreferenceStore::ephemeral(),
        }
    }

    pub fn feed_client(&self) -> FeedClient {
        FeedClient::new(self.config.feed_url())
    }

    /// Load a page and run its setup
    pub fn open(&self, page: Page) -> App {
        self.open_with(page, self.preference_store())
    }

    pub fn open_with(&self, page: Page, prefs: PreferenceStore) -> App {
        // One-shot commands never consume slider ticks
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(page, prefs, self.config.clone(), tx);
        app.init();
        if let Some(ref lang) = self.lang {
            app.apply_language(lang);
        }
        app
    }
}

// =============================================================================
// Output Shapes
// =============================================================================

/// Rendered container contents
#[derive(Debug, Serialize)]
pub struct RenderedFragments<'a> {
    pub page: &'a str,
    pub language: Language,
    pub fragments: &'a [Fragment],
}

impl<'a> RenderedFragments<'a> {
    fn new(app: &'a App, container: Option<&'a Container>) -> Self {
        Self {
            page: &app.page.location,
            language: app.language,
            fragments: container.map(|c| c.fragments.as_slice()).unwrap_or(&[]),
        }
    }
}

fn print_or_fail<T: Serialize>(output: &Output, data: T) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Programs Command
// =============================================================================

pub async fn programs_cmd(cmd: ProgramsCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut app = ctx.open(Page::home());

    if cmd.offline {
        if let Some(generation) = app.begin_program_load() {
            app.finish_program_load(generation, Ok(programs::fallback_programs()));
        }
    } else {
        let client = ctx.feed_client();
        output.info(format!("Loading programs from {}", client.url()));
        app.fetch_programs(&client).await;
    }

    print_or_fail(
        output,
        RenderedFragments::new(&app, app.page.program_container.as_ref()),
    )
}

// =============================================================================
// News Commands
// =============================================================================

pub fn news_cmd(cmd: NewsCmd, ctx: &Context, output: &Output) -> ExitCode {
    if cmd.all {
        let app = ctx.open(Page::news());
        print_or_fail(output, RenderedFragments::new(&app, app.page.all_articles.as_ref()))
    } else {
        let app = ctx.open(Page::home());
        print_or_fail(output, RenderedFragments::new(&app, app.page.home_news.as_ref()))
    }
}

pub fn article_cmd(cmd: ArticleCmd, ctx: &Context, output: &Output) -> ExitCode {
    let page = match (cmd.id, cmd.url) {
        (Some(id), _) => Page::article(Some(id.as_str())),
        (None, Some(address)) => match resolve_url(&address) {
            Ok(url) => {
                let id = url
                    .query_pairs()
                    .find(|(k, _)| k == "id")
                    .map(|(_, v)| v.into_owned());
                Page::article(id.as_deref())
            }
            Err(e) => {
                return output.error(format!("Invalid URL {}: {}", address, e), ExitCode::InvalidArgs)
            }
        },
        (None, None) => Page::article(None),
    };

    let app = ctx.open(page);
    print_or_fail(output, RenderedFragments::new(&app, app.page.article_detail.as_ref()))
}

// =============================================================================
// Preference Commands
// =============================================================================

#[derive(Debug, Serialize)]
struct LanguageApplied {
    language: Language,
}

#[derive(Debug, Serialize)]
struct ThemeApplied {
    theme: Theme,
}

pub fn lang_cmd(cmd: LangCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut app = ctx.open(Page::news());
    let language = app.set_language(&cmd.code);
    if language.code() != cmd.code {
        output.info(format!("Unsupported language '{}', using {}", cmd.code, language));
    }
    print_or_fail(output, LanguageApplied { language })
}

pub fn theme_cmd(cmd: ThemeCmd, ctx: &Context, output: &Output) -> ExitCode {
    let mut app = ctx.open(Page::news());
    let theme = match cmd.action {
        ThemeAction::Show => app.theme(),
        ThemeAction::Toggle => app.toggle_theme(),
    };
    print_or_fail(output, ThemeApplied { theme })
}

pub fn prefs_cmd(ctx: &Context, output: &Output) -> ExitCode {
    let prefs: Preferences = ctx.preference_store().load();
    print_or_fail(output, prefs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context {
            config: Config::default(),
            ephemeral: true,
            lang: None,
        }
    }

    #[test]
    fn test_open_applies_lang_override() {
        let ctx = Context {
            lang: Some("ar".into()),
            ..ctx()
        };
        let app = ctx.open(Page::news());
        assert_eq!(app.language, Language::Ar);
    }

    #[test]
    fn test_rendered_fragments_without_container() {
        let app = ctx().open(Page::news());
        let rendered = RenderedFragments::new(&app, app.page.program_container.as_ref());
        assert!(rendered.fragments.is_empty());
        assert_eq!(rendered.page, "berita.html");
    }
}
