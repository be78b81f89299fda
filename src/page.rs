//! Page document model
//!
//! The markup the controllers manipulate: language switch buttons,
//! translatable text, the hero slides and the containers cards are rendered
//! into. Every optional target is an explicit `Option`, so a component whose
//! target is missing on a page is simply never constructed.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::models::{Language, Localized};

/// Origin used to resolve relative page paths
pub const SITE_ORIGIN: &str = "https://lazismu.local/";

// =============================================================================
// Page Kinds
// =============================================================================

/// The three pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// index.html: slider, programs, news teaser
    Home,
    /// berita.html: all articles
    News,
    /// artikel-detail.html: one article
    Article,
}

impl PageKind {
    pub fn path(self) -> &'static str {
        match self {
            PageKind::Home => "index.html",
            PageKind::News => "berita.html",
            PageKind::Article => "artikel-detail.html",
        }
    }

    /// Guess the page from a URL path; unknown paths load the home page
    pub fn from_url(url: &Url) -> Self {
        match url.path_segments().and_then(|mut s| s.next_back()) {
            Some("berita.html") => PageKind::News,
            Some("artikel-detail.html") => PageKind::Article,
            _ => PageKind::Home,
        }
    }
}

/// Resolve a page address (absolute URL or site-relative path)
pub fn resolve_url(address: &str) -> Result<Url, url::ParseError> {
    match Url::parse(address) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(SITE_ORIGIN)?.join(address),
        Err(e) => Err(e),
    }
}

/// Link to an article's detail page
pub fn article_href(id: &str) -> String {
    format!("{}?id={}", PageKind::Article.path(), urlencoding::encode(id))
}

// =============================================================================
// Fragments
// =============================================================================

/// Identity of a rendered fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FragmentId(Uuid);

impl FragmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FragmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Animation timing function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    EaseOut,
}

/// Fill mode after the animation ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    Forwards,
}

/// A one-shot entrance animation applied to a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Animation {
    pub name: &'static str,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub easing: Easing,
    pub fill: FillMode,
}

impl Animation {
    /// Fade in while sliding up, 0.8s
    pub const FADE_IN_UP: Animation = Animation {
        name: "fadeInUp",
        duration: Duration::from_millis(800),
        easing: Easing::EaseOut,
        fill: FillMode::Forwards,
    };
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Program card contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramCard {
    pub image_url: String,
    pub title: String,
    pub description: String,
    /// Always rendered empty
    pub progress: Option<u8>,
}

/// News link card contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub article_id: String,
    pub href: String,
    pub image: String,
    pub date: String,
    pub title: String,
    pub excerpt: String,
}

/// Full article view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    pub article_id: String,
    pub image: String,
    pub title: String,
    pub date: String,
    pub paragraphs: Vec<String>,
    pub donate_label: String,
    pub donate_href: String,
}

/// What a fragment shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragmentKind {
    /// Pulsing placeholder with no data
    Skeleton,
    ProgramCard(ProgramCard),
    NewsCard(NewsCard),
    ArticleDetail(ArticleView),
}

/// A rendered piece of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub id: FragmentId,
    #[serde(flatten)]
    pub kind: FragmentKind,
    pub animation: Option<Animation>,
}

impl Fragment {
    pub fn is_skeleton(&self) -> bool {
        matches!(self.kind, FragmentKind::Skeleton)
    }
}

/// An element cards are rendered into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Container {
    pub fragments: Vec<Fragment>,
    pub aria_busy: bool,
}

impl Container {
    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Append a fragment and return its identity
    pub fn append(&mut self, kind: FragmentKind) -> FragmentId {
        let id = FragmentId::new();
        self.fragments.push(Fragment {
            id,
            kind,
            animation: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get_mut(&mut self, id: FragmentId) -> Option<&mut Fragment> {
        self.fragments.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: FragmentId) -> bool {
        self.fragments.iter().any(|f| f.id == id)
    }
}

// =============================================================================
// Controls and Text
// =============================================================================

/// A language switch control, identified as `lang-<code>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangButton {
    pub id: String,
    pub active: bool,
    pub aria_pressed: bool,
}

impl LangButton {
    pub fn new(lang: Language) -> Self {
        Self {
            id: format!("lang-{}", lang.code()),
            active: false,
            aria_pressed: false,
        }
    }

    /// Language named by the control's id, if any
    pub fn language(&self) -> Option<Language> {
        self.id.strip_prefix("lang-").and_then(Language::parse)
    }
}

/// A text element with optional per-language variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub name: &'static str,
    pub text: String,
    pub variants: BTreeMap<Language, String>,
}

impl TextNode {
    /// Element carrying all three variants
    pub fn localized(name: &'static str, text: Localized) -> Self {
        let variants = Language::ALL
            .iter()
            .map(|&lang| (lang, text.get(lang).to_string()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self {
            name,
            text: text.tr,
            variants,
        }
    }

    /// Element with static text and no variants
    pub fn plain(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            text: text.into(),
            variants: BTreeMap::new(),
        }
    }

    /// Only elements with a Turkish variant take part in translation
    pub fn is_translatable(&self) -> bool {
        self.variants.contains_key(&Language::Tr)
    }

    /// Swap in the variant for `lang`, then Turkish, then keep the current text
    pub fn translate(&mut self, lang: Language) {
        if let Some(text) = self
            .variants
            .get(&lang)
            .or_else(|| self.variants.get(&Language::Tr))
        {
            self.text = text.clone();
        }
    }
}

/// A hero slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub image: String,
    pub caption: Localized,
    pub active: bool,
}

impl Slide {
    pub fn new(image: impl Into<String>, caption: Localized) -> Self {
        Self {
            image: image.into(),
            caption,
            active: false,
        }
    }
}

/// The hero slider region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub slides: Vec<Slide>,
    /// Both prev and next controls present
    pub has_nav: bool,
}

/// Collapsible main navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MainNav {
    pub visible: bool,
}

// =============================================================================
// Page
// =============================================================================

/// One loaded page
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub kind: PageKind,
    /// Page path with its query string
    pub location: String,
    #[serde(skip)]
    pub query: Vec<(String, String)>,
    /// Document `lang` attribute
    pub lang: Language,
    /// Dark mode class on the document root
    pub dark: bool,
    pub lang_buttons: Vec<LangButton>,
    pub texts: Vec<TextNode>,
    pub hero: Option<Hero>,
    pub theme_toggle: bool,
    pub mobile_nav_toggle: bool,
    pub main_nav: Option<MainNav>,
    pub program_container: Option<Container>,
    pub home_news: Option<Container>,
    pub all_articles: Option<Container>,
    pub article_detail: Option<Container>,
}

impl Page {
    /// Markup shared by every page: header controls and navigation
    fn shell(kind: PageKind, location: String, query: Vec<(String, String)>) -> Self {
        Self {
            kind,
            location,
            query,
            lang: Language::Tr,
            dark: false,
            lang_buttons: Language::ALL.iter().map(|&l| LangButton::new(l)).collect(),
            texts: vec![
                TextNode::plain("brand", "LAZISMU Türkiye"),
                TextNode::localized("nav-home", Localized::new("Ana Sayfa", "Home", "الرئيسية")),
                TextNode::localized("nav-programs", Localized::new("Programlar", "Programs", "البرامج")),
                TextNode::localized("nav-news", Localized::new("Haberler", "News", "الأخبار")),
                TextNode::localized("nav-donate", Localized::new("Bağış Yap", "Donate", "تبرع")),
                TextNode::localized(
                    "footer",
                    Localized::new("Birlikte daha güçlüyüz.", "Stronger together.", ""),
                ),
            ],
            hero: None,
            theme_toggle: true,
            mobile_nav_toggle: true,
            main_nav: Some(MainNav::default()),
            program_container: None,
            home_news: None,
            all_articles: None,
            article_detail: None,
        }
    }

    /// Build the markup for a page address
    pub fn load(url: &Url) -> Self {
        let kind = PageKind::from_url(url);
        let location = match url.query() {
            Some(q) => format!("{}?{}", kind.path(), q),
            None => kind.path().to_string(),
        };
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self::build(kind, location, query)
    }

    pub fn home() -> Self {
        Self::build(PageKind::Home, PageKind::Home.path().to_string(), Vec::new())
    }

    pub fn news() -> Self {
        Self::build(PageKind::News, PageKind::News.path().to_string(), Vec::new())
    }

    /// Article page for the given `id` query
    pub fn article(id: Option<&str>) -> Self {
        match id {
            Some(id) => Self::build(
                PageKind::Article,
                article_href(id),
                vec![("id".to_string(), id.to_string())],
            ),
            None => Self::build(
                PageKind::Article,
                PageKind::Article.path().to_string(),
                Vec::new(),
            ),
        }
    }

    fn build(kind: PageKind, location: String, query: Vec<(String, String)>) -> Self {
        let mut page = Self::shell(kind, location, query);
        match kind {
            PageKind::Home => page.add_home_targets(),
            PageKind::News => page.add_news_targets(),
            PageKind::Article => page.article_detail = Some(Container::default()),
        }
        page
    }

    fn add_home_targets(&mut self) {
        self.texts.extend([
            TextNode::localized(
                "programs-heading",
                Localized::new("Programlarımız", "Our Programs", "برامجنا"),
            ),
            TextNode::localized(
                "news-heading",
                Localized::new("Son Haberler", "Latest News", "آخر الأخبار"),
            ),
        ]);
        self.hero = Some(Hero {
            slides: vec![
                Slide::new(
                    "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c?q=80&w=1600&auto=format&fit=crop",
                    Localized::new("Umut paylaştıkça çoğalır", "Hope grows when shared", "الأمل يكبر بالمشاركة"),
                ),
                Slide::new(
                    "https://images.unsplash.com/photo-1469571486292-0ba58a3f068b?q=80&w=1600&auto=format&fit=crop",
                    Localized::new("Eğitim herkesin hakkı", "Education for every child", "التعليم حق للجميع"),
                ),
                Slide::new(
                    "https://images.unsplash.com/photo-1532629345422-7515f3d16bb6?q=80&w=1600&auto=format&fit=crop",
                    Localized::new("Sağlık hizmeti kapınızda", "Healthcare at your door", "الرعاية الصحية عند بابك"),
                ),
            ],
            has_nav: true,
        });
        self.program_container = Some(Container {
            aria_busy: true,
            ..Container::default()
        });
        self.home_news = Some(Container::default());
    }

    fn add_news_targets(&mut self) {
        self.texts.push(TextNode::localized(
            "news-heading",
            Localized::new("Tüm Haberler", "All News", "كل الأخبار"),
        ));
        self.all_articles = Some(Container::default());
    }

    /// First value of a query parameter in the page URL
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.text.as_str())
    }

    /// Language button currently marked active
    pub fn active_language_button(&self) -> Option<&LangButton> {
        self.lang_buttons.iter().find(|b| b.active)
    }

    fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        [
            self.program_container.as_mut(),
            self.home_news.as_mut(),
            self.all_articles.as_mut(),
            self.article_detail.as_mut(),
        ]
        .into_iter()
        .flatten()
    }

    fn containers(&self) -> impl Iterator<Item = &Container> {
        [
            self.program_container.as_ref(),
            self.home_news.as_ref(),
            self.all_articles.as_ref(),
            self.article_detail.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Find a fragment anywhere on the page
    pub fn fragment_mut(&mut self, id: FragmentId) -> Option<&mut Fragment> {
        self.containers_mut().find_map(|c| c.get_mut(id))
    }

    pub fn contains_fragment(&self, id: FragmentId) -> bool {
        self.containers().any(|c| c.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_kind_from_url() {
        let url = resolve_url("berita.html").unwrap();
        assert_eq!(PageKind::from_url(&url), PageKind::News);

        let url = resolve_url("/artikel-detail.html?id=x").unwrap();
        assert_eq!(PageKind::from_url(&url), PageKind::Article);

        let url = resolve_url("https://example.org/").unwrap();
        assert_eq!(PageKind::from_url(&url), PageKind::Home);
    }

    #[test]
    fn test_targets_per_page() {
        let home = Page::home();
        assert!(home.program_container.is_some());
        assert!(home.home_news.is_some());
        assert!(home.hero.is_some());
        assert!(home.article_detail.is_none());

        let news = Page::news();
        assert!(news.all_articles.is_some());
        assert!(news.program_container.is_none());
        assert!(news.hero.is_none());

        let article = Page::article(Some("iftaar-kolaborasi"));
        assert!(article.article_detail.is_some());
        assert_eq!(
            article.query_param("id"),
            Some("iftaar-kolaborasi")
        );
    }

    #[test]
    fn test_load_reads_first_id_param() {
        let url = resolve_url("artikel-detail.html?id=a%20b&id=second").unwrap();
        let page = Page::load(&url);
        assert_eq!(page.kind, PageKind::Article);
        assert_eq!(page.query_param("id"), Some("a b"));
        assert_eq!(page.location, "artikel-detail.html?id=a%20b&id=second");
    }

    #[test]
    fn test_article_href_encodes_id() {
        assert_eq!(
            article_href("pendidikan-berdaya"),
            "artikel-detail.html?id=pendidikan-berdaya"
        );
        assert_eq!(article_href("a b&c"), "artikel-detail.html?id=a%20b%26c");
    }

    #[test]
    fn test_text_node_translation_chain() {
        let mut node = TextNode::localized("footer", Localized::new("Merhaba", "Hello", ""));
        node.translate(Language::En);
        assert_eq!(node.text, "Hello");
        node.translate(Language::Ar);
        assert_eq!(node.text, "Merhaba");

        let mut plain = TextNode::plain("brand", "LAZISMU");
        assert!(!plain.is_translatable());
        plain.translate(Language::En);
        assert_eq!(plain.text, "LAZISMU");
    }

    #[test]
    fn test_lang_button_language() {
        assert_eq!(LangButton::new(Language::Ar).language(), Some(Language::Ar));
        let odd = LangButton {
            id: "lang-xx".into(),
            active: false,
            aria_pressed: false,
        };
        assert_eq!(odd.language(), None);
    }
}
