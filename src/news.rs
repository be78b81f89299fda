//! Demo news articles
//!
//! A fixed list of articles rendered three ways: a three-card teaser on the
//! home page, the full listing on the news page, and the detail view selected
//! by the `id` query parameter.

use chrono::NaiveDate;

use crate::models::{Article, DateStyle};
use crate::page::{article_href, ArticleView, Container, FragmentKind, NewsCard};
use crate::reveal::RevealAnimator;

/// Articles shown in the home page teaser
pub const TEASER_COUNT: usize = 3;

/// Closing paragraph of every article
pub const TRANSPARENCY_NOTE: &str = "Gerakan ini dibiayai secara transparan dan akuntabel. \
     Terima kasih kepada para donatur yang terus mendukung.";

pub const DONATE_LABEL: &str = "Donasi Sekarang";
pub const DONATE_HREF: &str = "#";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// The authored article list, in display order
pub fn articles() -> Vec<Article> {
    vec![
        Article {
            id: "pendidikan-berdaya",
            title: "Pendidikan Berdaya di Gaziantep",
            date: ymd(2025, 7, 18),
            image: "https://images.unsplash.com/photo-1509062522246-3755977927d7?q=80&w=1200&auto=format&fit=crop",
            excerpt: "Kelas literasi dan sains sederhana untuk anak-anak pengungsi.",
            content: "Program ini menghadirkan relawan pengajar dan modul pembelajaran kreatif untuk anak-anak pengungsi di Gaziantep. Fokus utamanya adalah literasi, numerasi, serta sains sederhana melalui eksperimen menyenangkan.",
        },
        Article {
            id: "layanan-kesehatan-mobile",
            title: "Layanan Kesehatan Mobile",
            date: ymd(2025, 8, 1),
            image: "https://images.unsplash.com/photo-1584467735871-6cd497c7c9a2?q=80&w=1200&auto=format&fit=crop",
            excerpt: "Klinik keliling untuk menjangkau daerah terpencil.",
            content: "Tim medis Lazismu Türkiye menyediakan layanan kesehatan dasar, vaksinasi, dan konsultasi gizi dengan sistem janji online serta pencatatan digital yang transparan.",
        },
        Article {
            id: "iftaar-kolaborasi",
            title: "Iftaar Kolaborasi, Dampak Maksimal",
            date: ymd(2025, 4, 5),
            image: "https://images.unsplash.com/photo-1517420704952-7bd606da36a7?q=80&w=1200&auto=format&fit=crop",
            excerpt: "Sinergi komunitas untuk berbagi buka puasa.",
            content: "Dengan kolaborasi komunitas lokal, ribuan paket iftar dibagikan di beberapa distrik Istanbul, menggerakkan donatur muda untuk terlibat dalam aksi sosial.",
        },
    ]
}

/// Exact id match, otherwise the first article
pub fn find_article<'a>(articles: &'a [Article], id: Option<&str>) -> Option<&'a Article> {
    id.and_then(|id| articles.iter().find(|a| a.id == id))
        .or_else(|| articles.first())
}

fn news_card(article: &Article, dates: DateStyle) -> NewsCard {
    NewsCard {
        article_id: article.id.to_string(),
        href: article_href(article.id),
        image: article.image.to_string(),
        date: dates.format(article.date),
        title: article.title.to_string(),
        excerpt: article.excerpt.to_string(),
    }
}

/// First three articles as link cards
pub fn render_teaser(container: &mut Container, articles: &[Article], dates: DateStyle) {
    container.clear();
    for article in articles.iter().take(TEASER_COUNT) {
        container.append(FragmentKind::NewsCard(news_card(article, dates)));
    }
}

/// Every article as a link card, each registered for reveal
pub fn render_full_list(
    container: &mut Container,
    articles: &[Article],
    dates: DateStyle,
    reveal: &mut RevealAnimator,
) {
    container.clear();
    for article in articles {
        let id = container.append(FragmentKind::NewsCard(news_card(article, dates)));
        reveal.observe(id);
    }
}

/// Detail view for the article named by `id`
pub fn render_detail(
    container: &mut Container,
    articles: &[Article],
    id: Option<&str>,
    dates: DateStyle,
) {
    let Some(article) = find_article(articles, id) else {
        return;
    };
    container.clear();
    container.append(FragmentKind::ArticleDetail(ArticleView {
        article_id: article.id.to_string(),
        image: article.image.to_string(),
        title: article.title.to_string(),
        date: dates.format(article.date),
        paragraphs: vec![article.content.to_string(), TRANSPARENCY_NOTE.to_string()],
        donate_label: DONATE_LABEL.to_string(),
        donate_href: DONATE_HREF.to_string(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let list = articles();
        let mut ids: Vec<_> = list.iter().map(|a| a.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), list.len());
    }

    #[test]
    fn test_find_article_falls_back_to_first() {
        let list = articles();
        assert_eq!(
            find_article(&list, Some("iftaar-kolaborasi")).unwrap().id,
            "iftaar-kolaborasi"
        );
        assert_eq!(find_article(&list, Some("missing")).unwrap().id, "pendidikan-berdaya");
        assert_eq!(find_article(&list, None).unwrap().id, "pendidikan-berdaya");
        // Exact match only
        assert_eq!(
            find_article(&list, Some("IFTAAR-KOLABORASI")).unwrap().id,
            "pendidikan-berdaya"
        );
        assert!(find_article(&[], Some("x")).is_none());
    }

    #[test]
    fn test_teaser_limits_to_three() {
        let mut list = articles();
        list.extend(articles());
        let mut container = Container::default();
        render_teaser(&mut container, &list, DateStyle::Iso);
        assert_eq!(container.len(), TEASER_COUNT);
    }

    #[test]
    fn test_detail_paragraphs() {
        let mut container = Container::default();
        render_detail(
            &mut container,
            &articles(),
            Some("layanan-kesehatan-mobile"),
            DateStyle::DayFirstDotted,
        );
        match &container.fragments[0].kind {
            FragmentKind::ArticleDetail(view) => {
                assert_eq!(view.title, "Layanan Kesehatan Mobile");
                assert_eq!(view.date, "01.08.2025");
                assert_eq!(view.paragraphs.len(), 2);
                assert_eq!(view.paragraphs[1], TRANSPARENCY_NOTE);
                assert_eq!(view.donate_label, "Donasi Sekarang");
            }
            other => panic!("Expected article detail, got {:?}", other),
        }
    }
}
