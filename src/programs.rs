//! Program cards
//!
//! Turns program records into card fragments for the active language, and
//! renders loading skeletons while the feed request is in flight.

use crate::models::{Language, Localized, Program};
use crate::page::{Container, FragmentKind, ProgramCard};
use crate::reveal::RevealAnimator;

/// Characters of description kept on a card
pub const DESCRIPTION_LIMIT: usize = 120;

/// Marker appended to every card description
pub const ELLIPSIS: char = '…';

/// First 120 characters of a description, always followed by an ellipsis
pub fn truncate_description(description: &str) -> String {
    let mut out: String = description.chars().take(DESCRIPTION_LIMIT).collect();
    out.push(ELLIPSIS);
    out
}

/// Render program cards, replacing whatever the container held
pub fn render_programs(
    container: &mut Container,
    programs: &[Program],
    lang: Language,
    reveal: &mut RevealAnimator,
) {
    container.clear();
    for program in programs {
        let card = ProgramCard {
            image_url: program.image_url.clone(),
            title: program.title_for(lang).to_string(),
            description: truncate_description(program.description_for(lang)),
            progress: None,
        };
        let id = container.append(FragmentKind::ProgramCard(card));
        reveal.observe(id);
    }
    container.aria_busy = false;
}

/// Render `n` loading placeholders
pub fn render_skeletons(container: &mut Container, n: usize) {
    container.clear();
    for _ in 0..n {
        container.append(FragmentKind::Skeleton);
    }
    container.aria_busy = true;
}

/// Demo programs shown whenever the feed cannot be used
pub fn fallback_programs() -> Vec<Program> {
    vec![
        Program {
            title: Localized::new("Beşeri Bantuan", "Humanitarian Aid", "مساعدات إنسانية"),
            description: Localized::new(
                "Bersama bantu kebutuhan dasar keluarga rentan.",
                "Together we support vulnerable families.",
                "معًا ندعم الأسر الضعيفة.",
            ),
            image_url: "https://images.unsplash.com/photo-1509099836639-18ba1795216d?q=80&w=1200&auto=format&fit=crop".into(),
        },
        Program {
            title: Localized::new("Beasiswa Anak", "Child Scholarship", "منح دراسية للأطفال"),
            description: Localized::new(
                "Dukung biaya pendidikan dan alat belajar.",
                "Support tuition and learning kits.",
                "ندعم الرسوم الدراسية وأدوات التعلم.",
            ),
            image_url: "https://images.unsplash.com/photo-1456327102063-fb5054efe647?q=80&w=1200&auto=format&fit=crop".into(),
        },
        Program {
            title: Localized::new("Klinik Gratis", "Free Clinic", "عيادة مجانية"),
            description: Localized::new(
                "Pelayanan kesehatan dasar keliling.",
                "Mobile primary healthcare services.",
                "خدمات رعاية صحية أولية متنقلة.",
            ),
            image_url: "https://images.unsplash.com/photo-1582719508461-905c673771fd?q=80&w=1200&auto=format&fit=crop".into(),
        },
    ]
}
