//! Translated interface labels.
//!
//! A small ordered catalog of message ids with English, French and Arabic
//! text. Lookups fall back to English, then to the id itself, so a missing
//! translation never leaves an empty label on screen.

use crate::models::Locale;
use indexmap::IndexMap;
use std::sync::LazyLock;

/// Translations of one message, indexed by locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub en: &'static str,
    pub fr: &'static str,
    pub ar: &'static str,
}

impl Translations {
    fn get(&self, locale: Locale) -> Option<&'static str> {
        let text = match locale {
            Locale::En => self.en,
            Locale::Fr => self.fr,
            Locale::Ar => self.ar,
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: IndexMap<&'static str, Translations>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, translations: Translations) {
        self.entries.insert(key, translations);
    }

    /// Look up `key` for `locale`, falling back to English and then the key
    pub fn translate<'a>(&self, locale: Locale, key: &'a str) -> &'a str {
        match self.entries.get(key) {
            Some(t) => {
                let text: Option<&'a str> = t.get(locale).or_else(|| t.get(Locale::En));
                text.unwrap_or(key)
            }
            None => {
                tracing::trace!("Missing message id: {}", key);
                key
            }
        }
    }

    /// Message ids in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    let mut catalog = Catalog::new();
    let mut add = |key, en, fr, ar| catalog.insert(key, Translations { en, fr, ar });

    add("nav.main", "Home", "Accueil", "الرئيسية");
    add("nav.projects", "Projects", "Projets", "المشاريع");
    add("nav.skills", "Skills", "Compétences", "المهارات");
    add("heading.stack", "Core Stack", "Stack principale", "التقنيات الأساسية");
    add(
        "heading.projects",
        "Selected Projects",
        "Projets sélectionnés",
        "مشاريع مختارة",
    );
    add("heading.skills", "Skills", "Compétences", "المهارات");
    add("heading.log", "System Log", "Journal système", "سجل النظام");
    add("skills.frontend", "Frontend", "Frontend", "الواجهة الأمامية");
    add("skills.backend", "Backend", "Backend", "الواجهة الخلفية");
    add(
        "skills.architecture",
        "Architecture",
        "Architecture",
        "الهندسة المعمارية",
    );
    add("toggle.3d", "3D Mode", "Mode 3D", "الوضع ثلاثي الأبعاد");
    add("label.language", "Language", "Langue", "اللغة");

    catalog
});

/// The catalog compiled into the application
pub fn catalog() -> &'static Catalog {
    &BUILTIN
}

/// Shorthand for `catalog().translate(locale, key)`
pub fn t(locale: Locale, key: &str) -> &str {
    catalog().translate(locale, key)
}
