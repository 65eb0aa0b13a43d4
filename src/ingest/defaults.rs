//! Built-in datasets used when a platform workbook or one of its sheets is
//! unavailable. Translation arrays follow [`Language::ALL`] order; an empty
//! string marks a missing translation.

use crate::domain::model::{
    Country, IntentType, Language, NaturalPhrase, PhraseTemplate, Platform, SeoTemplate, Service,
    Translations,
};

type Localized = [&'static str; 9];

fn localized(texts: &Localized) -> Translations {
    let mut translations = Translations::new();
    for (language, text) in Language::ALL.into_iter().zip(texts.iter()) {
        translations.insert(language, *text);
    }
    translations
}

const COUNTRIES: &[(&str, &str, Localized)] = &[
    (
        "FR",
        "France",
        ["France", "France", "Francia", "Frankreich", "França", "Франция", "法国", "فرنسا", "फ़्रांस"],
    ),
    (
        "ES",
        "Spain",
        ["Espagne", "Spain", "España", "Spanien", "Espanha", "Испания", "西班牙", "إسبانيا", "स्पेन"],
    ),
    (
        "DE",
        "Germany",
        ["Allemagne", "Germany", "Alemania", "Deutschland", "Alemanha", "Германия", "德国", "ألمانيا", "जर्मनी"],
    ),
    (
        "TH",
        "Thailand",
        ["Thaïlande", "Thailand", "Tailandia", "Thailand", "Tailândia", "Таиланд", "泰国", "تايلاند", "थाईलैंड"],
    ),
    (
        "US",
        "United States",
        [
            "États-Unis",
            "United States",
            "Estados Unidos",
            "Vereinigte Staaten",
            "Estados Unidos",
            "США",
            "美国",
            "الولايات المتحدة",
            "संयुक्त राज्य अमेरिका",
        ],
    ),
    (
        "AE",
        "United Arab Emirates",
        [
            "Émirats arabes unis",
            "United Arab Emirates",
            "Emiratos Árabes Unidos",
            "Vereinigte Arabische Emirate",
            "Emirados Árabes Unidos",
            "ОАЭ",
            "阿联酋",
            "الإمارات",
            "संयुक्त अरब अमीरात",
        ],
    ),
];

const SOS_EXPAT_SERVICES: &[(&str, &str, Localized)] = &[
    (
        "lawyer",
        "legal",
        ["avocat", "lawyer", "abogado", "Anwalt", "advogado", "адвокат", "律师", "محامي", "वकील"],
    ),
    (
        "expat-helper",
        "assistance",
        [
            "expatrié aidant",
            "expat helper",
            "ayudante para expatriados",
            "Expat-Helfer",
            "ajudante de expatriados",
            "помощник для экспатов",
            "外籍人士助手",
            "مساعد المغتربين",
            "प्रवासी सहायक",
        ],
    ),
    (
        "immigration-lawyer",
        "legal",
        [
            "avocat en immigration",
            "immigration lawyer",
            "abogado de inmigración",
            "Einwanderungsanwalt",
            "advogado de imigração",
            "иммиграционный адвокат",
            "",
            "",
            "",
        ],
    ),
];

const ULIXAI_SERVICES: &[(&str, &str, Localized)] = &[
    (
        "translator",
        "language",
        ["traducteur", "translator", "traductor", "Übersetzer", "tradutor", "переводчик", "翻译", "مترجم", "अनुवादक"],
    ),
    (
        "international-moving",
        "relocation",
        [
            "déménagement international",
            "international moving",
            "mudanza internacional",
            "internationaler Umzug",
            "mudança internacional",
            "международный переезд",
            "国际搬家",
            "نقل دولي",
            "अंतरराष्ट्रीय स्थानांतरण",
        ],
    ),
    (
        "accountant",
        "finance",
        ["comptable", "accountant", "contable", "Steuerberater", "contador", "бухгалтер", "会计师", "محاسب", "लेखाकार"],
    ),
];

const ULYSSE_AI_SERVICES: &[(&str, &str, Localized)] = &[
    (
        "visa-assistant",
        "administrative",
        [
            "assistant visa",
            "visa assistant",
            "asistente de visado",
            "Visum-Assistent",
            "assistente de visto",
            "помощник по визам",
            "签证助手",
            "مساعد التأشيرات",
            "वीज़ा सहायक",
        ],
    ),
    (
        "tax-assistant",
        "finance",
        [
            "assistant fiscal",
            "tax assistant",
            "asistente fiscal",
            "Steuerassistent",
            "assistente fiscal",
            "налоговый помощник",
            "税务助手",
            "مساعد ضريبي",
            "कर सहायक",
        ],
    ),
];

const TEMPLATES: &[(&str, &str, IntentType, i32)] = &[
    ("service-country", "{service} {country}", IntentType::Transactional, 3),
    ("service-country-lower", "{service} {country_lower}", IntentType::Informational, 2),
    ("platform-service-country", "{platform} {service} {country}", IntentType::Navigational, 1),
    ("service-lower-country", "{service_lower} {country}", IntentType::Commercial, 2),
];

const SEO_SERVICE_COUNTRY: &[(Language, &str, &str)] = &[
    (
        Language::Fr,
        "{service} {country} | {platform}",
        "Trouvez un {service_lower} en {country} avec {platform}. Réponse rapide, experts vérifiés.",
    ),
    (
        Language::En,
        "{service} {country} | {platform}",
        "Find a {service_lower} in {country} with {platform}. Fast answers from verified experts.",
    ),
    (
        Language::Es,
        "{service} {country} | {platform}",
        "Encuentre un {service_lower} en {country} con {platform}. Respuesta rápida y expertos verificados.",
    ),
    (
        Language::De,
        "{service} {country} | {platform}",
        "Finden Sie {service} in {country} mit {platform}. Schnelle Antworten von geprüften Experten.",
    ),
    (
        Language::Pt,
        "{service} {country} | {platform}",
        "Encontre um {service_lower} em {country} com {platform}. Resposta rápida, especialistas verificados.",
    ),
    (
        Language::Ru,
        "{service} {country} | {platform}",
        "{service} в стране {country} с {platform}: быстрые ответы от проверенных экспертов.",
    ),
    (
        Language::Zh,
        "{country}{service} | {platform}",
        "通过{platform}在{country}找到{service}，快速获得认证专家的帮助。",
    ),
    (
        Language::Ar,
        "{service} {country} | {platform}",
        "ابحث عن {service} في {country} مع {platform}. إجابات سريعة من خبراء موثوقين.",
    ),
    (
        Language::Hi,
        "{service} {country} | {platform}",
        "{platform} के साथ {country} में {service} खोजें। सत्यापित विशेषज्ञों से त्वरित उत्तर।",
    ),
];

const PHRASES: &[(&str, Localized)] = &[
    (
        "urgent",
        ["urgent", "urgent", "urgente", "dringend", "urgente", "срочно", "紧急", "عاجل", "तत्काल"],
    ),
    (
        "near_me",
        [
            "près de chez moi",
            "near me",
            "cerca de mí",
            "in meiner Nähe",
            "perto de mim",
            "рядом со мной",
            "附近",
            "بالقرب مني",
            "मेरे पास",
        ],
    ),
    (
        "online",
        ["en ligne", "online", "en línea", "online", "online", "онлайн", "在线", "عبر الإنترنت", "ऑनलाइन"],
    ),
    (
        "quote",
        ["devis", "quote", "presupuesto", "Angebot", "orçamento", "расценки", "报价", "عرض سعر", "कोटेशन"],
    ),
];

pub fn default_countries() -> Vec<Country> {
    COUNTRIES
        .iter()
        .map(|(code, name, names)| Country {
            code: (*code).to_string(),
            name: (*name).to_string(),
            translations: localized(names),
        })
        .collect()
}

pub fn default_services(platform: Platform) -> Vec<Service> {
    let rows = match platform {
        Platform::SosExpat => SOS_EXPAT_SERVICES,
        Platform::Ulixai => ULIXAI_SERVICES,
        Platform::UlysseAi => ULYSSE_AI_SERVICES,
    };
    rows.iter()
        .map(|(key, category, texts)| Service {
            key: (*key).to_string(),
            category: Some((*category).to_string()),
            translations: localized(texts),
        })
        .collect()
}

pub fn default_templates() -> Vec<PhraseTemplate> {
    TEMPLATES
        .iter()
        .map(|(key, pattern, intent, priority)| PhraseTemplate {
            key: (*key).to_string(),
            pattern: (*pattern).to_string(),
            intent: *intent,
            priority: *priority,
            active: true,
        })
        .collect()
}

pub fn default_seo_templates() -> Vec<SeoTemplate> {
    SEO_SERVICE_COUNTRY
        .iter()
        .map(|(language, title, meta)| SeoTemplate {
            language: *language,
            page_type: "service_country".to_string(),
            title: (*title).to_string(),
            meta_description: (*meta).to_string(),
        })
        .collect()
}

pub fn default_phrases() -> Vec<NaturalPhrase> {
    PHRASES
        .iter()
        .flat_map(|(key, texts)| {
            Language::ALL
                .into_iter()
                .zip(texts.iter())
                .filter(|(_, text)| !text.is_empty())
                .map(move |(language, text)| NaturalPhrase {
                    language,
                    key: (*key).to_string(),
                    text: (*text).to_string(),
                })
        })
        .collect()
}
