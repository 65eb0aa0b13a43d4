use super::SeedTable;

/// Brands. Every other table references a row here.
pub struct PlatformTable;

impl SeedTable for PlatformTable {
    fn table_name(&self) -> &str {
        "platforms"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["slug"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS platforms (
            id BIGSERIAL PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )"
    }
}

pub struct ServiceTable;

impl SeedTable for ServiceTable {
    fn table_name(&self) -> &str {
        "services"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["platform_id", "service_key"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS services (
            id BIGSERIAL PRIMARY KEY,
            platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
            service_key TEXT NOT NULL,
            category TEXT,
            translations JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (platform_id, service_key)
        )"
    }
}

pub struct KeywordTemplateTable;

impl SeedTable for KeywordTemplateTable {
    fn table_name(&self) -> &str {
        "keyword_templates"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["platform_id", "template_key"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS keyword_templates (
            id BIGSERIAL PRIMARY KEY,
            platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
            template_key TEXT NOT NULL,
            pattern TEXT NOT NULL,
            intent_type TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 1,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (platform_id, template_key)
        )"
    }
}

pub struct SeoTemplateTable;

impl SeedTable for SeoTemplateTable {
    fn table_name(&self) -> &str {
        "seo_templates"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["platform_id", "language", "page_type"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS seo_templates (
            id BIGSERIAL PRIMARY KEY,
            platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
            language TEXT NOT NULL,
            page_type TEXT NOT NULL,
            title_template TEXT NOT NULL,
            meta_description_template TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (platform_id, language, page_type)
        )"
    }
}

pub struct NaturalPhraseTable;

impl SeedTable for NaturalPhraseTable {
    fn table_name(&self) -> &str {
        "natural_phrases"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["platform_id", "language", "phrase_key"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS natural_phrases (
            id BIGSERIAL PRIMARY KEY,
            platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
            language TEXT NOT NULL,
            phrase_key TEXT NOT NULL,
            phrase TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (platform_id, language, phrase_key)
        )"
    }
}

/// Generated rows. Re-inserting an existing tuple is a no-op.
pub struct KeywordCombinationTable;

impl SeedTable for KeywordCombinationTable {
    fn table_name(&self) -> &str {
        "keyword_combinations"
    }

    fn natural_key(&self) -> &[&'static str] {
        &["platform_id", "service_id", "template_id", "country_code", "language"]
    }

    fn get_create_table_sql(&self) -> &str {
        "CREATE TABLE IF NOT EXISTS keyword_combinations (
            id BIGSERIAL PRIMARY KEY,
            platform_id BIGINT NOT NULL REFERENCES platforms(id) ON DELETE CASCADE,
            service_id BIGINT NOT NULL REFERENCES services(id) ON DELETE CASCADE,
            template_id BIGINT NOT NULL REFERENCES keyword_templates(id) ON DELETE CASCADE,
            country_code TEXT NOT NULL,
            language TEXT NOT NULL,
            keyword TEXT NOT NULL,
            keyword_normalized TEXT NOT NULL,
            intent_type TEXT NOT NULL,
            search_volume INTEGER NOT NULL DEFAULT 0,
            competition_score DOUBLE PRECISION NOT NULL DEFAULT 0.5,
            priority_score INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            UNIQUE (platform_id, service_id, template_id, country_code, language)
        )"
    }

    fn get_index_sql(&self) -> &[&'static str] {
        &[
            "CREATE INDEX IF NOT EXISTS keyword_combinations_normalized_idx
                ON keyword_combinations (platform_id, language, keyword_normalized)",
        ]
    }
}
