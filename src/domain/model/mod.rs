//! Domain model for the keyword seeding tables.

pub mod language;
pub mod platform;
pub mod records;
pub mod registry;
pub mod tables;

pub use language::Language;
pub use platform::Platform;
pub use records::{
    Country, IntentType, KeywordCombination, NaturalPhrase, PhraseTemplate, SeoTemplate, Service,
    Stored, Translations, INITIAL_COMPETITION,
};
pub use registry::TableRegistry;
pub use tables::{
    KeywordCombinationTable, KeywordTemplateTable, NaturalPhraseTable, PlatformTable,
    SeoTemplateTable, ServiceTable,
};

/// Contract for every table the seeder owns.
///
/// Each table describes its DDL and the natural unique key that upserts
/// conflict on, so write paths never need a read-before-write check.
pub trait SeedTable: Send + Sync {
    /// Returns the name of the database table.
    fn table_name(&self) -> &str;

    /// Columns forming the natural unique key (the `ON CONFLICT` target).
    fn natural_key(&self) -> &[&'static str];

    /// Returns the `CREATE TABLE IF NOT EXISTS` statement for this table.
    fn get_create_table_sql(&self) -> &str;

    /// Extra statements (indexes) executed after the table exists.
    fn get_index_sql(&self) -> &[&'static str] {
        &[]
    }
}
