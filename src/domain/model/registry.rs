//! TableRegistry: the ordered set of tables the seeder creates and fills.

use crate::domain::model::{
    KeywordCombinationTable, KeywordTemplateTable, NaturalPhraseTable, PlatformTable, SeedTable,
    SeoTemplateTable, ServiceTable,
};
use std::sync::Arc;

/// Tables in dependency order (referenced tables first).
pub struct TableRegistry {
    tables: Vec<Arc<dyn SeedTable>>,
}

impl TableRegistry {
    /// Creates a new empty TableRegistry.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// The registry of every table owned by the keyword seeder.
    pub fn keyword_seeding() -> Self {
        let mut reg = Self::new();
        reg.register(PlatformTable);
        reg.register(ServiceTable);
        reg.register(KeywordTemplateTable);
        reg.register(SeoTemplateTable);
        reg.register(NaturalPhraseTable);
        reg.register(KeywordCombinationTable);
        reg
    }

    /// Appends a table; registration order is creation order.
    pub fn register<T: SeedTable + 'static>(&mut self, table: T) {
        self.tables.push(Arc::new(table));
    }

    /// Retrieves a table by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn SeedTable>> {
        self.tables.iter().find(|t| t.table_name() == name).cloned()
    }

    /// Returns all registered table names, in creation order.
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.table_name()).collect()
    }

    /// Returns every DDL statement (tables, then their indexes) in creation order.
    pub fn get_all_create_sql(&self) -> Vec<&str> {
        let mut statements = Vec::new();
        for table in &self.tables {
            statements.push(table.get_create_table_sql());
            statements.extend(table.get_index_sql().iter().copied());
        }
        statements
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
