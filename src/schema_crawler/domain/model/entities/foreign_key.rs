use crate::schema_crawler::domain::model::enums::referential_action::ReferentialAction;

/// One (constraint, column) pair of a foreign key. Composite constraints
/// yield several entries sharing `name`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ForeignKey {
    pub name: String,
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub update_rule: ReferentialAction,
    pub delete_rule: ReferentialAction,
}
