#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Index {
    pub name: String,
    pub table_name: String,
    pub column_names: Vec<String>,
    pub unique: bool,
    pub index_type: String,
}

