#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertEntryRequest {
    pub set_name: String,
    pub url: String,
    /// When `None` the storage engine fills in the insertion time.
    pub timestamp: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntriesRequest {
    pub set_name: String,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRow {
    pub set_name: String,
    pub url: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetSummary {
    pub name: String,
    pub entries: usize,
    pub first_added: String,
    pub last_added: String,
}
