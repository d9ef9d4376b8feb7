pub mod v1 {
    pub mod entry_registered;
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum EntryEvent {
    EntryRegisteredV1(v1::entry_registered::EntryRegisteredV1),
}
