//! Shared record fixtures for the crate's tests.

use crate::Record;

#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct Basic {
    #[field(tags(test = "dummytag", json = "dummy"))]
    pub dummy: String,
    #[field(tags(test = "yummytag"))]
    pub yummy: i64,
    // pub(crate) so sibling test modules can construct Basic; restricted
    // visibility still counts as not exported.
    #[field(tags(test = "hiddentag"))]
    #[allow(dead_code)]
    pub(crate) unexported: u64,
}

#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct Inner {
    #[field(tags(test = "dummytag"))]
    pub dummy: String,
    pub yummy: i64,
}

#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct WithNested {
    pub dummy: String,
    pub nested: Inner,
}

#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct WithReference {
    pub dummy: String,
    pub nested: Option<Inner>,
}

#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct Doubly {
    pub nested: WithNested,
}

/// Destination shape missing `yummy`, for missing-field copy scenarios.
#[derive(Record, Clone, Debug, PartialEq, Default)]
pub struct Short {
    pub dummy: String,
}
