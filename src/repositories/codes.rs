use std::fmt;

/// Human-readable document codes derived from the row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Product,
    Order,
    Receipt,
    Customer,
}

impl CodeKind {
    pub fn prefix(self) -> &'static str {
        match self {
            CodeKind::Product => "SP",
            CodeKind::Order => "DH",
            CodeKind::Receipt => "NK",
            CodeKind::Customer => "KH",
        }
    }

    pub fn format(self, id: i64) -> String {
        format!("{}{:05}", self.prefix(), id)
    }

    /// Unique throwaway code used between insert and the id being known.
    pub fn placeholder(self) -> String {
        format!("TEMP-{}-{}", self.prefix(), uuid::Uuid::new_v4().simple())
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}
