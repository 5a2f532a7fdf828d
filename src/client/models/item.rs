/// Whether a report concerns a lost or a found item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKind {
    #[default]
    Lost,
    Found,
}

impl ItemKind {
    /// Wire value of the `type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Lost => "lost",
            ItemKind::Found => "found",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Lost => "Report lost item",
            ItemKind::Found => "Report found item",
        }
    }
}

/// Item categories of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Wallet,
    Key,
    Watch,
    MobilePhone,
    Shoes,
    Card,
    Other,
}

pub const ALL_CATEGORIES: [Category; 7] = [
    Category::Wallet,
    Category::Key,
    Category::Watch,
    Category::MobilePhone,
    Category::Shoes,
    Category::Card,
    Category::Other,
];

impl Category {
    pub fn all() -> &'static [Category] {
        &ALL_CATEGORIES
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Wallet => "wallet",
            Category::Key => "key",
            Category::Watch => "watch",
            Category::MobilePhone => "mobile_phone",
            Category::Shoes => "shoes",
            Category::Card => "card",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Wallet => "Wallet",
            Category::Key => "Key",
            Category::Watch => "Watch",
            Category::MobilePhone => "Mobile phone",
            Category::Shoes => "Shoes",
            Category::Card => "Card",
            Category::Other => "Other",
        };
        write!(f, "{}", s)
    }
}
