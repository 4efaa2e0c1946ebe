// 🏨 Record Model - Lodging offerings and their type tags
//
// The lodging hierarchy is closed: two categories (Travel, Vacation) and
// three concrete unit types. Each kind fixes its (category, subtype) pair
// through a constant table, so a record built from a kind can never carry
// inconsistent tags.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Travel,
    Vacation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Travel => "Travel",
            Category::Vacation => "Vacation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LODGING KIND
// ============================================================================

/// Variant tag of a lodging record.
///
/// `Travel` and `Vacation` are the abstract categories; they can be built
/// directly but normal data uses the three leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LodgingKind {
    Travel,
    Vacation,
    HotelRoom,
    Cottage,
    BeachHouse,
}

/// kind -> (category, subtype)
static KIND_TABLE: [(LodgingKind, Category, &str); 5] = [
    (LodgingKind::Travel, Category::Travel, "Travel"),
    (LodgingKind::Vacation, Category::Vacation, "Vacation"),
    (LodgingKind::HotelRoom, Category::Travel, "HotelRoom"),
    (LodgingKind::Cottage, Category::Vacation, "Cottage"),
    (LodgingKind::BeachHouse, Category::Vacation, "BeachHouse"),
];

impl LodgingKind {
    pub fn all() -> [LodgingKind; 5] {
        KIND_TABLE.map(|(kind, _, _)| kind)
    }

    // KIND_TABLE rows follow the variant declaration order
    fn entry(&self) -> &'static (LodgingKind, Category, &'static str) {
        &KIND_TABLE[*self as usize]
    }

    pub fn category(&self) -> Category {
        self.entry().1
    }

    pub fn subtype(&self) -> &'static str {
        self.entry().2
    }

    /// Concrete unit types (everything except the two abstract categories)
    pub fn is_leaf(&self) -> bool {
        !matches!(self, LodgingKind::Travel | LodgingKind::Vacation)
    }

    /// Look up a kind by its subtype tag ("HotelRoom", "Cottage", ...)
    pub fn parse(tag: &str) -> Option<LodgingKind> {
        let tag = tag.trim();
        KIND_TABLE
            .iter()
            .find(|(_, _, subtype)| *subtype == tag)
            .map(|(kind, _, _)| *kind)
    }
}

impl fmt::Display for LodgingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subtype())
    }
}

// ============================================================================
// RAW LODGING
// ============================================================================

/// One record as it comes out of a source, before any interpretation.
/// Every scalar is optional text; numbers arrive as their decimal text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLodging {
    pub date: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub subtype: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub average_revenue: Option<String>,
}

// ============================================================================
// LODGING RECORD
// ============================================================================

/// A loaded lodging offering. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingRecord {
    /// Sequential id assigned at load time (1-based, input order)
    pub id: u64,
    pub date: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub subtype: Option<String>,
    pub rating: Option<String>,
    pub price: Option<String>,
    pub average_revenue: Option<String>,
}

impl LodgingRecord {
    /// Build a record of a given kind. Category and subtype always come from
    /// the kind table. No validation happens here.
    pub fn new(
        id: u64,
        kind: LodgingKind,
        date: Option<String>,
        name: Option<String>,
        rating: Option<String>,
        price: Option<String>,
        average_revenue: Option<String>,
    ) -> Self {
        LodgingRecord {
            id,
            date,
            name,
            category: Some(kind.category().as_str().to_string()),
            subtype: Some(kind.subtype().to_string()),
            rating,
            price,
            average_revenue,
        }
    }

    /// Build a record from raw source values.
    ///
    /// A recognised subtype goes through [`LodgingRecord::new`], so a
    /// conflicting raw category is replaced. Unknown or missing tags are kept
    /// as given and left to the cleaning stage.
    pub fn from_raw(id: u64, raw: RawLodging) -> Self {
        match raw.subtype.as_deref().and_then(LodgingKind::parse) {
            Some(kind) => LodgingRecord::new(
                id,
                kind,
                raw.date,
                raw.name,
                raw.rating,
                raw.price,
                raw.average_revenue,
            ),
            None => LodgingRecord {
                id,
                date: raw.date,
                name: raw.name,
                category: raw.category,
                subtype: raw.subtype,
                rating: raw.rating,
                price: raw.price,
                average_revenue: raw.average_revenue,
            },
        }
    }

    /// Variant tag, if the subtype is one of the known kinds
    pub fn kind(&self) -> Option<LodgingKind> {
        self.subtype.as_deref().and_then(LodgingKind::parse)
    }
}

/// Flat export form: comma-joined fields, missing values empty.
/// Embedded commas are not escaped.
impl fmt::Display for LodgingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.id,
            text(&self.date),
            text(&self.name),
            text(&self.category),
            text(&self.subtype),
            text(&self.rating),
            text(&self.price),
            text(&self.average_revenue)
        )
    }
}
