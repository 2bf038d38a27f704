/// Item registry for user-supplied images
///
/// Every picture the user brings into the app (the model photo, garments,
/// accessories) is held here as a `NamedItem` inside one of the category
/// collections. Items are append-only and removed by id; there is no
/// in-place editing and nothing is persisted across sessions.

/// Encoded image bytes plus their MIME type, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageBlob {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Wardrobe category a `NamedItem` belongs to.
///
/// Tops, bottoms and dresses drive the outfit phase; the remaining four
/// categories are accessories used in the styling phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Top,
    Bottom,
    Dress,
    Shoes,
    Sunglasses,
    Hat,
    Necklace,
}

impl Category {
    /// Categories that feed the accessory styling phase, in display order.
    pub const ACCESSORIES: [Category; 4] = [
        Category::Shoes,
        Category::Sunglasses,
        Category::Hat,
        Category::Necklace,
    ];

    pub fn is_accessory(self) -> bool {
        Self::ACCESSORIES.contains(&self)
    }

    /// Human-readable singular label, used in section titles and logs.
    pub fn label(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Dress => "dress",
            Category::Shoes => "shoes",
            Category::Sunglasses => "sunglasses",
            Category::Hat => "hat",
            Category::Necklace => "necklace",
        }
    }
}

/// A user-supplied image with a display name and a stable identifier.
///
/// Ids come from a monotonic per-process counter, never from the clock,
/// so two rapid uploads can never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedItem {
    pub id: u64,
    pub name: String,
    pub image: ImageBlob,
}

/// One ordered collection per category, each preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct Wardrobe {
    tops: Vec<NamedItem>,
    bottoms: Vec<NamedItem>,
    dresses: Vec<NamedItem>,
    shoes: Vec<NamedItem>,
    sunglasses: Vec<NamedItem>,
    hats: Vec<NamedItem>,
    necklaces: Vec<NamedItem>,
    next_id: u64,
}

impl Wardrobe {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, category: Category) -> &Vec<NamedItem> {
        match category {
            Category::Top => &self.tops,
            Category::Bottom => &self.bottoms,
            Category::Dress => &self.dresses,
            Category::Shoes => &self.shoes,
            Category::Sunglasses => &self.sunglasses,
            Category::Hat => &self.hats,
            Category::Necklace => &self.necklaces,
        }
    }

    fn collection_mut(&mut self, category: Category) -> &mut Vec<NamedItem> {
        match category {
            Category::Top => &mut self.tops,
            Category::Bottom => &mut self.bottoms,
            Category::Dress => &mut self.dresses,
            Category::Shoes => &mut self.shoes,
            Category::Sunglasses => &mut self.sunglasses,
            Category::Hat => &mut self.hats,
            Category::Necklace => &mut self.necklaces,
        }
    }

    /// Append a new item to a category. Always succeeds and returns the
    /// assigned id.
    pub fn add_item(&mut self, category: Category, image: ImageBlob, name: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.collection_mut(category).push(NamedItem {
            id,
            name: name.into(),
            image,
        });

        id
    }

    /// Remove an item by id. Removing an absent id is a no-op, so deletion
    /// is idempotent.
    pub fn remove_item(&mut self, category: Category, id: u64) {
        self.collection_mut(category).retain(|item| item.id != id);
    }

    /// Read view of a category, in insertion order.
    pub fn items(&self, category: Category) -> &[NamedItem] {
        self.collection(category)
    }

    /// Union of all accessory items across the four accessory categories,
    /// in category display order then insertion order.
    pub fn accessory_items(&self) -> Vec<&NamedItem> {
        Category::ACCESSORIES
            .iter()
            .flat_map(|&category| self.collection(category).iter())
            .collect()
    }
}
