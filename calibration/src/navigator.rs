use crate::states::{Capabilities, Category};
use heapless::Vec;

/// Cycles through the categories that exist on this mount.
///
/// The list is built once from the capability flags and never changes.
#[derive(Debug, Clone)]
pub struct Navigator {
    categories: Vec<Category, 10>,
}

impl Navigator {
    pub fn new(capabilities: Capabilities) -> Self {
        let mut categories = Vec::new();
        for category in Category::ALL {
            if category.is_available(capabilities) {
                // Capacity matches Category::ALL
                let _ = categories.push(category);
            }
        }
        log::debug!("Calibration categories: {:?}", categories);
        Navigator { categories }
    }

    pub fn first(&self) -> Category {
        self.categories.first().copied().unwrap_or(Category::Polar)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Move `dir` entries away from `from`, wrapping at both ends.
    pub fn advance(&self, from: Category, dir: i32) -> Category {
        let count = self.categories.len() as i32;
        if count == 0 {
            return from;
        }
        let index = self
            .categories
            .iter()
            .position(|category| *category == from)
            .unwrap_or(0) as i32;
        self.categories[(index + dir).rem_euclid(count) as usize]
    }
}
