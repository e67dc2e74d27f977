use crate::foundation::error::{WarpError, WarpResult};
use crate::foundation::random::UniformSource;

/// Visual classification of a streak.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Thin green-blue streak.
    ThinGreenBlue,
    /// Thin multi-colored streak.
    ThinColorful,
    /// Thick red-blue-green streak.
    ThickRedBlueGreen,
}

/// Position-relevant grouping of categories; each family owns one exclusion zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Thin streaks.
    Thin,
    /// Thick streaks.
    Thick,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 3] = [
        Category::ThinGreenBlue,
        Category::ThinColorful,
        Category::ThickRedBlueGreen,
    ];

    /// Family used to pick an exclusion zone.
    pub fn family(self) -> Family {
        match self {
            Category::ThinGreenBlue | Category::ThinColorful => Family::Thin,
            Category::ThickRedBlueGreen => Family::Thick,
        }
    }

    /// Render class handed to the renderer.
    pub fn render_class(self) -> &'static str {
        match self {
            Category::ThinGreenBlue => "thin-greenblue-streak",
            Category::ThinColorful => "thin-colorful-streak",
            Category::ThickRedBlueGreen => "thick-redbluegreen-streak",
        }
    }

    /// Inverse of [`Category::render_class`].
    pub fn from_render_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.render_class() == class)
    }
}

/// Attributes fixed at streak creation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StreakAttributes {
    /// Selected category.
    pub category: Category,
    /// Render class derived from the category.
    pub render_class: &'static str,
}

impl StreakAttributes {
    /// Attributes for a category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            render_class: category.render_class(),
        }
    }
}

/// One row of the cumulative threshold table: draws below `below` select `category`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryBand {
    /// Exclusive upper bound on the `[0, 100)` draw.
    pub below: f64,
    /// Category selected by this band.
    pub category: Category,
}

/// Ordered cumulative thresholds evaluated first-match.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AttributeTable {
    bands: Vec<CategoryBand>,
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self {
            bands: vec![
                CategoryBand {
                    below: 61.0,
                    category: Category::ThinGreenBlue,
                },
                CategoryBand {
                    below: 89.0,
                    category: Category::ThinColorful,
                },
                CategoryBand {
                    below: 100.0,
                    category: Category::ThickRedBlueGreen,
                },
            ],
        }
    }
}

impl AttributeTable {
    /// Build and validate a table.
    pub fn new(bands: Vec<CategoryBand>) -> WarpResult<Self> {
        let table = Self { bands };
        table.validate()?;
        Ok(table)
    }

    /// Bands in evaluation order.
    pub fn bands(&self) -> &[CategoryBand] {
        &self.bands
    }

    /// Tables must be non-empty, strictly increasing and cover the whole `[0, 100)` draw.
    pub fn validate(&self) -> WarpResult<()> {
        let Some(last) = self.bands.last() else {
            return Err(WarpError::validation("category table must not be empty"));
        };
        let mut prev = 0.0;
        for band in &self.bands {
            if !band.below.is_finite() || band.below <= prev {
                return Err(WarpError::validation(
                    "category bounds must be finite and strictly increasing from 0",
                ));
            }
            prev = band.below;
        }
        if last.below < 100.0 {
            return Err(WarpError::validation(
                "last category bound must be >= 100",
            ));
        }
        Ok(())
    }

    /// Classify a draw `r` in `[0, 100)`.
    pub fn classify(&self, r: f64) -> Category {
        self.bands
            .iter()
            .find(|band| r < band.below)
            .or(self.bands.last())
            .map(|band| band.category)
            .unwrap_or(Category::ThinGreenBlue)
    }

    /// Draw one value from `rng` and classify it.
    pub fn select(&self, rng: &mut dyn UniformSource) -> StreakAttributes {
        let r = rng.next_unit() * 100.0;
        StreakAttributes::new(self.classify(r))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/attributes.rs"]
mod tests;
