//! Column layout of a scenario sheet
//!
//! The workbook template addresses its scenario block positionally: labels
//! in column B, Base/Upside/Downside in C/D/E. [`ColumnLayout`] names those
//! positions so a differently laid out template only needs new indices.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// Zero-based column positions used by the parser and model reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Row label
    pub label_col: usize,
    /// Base scenario value
    pub base_col: usize,
    /// Upside scenario value
    pub upside_col: usize,
    /// Downside scenario value
    pub downside_col: usize,
    /// Value read for plain `Inputs` rows outside the scenario block
    pub input_value_col: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            label_col: 1,
            base_col: 2,
            upside_col: 3,
            downside_col: 4,
            input_value_col: 4,
        }
    }
}

impl ColumnLayout {
    /// Create a validated layout
    pub fn new(
        label_col: usize,
        base_col: usize,
        upside_col: usize,
        downside_col: usize,
    ) -> Result<Self, LayoutError> {
        let layout = Self {
            label_col,
            base_col,
            upside_col,
            downside_col,
            input_value_col: downside_col,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Create a validated layout from column letters, e.g. `("B", "C", "D", "E")`
    pub fn from_letters(label: &str, base: &str, upside: &str, downside: &str) -> Result<Self, LayoutError> {
        Self::new(
            column_index(label)?,
            column_index(base)?,
            column_index(upside)?,
            column_index(downside)?,
        )
    }

    /// With a different column for plain input values
    #[must_use]
    pub fn with_input_value_col(mut self, col: usize) -> Self {
        self.input_value_col = col;
        self
    }

    /// Check that the label and scenario columns are pairwise distinct.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let roles = [
            ("label", self.label_col),
            ("base", self.base_col),
            ("upside", self.upside_col),
            ("downside", self.downside_col),
        ];

        for (i, (first, a)) in roles.iter().enumerate() {
            for (second, b) in &roles[i + 1..] {
                if a == b {
                    return Err(LayoutError::DuplicateColumn {
                        first: *first,
                        second: *second,
                        index: *a,
                    });
                }
            }
        }

        if self.input_value_col == self.label_col {
            return Err(LayoutError::DuplicateColumn {
                first: "label",
                second: "input_value",
                index: self.label_col,
            });
        }

        Ok(())
    }
}

/// Zero-based index of a column letter reference (`"A"` → 0, `"AA"` → 26).
pub fn column_index(letters: &str) -> Result<usize, LayoutError> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LayoutError::InvalidColumn(letters.to_string()));
    }

    let mut index = 0usize;
    for c in trimmed.chars() {
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| LayoutError::InvalidColumn(letters.to_string()))?;
    }
    Ok(index - 1)
}
