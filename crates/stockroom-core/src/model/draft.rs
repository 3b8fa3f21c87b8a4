// ── Edit form draft ──
//
// The edit dialog works on free text. A `ProductDraft` holds that text and
// turns it back into a `Product` once every field validates.

use std::fmt;

use super::product::{Price, Product, normalize_price};

/// Editable fields, in dialog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Category,
    Price,
    Quantity,
}

impl DraftField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Category, Self::Price, Self::Quantity];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Price => "Price",
            Self::Quantity => "Quantity",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Category => Self::Price,
            Self::Price => Self::Quantity,
            Self::Quantity => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Quantity,
            Self::Category => Self::Name,
            Self::Price => Self::Category,
            Self::Quantity => Self::Price,
        }
    }
}

/// Per-field validation messages, in dialog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors(Vec<(DraftField, &'static str)>);

impl DraftErrors {
    pub fn get(&self, field: DraftField) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &'static str)> + '_ {
        self.0.iter().copied()
    }

    fn push(&mut self, field: DraftField, message: &'static str) {
        self.0.push((field, message));
    }
}

impl fmt::Display for DraftErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(|(_, m)| *m).collect();
        f.write_str(&joined.join("; "))
    }
}

impl std::error::Error for DraftErrors {}

/// Text contents of the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Category => &self.category,
            DraftField::Price => &self.price,
            DraftField::Quantity => &self.quantity,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Category => self.category = value,
            DraftField::Price => self.price = value,
            DraftField::Quantity => self.quantity = value,
        }
    }

    pub fn validate(&self) -> Result<(), DraftErrors> {
        let mut errors = DraftErrors::default();

        if self.name.trim().is_empty() {
            errors.push(DraftField::Name, "Name is required");
        }
        if self.category.trim().is_empty() {
            errors.push(DraftField::Category, "Category is required");
        }

        let price = self.price.trim();
        if price.is_empty() {
            errors.push(DraftField::Price, "Price is required");
        } else if price.starts_with('-') {
            errors.push(DraftField::Price, "Price must be positive");
        }

        let quantity = self.quantity.trim();
        if quantity.is_empty() {
            errors.push(DraftField::Quantity, "Quantity is required");
        } else if let Err(message) = parse_quantity(quantity) {
            errors.push(DraftField::Quantity, message);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and produce the edited product. Identity and disabled
    /// state come from `base`; the price is stored in numeric form.
    pub fn apply(&self, base: &Product) -> Result<Product, DraftErrors> {
        self.validate()?;
        let quantity = parse_quantity(self.quantity.trim()).unwrap_or(0);
        Ok(Product {
            id: base.id.clone(),
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            price: Price::Amount(normalize_price(&self.price)),
            quantity,
            is_disabled: base.is_disabled,
        })
    }
}

fn parse_quantity(raw: &str) -> Result<u32, &'static str> {
    match raw.parse::<i64>() {
        Ok(n) if n < 0 => Err("Quantity must be positive"),
        Ok(n) => u32::try_from(n).map_err(|_| "Quantity is too large"),
        Err(_) => Err("Quantity must be a whole number"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Product {
        Product::new("Bluetooth", "Electronic", "$150", 5)
    }

    #[test]
    fn round_trips_an_unchanged_product() {
        let p = base();
        let edited = ProductDraft::from_product(&p).apply(&p).unwrap();
        assert_eq!(edited.id, p.id);
        assert_eq!(edited.price, Price::Amount(150.0));
        assert_eq!(edited.quantity, 5);
    }

    #[test]
    fn reports_every_failing_field() {
        let draft = ProductDraft {
            name: "  ".into(),
            category: String::new(),
            price: "-3".into(),
            quantity: "-1".into(),
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(DraftField::Name), Some("Name is required"));
        assert_eq!(errors.get(DraftField::Category), Some("Category is required"));
        assert_eq!(errors.get(DraftField::Price), Some("Price must be positive"));
        assert_eq!(errors.get(DraftField::Quantity), Some("Quantity must be positive"));
    }

    #[test]
    fn rejects_fractional_quantity() {
        let mut draft = ProductDraft::from_product(&base());
        draft.set_field(DraftField::Quantity, "2.5");
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get(DraftField::Quantity),
            Some("Quantity must be a whole number")
        );
    }

    #[test]
    fn rename_keeps_identity_and_disabled_state() {
        let mut p = base();
        p.is_disabled = true;
        let mut draft = ProductDraft::from_product(&p);
        draft.set_field(DraftField::Name, "Bluetooth Speaker");
        let edited = draft.apply(&p).unwrap();
        assert_eq!(edited.id.as_str(), "Bluetooth");
        assert_eq!(edited.name, "Bluetooth Speaker");
        assert!(edited.is_disabled);
    }

    #[test]
    fn field_cycle_wraps() {
        let mut f = DraftField::Name;
        for _ in 0..DraftField::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, DraftField::Name);
        assert_eq!(DraftField::Name.prev(), DraftField::Quantity);
    }
}
