use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{RequiredField, UnknownPriority, ValidationError};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Creation timestamp in milliseconds since the Unix epoch.
id_newtype!(ProductId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Baixa,
    #[serde(rename = "Média")]
    Media,
    Alta,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Baixa, Priority::Media, Priority::Alta];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Baixa => "Baixa",
            Priority::Media => "Média",
            Priority::Alta => "Alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "baixa" => Ok(Priority::Baixa),
            "média" | "media" => Ok(Priority::Media),
            "alta" => Ok(Priority::Alta),
            _ => Err(UnknownPriority(raw.to_string())),
        }
    }
}

// Field names are the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: String,
    #[serde(default)]
    pub prioridade: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comprado: bool,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            image: draft.image,
            price: draft.price,
            prioridade: draft.prioridade,
            description: draft.description,
            comprado: false,
        }
    }

    /// Leading decimal number of the price, the way a browser's `parseFloat` reads it:
    /// `"49,90"` is 49 and `"10 reais"` is 10.
    pub fn price_value(&self) -> Option<f64> {
        let value = leading_decimal(&self.price);
        (!value.is_nan()).then_some(value)
    }

    pub fn display_price(&self) -> String {
        let value = self.price_value().unwrap_or(f64::NAN);
        let shown = if value.is_nan() {
            "NaN".to_string()
        } else if value == f64::INFINITY {
            "Infinity".to_string()
        } else if value == f64::NEG_INFINITY {
            "-Infinity".to_string()
        } else if value == 0.0 {
            "0.00".to_string()
        } else {
            format!("{value:.2}")
        };
        format!("R$ {shown}")
    }

    pub fn toggled(&self) -> Self {
        Self {
            comprado: !self.comprado,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub image: String,
    pub price: String,
    #[serde(default)]
    pub prioridade: Priority,
    #[serde(default)]
    pub description: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        price: impl Into<String>,
        prioridade: Priority,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            price: price.into(),
            prioridade,
            description: description.into(),
        }
    }

    // Whitespace-only values count as present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            (RequiredField::Name, &self.name),
            (RequiredField::Image, &self.image),
            (RequiredField::Price, &self.price),
        ];
        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(ValidationError::MissingField(*field)),
            None => Ok(()),
        }
    }
}

/// Ids that occur more than once, each reported once, in first-seen order.
pub fn duplicate_ids(products: &[Product]) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for product in products {
        if !seen.insert(product.id) && !duplicates.contains(&product.id) {
            duplicates.push(product.id);
        }
    }
    duplicates
}

fn leading_decimal(raw: &str) -> f64 {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub total: usize,
    pub purchased: usize,
    pub percent: f64,
}

impl Progress {
    pub fn of(products: &[Product]) -> Self {
        let total = products.len();
        let purchased = products.iter().filter(|p| p.comprado).count();
        let percent = if total == 0 {
            0.0
        } else {
            purchased as f64 / total as f64 * 100.0
        };
        Self {
            total,
            purchased,
            percent,
        }
    }

    pub fn label(&self) -> String {
        format!("Comprados: {} de {}", self.purchased, self.total)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
