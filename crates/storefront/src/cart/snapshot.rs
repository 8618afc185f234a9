//! Persisted cart layout.
//!
//! The snapshot is a JSON object keyed by the decimal product id:
//!
//! ```json
//! {"3":{"id":3,"name":"Urban Carry Backpack","price":89,"qty":1}}
//! ```
//!
//! Prices are written as JSON numbers carrying the exact decimal digits.
//! Decoding accepts ids and prices written either as numbers or as numeric
//! strings, and drops lines whose quantity is not positive or whose total
//! cannot be represented.

use std::str::FromStr;

use indexmap::IndexMap;
use novabyte_core::ProductId;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::{Cart, CartLineItem};

#[derive(Serialize)]
struct StoredLineRef<'a> {
    id: ProductId,
    name: &'a str,
    #[serde(serialize_with = "price_as_number")]
    price: Decimal,
    qty: u32,
}

#[derive(Deserialize)]
struct StoredLine {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<ProductId>,
    name: String,
    #[serde(deserialize_with = "lenient_price")]
    price: Decimal,
    qty: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

fn price_as_number<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    // Decimal text never uses exponents, so it is always a valid JSON number.
    let number = RawValue::from_string(price.normalize().to_string()).map_err(ser::Error::custom)?;
    number.serialize(serializer)
}

/// An id that is present but not an integer counts as missing.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProductId>, D::Error> {
    let Some(value) = Option::<NumberOrText>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = value.as_text();
    let id = text.parse::<ProductId>().ok();
    if id.is_none() {
        tracing::debug!(id = %text, "Ignoring unparseable stored product id");
    }
    Ok(id)
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    // Read the raw token so number digits reach the decimal parser untouched.
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let text = serde_json::from_str::<String>(raw.get())
        .map_or_else(|_| raw.get().trim().to_string(), |quoted| quoted.trim().to_string());
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| de::Error::custom(format!("invalid price: {text}")))
}

/// Serialize a cart to its persisted text form.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    let lines: IndexMap<String, StoredLineRef<'_>> = cart
        .iter()
        .map(|line| {
            (
                line.id.to_string(),
                StoredLineRef {
                    id: line.id,
                    name: &line.name,
                    price: line.unit_price,
                    qty: line.quantity,
                },
            )
        })
        .collect();
    serde_json::to_string(&lines)
}

/// Parse a persisted cart.
///
/// A line without a usable `id` field takes its id from its key; a line where
/// neither parses is skipped. Quantities above `u32::MAX` are clamped, and a
/// line whose total would overflow the cart total is dropped.
///
/// # Errors
///
/// Returns an error if the text is not a well-formed snapshot.
pub fn decode(raw: &str) -> Result<Cart, serde_json::Error> {
    let stored: IndexMap<String, StoredLine> = serde_json::from_str(raw)?;
    let mut cart = Cart::new();
    let mut total = Decimal::ZERO;

    for (key, line) in stored {
        let Some(id) = line.id.or_else(|| key.parse().ok()) else {
            tracing::debug!(key = %key, "Skipping stored cart line without a usable id");
            continue;
        };
        if line.qty <= 0 {
            tracing::debug!(product_id = %id, qty = line.qty, "Dropping stored cart line with non-positive quantity");
            continue;
        }
        let quantity = u32::try_from(line.qty).unwrap_or_else(|_| {
            tracing::warn!(product_id = %id, qty = line.qty, "Clamping oversized stored cart quantity");
            u32::MAX
        });
        let Some(next_total) = line
            .price
            .checked_mul(Decimal::from(quantity))
            .and_then(|line_total| total.checked_add(line_total))
        else {
            tracing::warn!(product_id = %id, price = %line.price, quantity, "Dropping stored cart line whose total overflows");
            continue;
        };
        total = next_total;
        cart.insert_line(CartLineItem {
            id,
            name: line.name,
            unit_price: line.price,
            quantity,
        });
    }

    Ok(cart)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_encode_layout() {
        let catalog = Catalog::novabyte();
        let mut cart = Cart::new();
        cart.add(catalog.get(ProductId::new(3)).unwrap());

        let raw = encode(&cart).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "3": { "id": 3, "name": "Urban Carry Backpack", "price": 89, "qty": 1 }
            })
        );
    }

    #[test]
    fn test_decode_accepts_string_ids_and_prices() {
        let raw = r#"{"2":{"id":"2","name":"NoiseOff Pro Headphones","price":"149.00","qty":3}}"#;
        let cart = decode(raw).unwrap();

        let line = cart.get(ProductId::new(2)).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Decimal::new(149, 0));
    }

    #[test]
    fn test_decode_falls_back_to_key_for_missing_id() {
        let raw = r#"{"5":{"name":"Thermo Bottle 500ml","price":35,"qty":1},"x":{"name":"?","price":1,"qty":1}}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(5)).is_some());
    }

    #[test]
    fn test_decode_uses_key_when_id_is_not_an_integer() {
        let raw = r#"{"3":{"id":"3.0","name":"Urban Carry Backpack","price":89,"qty":1},"4":{"id":4,"name":"Premium Tech Tee","price":39,"qty":2}}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(3)).unwrap().quantity, 1);
    }

    #[test]
    fn test_decode_clamps_oversized_quantity() {
        let raw = r#"{"1":{"id":1,"name":"A","price":1,"qty":5000000000}}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_decode_drops_lines_whose_total_overflows() {
        let raw = r#"{"1":{"id":1,"name":"Huge","price":"79228162514264337593543950335","qty":2},"2":{"id":2,"name":"Fine","price":"12.50","qty":2}}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(1)).is_none());
        assert_eq!(cart.total_price(), Decimal::new(25, 0));

        let raw = r#"{"1":{"id":1,"name":"A","price":50000000000000000000000000000,"qty":1},"2":{"id":2,"name":"B","price":"50000000000000000000000000000","qty":1}}"#;
        let cart = decode(raw).unwrap();
        let ids: Vec<i32> = cart.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_encode_keeps_every_price_digit() {
        let mut cart = Cart::new();
        cart.insert_line(CartLineItem {
            id: ProductId::new(9),
            name: "Precise".to_string(),
            unit_price: Decimal::from_str("19.999999999999999999").unwrap(),
            quantity: 1,
        });

        let raw = encode(&cart).unwrap();
        assert!(raw.contains(r#""price":19.999999999999999999"#), "{raw}");
        assert_eq!(decode(&raw).unwrap(), cart);
    }

    #[test]
    fn test_decode_drops_non_positive_quantities() {
        let raw = r#"{"1":{"id":1,"name":"A","price":1.5,"qty":0},"2":{"id":2,"name":"B","price":2.25,"qty":-4},"3":{"id":3,"name":"C","price":3,"qty":2}}"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price(), Decimal::new(6, 0));
    }

    #[test]
    fn test_decode_preserves_stored_order() {
        let raw = r#"{"6":{"id":6,"name":"F","price":1,"qty":1},"1":{"id":1,"name":"A","price":1,"qty":1}}"#;
        let cart = decode(raw).unwrap();
        let order: Vec<i32> = cart.iter().map(|l| l.id.as_i32()).collect();
        assert_eq!(order, vec![6, 1]);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(decode("").is_err());
        assert!(decode("[1,2,3]").is_err());
        assert!(decode(r#"{"1":{"id":1}}"#).is_err());
        assert!(decode(r#"{"1":{"id":1,"name":"A","price":"cheap","qty":1}}"#).is_err());
    }

    #[test]
    fn test_random_carts_survive_encode_decode() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let mut cart = Cart::new();
            for _ in 0..rng.random_range(0..6) {
                let id = rng.random_range(1..1000);
                cart.insert_line(CartLineItem {
                    id: ProductId::new(id),
                    name: format!("Item \"{id}\" <b>"),
                    unit_price: Decimal::new(
                        rng.random_range(0..i64::MAX),
                        rng.random_range(0..=20),
                    ),
                    quantity: rng.random_range(1..50),
                });
            }

            let decoded = decode(&encode(&cart).unwrap()).unwrap();
            assert_eq!(decoded, cart);
        }
    }
}
