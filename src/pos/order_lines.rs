use std::collections::HashMap;

use super::combo::{ComboSequence, parse_combo_field};
use super::tax::{price_from_inclusive, round2};

/// One client-submitted cart entry.
#[derive(Debug, Clone)]
pub struct CartEntry {
    pub product_id: i64,
    pub quantity: f64,
    pub unit_price_inc_tax: f64,
}

/// Pricing snapshot for one catalog product, taken from its primary
/// variation before expansion starts.
#[derive(Debug, Clone)]
pub struct PricedProduct {
    pub variation_id: Option<i64>,
    pub sell_price_inc_tax: f64,
    pub tax_percent: Option<f64>,
    /// Raw `combo` column value, defensively parsed during expansion.
    pub combo: Option<String>,
}

/// In-memory product/variation lookup for one tenant, prefetched by the
/// service so cart expansion stays pure.
#[derive(Debug, Default)]
pub struct ProductIndex {
    products: HashMap<i64, PricedProduct>,
}

impl ProductIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product_id: i64, priced: PricedProduct) {
        self.products.insert(product_id, priced);
    }

    pub fn get(&self, product_id: i64) -> Option<&PricedProduct> {
        self.products.get(&product_id)
    }
}

/// One transaction line ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLine {
    pub product_id: i64,
    pub variation_id: Option<i64>,
    pub quantity: f64,
    pub unit_price_exc_tax: f64,
    pub unit_price_inc_tax: f64,
    pub tax_amount: f64,
    pub combo_group_id: Option<String>,
}

/// Expands a cart into transaction lines.
///
/// Combo products produce one line per component, each priced from the
/// component's own variation, all carrying the parent's quantity and a
/// shared, freshly minted combo-group id. Non-combo products keep the
/// client-submitted inclusive price. A missing product or variation
/// degrades to a zero price and no variation reference rather than
/// failing the order.
pub fn expand_cart(cart: &[CartEntry], index: &ProductIndex) -> Vec<NewLine> {
    let mut seq = ComboSequence::new();
    let mut lines = Vec::with_capacity(cart.len());

    for entry in cart {
        let product = index.get(entry.product_id);
        let component_ids =
            product.and_then(|p| parse_combo_field(p.combo.as_deref()));

        match component_ids {
            Some(ids) => {
                let group_id = seq.next_group_id(entry.product_id);
                for component_id in ids {
                    lines.push(component_line(
                        component_id,
                        entry.quantity,
                        index.get(component_id),
                        group_id.clone(),
                    ));
                }
            }
            None => {
                lines.push(simple_line(entry, product));
            }
        }
    }

    lines
}

/// Sum of tax-inclusive line totals, rounded per line.
pub fn lines_total(lines: &[NewLine]) -> f64 {
    round2(
        lines
            .iter()
            .map(|l| round2(l.unit_price_inc_tax * l.quantity))
            .sum(),
    )
}

fn simple_line(entry: &CartEntry, product: Option<&PricedProduct>) -> NewLine {
    match product {
        Some(p) => {
            let pricing =
                price_from_inclusive(entry.unit_price_inc_tax, p.tax_percent, entry.quantity);
            NewLine {
                product_id: entry.product_id,
                variation_id: p.variation_id,
                quantity: entry.quantity,
                unit_price_exc_tax: pricing.unit_price_exc_tax,
                unit_price_inc_tax: pricing.unit_price_inc_tax,
                tax_amount: pricing.tax_amount,
                combo_group_id: None,
            }
        }
        None => zero_line(entry.product_id, entry.quantity, None),
    }
}

fn component_line(
    product_id: i64,
    quantity: f64,
    component: Option<&PricedProduct>,
    group_id: String,
) -> NewLine {
    match component {
        Some(c) => {
            let pricing = price_from_inclusive(c.sell_price_inc_tax, c.tax_percent, quantity);
            NewLine {
                product_id,
                variation_id: c.variation_id,
                quantity,
                unit_price_exc_tax: pricing.unit_price_exc_tax,
                unit_price_inc_tax: pricing.unit_price_inc_tax,
                tax_amount: pricing.tax_amount,
                combo_group_id: Some(group_id),
            }
        }
        None => zero_line(product_id, quantity, Some(group_id)),
    }
}

fn zero_line(product_id: i64, quantity: f64, combo_group_id: Option<String>) -> NewLine {
    NewLine {
        product_id,
        variation_id: None,
        quantity,
        unit_price_exc_tax: 0.0,
        unit_price_inc_tax: 0.0,
        tax_amount: 0.0,
        combo_group_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> ProductIndex {
        let mut idx = ProductIndex::new();
        // Combo 100 = products 10 and 20.
        idx.insert(
            100,
            PricedProduct {
                variation_id: Some(1000),
                sell_price_inc_tax: 5000.0,
                tax_percent: Some(19.0),
                combo: Some("[10,20]".to_string()),
            },
        );
        idx.insert(
            10,
            PricedProduct {
                variation_id: Some(110),
                sell_price_inc_tax: 3000.0,
                tax_percent: Some(19.0),
                combo: None,
            },
        );
        idx.insert(
            20,
            PricedProduct {
                variation_id: Some(120),
                sell_price_inc_tax: 2000.0,
                tax_percent: Some(19.0),
                combo: Some("null".to_string()),
            },
        );
        idx.insert(
            1,
            PricedProduct {
                variation_id: Some(101),
                sell_price_inc_tax: 1000.0,
                tax_percent: Some(19.0),
                combo: None,
            },
        );
        idx
    }

    #[test]
    fn test_simple_item_keeps_client_price() {
        let cart = vec![CartEntry {
            product_id: 1,
            quantity: 2.0,
            unit_price_inc_tax: 1000.0,
        }];
        let lines = expand_cart(&cart, &index());

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert_eq!(line.quantity, 2.0);
        assert_eq!(line.unit_price_inc_tax, 1000.0);
        assert_eq!(line.unit_price_exc_tax, 840.34);
        assert_eq!(line.variation_id, Some(101));
        assert_eq!(line.combo_group_id, None);
        assert_eq!(lines_total(&lines), 2000.0);
    }

    #[test]
    fn test_combo_expands_to_component_lines() {
        let cart = vec![CartEntry {
            product_id: 100,
            quantity: 1.0,
            unit_price_inc_tax: 5000.0,
        }];
        let lines = expand_cart(&cart, &index());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, 10);
        assert_eq!(lines[1].product_id, 20);
        for line in &lines {
            assert_eq!(line.quantity, 1.0);
            assert_eq!(line.combo_group_id.as_deref(), Some("combo_100_1"));
        }
        // Components price from their own variations, not the combo price.
        assert_eq!(lines[0].unit_price_inc_tax, 3000.0);
        assert_eq!(lines[1].unit_price_inc_tax, 2000.0);
    }

    #[test]
    fn test_components_inherit_parent_quantity() {
        let cart = vec![CartEntry {
            product_id: 100,
            quantity: 3.0,
            unit_price_inc_tax: 5000.0,
        }];
        let lines = expand_cart(&cart, &index());
        assert!(lines.iter().all(|l| l.quantity == 3.0));
    }

    #[test]
    fn test_same_combo_twice_gets_distinct_groups() {
        let cart = vec![
            CartEntry {
                product_id: 100,
                quantity: 1.0,
                unit_price_inc_tax: 5000.0,
            },
            CartEntry {
                product_id: 100,
                quantity: 2.0,
                unit_price_inc_tax: 5000.0,
            },
        ];
        let lines = expand_cart(&cart, &index());

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].combo_group_id.as_deref(), Some("combo_100_1"));
        assert_eq!(lines[2].combo_group_id.as_deref(), Some("combo_100_2"));
    }

    #[test]
    fn test_missing_component_degrades_to_zero() {
        let mut idx = index();
        idx.insert(
            200,
            PricedProduct {
                variation_id: Some(1200),
                sell_price_inc_tax: 900.0,
                tax_percent: None,
                combo: Some("10, 999".to_string()),
            },
        );
        let cart = vec![CartEntry {
            product_id: 200,
            quantity: 1.0,
            unit_price_inc_tax: 900.0,
        }];
        let lines = expand_cart(&cart, &idx);

        assert_eq!(lines.len(), 2);
        let missing = &lines[1];
        assert_eq!(missing.product_id, 999);
        assert_eq!(missing.unit_price_inc_tax, 0.0);
        assert_eq!(missing.variation_id, None);
        assert_eq!(missing.combo_group_id.as_deref(), Some("combo_200_1"));
    }

    #[test]
    fn test_unknown_product_degrades_to_zero() {
        let cart = vec![CartEntry {
            product_id: 404,
            quantity: 1.0,
            unit_price_inc_tax: 700.0,
        }];
        let lines = expand_cart(&cart, &index());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].unit_price_inc_tax, 0.0);
        assert_eq!(lines[0].variation_id, None);
    }
}
