//! Cost Calculator
//!
//! Pure derivation of every cost in the ingredient → recipe → product chain.
//! Uses rust_decimal for precise calculations, stores as f64.
//!
//! Rounding: line costs and totals round to 2 decimal places (half-up);
//! unit costs keep 4 so a per-gram cost does not collapse to zero.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const MONEY_DECIMALS: u32 = 2;
/// Rounding for unit costs (4 decimal places, half-up)
const UNIT_COST_DECIMALS: u32 = 4;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(MONEY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 4 decimal places
#[inline]
fn to_unit_cost(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(UNIT_COST_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Cost of one unit given the package it is bought in.
///
/// A zero (or negative) package quantity yields zero cost instead of a
/// division error; stock registered without a package size simply does not
/// contribute to recipe costs.
pub fn unit_cost(package_quantity: f64, package_price: f64) -> f64 {
    if package_quantity > 0.0 {
        to_unit_cost(to_decimal(package_price) / to_decimal(package_quantity))
    } else {
        0.0
    }
}

/// Cost of one line: quantity times unit cost
pub fn line_cost(quantity: f64, unit_cost: f64) -> f64 {
    to_money(to_decimal(quantity) * to_decimal(unit_cost))
}

/// Sum monetary values without accumulating float error
pub fn sum_money(values: &[f64]) -> f64 {
    to_money(values.iter().copied().map(to_decimal).sum())
}

/// Margin over the sale price, in percent; zero when there is no sale price
pub fn margin_percent(sale_price: f64, total_cost: f64) -> f64 {
    if sale_price > 0.0 {
        let sale = to_decimal(sale_price);
        let cost = to_decimal(total_cost);
        to_money((sale - cost) / sale * Decimal::ONE_HUNDRED)
    } else {
        0.0
    }
}

/// One line to be costed: a quantity of some referenced component priced at
/// that component's current unit cost.
///
/// `unit_cost` is `None` when the referenced record no longer exists; the
/// line then contributes zero and the label surfaces in the anomaly list.
#[derive(Debug, Clone)]
pub struct CostLine {
    pub label: String,
    pub quantity: f64,
    pub unit_cost: Option<f64>,
}

impl CostLine {
    pub fn new(label: impl Into<String>, quantity: f64, unit_cost: Option<f64>) -> Self {
        Self {
            label: label.into(),
            quantity,
            unit_cost,
        }
    }

    fn cost(&self) -> f64 {
        line_cost(self.quantity, self.unit_cost.unwrap_or(0.0))
    }
}

/// Recomputed costs for one recipe
#[derive(Debug, Clone, Default)]
pub struct RecipeCosts {
    /// Refreshed line costs, in input order
    pub base_costs: Vec<f64>,
    pub per_portion_costs: Vec<f64>,
    /// Cost of one full batch
    pub total_cost: f64,
    /// Cost of one portion
    pub unit_cost: f64,
    /// Labels of lines whose reference is gone (priced at zero)
    pub missing_refs: Vec<String>,
}

/// Aggregate a recipe bottom-up.
///
/// Every line cost is recomputed first so a stale cost from an earlier
/// ingredient price never survives into the sums. Base lines count once per
/// batch; per-portion lines scale with the yield:
///
/// `total = Σ base + portions * Σ per_portion`, `unit = total / portions`
/// (zero-guarded like [`unit_cost`]).
pub fn recipe_costs(portions: i64, base: &[CostLine], per_portion: &[CostLine]) -> RecipeCosts {
    let mut missing_refs = Vec::new();
    let mut collect = |lines: &[CostLine]| -> Vec<f64> {
        lines
            .iter()
            .map(|line| {
                if line.unit_cost.is_none() {
                    missing_refs.push(line.label.clone());
                }
                line.cost()
            })
            .collect()
    };

    let base_costs = collect(base);
    let per_portion_costs = collect(per_portion);

    let base_sum: Decimal = base_costs.iter().copied().map(to_decimal).sum();
    let per_portion_sum: Decimal = per_portion_costs.iter().copied().map(to_decimal).sum();

    let total = base_sum + Decimal::from(portions) * per_portion_sum;
    let unit = if portions > 0 {
        total / Decimal::from(portions)
    } else {
        Decimal::ZERO
    };

    RecipeCosts {
        base_costs,
        per_portion_costs,
        total_cost: to_money(total),
        unit_cost: to_unit_cost(unit),
        missing_refs,
    }
}

/// Recomputed costs for one product
#[derive(Debug, Clone, Default)]
pub struct ProductCosts {
    pub recipe_costs: Vec<f64>,
    pub packaging_costs: Vec<f64>,
    pub total_cost: f64,
    pub missing_refs: Vec<String>,
}

/// Aggregate a product as flat sums over its recipe and packaging lines.
///
/// No yield concept at this level, unlike recipes.
pub fn product_costs(recipe_items: &[CostLine], packaging_items: &[CostLine]) -> ProductCosts {
    let mut missing_refs = Vec::new();
    let mut collect = |lines: &[CostLine]| -> Vec<f64> {
        lines
            .iter()
            .map(|line| {
                if line.unit_cost.is_none() {
                    missing_refs.push(line.label.clone());
                }
                line.cost()
            })
            .collect()
    };

    let recipe_costs = collect(recipe_items);
    let packaging_costs = collect(packaging_items);

    let total: Decimal = recipe_costs
        .iter()
        .chain(packaging_costs.iter())
        .copied()
        .map(to_decimal)
        .sum();

    ProductCosts {
        recipe_costs,
        packaging_costs,
        total_cost: to_money(total),
        missing_refs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cost_zero_quantity_guard() {
        assert_eq!(unit_cost(0.0, 10.0), 0.0);
        assert_eq!(unit_cost(0.0, 0.0), 0.0);
        assert_eq!(unit_cost(-1.0, 10.0), 0.0);
    }

    #[test]
    fn unit_cost_is_price_over_quantity() {
        assert_eq!(unit_cost(2.0, 3.0), 1.5);
        assert_eq!(unit_cost(4.0, 2.0), 0.5);
        // sub-cent unit costs survive the 4-decimal rounding
        assert_eq!(unit_cost(1000.0, 5.0), 0.005);
    }

    #[test]
    fn line_cost_rounds_to_cents() {
        assert_eq!(line_cost(3.0, 0.333), 1.0);
        assert_eq!(line_cost(2.0, 1.5), 3.0);
    }

    #[test]
    fn recipe_base_and_per_portion_split() {
        // portions 4, one base line 2 x 1.5, one per-portion line 1 x 0.5
        // total = 3.0 + 4 * 0.5 = 5.0, unit = 5.0 / 4 = 1.25
        let base = vec![CostLine::new("chocolate", 2.0, Some(1.5))];
        let per_portion = vec![CostLine::new("sprinkles", 1.0, Some(0.5))];
        let costs = recipe_costs(4, &base, &per_portion);

        assert_eq!(costs.base_costs, vec![3.0]);
        assert_eq!(costs.per_portion_costs, vec![0.5]);
        assert_eq!(costs.total_cost, 5.0);
        assert_eq!(costs.unit_cost, 1.25);
        assert!(costs.missing_refs.is_empty());
    }

    #[test]
    fn recipe_zero_portions_guard() {
        let base = vec![CostLine::new("chocolate", 2.0, Some(1.5))];
        let costs = recipe_costs(0, &base, &[]);

        assert_eq!(costs.total_cost, 3.0);
        assert_eq!(costs.unit_cost, 0.0);
    }

    #[test]
    fn recipe_missing_ingredient_prices_at_zero() {
        let base = vec![
            CostLine::new("chocolate", 2.0, Some(1.5)),
            CostLine::new("butter", 1.0, None),
        ];
        let costs = recipe_costs(2, &base, &[]);

        assert_eq!(costs.base_costs, vec![3.0, 0.0]);
        assert_eq!(costs.total_cost, 3.0);
        assert_eq!(costs.missing_refs, vec!["butter".to_string()]);
    }

    #[test]
    fn recipe_empty_lines_cost_nothing() {
        let costs = recipe_costs(6, &[], &[]);
        assert_eq!(costs.total_cost, 0.0);
        assert_eq!(costs.unit_cost, 0.0);
    }

    #[test]
    fn product_flat_sums() {
        // one recipe line 2 x 1.25, one packaging line 1 x 0.30 => 2.80
        let recipe_items = vec![CostLine::new("brigadeiro batch", 2.0, Some(1.25))];
        let packaging_items = vec![CostLine::new("gift box", 1.0, Some(0.30))];
        let costs = product_costs(&recipe_items, &packaging_items);

        assert_eq!(costs.recipe_costs, vec![2.5]);
        assert_eq!(costs.packaging_costs, vec![0.3]);
        assert_eq!(costs.total_cost, 2.8);
        assert!(costs.missing_refs.is_empty());
    }

    #[test]
    fn product_missing_packaging_prices_at_zero() {
        let recipe_items = vec![CostLine::new("batch", 1.0, Some(2.0))];
        let packaging_items = vec![CostLine::new("ribbon", 3.0, None)];
        let costs = product_costs(&recipe_items, &packaging_items);

        assert_eq!(costs.total_cost, 2.0);
        assert_eq!(costs.missing_refs, vec!["ribbon".to_string()]);
    }

    #[test]
    fn sum_money_avoids_float_drift() {
        let values = vec![0.1; 10];
        assert_eq!(sum_money(&values), 1.0);
    }

    #[test]
    fn margin_zero_sale_price_guard() {
        assert_eq!(margin_percent(0.0, 5.0), 0.0);
    }

    #[test]
    fn margin_over_sale_price() {
        assert_eq!(margin_percent(10.0, 4.0), 60.0);
        assert_eq!(margin_percent(8.0, 2.8), 65.0);
    }

    // ========== Precision tests ==========

    #[test]
    fn precision_thirds_round_half_up() {
        // 10 / 3 = 3.3333...
        assert_eq!(unit_cost(3.0, 10.0), 3.3333);
        // 2 x 3.3333 = 6.6666 -> 6.67
        assert_eq!(line_cost(2.0, 3.3333), 6.67);
    }

    #[test]
    fn precision_half_cent_rounds_up() {
        assert_eq!(line_cost(0.5, 0.01), 0.01);
        assert_eq!(line_cost(1.0, 10.005), 10.01);
    }

    #[test]
    fn precision_large_batch() {
        // 250 truffles at 0.1234 each
        let per_portion = vec![CostLine::new("cocoa", 1.0, Some(0.1234))];
        let costs = recipe_costs(250, &[], &per_portion);

        assert_eq!(costs.per_portion_costs, vec![0.12]);
        assert_eq!(costs.total_cost, 30.0);
        assert_eq!(costs.unit_cost, 0.12);
    }
}
