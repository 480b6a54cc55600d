//! Portfolio aggregation
//!
//! Derived amounts and totals over provider collections. Amounts arrive in
//! minor units and are divided by 100; totals are plain `f64` sums taken in
//! collection order and always recomputed from the full collection.

use serde::Serialize;

use crate::provider::{Asset, Earning};

/// Purchase amount of one asset: `(cost / 100) * quantity`
pub fn purchase_amount(asset: &Asset) -> f64 {
    (asset.cost / 100.0) * asset.quantity
}

/// Major-unit amount of one earning
pub fn earning_amount(earning: &Earning) -> f64 {
    earning.amount / 100.0
}

/// Sum starts at `+0.0`; `Iterator::sum` over nothing yields `-0.0`
pub fn total_purchase_amount(assets: &[Asset]) -> f64 {
    assets.iter().map(purchase_amount).fold(0.0, |acc, x| acc + x)
}

pub fn total_earnings(earnings: &[Earning]) -> f64 {
    earnings.iter().map(earning_amount).fold(0.0, |acc, x| acc + x)
}

/// Both dashboard totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_purchase_amount: f64,
    pub total_earnings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::{asset, earning};

    #[test]
    fn test_purchase_amount() {
        assert_eq!(purchase_amount(&asset("AAPL", 10000.0, 2.0)), 200.0);
        assert_eq!(purchase_amount(&asset("FRAC", 1250.0, 0.5)), 6.25);
    }

    #[test]
    fn test_total_purchase_amount() {
        let assets = vec![asset("A", 10000.0, 2.0), asset("B", 5000.0, 1.0)];
        assert_eq!(total_purchase_amount(&assets), 250.0);
    }

    #[test]
    fn test_total_earnings() {
        let earnings = vec![earning("one", 100000.0), earning("two", 50000.0)];
        assert_eq!(total_earnings(&earnings), 1500.0);
    }

    #[test]
    fn test_empty_collections_total_zero() {
        assert_eq!(total_purchase_amount(&[]), 0.0);
        assert_eq!(total_earnings(&[]), 0.0);
        assert!(total_purchase_amount(&[]).is_sign_positive());
        assert!(total_earnings(&[]).is_sign_positive());
    }

    #[test]
    fn test_total_matches_elementwise_sum() {
        let assets: Vec<Asset> = (1..=20)
            .map(|i| asset("X", 333.0 * i as f64, i as f64 / 3.0))
            .collect();

        let mut expected = 0.0;
        for a in &assets {
            expected += (a.cost / 100.0) * a.quantity;
        }
        assert_eq!(total_purchase_amount(&assets), expected);
    }
}
