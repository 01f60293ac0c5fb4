//! Trade report normalization.
//!
//! Several fragments for one trader, side and price created by a single
//! aggressor are reported as one trade with the summed quantity. The report
//! is ordered by `(trader_id, side, price)`, not by execution order.

use alloc::vec::Vec;
use crate::order::{Trade, TradeFragment};

/// Sort and merge the fragments of one submit call.
///
/// Fewer than two fragments come back untouched. Two fragments are sorted
/// but never merged: one match step always yields one fragment per side.
pub fn aggregate(mut fragments: Vec<TradeFragment>) -> Vec<Trade> {
    if fragments.len() < 2 {
        return fragments;
    }

    // Stable, so equal keys stay in execution order.
    fragments.sort_by(|a, b| a.key().cmp(&b.key()));

    if fragments.len() > 2 {
        merge_runs(&mut fragments);
    }

    fragments
}

/// Collapse adjacent fragments with the same key into the first of the run.
fn merge_runs(trades: &mut Vec<Trade>) {
    trades.dedup_by(|next, kept| {
        if next.key() == kept.key() {
            kept.quantity += next.quantity;
            true
        } else {
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use super::*;
    use crate::fixed::{Price, Quantity};
    use crate::order::Side;

    fn frag(trader: &str, side: Side, qty: u64, price: u64) -> TradeFragment {
        TradeFragment::new(trader, side, Quantity(qty), Price(price))
    }

    #[test]
    fn test_empty_and_single_untouched() {
        assert!(aggregate(Vec::new()).is_empty());

        let one = vec![frag("zed", Side::Buy, 3, 10)];
        assert_eq!(aggregate(one.clone()), one);
    }

    #[test]
    fn test_pair_is_sorted_not_merged() {
        let pair = vec![
            frag("bob", Side::Buy, 4, 100),
            frag("alice", Side::Sell, 4, 100),
        ];

        assert_eq!(
            aggregate(pair),
            vec![frag("alice", Side::Sell, 4, 100), frag("bob", Side::Buy, 4, 100)]
        );
    }

    #[test]
    fn test_runs_merge_by_full_key() {
        let raw = vec![
            frag("fay", Side::Buy, 5, 100),
            frag("dan", Side::Sell, 5, 100),
            frag("fay", Side::Buy, 2, 100),
            frag("eve", Side::Sell, 2, 100),
        ];

        assert_eq!(
            aggregate(raw),
            vec![
                frag("dan", Side::Sell, 5, 100),
                frag("eve", Side::Sell, 2, 100),
                frag("fay", Side::Buy, 7, 100),
            ]
        );
    }

    #[test]
    fn test_different_prices_stay_apart() {
        let raw = vec![
            frag("amy", Side::Buy, 1, 101),
            frag("ben", Side::Sell, 1, 101),
            frag("amy", Side::Buy, 2, 100),
            frag("cat", Side::Sell, 2, 100),
        ];

        assert_eq!(
            aggregate(raw),
            vec![
                frag("amy", Side::Buy, 2, 100),
                frag("amy", Side::Buy, 1, 101),
                frag("ben", Side::Sell, 1, 101),
                frag("cat", Side::Sell, 2, 100),
            ]
        );
    }

    #[test]
    fn test_sell_sorts_before_buy_for_same_trader() {
        let raw = vec![
            frag("amy", Side::Buy, 1, 100),
            frag("ben", Side::Sell, 1, 100),
            frag("ben", Side::Buy, 3, 100),
            frag("amy", Side::Sell, 3, 100),
        ];

        let report = aggregate(raw);
        assert_eq!(report[0], frag("amy", Side::Sell, 3, 100));
        assert_eq!(report[1], frag("amy", Side::Buy, 1, 100));
        assert_eq!(report[2], frag("ben", Side::Sell, 1, 100));
        assert_eq!(report[3], frag("ben", Side::Buy, 3, 100));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let raw = vec![
            frag("fay", Side::Buy, 5, 100),
            frag("dan", Side::Sell, 5, 100),
            frag("fay", Side::Buy, 2, 100),
            frag("eve", Side::Sell, 2, 100),
            frag("fay", Side::Buy, 1, 102),
            frag("gus", Side::Sell, 1, 102),
        ];

        let once = aggregate(raw);
        assert_eq!(aggregate(once.clone()), once);
    }
}
