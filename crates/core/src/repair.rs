//! Legacy score repair planning.
//!
//! The catalogue can change after rows were written under an older table or
//! with a model-only score. Planning is pure; storage applies the result.

use serde::Serialize;

use crate::resolver::{resolve_score, tier_for_score};
use crate::tier::Tier;

/// Score-relevant columns of a stored row. `tier` is the raw stored text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub id: i64,
    pub cloud_name: String,
    pub score: i64,
    pub tier: String,
}

/// In-place correction for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCorrection {
    pub id: i64,
    pub score: i64,
    pub tier: Tier,
}

/// Outcome of a repair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub changed: usize,
}

impl RepairReport {
    /// Nothing needed fixing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.changed == 0
    }

    #[must_use]
    pub fn message(&self) -> String {
        if self.is_noop() {
            "数据正常".to_owned()
        } else {
            format!("已修复 {} 条数据", self.changed)
        }
    }
}

/// Corrections needed to bring `rows` in line with the current policy.
///
/// Zero-score rows are duplicate sightings whose 0 is intentional and are
/// never touched. Any other row whose score or stored tier text differs from
/// the resolver's answer is corrected.
#[must_use]
pub fn plan_repairs(rows: &[ScoreRow]) -> Vec<ScoreCorrection> {
    rows.iter()
        .filter(|row| row.score != 0)
        .filter_map(|row| {
            let score = resolve_score(&row.cloud_name, row.score);
            let tier = tier_for_score(score);
            (row.score != score || row.tier != tier.as_str())
                .then_some(ScoreCorrection { id: row.id, score, tier })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str, score: i64, tier: &str) -> ScoreRow {
        ScoreRow { id, cloud_name: name.to_owned(), score, tier: tier.to_owned() }
    }

    #[test]
    fn stale_score_is_corrected() {
        let plan = plan_repairs(&[row(1, "夜光云", 90, "UR")]);
        assert_eq!(plan, vec![ScoreCorrection { id: 1, score: 45, tier: Tier::SSR }]);
    }

    #[test]
    fn stale_tier_alone_is_corrected() {
        let plan = plan_repairs(&[row(7, "积云", 10, "ssr")]);
        assert_eq!(plan, vec![ScoreCorrection { id: 7, score: 10, tier: Tier::N }]);
    }

    #[test]
    fn zero_score_rows_are_exempt() {
        assert!(plan_repairs(&[row(3, "夜光云", 0, "garbage")]).is_empty());
    }

    #[test]
    fn consistent_rows_produce_no_plan() {
        let rows = [row(1, "积云", 10, "N"), row(2, "神秘光团", 33, "SR"), row(3, "彩虹", 35, "SR")];
        assert!(plan_repairs(&rows).is_empty());
    }

    #[test]
    fn unknown_species_keeps_its_own_score_but_gets_the_right_tier() {
        let plan = plan_repairs(&[row(4, "神秘光团", 33, "N")]);
        assert_eq!(plan, vec![ScoreCorrection { id: 4, score: 33, tier: Tier::SR }]);
    }

    #[test]
    fn report_messages() {
        assert_eq!(RepairReport { changed: 0 }.message(), "数据正常");
        assert_eq!(RepairReport { changed: 3 }.message(), "已修复 3 条数据");
    }
}
