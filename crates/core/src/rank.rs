//! Observer rank derived from the cumulative collection score.

use serde::Serialize;

use crate::species::MAX_POSSIBLE_SCORE;

/// One rung of the progression ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankLevel {
    /// Fraction of [`MAX_POSSIBLE_SCORE`] needed to reach this level.
    pub fraction: f64,
    /// Roman numeral shown as `Lv.<id>`.
    pub id: &'static str,
    pub title: &'static str,
    pub color: &'static str,
}

const fn level(fraction: f64, id: &'static str, title: &'static str, color: &'static str) -> RankLevel {
    RankLevel { fraction, id, title, color }
}

/// Breakpoints with strictly increasing fractions from 0.0 to 1.0.
pub const RANK_LEVELS: &[RankLevel] = &[
    level(0.00, "I", "抬头族", "#95a5a6"),
    level(0.05, "II", "见习观测员", "#27ae60"),
    level(0.15, "III", "天空记录者", "#2980b9"),
    level(0.30, "IV", "追风者", "#2980b9"),
    level(0.50, "V", "云图绘制师", "#8e44ad"),
    level(0.65, "VI", "苍穹之眼", "#8e44ad"),
    level(0.80, "VII", "云端领主", "#f1c40f"),
    level(0.95, "VIII", "天空守护神", "#c0392b"),
    level(1.00, "IX", "气象之神", "#e74c3c"),
];

/// What stands between the user and the next level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextLevel {
    Remaining { id: &'static str, title: &'static str, points_needed: i64 },
    MaxReached,
}

/// Current rank and progress towards the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rank {
    pub id: &'static str,
    pub title: &'static str,
    pub color: &'static str,
    /// Position within the current level, in `[0.0, 1.0]`.
    pub progress: f64,
    pub next: NextLevel,
}

impl Rank {
    /// Tooltip text for the progress bar.
    #[must_use]
    pub fn next_description(&self) -> String {
        match self.next {
            NextLevel::Remaining { id, title, points_needed } => {
                format!("下一级：Lv.{id} {title} (还需 {points_needed} 分)")
            },
            NextLevel::MaxReached => "已达理论极限！".to_owned(),
        }
    }

    #[must_use]
    pub const fn is_max(&self) -> bool {
        matches!(self.next, NextLevel::MaxReached)
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "thresholds are small positive integers well inside f64 precision"
)]
fn threshold(fraction: f64) -> i64 {
    (MAX_POSSIBLE_SCORE as f64 * fraction) as i64
}

/// Rank for a cumulative score.
///
/// The current level is the one before the first breakpoint whose truncated
/// threshold exceeds `total_score`; progress interpolates linearly between the
/// two thresholds.
#[must_use]
pub fn rank_for_score(total_score: i64) -> Rank {
    let mut previous: Option<(&RankLevel, i64)> = None;
    for candidate in RANK_LEVELS {
        let target = threshold(candidate.fraction);
        if total_score < target {
            let (current, floor) = previous.unwrap_or((candidate, 0));
            return Rank {
                id: current.id,
                title: current.title,
                color: current.color,
                progress: interpolate(total_score, floor, target),
                next: NextLevel::Remaining {
                    id: candidate.id,
                    title: candidate.title,
                    points_needed: target - total_score,
                },
            };
        }
        previous = Some((candidate, target));
    }

    // RANK_LEVELS is a non-empty const table.
    let top = RANK_LEVELS[RANK_LEVELS.len() - 1];
    Rank { id: top.id, title: top.title, color: top.color, progress: 1.0, next: NextLevel::MaxReached }
}

#[allow(clippy::cast_precision_loss, reason = "scores are far below 2^52")]
fn interpolate(value: i64, floor: i64, ceiling: i64) -> f64 {
    if ceiling <= floor {
        return 0.0;
    }
    ((value - floor) as f64 / (ceiling - floor) as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_strictly_increase_from_zero_to_one() {
        assert!((RANK_LEVELS[0].fraction - 0.0).abs() < f64::EPSILON);
        assert!((RANK_LEVELS[RANK_LEVELS.len() - 1].fraction - 1.0).abs() < f64::EPSILON);
        for pair in RANK_LEVELS.windows(2) {
            assert!(pair[0].fraction < pair[1].fraction);
        }
    }

    #[test]
    fn zero_score_is_lowest_level_with_no_progress() {
        let rank = rank_for_score(0);
        assert_eq!(rank.id, "I");
        assert_eq!(rank.title, "抬头族");
        assert!(rank.progress.abs() < f64::EPSILON);
        assert_eq!(
            rank.next,
            NextLevel::Remaining { id: "II", title: "见习观测员", points_needed: 68 }
        );
    }

    #[test]
    fn max_score_is_highest_level_complete() {
        let rank = rank_for_score(MAX_POSSIBLE_SCORE);
        assert_eq!(rank.id, "IX");
        assert!((rank.progress - 1.0).abs() < f64::EPSILON);
        assert!(rank.is_max());
        assert_eq!(rank.next_description(), "已达理论极限！");
    }

    #[test]
    fn exact_threshold_promotes() {
        // 5% of 1375 = 68.75, truncated to 68
        assert_eq!(rank_for_score(67).id, "I");
        let rank = rank_for_score(68);
        assert_eq!(rank.id, "II");
        assert!(rank.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn progress_interpolates_within_level() {
        // level II spans 68..206
        let rank = rank_for_score(137);
        assert_eq!(rank.id, "II");
        assert!((rank.progress - 0.5).abs() < 1e-9);
        assert_eq!(rank.next_description(), "下一级：Lv.III 天空记录者 (还需 69 分)");
    }

    #[test]
    fn one_below_max_is_guardian() {
        let rank = rank_for_score(MAX_POSSIBLE_SCORE - 1);
        assert_eq!(rank.id, "VIII");
        assert!(!rank.is_max());
    }
}
