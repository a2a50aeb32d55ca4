//! Badge achievements unlocked by collecting particular species.

use std::collections::BTreeSet;

use serde::Serialize;

/// How many of a badge's species must be collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum UnlockRule {
    AtLeast(usize),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub species: &'static [&'static str],
    pub rule: UnlockRule,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        name: "👶 萌新入坑",
        icon: "🌱",
        description: "收集积云、层云或飞机尾迹中的任意 2 种",
        species: &["积云", "层云", "飞机尾迹"],
        rule: UnlockRule::AtLeast(2),
    },
    Achievement {
        name: "☔ 暴雨将至",
        icon: "🌧️",
        description: "收集积雨云、雨层云等预示降水的云 (任意 2 种)",
        species: &["积雨云", "雨层云", "碎积云"],
        rule: UnlockRule::AtLeast(2),
    },
    Achievement {
        name: "☁️ 云端漫步",
        icon: "🕊️",
        description: "集齐所有高云族 (卷云系列)",
        species: &["卷云", "卷积云", "卷层云"],
        rule: UnlockRule::All,
    },
    Achievement {
        name: "🌈 光之美学",
        icon: "🌈",
        description: "收集 3 种以上的大气光学现象",
        species: &["彩虹", "双彩虹", "日晕", "虹彩云", "云隙光"],
        rule: UnlockRule::AtLeast(3),
    },
    Achievement {
        name: "⛈️ 风暴领主",
        icon: "⚡",
        description: "收集 2 种以上的风暴伴生云",
        species: &["积雨云", "乳状云", "海啸云", "糙面云"],
        rule: UnlockRule::AtLeast(2),
    },
    Achievement {
        name: "👽 异星来客",
        icon: "🛸",
        description: "收集 1 种形状极其怪异的云",
        species: &["荚状云", "马蹄云", "开尔文-赫姆霍兹波", "滚轴云"],
        rule: UnlockRule::AtLeast(1),
    },
];

/// Missing species listed in a locked badge's tooltip.
const MISSING_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    pub owned: usize,
    pub required: usize,
    pub missing: Vec<&'static str>,
}

impl AchievementStatus {
    #[must_use]
    pub fn tooltip(&self) -> String {
        if self.unlocked {
            return format!("【已解锁】{}", self.description);
        }
        let mut text = format!("【未解锁】还需收集：{}", self.missing.join("、"));
        if self.required - self.owned > self.missing.len() {
            text.push_str("...");
        }
        text
    }
}

impl Achievement {
    #[must_use]
    pub fn evaluate(&self, collected: &BTreeSet<String>) -> AchievementStatus {
        let owned = self.species.iter().filter(|s| collected.contains(**s)).count();
        let unlocked = match self.rule {
            UnlockRule::AtLeast(n) => owned >= n,
            UnlockRule::All => owned == self.species.len(),
        };
        let missing = self
            .species
            .iter()
            .copied()
            .filter(|s| !collected.contains(*s))
            .take(MISSING_PREVIEW)
            .collect();
        AchievementStatus {
            name: self.name,
            icon: self.icon,
            description: self.description,
            unlocked,
            owned,
            required: self.species.len(),
            missing,
        }
    }
}

#[must_use]
pub fn evaluate_achievements(collected: &BTreeSet<String>) -> Vec<AchievementStatus> {
    ACHIEVEMENTS.iter().map(|a| a.evaluate(collected)).collect()
}
