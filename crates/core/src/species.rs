//! Canonical species catalogue.
//!
//! The catalogue is the ground truth the resolver defends against free-text
//! model output. Entries without an official score are still recognised for
//! bilingual display but never award points.

use serde::Serialize;

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Species {
    /// Canonical Chinese label, as the classifier is asked to return it.
    pub name: &'static str,
    /// English common or Latin name.
    pub english: &'static str,
    /// Official score, `None` for display-only entries.
    pub official_score: Option<i64>,
}

const fn scored(name: &'static str, english: &'static str, score: i64) -> Species {
    Species { name, english, official_score: Some(score) }
}

const fn unscored(name: &'static str, english: &'static str) -> Species {
    Species { name, english, official_score: None }
}

/// The full catalogue in canonical order.
pub const SPECIES: &[Species] = &[
    scored("积云", "Cumulus", 10),
    scored("淡积云", "Cumulus humilis", 10),
    scored("碎积云", "Cumulus fractus", 10),
    scored("层云", "Stratus", 10),
    scored("雾", "Fog", 5),
    scored("飞机尾迹", "Contrail", 5),
    scored("层积云", "Stratocumulus", 15),
    scored("高积云", "Altocumulus", 15),
    scored("高层云", "Altostratus", 15),
    scored("卷云", "Cirrus", 15),
    scored("卷层云", "Cirrostratus", 15),
    scored("雨层云", "Nimbostratus", 20),
    scored("卷积云", "Cirrocumulus", 25),
    scored("积雨云", "Cumulonimbus", 25),
    scored("浓积云", "Cumulus congestus", 20),
    scored("幡状云", "Virga", 25),
    scored("絮状高积云", "Altocumulus floccus", 25),
    scored("波状高积云", "Altocumulus undulatus", 30),
    scored("透光高积云", "Altocumulus translucidus", 30),
    scored("日晕", "Halo", 30),
    scored("彩虹", "Rainbow", 35),
    scored("云隙光", "Crepuscular Rays", 30),
    scored("乳状云", "Mammatus", 35),
    scored("网状云", "Lacunosus", 35),
    scored("堡状高积云", "Altocumulus castellanus", 35),
    scored("幻日", "Sun Dog", 35),
    scored("反云隙光", "Anticrepuscular Rays", 35),
    scored("双彩虹", "Double Rainbow", 40),
    scored("荚状云", "Lenticularis", 40),
    scored("虹彩云", "Iridescence", 40),
    scored("糙面云", "Asperitas", 45),
    scored("夜光云", "Noctilucent", 45),
    scored("滚轴云", "Roll Cloud", 45),
    scored("管状云", "Tube Cloud", 45),
    scored("珠母云", "Nacreous", 50),
    scored("马蹄云", "Horseshoe Vortex", 50),
    scored("雨幡洞", "Fallstreak Hole", 50),
    scored("开尔文-赫姆霍兹波", "Kelvin-Helmholtz", 55),
    scored("海啸云", "Shelf Cloud", 55),
    scored("火彩虹", "Circumhorizontal Arc", 60),
    scored("红色精灵", "Red Sprite", 80),
    scored("史蒂夫现象", "STEVE", 80),
    unscored("密卷云", "Cirrus spissatus"),
    unscored("钩卷云", "Cirrus uncinus"),
];

/// Number of species that carry an official score.
pub const CANONICAL_SPECIES_COUNT: usize = count_scored();

/// Sum of every official score; the denominator of rank progress.
pub const MAX_POSSIBLE_SCORE: i64 = sum_scores();

const fn count_scored() -> usize {
    let mut count = 0;
    let mut i = 0;
    while i < SPECIES.len() {
        if SPECIES[i].official_score.is_some() {
            count += 1;
        }
        i += 1;
    }
    count
}

const fn sum_scores() -> i64 {
    let mut total = 0;
    let mut i = 0;
    while i < SPECIES.len() {
        if let Some(score) = SPECIES[i].official_score {
            total += score;
        }
        i += 1;
    }
    total
}

/// Catalogue entry for an exact label.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.name == name)
}

/// Official score for an exact label.
#[must_use]
pub fn official_score(name: &str) -> Option<i64> {
    lookup(name).and_then(|s| s.official_score)
}

/// English name for an exact label.
#[must_use]
pub fn english_name(name: &str) -> Option<&'static str> {
    lookup(name).map(|s| s.english)
}

/// Scored entries only, in canonical order.
pub fn scored_species() -> impl Iterator<Item = (&'static str, i64)> {
    SPECIES.iter().filter_map(|s| s.official_score.map(|score| (s.name, score)))
}
